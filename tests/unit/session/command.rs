//! Tests for the script command grammar

#[cfg(test)]
mod tests {
    use tilepaint::TilepaintError;
    use tilepaint::canvas::color::Rgb;
    use tilepaint::canvas::glyph::GlyphId;
    use tilepaint::io::configuration::{PINK, TEAL};
    use tilepaint::session::command::{Command, parse_script};

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    // Tests coordinate commands parse their arguments
    // Verified by swapping x and y
    #[test]
    fn test_coordinate_commands() {
        assert_eq!(parse("place 3 4"), Command::Place { x: 3, y: 4 });
        assert_eq!(parse("ERASE -1 20"), Command::Erase { x: -1, y: 20 });
        assert_eq!(parse("paint 12.5 99"), Command::Paint { px: 12.5, py: 99.0 });
        assert_eq!(parse("rub 0 0"), Command::Rub { px: 0.0, py: 0.0 });
        assert_eq!(
            parse("  resize 800   600 "),
            Command::Resize {
                width: 800,
                height: 600
            }
        );
    }

    // Tests selection commands accept literals and palette names
    // Verified by only accepting hex colours
    #[test]
    fn test_selection_commands() {
        assert_eq!(
            parse("glyph e"),
            Command::SelectGlyph(GlyphId::new('E').unwrap())
        );
        assert_eq!(parse("color #84DADE"), Command::SelectColor(TEAL));
        assert_eq!(parse("colour pink"), Command::SelectColor(PINK));
        assert_eq!(
            parse("color rgb(1,2,3)"),
            Command::SelectColor(Rgb::new(1, 2, 3))
        );
    }

    // Tests switches and bare commands
    // Verified by treating any argument as on
    #[test]
    fn test_switches() {
        assert_eq!(parse("random on"), Command::SetRandom(true));
        assert_eq!(parse("grid off"), Command::SetGrid(false));
        assert_eq!(parse("debug true"), Command::SetDebug(true));
        assert_eq!(parse("clear"), Command::Clear);
        assert_eq!(parse("export"), Command::Export);
        assert_eq!(parse("snapshot"), Command::Snapshot);
    }

    // Tests blank and comment lines produce no command
    // Verified by parsing comments as unknown commands
    #[test]
    fn test_blank_and_comments() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   \t").unwrap(), None);
        assert_eq!(Command::parse("# color #000").unwrap(), None);
    }

    // Tests malformed lines are script errors
    // Verified by ignoring extra arguments
    #[test]
    fn test_malformed_lines() {
        for line in [
            "jump 1 2",
            "place 1",
            "place 1 2 3",
            "place a b",
            "clear now",
            "glyph EQ",
            "random maybe",
            "export all",
        ] {
            assert!(
                matches!(Command::parse(line), Err(TilepaintError::Script { .. })),
                "accepted {line:?}"
            );
        }
        assert!(matches!(
            Command::parse("color mauve"),
            Err(TilepaintError::InvalidColor { .. })
        ));
    }

    // Tests scripts keep line numbers across skipped lines
    // Verified by numbering only non-empty lines
    #[test]
    fn test_parse_script_numbers() {
        let script = "# header\nglyph Q\n\nplace 1 1\n  # note\nexport\n";
        let commands = parse_script(script).unwrap();

        let lines: Vec<usize> = commands.iter().map(|(line, _)| *line).collect();
        assert_eq!(lines, vec![2, 4, 6]);
        assert_eq!(commands.last().map(|(_, c)| *c), Some(Command::Export));
    }

    // Tests the first bad line aborts with its number
    // Verified by reporting the last bad line
    #[test]
    fn test_parse_script_error_line() {
        let script = "place 1 1\ncolor #12\nplace x y\n";
        let error = parse_script(script).unwrap_err();
        assert!(matches!(error, TilepaintError::Script { line: 2, .. }));
        assert!(error.to_string().contains("#12"));
    }
}
