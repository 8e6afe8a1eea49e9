//! Line-oriented command grammar for driving a session
//!
//! One command per line. Blank lines and lines starting with `#` are
//! ignored, so colour literals such as `color #84DADE` stay unambiguous.

use std::fmt::Display;
use std::str::FromStr;

use crate::canvas::color::Rgb;
use crate::canvas::glyph::GlyphId;
use crate::io::configuration::{BLACK, PINK, TEAL};
use crate::io::error::{Result, WithContext, script_error};

/// One editing action on a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Place the active glyph at a grid cell, clamped to the interior
    Place {
        /// Grid column
        x: i64,
        /// Grid row
        y: i64,
    },
    /// Empty a grid cell, clamped to the interior
    Erase {
        /// Grid column
        x: i64,
        /// Grid row
        y: i64,
    },
    /// Place at the cell under a pointer position in viewport pixels
    Paint {
        /// Horizontal pointer position
        px: f64,
        /// Vertical pointer position
        py: f64,
    },
    /// Erase at the cell under a pointer position in viewport pixels
    Rub {
        /// Horizontal pointer position
        px: f64,
        /// Vertical pointer position
        py: f64,
    },
    /// Empty every cell
    Clear,
    /// Resize the viewport, in pixels
    Resize {
        /// New viewport width
        width: i64,
        /// New viewport height
        height: i64,
    },
    /// Make a glyph the active one
    SelectGlyph(GlyphId),
    /// Make a colour the active one
    SelectColor(Rgb),
    /// Switch random glyph placement
    SetRandom(bool),
    /// Switch the grid overlay in composition and export
    SetGrid(bool),
    /// Switch per-cell debug labels
    SetDebug(bool),
    /// Export the painted region
    Export,
    /// Rasterize the live view
    Snapshot,
}

impl Command {
    /// Parse one script line
    ///
    /// Returns `None` for blank and comment lines.
    ///
    /// # Errors
    ///
    /// Returns a script error for unknown commands, missing or extra
    /// arguments, and arguments that do not parse.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match verb.to_ascii_lowercase().as_str() {
            "place" => {
                let (x, y) = pair(verb, &args)?;
                Self::Place { x, y }
            }
            "erase" => {
                let (x, y) = pair(verb, &args)?;
                Self::Erase { x, y }
            }
            "paint" => {
                let (px, py) = pair(verb, &args)?;
                Self::Paint { px, py }
            }
            "rub" => {
                let (px, py) = pair(verb, &args)?;
                Self::Rub { px, py }
            }
            "resize" => {
                let (width, height) = pair(verb, &args)?;
                Self::Resize { width, height }
            }
            "clear" => nullary(verb, &args, Self::Clear)?,
            "export" => nullary(verb, &args, Self::Export)?,
            "snapshot" => nullary(verb, &args, Self::Snapshot)?,
            "glyph" => Self::SelectGlyph(parse_glyph(single(verb, &args)?)?),
            "color" | "colour" => Self::SelectColor(parse_color(single(verb, &args)?)?),
            "random" => Self::SetRandom(parse_switch(verb, single(verb, &args)?)?),
            "grid" => Self::SetGrid(parse_switch(verb, single(verb, &args)?)?),
            "debug" => Self::SetDebug(parse_switch(verb, single(verb, &args)?)?),
            _ => return Err(script_error(&format!("unknown command '{verb}'"))),
        };

        Ok(Some(command))
    }
}

/// Parse a whole script into numbered commands
///
/// Line numbers start at 1 and count blank and comment lines.
///
/// # Errors
///
/// Returns the first parse failure, tagged with its line number.
pub fn parse_script(script: &str) -> Result<Vec<(usize, Command)>> {
    let mut commands = Vec::new();
    for (index, line) in script.lines().enumerate() {
        let number = index + 1;
        if let Some(command) = Command::parse(line).with_line(number)? {
            commands.push((number, command));
        }
    }
    Ok(commands)
}

fn pair<T>(verb: &str, args: &[&str]) -> Result<(T, T)>
where
    T: FromStr,
    T::Err: Display,
{
    let [a, b] = args else {
        return Err(script_error(&format!(
            "'{verb}' takes 2 arguments, got {}",
            args.len()
        )));
    };
    Ok((number(verb, a)?, number(verb, b)?))
}

fn single<'a>(verb: &str, args: &[&'a str]) -> Result<&'a str> {
    let [arg] = args else {
        return Err(script_error(&format!(
            "'{verb}' takes 1 argument, got {}",
            args.len()
        )));
    };
    Ok(*arg)
}

fn nullary(verb: &str, args: &[&str], command: Command) -> Result<Command> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(script_error(&format!("'{verb}' takes no arguments")))
    }
}

fn number<T>(verb: &str, arg: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    arg.parse()
        .map_err(|e| script_error(&format!("'{verb}' expects a number, got '{arg}': {e}")))
}

fn parse_glyph(arg: &str) -> Result<GlyphId> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(key), None) => GlyphId::new(key),
        _ => Err(script_error(&format!(
            "glyph must be a single character, got '{arg}'"
        ))),
    }
}

// Named swatches cover the built-in palette
fn parse_color(arg: &str) -> Result<Rgb> {
    match arg.to_ascii_lowercase().as_str() {
        "black" => Ok(BLACK),
        "teal" => Ok(TEAL),
        "pink" => Ok(PINK),
        _ => arg.parse(),
    }
}

fn parse_switch(verb: &str, arg: &str) -> Result<bool> {
    match arg.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(script_error(&format!(
            "'{verb}' expects on or off, got '{arg}'"
        ))),
    }
}
