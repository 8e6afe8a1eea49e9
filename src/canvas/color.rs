//! Normalized RGB paint colours
//!
//! Every textual colour form is parsed into one [`Rgb`] value, so equal
//! colours written differently (`#000`, `#000000`, `rgb(0,0,0)`) compare and
//! hash identically.

use crate::io::error::{Result, TilepaintError};
use std::fmt;
use std::str::FromStr;

/// An opaque 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a colour from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS functional form used for fill substitution
    pub fn css(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    /// Channels as an opaque RGBA array
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    fn parse_hex(digits: &str) -> Option<Self> {
        let expand = |c: u8| c * 17;
        let value = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 => {
                let r = value(digits.get(0..1)?)?;
                let g = value(digits.get(1..2)?)?;
                let b = value(digits.get(2..3)?)?;
                Some(Self::new(expand(r), expand(g), expand(b)))
            }
            6 => Some(Self::new(
                value(digits.get(0..2)?)?,
                value(digits.get(2..4)?)?,
                value(digits.get(4..6)?)?,
            )),
            _ => None,
        }
    }

    fn parse_functional(args: &str) -> Option<Self> {
        let mut channels = args.split(',').map(|part| part.trim().parse::<u8>().ok());
        let r = channels.next()??;
        let g = channels.next()??;
        let b = channels.next()??;
        channels.next().is_none().then_some(Self::new(r, g, b))
    }
}

impl FromStr for Rgb {
    type Err = TilepaintError;

    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let parsed = if let Some(digits) = trimmed.strip_prefix('#') {
            Self::parse_hex(digits)
        } else if let Some(args) = trimmed
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Self::parse_functional(args)
        } else {
            None
        };

        parsed.ok_or_else(|| TilepaintError::InvalidColor {
            value: input.to_string(),
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
