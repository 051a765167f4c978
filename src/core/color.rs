use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// An 8-bit RGB color.
///
/// Components are always within `[0, 255]`: every fallible setter rejects out-of-range
/// values instead of clamping them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Builds a color from already-valid bytes.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from integer components, validating each against `[0, 255]`.
    pub fn new(r: i32, g: i32, b: i32) -> Result<Self> {
        Ok(Self {
            r: validate_component(r, "Red")?,
            g: validate_component(g, "Green")?,
            b: validate_component(b, "Blue")?,
        })
    }

    /// Parses a `#rrggbb` string (either case).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let (r, g, b) = Self::hex_to_rgb(hex)?;
        Ok(Self::rgb(r, g, b))
    }

    pub fn r(&self) -> u8 {
        self.r
    }

    pub fn g(&self) -> u8 {
        self.g
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    pub fn set_r(&mut self, value: i32) -> Result<()> {
        self.r = validate_component(value, "Red")?;
        Ok(())
    }

    pub fn set_g(&mut self, value: i32) -> Result<()> {
        self.g = validate_component(value, "Green")?;
        Ok(())
    }

    pub fn set_b(&mut self, value: i32) -> Result<()> {
        self.b = validate_component(value, "Blue")?;
        Ok(())
    }

    /// Component triple `(r, g, b)`.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Replaces all three components. Nothing is written unless all three are valid.
    pub fn set_rgb(&mut self, r: i32, g: i32, b: i32) -> Result<()> {
        *self = Self::new(r, g, b)?;
        Ok(())
    }

    /// Lower-case `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn set_hex(&mut self, hex: &str) -> Result<()> {
        *self = Self::from_hex(hex)?;
        Ok(())
    }

    /// Splits a `#rrggbb` string into its components.
    ///
    /// Anything other than `#` followed by exactly six hex digits is rejected.
    pub fn hex_to_rgb(hex: &str) -> Result<(u8, u8, u8)> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.bytes().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| Error::InvalidHexColor(hex.to_string()))?;

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| Error::InvalidHexColor(hex.to_string()))
        };
        Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Formats integer components as `#rrggbb`, validating each.
    pub fn rgb_to_hex(r: i32, g: i32, b: i32) -> Result<String> {
        Ok(Self::new(r, g, b)?.to_hex())
    }
}

fn validate_component(value: i32, channel: &'static str) -> Result<u8> {
    u8::try_from(value).map_err(|_| Error::ColorComponentOutOfRange { channel, value })
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; 3]> for Color {
    fn from(c: [u8; 3]) -> Self {
        Self::rgb(c[0], c[1], c[2])
    }
}
