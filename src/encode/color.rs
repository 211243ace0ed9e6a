use image::Rgb;
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex color pattern is valid")
});

/// An sRGB color written as `#RGB` or `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct HexColor(pub Rgb<u8>);

#[derive(Debug, Error)]
#[error("invalid color {0:?}: expected hex like #000000 or #FFF")]
pub struct ColorError(String);

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(caps) = HEX_COLOR.captures(s.trim()) else {
            return Err(ColorError(s.to_string()));
        };
        let digits = &caps[1];

        let channel = |hex: &str| u8::from_str_radix(hex, 16).map_err(|_| ColorError(s.to_string()));

        let rgb = if digits.len() == 3 {
            let mut out = [0u8; 3];
            for (i, slot) in out.iter_mut().enumerate() {
                // #F0A expands to #FF00AA
                *slot = channel(&digits[i..=i])? * 0x11;
            }
            out
        } else {
            [
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ]
        };

        Ok(HexColor(Rgb(rgb)))
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for Rgb<u8> {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0.0;
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}
