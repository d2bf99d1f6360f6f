//! RGBA8 color value and name/hex resolution for backgrounds.
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Straight (non-premultiplied) 8-bit RGBA.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);
    pub const TRANSPARENT: Rgba = Rgba([0, 0, 0, 0]);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Rgba([r, g, b, 255])
    }

    pub fn alpha(&self) -> u8 {
        self.0[3]
    }
}

impl From<image::Rgba<u8>> for Rgba {
    fn from(p: image::Rgba<u8>) -> Self {
        Rgba(p.0)
    }
}

impl From<Rgba> for image::Rgba<u8> {
    fn from(c: Rgba) -> Self {
        image::Rgba(c.0)
    }
}

const NAMED: &[(&str, Rgba)] = &[
    ("black", Rgba::BLACK),
    ("white", Rgba::WHITE),
    ("transparent", Rgba::TRANSPARENT),
    ("red", Rgba::opaque(255, 0, 0)),
    ("green", Rgba::opaque(0, 128, 0)),
    ("lime", Rgba::opaque(0, 255, 0)),
    ("blue", Rgba::opaque(0, 0, 255)),
    ("yellow", Rgba::opaque(255, 255, 0)),
    ("cyan", Rgba::opaque(0, 255, 255)),
    ("magenta", Rgba::opaque(255, 0, 255)),
    ("gray", Rgba::opaque(128, 128, 128)),
    ("grey", Rgba::opaque(128, 128, 128)),
    ("silver", Rgba::opaque(192, 192, 192)),
    ("orange", Rgba::opaque(255, 165, 0)),
    ("purple", Rgba::opaque(128, 0, 128)),
    ("navy", Rgba::opaque(0, 0, 128)),
    ("pink", Rgba::opaque(255, 192, 203)),
    ("brown", Rgba::opaque(165, 42, 42)),
];

/// Resolves a color name (case-insensitive) or a `#rgb`, `#rrggbb`,
/// `#rrggbbaa` hex string.
pub fn resolve_color(name: &str) -> Result<Rgba> {
    let trimmed = name.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| Error::UnknownColor(name.to_string()));
    }
    let lower = trimmed.to_ascii_lowercase();
    NAMED
        .iter()
        .find(|(n, _)| *n == lower)
        .map(|(_, c)| *c)
        .ok_or_else(|| Error::UnknownColor(name.to_string()))
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let nib = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(Rgba([nib(0)?, nib(1)?, nib(2)?, 255]))
        }
        6 => Some(Rgba([byte(0)?, byte(2)?, byte(4)?, 255])),
        8 => Some(Rgba([byte(0)?, byte(2)?, byte(4)?, byte(6)?])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_names_case_insensitively() {
        assert_eq!(resolve_color("White").unwrap(), Rgba::WHITE);
        assert_eq!(resolve_color(" grey ").unwrap(), Rgba::opaque(128, 128, 128));
        assert_eq!(resolve_color("transparent").unwrap().alpha(), 0);
    }

    #[test]
    fn resolves_hex_forms() {
        assert_eq!(resolve_color("#f00").unwrap(), Rgba::opaque(255, 0, 0));
        assert_eq!(resolve_color("#102030").unwrap(), Rgba::opaque(0x10, 0x20, 0x30));
        assert_eq!(resolve_color("#10203080").unwrap(), Rgba([0x10, 0x20, 0x30, 0x80]));
    }

    #[test]
    fn rejects_unknown() {
        assert!(matches!(resolve_color("chartreuse-ish"), Err(Error::UnknownColor(_))));
        assert!(resolve_color("#12").is_err());
        assert!(resolve_color("#gg0000").is_err());
    }
}
