//! Ordinal color assignment.
//!
//! Colors are handed out by *position* in the current domain, so a label keeps its color only
//! while the set of visible labels is unchanged between renders. Adding or removing a label
//! ahead of it in the ordering shifts its color.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Tableau 10.
pub const TABLEAU10: [Rgb; 10] = [
    Rgb::from_hex(0x4e79a7),
    Rgb::from_hex(0xf28e2c),
    Rgb::from_hex(0xe15759),
    Rgb::from_hex(0x76b7b2),
    Rgb::from_hex(0x59a14f),
    Rgb::from_hex(0xedc949),
    Rgb::from_hex(0xaf7aa1),
    Rgb::from_hex(0xff9da7),
    Rgb::from_hex(0x9c755f),
    Rgb::from_hex(0xbab0ab),
];

/// Maps labels to palette entries by their index in `domain`, cycling past the tenth label.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalPalette {
    domain: Vec<String>,
}

impl OrdinalPalette {
    pub fn new(domain: &[String]) -> Self {
        Self {
            domain: domain.to_vec(),
        }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Color for `label`; labels outside the domain get the color of the next free slot.
    pub fn color(&self, label: &str) -> Rgb {
        let index = self
            .domain
            .iter()
            .position(|candidate| candidate == label)
            .unwrap_or(self.domain.len());
        TABLEAU10[index % TABLEAU10.len()]
    }
}
