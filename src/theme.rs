// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Overlay color themes and the color table used by the theme pickers.
//!
//! Colors are plain RGB triples, serialized as CSS-style hexadecimal strings
//! so that saved themes remain readable in the configuration file. Themes are
//! grouped into a small set of built-in palettes; the theme picker modes
//! re-colour individual elements of the active palette.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A 24-bit RGB color.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Rgb(pub(crate) u8, pub(crate) u8, pub(crate) u8);

#[derive(Debug, Error)]
#[error("invalid colour string {0:?}, expected #rrggbb")]
pub(crate) struct ParseColourError(String);

impl Rgb {
    /// Converts the color into a CSS-style hexadecimal string.
    pub(crate) fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ParseColourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ParseColourError(s.to_string()));
        }
        let parse = |range| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ParseColourError(s.to_string()))
        };
        Ok(Rgb(parse(0..2)?, parse(2..4)?, parse(4..6)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The overlay element families a theme picker can re-colour.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ThemeElement {
    /// Segment boxes and the progress track.
    Box,
    /// Active segment, borders and the progress fill.
    Accent,
    /// Active label text.
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Theme {
    pub(crate) background_colour: Rgb,
    pub(crate) segment_colour: Rgb,
    pub(crate) segment_active_colour: Rgb,
    pub(crate) text_colour: Rgb,
    pub(crate) text_active_colour: Rgb,
    pub(crate) accent_colour: Rgb,
    pub(crate) border_colour: Rgb,
    pub(crate) progress_track_colour: Rgb,
    pub(crate) progress_fill_colour: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        DARK
    }
}

pub(crate) const DARK: Theme = Theme {
    background_colour: Rgb(0x1a, 0x1a, 0x1a),
    segment_colour: Rgb(0x2d, 0x2d, 0x2d),
    segment_active_colour: Rgb(0x3d, 0x8a, 0xff),
    text_colour: Rgb(0x88, 0x88, 0x88),
    text_active_colour: Rgb(0xff, 0xff, 0xff),
    accent_colour: Rgb(0x3d, 0x8a, 0xff),
    border_colour: Rgb(0x40, 0x40, 0x40),
    progress_track_colour: Rgb(0x2d, 0x2d, 0x2d),
    progress_fill_colour: Rgb(0x3d, 0x8a, 0xff),
};

pub(crate) const LIGHT: Theme = Theme {
    background_colour: Rgb(0xf5, 0xf5, 0xf5),
    segment_colour: Rgb(0xe0, 0xe0, 0xe0),
    segment_active_colour: Rgb(0x1a, 0x73, 0xe8),
    text_colour: Rgb(0x66, 0x66, 0x66),
    text_active_colour: Rgb(0x1a, 0x1a, 0x1a),
    accent_colour: Rgb(0x1a, 0x73, 0xe8),
    border_colour: Rgb(0xcc, 0xcc, 0xcc),
    progress_track_colour: Rgb(0xe0, 0xe0, 0xe0),
    progress_fill_colour: Rgb(0x1a, 0x73, 0xe8),
};

pub(crate) const CYBER: Theme = Theme {
    background_colour: Rgb(0x0a, 0x0a, 0x12),
    segment_colour: Rgb(0x16, 0x16, 0x24),
    segment_active_colour: Rgb(0xff, 0x2a, 0x6d),
    text_colour: Rgb(0x05, 0xd9, 0xe8),
    text_active_colour: Rgb(0xd1, 0xf7, 0xff),
    accent_colour: Rgb(0xff, 0x2a, 0x6d),
    border_colour: Rgb(0x05, 0xd9, 0xe8),
    progress_track_colour: Rgb(0x16, 0x16, 0x24),
    progress_fill_colour: Rgb(0xff, 0x2a, 0x6d),
};

impl Theme {
    /// Looks up a built-in palette by its configuration name.
    pub(crate) fn named(name: &str) -> Option<Theme> {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Some(DARK),
            "light" => Some(LIGHT),
            "cyber" => Some(CYBER),
            _ => None,
        }
    }

    /// Re-colours one element family of the palette.
    pub(crate) fn apply(&mut self, element: ThemeElement, colour: Rgb) {
        match element {
            ThemeElement::Box => {
                self.segment_colour = colour;
                self.progress_track_colour = colour;
            }
            ThemeElement::Accent => {
                self.segment_active_colour = colour;
                self.accent_colour = colour;
                self.border_colour = colour;
                self.progress_fill_colour = colour;
            }
            ThemeElement::Text => {
                self.text_active_colour = colour;
            }
        }
    }
}

/// Named colors offered by the theme picker carousels, in wheel order.
pub(crate) const PICKER_COLOURS: [(&str, Rgb); 12] = [
    ("White", Rgb(0xff, 0xff, 0xff)),
    ("Red", Rgb(0xff, 0x00, 0x00)),
    ("Green", Rgb(0x00, 0xff, 0x00)),
    ("Blue", Rgb(0x00, 0x88, 0xff)),
    ("Yellow", Rgb(0xff, 0xff, 0x00)),
    ("Cyan", Rgb(0x00, 0xff, 0xff)),
    ("Magenta", Rgb(0xff, 0x00, 0xff)),
    ("Orange", Rgb(0xff, 0xa5, 0x00)),
    ("Purple", Rgb(0x80, 0x00, 0x80)),
    ("Black", Rgb(0x00, 0x00, 0x00)),
    ("Gray", Rgb(0x80, 0x80, 0x80)),
    ("Dark Gray", Rgb(0x2d, 0x2d, 0x2d)),
];
