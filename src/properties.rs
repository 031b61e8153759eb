// yaff-kit/src/properties.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Global font properties: name, spacing, encoding, sizes, metrics and the default character.
//!
//! Property keys are case-insensitive and `_`, `-` and `.` all separate words, so
//! `shift_up`, `SHIFT-UP` and `shift.up` name the same property. Unknown keys are ignored.

use log::debug;
use pathfinder_geometry::vector::Vector2I;
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use crate::error::FontLoadingError;
use crate::label;
use crate::parse_tree::RawProperty;
use crate::utils;

/// The font-wide properties of a font source.
///
/// Every property is optional. This object supports a method chaining style for
/// initialization; e.g.
///
///     # use yaff_kit::properties::{FontProperties, Spacing};
///     println!("{:?}", FontProperties::new().name("Fixed").spacing(Spacing::CharacterCell));
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontProperties {
    /// The full name of the font.
    pub name: Option<String>,
    /// How glyph widths relate to each other.
    pub spacing: Option<Spacing>,
    /// The character encoding the code point labels refer to.
    pub encoding: Option<String>,
    /// The tool that converted the font into this format.
    pub converter: Option<String>,
    /// The format the font was converted from.
    pub source_format: Option<String>,
    /// The size of a character cell, as `WxH` or `W H`.
    pub cell_size: Option<String>,
    /// The size of the ink bounding box of the whole font, as `WxH` or `W H`.
    pub bounding_box: Option<String>,
    /// The size of the glyph rasters, as `WxH` or `W H`.
    pub raster_size: Option<String>,
    /// The name of the file the font was converted from.
    pub source_name: Option<String>,
    /// The number of pixels every glyph is raised above the baseline, unless the glyph says
    /// otherwise.
    pub shift_up: Option<i32>,
    /// The nominal size of the font, in points.
    pub point_size: Option<f32>,
    /// The height of the font above the baseline, in pixels.
    pub ascent: Option<i32>,
    /// The font family.
    pub family: Option<String>,
    /// The target resolution.
    pub dpi: Option<Dpi>,
    /// Which glyph to use for characters the font doesn't cover.
    pub default_char: Option<DefaultChar>,
}

impl FontProperties {
    /// Creates a property set with no properties.
    #[inline]
    pub fn new() -> FontProperties {
        FontProperties::default()
    }

    /// Folds a sequence of property entries into one property set.
    ///
    /// Later entries overwrite earlier entries with the same key. Keys that are malformed or
    /// unknown are dropped. A value that cannot be coerced to its property's type is fatal;
    /// values are checked in the order their keys first appear.
    pub fn from_raw<'a, I>(entries: I) -> Result<FontProperties, FontLoadingError>
    where
        I: IntoIterator<Item = &'a RawProperty>,
    {
        // Keys keep the position of their first occurrence; later values replace earlier ones.
        let mut folded: Vec<(PropertyKey, &'a str)> = vec![];
        for entry in entries {
            match utils::normalize_key(&entry.key) {
                Some(key) => match key.parse::<PropertyKey>() {
                    Ok(key) => match folded.iter_mut().find(|slot| slot.0 == key) {
                        Some(slot) => slot.1 = entry.val.as_str(),
                        None => folded.push((key, entry.val.as_str())),
                    },
                    Err(_) => debug!("ignoring unknown property `{}`", entry.key),
                },
                None => debug!("dropping property with malformed key `{}`", entry.key),
            }
        }

        let mut properties = FontProperties::new();
        for (key, value) in folded {
            properties.set(key, value)?;
        }
        Ok(properties)
    }

    /// Sets one property from its source text.
    pub fn set(&mut self, key: PropertyKey, value: &str) -> Result<(), FontLoadingError> {
        let text = || Some(value.to_owned());
        match key {
            PropertyKey::Name => self.name = text(),
            PropertyKey::Encoding => self.encoding = text(),
            PropertyKey::Converter => self.converter = text(),
            PropertyKey::SourceFormat => self.source_format = text(),
            PropertyKey::CellSize => self.cell_size = text(),
            PropertyKey::BoundingBox => self.bounding_box = text(),
            PropertyKey::RasterSize => self.raster_size = text(),
            PropertyKey::SourceName => self.source_name = text(),
            PropertyKey::Family => self.family = text(),
            PropertyKey::Spacing => {
                self.spacing = Some(value.trim().parse().map_err(|_| {
                    FontLoadingError::validation(
                        key.location(),
                        format!(
                            "expected one of character-cell, monospace, proportional, \
                             multi-cell; found `{}`",
                            value
                        ),
                    )
                })?)
            }
            PropertyKey::ShiftUp => self.shift_up = Some(pixels(key, value)?),
            PropertyKey::Ascent => self.ascent = Some(pixels(key, value)?),
            PropertyKey::PointSize => {
                self.point_size = Some(utils::numeric_value(value).ok_or_else(|| {
                    FontLoadingError::validation(
                        key.location(),
                        format!("expected a number, found `{}`", value),
                    )
                })? as f32)
            }
            PropertyKey::Dpi => self.dpi = Some(Dpi::from_value(value)),
            PropertyKey::DefaultChar => {
                self.default_char = Some(value.trim().parse().map_err(|_| {
                    FontLoadingError::validation(
                        key.location(),
                        format!(
                            "expected a code point, a Unicode escape, `default` or `missing`; \
                             found `{}`",
                            value
                        ),
                    )
                })?)
            }
        }
        Ok(())
    }

    /// Sets the name and returns this property set for method chaining.
    #[inline]
    pub fn name(&mut self, name: &str) -> &mut FontProperties {
        self.name = Some(name.to_owned());
        self
    }

    /// Sets the spacing and returns this property set for method chaining.
    #[inline]
    pub fn spacing(&mut self, spacing: Spacing) -> &mut FontProperties {
        self.spacing = Some(spacing);
        self
    }

    /// Sets the cell size and returns this property set for method chaining.
    #[inline]
    pub fn cell_size(&mut self, size: Vector2I) -> &mut FontProperties {
        self.cell_size = Some(format!("{}x{}", size.x(), size.y()));
        self
    }

    /// Sets the global shift-up and returns this property set for method chaining.
    #[inline]
    pub fn shift_up(&mut self, shift_up: i32) -> &mut FontProperties {
        self.shift_up = Some(shift_up);
        self
    }

    /// Sets the default character and returns this property set for method chaining.
    #[inline]
    pub fn default_char(&mut self, default_char: DefaultChar) -> &mut FontProperties {
        self.default_char = Some(default_char);
        self
    }

    /// Returns the first well-formed size among `cell-size`, `bounding-box` and
    /// `raster-size`, in that order.
    pub fn default_cell_size(&self) -> Option<Vector2I> {
        [&self.cell_size, &self.bounding_box, &self.raster_size]
            .iter()
            .filter_map(|size| size.as_ref())
            .filter_map(|size| utils::parse_size(size))
            .next()
    }
}

fn pixels(key: PropertyKey, value: &str) -> Result<i32, FontLoadingError> {
    utils::pixel_value(value).ok_or_else(|| {
        FontLoadingError::validation(
            key.location(),
            format!("expected a number, found `{}`", value),
        )
    })
}

/// The font properties this crate understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// `name`
    Name,
    /// `spacing`
    Spacing,
    /// `encoding`
    Encoding,
    /// `converter`
    Converter,
    /// `source-format`
    SourceFormat,
    /// `cell-size`
    CellSize,
    /// `bounding-box`
    BoundingBox,
    /// `raster-size`
    RasterSize,
    /// `source-name`
    SourceName,
    /// `shift-up`
    ShiftUp,
    /// `point-size`
    PointSize,
    /// `ascent`
    Ascent,
    /// `family`
    Family,
    /// `dpi`
    Dpi,
    /// `default-char`
    DefaultChar,
}

impl PropertyKey {
    /// Returns the canonical, hyphenated spelling of the key.
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKey::Name => "name",
            PropertyKey::Spacing => "spacing",
            PropertyKey::Encoding => "encoding",
            PropertyKey::Converter => "converter",
            PropertyKey::SourceFormat => "source-format",
            PropertyKey::CellSize => "cell-size",
            PropertyKey::BoundingBox => "bounding-box",
            PropertyKey::RasterSize => "raster-size",
            PropertyKey::SourceName => "source-name",
            PropertyKey::ShiftUp => "shift-up",
            PropertyKey::PointSize => "point-size",
            PropertyKey::Ascent => "ascent",
            PropertyKey::Family => "family",
            PropertyKey::Dpi => "dpi",
            PropertyKey::DefaultChar => "default-char",
        }
    }

    fn location(self) -> String {
        format!("property {}", self.as_str())
    }
}

impl FromStr for PropertyKey {
    type Err = ();

    /// Parses a normalized (lowercase, hyphenated) key.
    fn from_str(key: &str) -> Result<PropertyKey, ()> {
        Ok(match key {
            "name" => PropertyKey::Name,
            "spacing" => PropertyKey::Spacing,
            "encoding" => PropertyKey::Encoding,
            "converter" => PropertyKey::Converter,
            "source-format" => PropertyKey::SourceFormat,
            "cell-size" => PropertyKey::CellSize,
            "bounding-box" => PropertyKey::BoundingBox,
            "raster-size" => PropertyKey::RasterSize,
            "source-name" => PropertyKey::SourceName,
            "shift-up" => PropertyKey::ShiftUp,
            "point-size" => PropertyKey::PointSize,
            "ascent" => PropertyKey::Ascent,
            "family" => PropertyKey::Family,
            "dpi" => PropertyKey::Dpi,
            "default-char" => PropertyKey::DefaultChar,
            _ => return Err(()),
        })
    }
}

impl Display for PropertyKey {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the widths of a font's glyphs relate to each other.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Spacing {
    /// Every glyph fills exactly one fixed-size cell.
    CharacterCell,
    /// Every glyph has the same advance width.
    Monospace,
    /// Glyph widths vary.
    Proportional,
    /// Glyphs occupy one or more fixed-size cells.
    MultiCell,
}

impl Spacing {
    /// Returns the spelling used in font sources.
    pub fn as_str(self) -> &'static str {
        match self {
            Spacing::CharacterCell => "character-cell",
            Spacing::Monospace => "monospace",
            Spacing::Proportional => "proportional",
            Spacing::MultiCell => "multi-cell",
        }
    }
}

impl FromStr for Spacing {
    type Err = ();

    fn from_str(value: &str) -> Result<Spacing, ()> {
        match value {
            "character-cell" => Ok(Spacing::CharacterCell),
            "monospace" => Ok(Spacing::Monospace),
            "proportional" => Ok(Spacing::Proportional),
            "multi-cell" => Ok(Spacing::MultiCell),
            _ => Err(()),
        }
    }
}

impl Display for Spacing {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The resolution a font was designed for.
#[derive(Clone, PartialEq, Debug)]
pub enum Dpi {
    /// A single resolution for both axes.
    Number(f32),
    /// Anything else, such as `96 72`, kept verbatim.
    Text(String),
}

impl Dpi {
    fn from_value(value: &str) -> Dpi {
        match utils::numeric_value(value) {
            Some(number) => Dpi::Number(number as f32),
            None => Dpi::Text(value.to_owned()),
        }
    }
}

impl Display for Dpi {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            Dpi::Number(number) => Display::fmt(&number, f),
            Dpi::Text(ref text) => f.write_str(text),
        }
    }
}

/// Which glyph stands in for characters that the font doesn't cover.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum DefaultChar {
    /// The glyph for this character code.
    Code(u32),
    /// The glyph labelled `default`.
    Default,
    /// The glyph tagged `missing`.
    Missing,
}

impl FromStr for DefaultChar {
    type Err = ();

    fn from_str(value: &str) -> Result<DefaultChar, ()> {
        match value {
            "default" => Ok(DefaultChar::Default),
            "missing" => Ok(DefaultChar::Missing),
            _ => label::parse_code_point(value)
                .or_else(|| label::parse_unicode_escape(value))
                .map(DefaultChar::Code)
                .ok_or(()),
        }
    }
}

impl Display for DefaultChar {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            DefaultChar::Code(code) => write!(f, "U+{:04X}", code),
            DefaultChar::Default | DefaultChar::Missing => Debug::fmt(self, f),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn fold(entries: &[(&str, &str)]) -> Result<FontProperties, FontLoadingError> {
        let entries: Vec<RawProperty> = entries
            .iter()
            .map(|&(key, val)| RawProperty::new(key, val))
            .collect();
        FontProperties::from_raw(&entries)
    }

    #[test]
    fn coerce_values() {
        let properties = fold(&[
            ("name", "Fixed 8x16"),
            ("SPACING", "character-cell"),
            ("cell_size", "8x16"),
            ("shift-up", "-4"),
            ("point-size", "12.5"),
            ("dpi", "96"),
            ("default-char", "u+fffd"),
            ("encoding", "437"),
            ("glyph-count", "256"),
        ])
        .unwrap();
        assert_eq!(properties.name.as_deref(), Some("Fixed 8x16"));
        assert_eq!(properties.spacing, Some(Spacing::CharacterCell));
        assert_eq!(properties.shift_up, Some(-4));
        assert_eq!(properties.point_size, Some(12.5));
        assert_eq!(properties.dpi, Some(Dpi::Number(96.0)));
        assert_eq!(properties.default_char, Some(DefaultChar::Code(0xfffd)));
        assert_eq!(properties.encoding.as_deref(), Some("437"));
        assert_eq!(properties.default_cell_size(), Some(Vector2I::new(8, 16)));
    }

    #[test]
    fn later_duplicates_win() {
        let properties = fold(&[("name", "First"), ("name", "Second")]).unwrap();
        assert_eq!(properties.name.as_deref(), Some("Second"));
    }

    #[test]
    fn invalid_later_duplicate_is_fatal() {
        assert!(fold(&[("spacing", "monospace"), ("spacing", "wobbly")]).is_err());
        assert!(fold(&[("spacing", "wobbly"), ("spacing", "monospace")]).is_ok());
    }

    #[test]
    fn bad_spacing_is_fatal() {
        match fold(&[("spacing", "wide")]) {
            Err(FontLoadingError::Validation { location, .. }) => {
                assert_eq!(location, "property spacing")
            }
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn bad_numbers_are_fatal() {
        assert!(fold(&[("shift-up", "up")]).is_err());
        assert!(fold(&[("ascent", "tall")]).is_err());
        assert!(fold(&[("point-size", "large")]).is_err());
        assert!(fold(&[("default-char", "somewhere")]).is_err());
    }

    #[test]
    fn fractional_metrics_are_rounded() {
        let properties = fold(&[("shift-up", "-1.5"), ("ascent", "7.4")]).unwrap();
        assert_eq!(properties.shift_up, Some(-2));
        assert_eq!(properties.ascent, Some(7));
    }

    #[test]
    fn first_invalid_property_is_reported() {
        let entries = [
            ("ascent", "tall"),
            ("spacing", "wobbly"),
            ("shift-up", "up"),
            ("ascent", "taller"),
        ];
        for _ in 0..16 {
            match fold(&entries) {
                Err(FontLoadingError::Validation { location, constraint }) => {
                    assert_eq!(location, "property ascent");
                    assert!(constraint.contains("taller"));
                }
                other => panic!("expected a validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn non_numeric_dpi_is_text() {
        let properties = fold(&[("dpi", "96 72")]).unwrap();
        assert_eq!(properties.dpi, Some(Dpi::Text("96 72".to_owned())));
    }

    #[test]
    fn default_char_forms() {
        assert_eq!("65".parse(), Ok(DefaultChar::Code(65)));
        assert_eq!("0x3f".parse(), Ok(DefaultChar::Code(0x3f)));
        assert_eq!("\"U+003F\"".parse(), Ok(DefaultChar::Code(0x3f)));
        assert_eq!("missing".parse(), Ok(DefaultChar::Missing));
        assert_eq!("default".parse(), Ok(DefaultChar::Default));
    }

    #[test]
    fn cell_size_falls_back_to_later_sizes() {
        let properties = fold(&[("cell-size", "eight"), ("raster-size", "6 12")]).unwrap();
        assert_eq!(properties.default_cell_size(), Some(Vector2I::new(6, 12)));
        assert_eq!(FontProperties::new().default_cell_size(), None);
    }
}
