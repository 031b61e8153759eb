// yaff-kit/src/document.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Normalization of an untyped parse tree into a typed font document.
//!
//! Hand-edited font sources tend to accumulate small inconsistencies, so most problems are
//! repaired by dropping the offending piece: a malformed label, a glyph left without labels,
//! an unknown property. Only problems that make the font unusable are fatal, such as a
//! raster whose rows have different lengths.

use lazy_static::lazy_static;
use log::{debug, warn};

use crate::error::FontLoadingError;
use crate::label::Label;
use crate::parse_tree::{ParseTree, RawEntry, RawGlyph, RawInk, RawProperty};
use crate::properties::FontProperties;
use crate::utils;

/// The token that stands for "this glyph has no ink".
pub const BLANK_INK: &str = "-";

const INK_ON: [u8; 4] = [0xff; 4];
const INK_OFF: [u8; 4] = [0; 4];

lazy_static! {
    static ref INK_TO_RGBA32_LUT: [Option<[u8; 4]>; 256] = {
        let mut lut = [None; 256];
        lut[b'@' as usize] = Some(INK_ON);
        lut[b'.' as usize] = Some(INK_OFF);
        lut
    };
}

/// A validated font source: global properties plus glyph sources in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontDocument {
    /// The font-wide properties.
    pub properties: FontProperties,
    /// The glyphs that survived validation, in document order.
    pub glyphs: Vec<GlyphSource>,
}

impl FontDocument {
    /// Validates and restructures a parse tree.
    ///
    /// Null and malformed entries, invalid labels, glyphs without valid labels and unknown
    /// properties are dropped. Irregular rasters and property values of the wrong type are
    /// fatal.
    pub fn from_parse_tree(tree: &ParseTree) -> Result<FontDocument, FontLoadingError> {
        let mut raw_properties = vec![];
        let mut glyphs = vec![];
        let mut dropped_entries = 0;

        for (index, entry) in tree.entries.iter().enumerate() {
            match *entry {
                Some(RawEntry::Property(ref property)) => raw_properties.push(property),
                Some(RawEntry::Glyph(ref glyph)) => match GlyphSource::from_raw(glyph, index)? {
                    Some(glyph) => glyphs.push(glyph),
                    None => dropped_entries += 1,
                },
                None => dropped_entries += 1,
            }
        }

        let properties = FontProperties::from_raw(raw_properties)?;
        debug!(
            "normalized font source: {} glyphs, {} entries dropped",
            glyphs.len(),
            dropped_entries
        );
        Ok(FontDocument { properties, glyphs })
    }
}

/// One glyph, validated but not yet compiled.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphSource {
    /// The valid labels in source order. Never empty.
    pub labels: Vec<Label>,
    /// The decoded ink.
    pub ink: Ink,
    /// The per-glyph properties.
    pub props: GlyphProperties,
}

impl GlyphSource {
    /// Validates one glyph entry.
    ///
    /// Returns `Ok(None)` if the glyph should be dropped and an error if its raster is not
    /// rectangular. `index` is the position of the entry in the parse tree and is only used to
    /// describe problems.
    pub fn from_raw(raw: &RawGlyph, index: usize) -> Result<Option<GlyphSource>, FontLoadingError> {
        let ink = match Ink::from_raw(&raw.ink, index)? {
            Some(ink) => ink,
            None => return Ok(None),
        };

        let labels: Vec<Label> = raw
            .labels
            .iter()
            .filter_map(|label| label.as_ref().and_then(Label::from_raw))
            .collect();
        if labels.is_empty() {
            warn!("dropping glyph {}: it has no valid labels", index);
            return Ok(None);
        }

        let props = match GlyphProperties::from_raw(raw.props.iter().filter_map(Option::as_ref)) {
            Some(props) => props,
            None => {
                warn!("dropping glyph {}: a glyph property isn't a number", index);
                return Ok(None);
            }
        };

        Ok(Some(GlyphSource { labels, ink, props }))
    }
}

/// The visual payload of a glyph.
#[derive(Clone, Debug, PartialEq)]
pub enum Ink {
    /// A decoded raster.
    Raster(RasterInk),
    /// The glyph has no ink at all.
    Blank,
}

impl Ink {
    fn from_raw(raw: &RawInk, index: usize) -> Result<Option<Ink>, FontLoadingError> {
        match *raw {
            RawInk::Sentinel(ref token) if token == BLANK_INK => Ok(Some(Ink::Blank)),
            RawInk::Sentinel(ref token) => {
                warn!("dropping glyph {}: unexpected ink `{}`", index, token);
                Ok(None)
            }
            RawInk::Rows(ref rows) => Ok(RasterInk::from_rows(rows, index)?.map(Ink::Raster)),
        }
    }
}

/// A rectangular RGBA raster decoded from ink rows.
///
/// Ink pixels are opaque white; paper pixels are fully transparent. The pixel buffer always
/// holds exactly `width * height` tightly packed R8G8B8A8 pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterInk {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterInk {
    /// Creates a raster with no ink.
    pub fn transparent(width: u32, height: u32) -> RasterInk {
        RasterInk {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Returns the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the pixels, row by row.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub(crate) fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Decodes rows of `@` (ink) and `.` (paper).
    ///
    /// All rows must have the same length; otherwise the raster cannot be sized and an error
    /// is returned. Returns `Ok(None)` for an empty raster or one containing other characters.
    pub fn from_rows<S>(rows: &[S], index: usize) -> Result<Option<RasterInk>, FontLoadingError>
    where
        S: AsRef<str>,
    {
        let width = match rows.first() {
            Some(row) => row.as_ref().chars().count(),
            None => {
                warn!("dropping glyph {}: its raster is empty", index);
                return Ok(None);
            }
        };
        for (row_index, row) in rows.iter().enumerate() {
            let row_width = row.as_ref().chars().count();
            if row_width != width {
                return Err(FontLoadingError::validation(
                    format!("glyph {} ink row {}", index, row_index + 1),
                    format!(
                        "ink isn't rectangular: row has {} pixels, expected {}",
                        row_width, width
                    ),
                ));
            }
        }

        let mut pixels = Vec::with_capacity(width * rows.len() * 4);
        for row in rows {
            for byte in row.as_ref().bytes() {
                match INK_TO_RGBA32_LUT[byte as usize] {
                    Some(pixel) => pixels.extend_from_slice(&pixel),
                    None => {
                        warn!("dropping glyph {}: ink contains `{}`", index, row.as_ref());
                        return Ok(None);
                    }
                }
            }
        }

        Ok(Some(RasterInk {
            width: width as u32,
            height: rows.len() as u32,
            pixels,
        }))
    }
}

/// Metrics that a glyph may set for itself.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphProperties {
    /// Space before the raster, in pixels.
    pub left_bearing: Option<i32>,
    /// Space after the raster, in pixels.
    pub right_bearing: Option<i32>,
    /// Vertical offset of the raster, overriding the font's global shift-up.
    pub shift_up: Option<i32>,
}

impl GlyphProperties {
    /// Folds per-glyph property entries. Unknown keys are ignored; returns `None` if a known
    /// key has a value that isn't a number. Fractional values are rounded to whole pixels.
    pub fn from_raw<'a, I>(entries: I) -> Option<GlyphProperties>
    where
        I: IntoIterator<Item = &'a RawProperty>,
    {
        let mut props = GlyphProperties::default();
        for entry in entries {
            let slot = match utils::normalize_key(&entry.key).as_deref() {
                Some("left-bearing") => &mut props.left_bearing,
                Some("right-bearing") => &mut props.right_bearing,
                Some("shift-up") => &mut props.shift_up,
                _ => {
                    debug!("ignoring glyph property `{}`", entry.key);
                    continue;
                }
            };
            *slot = Some(utils::pixel_value(&entry.val)?);
        }
        Some(props)
    }
}
