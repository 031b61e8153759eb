// yaff-kit/src/layout.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Measuring and compositing a single line of text.
//!
//! Glyphs of a run are placed side by side on a shared baseline. The baseline is the highest
//! raster top among the glyphs (`raster_height + shift_up`), so glyphs with different
//! shift-ups line up. Characters the font cannot resolve are skipped.

use pathfinder_geometry::vector::Vector2I;
use std::cmp;

use crate::canvas::{ColorU, Surface};
use crate::font::Font;

/// A sequence of characters to lay out: text, or numeric character codes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextRun<'a> {
    /// Text, resolved character by character like [`Font::glyph_for_character`].
    Text(&'a str),
    /// Numeric codes, resolved like [`Font::glyph_for_char_code`].
    CharCodes(&'a [u32]),
}

impl<'a> From<&'a str> for TextRun<'a> {
    #[inline]
    fn from(text: &'a str) -> TextRun<'a> {
        TextRun::Text(text)
    }
}

impl<'a> From<&'a String> for TextRun<'a> {
    #[inline]
    fn from(text: &'a String) -> TextRun<'a> {
        TextRun::Text(text)
    }
}

impl<'a> From<&'a [u32]> for TextRun<'a> {
    #[inline]
    fn from(codes: &'a [u32]) -> TextRun<'a> {
        TextRun::CharCodes(codes)
    }
}

impl<'a, const N: usize> From<&'a [u32; N]> for TextRun<'a> {
    #[inline]
    fn from(codes: &'a [u32; N]) -> TextRun<'a> {
        TextRun::CharCodes(codes)
    }
}

/// The extent of a laid out run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBoundingBox {
    /// The sum of the glyphs' advance widths plus spacing between them.
    pub width: i32,
    /// The tallest glyph bounding height.
    pub height: i32,
    /// The distance from the top of the box to the baseline.
    pub baseline: i32,
}

impl TextBoundingBox {
    /// Returns the width and height as a vector.
    #[inline]
    pub fn size(&self) -> Vector2I {
        Vector2I::new(self.width, self.height)
    }
}

/// Where one glyph of a run is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphPlacement {
    /// The glyph.
    pub glyph_id: u32,
    /// The top left corner of the glyph's raster, relative to the top left of the run.
    pub origin: Vector2I,
}

/// A fully laid out run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextLayout {
    /// The extent of the run.
    pub bounds: TextBoundingBox,
    /// One placement per resolved glyph, in run order.
    pub placements: Vec<GlyphPlacement>,
}

impl Font {
    /// Resolves every element of a run to a glyph ID, skipping elements without a glyph.
    pub fn resolve_run<'a, R>(&self, run: R) -> Vec<u32>
    where
        R: Into<TextRun<'a>>,
    {
        match run.into() {
            TextRun::Text(text) => {
                let mut buffer = [0; 4];
                text.chars()
                    .filter_map(|character| {
                        self.glyph_id_for_character(character.encode_utf8(&mut buffer))
                    })
                    .collect()
            }
            TextRun::CharCodes(codes) => codes
                .iter()
                .filter_map(|&code| self.glyph_id_for_char_code(code))
                .collect(),
        }
    }

    /// Lays out a run with `spacing` extra pixels between consecutive glyphs.
    pub fn layout_run<'a, R>(&self, run: R, spacing: i32) -> TextLayout
    where
        R: Into<TextRun<'a>>,
    {
        let glyph_ids = self.resolve_run(run);

        let mut bounds = TextBoundingBox::default();
        for (index, glyph) in glyph_ids.iter().filter_map(|&id| self.glyph(id)).enumerate() {
            if index > 0 {
                bounds.width += spacing;
            }
            bounds.width += glyph.bounding_width;
            bounds.height = cmp::max(bounds.height, glyph.bounding_height);
            bounds.baseline = cmp::max(bounds.baseline, glyph.raster_height + glyph.shift_up);
        }

        let mut placements = Vec::with_capacity(glyph_ids.len());
        let mut x = 0;
        for (index, &glyph_id) in glyph_ids.iter().enumerate() {
            let glyph = match self.glyph(glyph_id) {
                Some(glyph) => glyph,
                None => continue,
            };
            if index > 0 {
                x += spacing;
            }
            placements.push(GlyphPlacement {
                glyph_id,
                origin: Vector2I::new(
                    x + glyph.left_bearing,
                    bounds.baseline - glyph.raster_height - glyph.shift_up,
                ),
            });
            x += glyph.bounding_width;
        }

        TextLayout { bounds, placements }
    }

    /// Measures a run with `spacing` extra pixels between consecutive glyphs.
    #[inline]
    pub fn bounding_box_for_run<'a, R>(&self, run: R, spacing: i32) -> TextBoundingBox
    where
        R: Into<TextRun<'a>>,
    {
        self.layout_run(run, spacing).bounds
    }

    /// Measures text using the font's character spacing.
    #[inline]
    pub fn bounding_box_for_str(&self, text: &str) -> TextBoundingBox {
        self.bounding_box_for_run(text, self.character_spacing())
    }

    /// Measures a sequence of character codes using the font's character spacing.
    #[inline]
    pub fn bounding_box_for_char_codes(&self, codes: &[u32]) -> TextBoundingBox {
        self.bounding_box_for_run(codes, self.character_spacing())
    }

    /// Renders a run in `color` using the font's character spacing.
    ///
    /// The surface is resized to the run's bounding box and cleared. Each glyph's bitmap then
    /// replaces the pixels under it, and finally every pixel that received ink is recolored to
    /// `color`, keeping its alpha. Returns the run's bounding box; its `baseline` tells the
    /// caller where the baseline sits inside the surface.
    pub fn fill_text<'a, R, S>(&self, run: R, color: ColorU, surface: &mut S) -> TextBoundingBox
    where
        R: Into<TextRun<'a>>,
        S: Surface + ?Sized,
    {
        let layout = self.layout_run(run, self.character_spacing());
        surface.resize(layout.bounds.size());
        surface.clear();
        for placement in &layout.placements {
            if let Some(glyph) = self.glyph(placement.glyph_id) {
                if !glyph.blank {
                    surface.draw_bitmap(&glyph.image, placement.origin);
                }
            }
        }
        surface.stencil_fill(color);
        layout.bounds
    }
}
