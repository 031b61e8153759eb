// yaff-kit/src/font.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A loaded bitmap font.

use log::debug;
use pathfinder_geometry::rect::RectI;
use pathfinder_geometry::vector::Vector2I;
use std::fs;
use std::path::Path;

use crate::canvas::Surface;
use crate::document::{FontDocument, GlyphProperties, GlyphSource, Ink, RasterInk};
use crate::error::{FontLoadingError, GlyphLoadingError};
use crate::glyph::{self, Glyph};
use crate::glyph_map::GlyphMap;
use crate::label::Label;
use crate::parse_tree::{Grammar, ParseTree};
use crate::properties::{DefaultChar, FontProperties, Spacing};

/// A bitmap font: its properties, its glyphs and the maps that address them.
///
/// A font is built in one step and is immutable afterwards, so it can be shared freely
/// between threads. Rendering writes to a caller-provided [`Surface`].
#[derive(Clone, Debug)]
pub struct Font {
    properties: FontProperties,
    default_cell_size: Option<Vector2I>,
    glyphs: Vec<Glyph>,
    glyph_map: GlyphMap,
    character_spacing: i32,
}

impl Font {
    /// Loads a font from source text, using `grammar` to parse it.
    pub fn load<G>(source: &str, grammar: &G) -> Result<Font, FontLoadingError>
    where
        G: Grammar + ?Sized,
    {
        let tree = grammar.parse(source)?;
        Font::from_parse_tree(&tree)
    }

    /// Loads a font from a source file, using `grammar` to parse it.
    pub fn from_path<P, G>(path: P, grammar: &G) -> Result<Font, FontLoadingError>
    where
        P: AsRef<Path>,
        G: Grammar + ?Sized,
    {
        let source = fs::read_to_string(path)?;
        Font::load(&source, grammar)
    }

    /// Builds a font from an already parsed source.
    pub fn from_parse_tree(tree: &ParseTree) -> Result<Font, FontLoadingError> {
        Ok(Font::from_document(FontDocument::from_parse_tree(tree)?))
    }

    /// Builds a font from a validated document. This cannot fail.
    pub fn from_document(document: FontDocument) -> Font {
        let FontDocument { properties, glyphs } = document;
        let global_shift_up = properties.shift_up.unwrap_or(0);
        let glyphs = glyph::compile_glyphs(glyphs, global_shift_up);

        let mut glyph_map = GlyphMap::new();
        for (glyph_id, glyph) in glyphs.iter().enumerate() {
            for label in &glyph.labels {
                glyph_map.insert_label(label, glyph_id as u32);
            }
        }

        let mut font = Font {
            default_cell_size: properties.default_cell_size(),
            properties,
            glyphs,
            glyph_map,
            character_spacing: 0,
        };
        font.resolve_default_char();
        font.synthesize_space(global_shift_up);
        debug!(
            "loaded font {:?} with {} glyphs",
            font.properties.name,
            font.glyphs.len()
        );
        font
    }

    fn resolve_default_char(&mut self) {
        let default_glyph = match self.properties.default_char {
            Some(DefaultChar::Missing) => self.glyph_map.by_tag("missing"),
            Some(DefaultChar::Code(code)) => {
                std::char::from_u32(code).and_then(|character| {
                    let mut buffer = [0; 4];
                    self.glyph_id_for_character(character.encode_utf8(&mut buffer))
                })
            }
            Some(DefaultChar::Default) | None => None,
        };
        if default_glyph.is_some() {
            self.glyph_map.set_default(default_glyph);
        }
    }

    fn synthesize_space(&mut self, global_shift_up: i32) {
        let size = match self.default_cell_size {
            Some(size) if !self.glyph_map.maps_space() => size,
            _ => return,
        };
        debug!("synthesizing a {}x{} space glyph", size.x(), size.y());

        let (width, height) = (size.x() as u32, size.y() as u32);
        let space = Glyph::compile(
            GlyphSource {
                labels: vec![
                    Label::Character(' '),
                    Label::Unicode(' ' as u32),
                    Label::Tag(" ".to_owned()),
                ],
                ink: Ink::Raster(RasterInk::transparent(width, height)),
                props: GlyphProperties::default(),
            },
            global_shift_up,
        );
        let glyph_id = self.glyphs.len() as u32;
        for label in &space.labels {
            self.glyph_map.insert_label(label, glyph_id);
        }
        self.glyphs.push(space);
    }

    /// Sets the extra space inserted between consecutive glyphs and returns the font for
    /// method chaining.
    #[inline]
    pub fn with_character_spacing(mut self, character_spacing: i32) -> Font {
        self.character_spacing = character_spacing;
        self
    }

    /// Returns the extra space inserted between consecutive glyphs, in pixels.
    #[inline]
    pub fn character_spacing(&self) -> i32 {
        self.character_spacing
    }

    /// Returns the font-wide properties.
    #[inline]
    pub fn properties(&self) -> &FontProperties {
        &self.properties
    }

    /// Returns the first well-formed size among the `cell-size`, `bounding-box` and
    /// `raster-size` properties.
    #[inline]
    pub fn default_cell_size(&self) -> Option<Vector2I> {
        self.default_cell_size
    }

    /// Returns the full name of the font, or an empty string if it has none.
    pub fn full_name(&self) -> String {
        self.properties.name.clone().unwrap_or_default()
    }

    /// Returns the name of the font family, falling back to the full name.
    pub fn family_name(&self) -> String {
        self.properties
            .family
            .clone()
            .unwrap_or_else(|| self.full_name())
    }

    /// Returns true if and only if the font declares fixed-width spacing.
    pub fn is_monospace(&self) -> bool {
        match self.properties.spacing {
            Some(Spacing::CharacterCell) | Some(Spacing::Monospace) => true,
            Some(Spacing::Proportional) | Some(Spacing::MultiCell) | None => false,
        }
    }

    /// Returns the number of glyphs in the font, including a synthesized space glyph.
    ///
    /// Glyph IDs range from 0 inclusive to this value exclusive.
    #[inline]
    pub fn glyph_count(&self) -> u32 {
        self.glyphs.len() as u32
    }

    /// Returns all glyphs, in document order. A synthesized space glyph comes last.
    #[inline]
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Returns the glyph with the given ID.
    #[inline]
    pub fn glyph(&self, glyph_id: u32) -> Option<&Glyph> {
        self.glyphs.get(glyph_id as usize)
    }

    /// Returns the lookup maps.
    #[inline]
    pub fn glyph_map(&self) -> &GlyphMap {
        &self.glyph_map
    }

    /// Returns the ID of the glyph that renders `character`.
    ///
    /// The character map is tried with the first character, then the Unicode and code point
    /// maps with its scalar value, then the tag map with the whole string. If all of those
    /// fail, the default glyph is returned, if any.
    #[inline]
    pub fn glyph_id_for_character(&self, character: &str) -> Option<u32> {
        self.glyph_map.lookup_character(character)
    }

    /// Returns the glyph that renders `character`. See [`Font::glyph_id_for_character`].
    #[inline]
    pub fn glyph_for_character(&self, character: &str) -> Option<&Glyph> {
        self.glyph_id_for_character(character)
            .and_then(|glyph_id| self.glyph(glyph_id))
    }

    /// Returns the glyph that renders a single `char`.
    pub fn glyph_for_char(&self, character: char) -> Option<&Glyph> {
        let mut buffer = [0; 4];
        self.glyph_for_character(character.encode_utf8(&mut buffer))
    }

    /// Returns the ID of the glyph for a numeric character code.
    ///
    /// The code point map is tried first, then the Unicode map, then the default glyph. Tags
    /// are never consulted.
    #[inline]
    pub fn glyph_id_for_char_code(&self, code: u32) -> Option<u32> {
        self.glyph_map.lookup_char_code(code)
    }

    /// Returns the glyph for a numeric character code. See [`Font::glyph_id_for_char_code`].
    #[inline]
    pub fn glyph_for_char_code(&self, code: u32) -> Option<&Glyph> {
        self.glyph_id_for_char_code(code)
            .and_then(|glyph_id| self.glyph(glyph_id))
    }

    /// Returns the glyph ID for the specified tag. The default glyph is not used.
    #[inline]
    pub fn glyph_by_name(&self, name: &str) -> Option<u32> {
        self.glyph_map.by_tag(name)
    }

    /// Returns the default glyph, used for characters the font doesn't cover.
    #[inline]
    pub fn default_glyph(&self) -> Option<&Glyph> {
        self.glyph_map
            .default_glyph()
            .and_then(|glyph_id| self.glyph(glyph_id))
    }

    /// Returns the pixel boundaries of a glyph's raster relative to a pen position on the
    /// baseline. The origin of the coordinate space is at the top left.
    pub fn raster_bounds(&self, glyph_id: u32) -> Result<RectI, GlyphLoadingError> {
        self.glyph(glyph_id)
            .map(Glyph::raster_bounds)
            .ok_or(GlyphLoadingError::NoSuchGlyph)
    }

    /// Draws a single glyph's bitmap, uncolored, with its top left corner at `origin`.
    pub fn rasterize_glyph<S>(
        &self,
        surface: &mut S,
        glyph_id: u32,
        origin: Vector2I,
    ) -> Result<(), GlyphLoadingError>
    where
        S: Surface + ?Sized,
    {
        let glyph = self.glyph(glyph_id).ok_or(GlyphLoadingError::NoSuchGlyph)?;
        if !glyph.blank {
            surface.draw_bitmap(&glyph.image, origin);
        }
        Ok(())
    }
}
