// yaff-kit/src/glyph.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Compiled, immutable glyphs.

use pathfinder_geometry::rect::RectI;
use pathfinder_geometry::vector::Vector2I;
use std::cmp;
use std::thread;

use crate::canvas::{Canvas, Format};
use crate::document::{GlyphSource, Ink};
use crate::label::Label;

// Below this many glyphs, spawning threads costs more than it saves.
const PARALLEL_COMPILE_THRESHOLD: usize = 256;

/// A glyph ready for rendering.
///
/// The advance box of a glyph is `left_bearing + raster_width + right_bearing` wide. Its
/// raster sits `shift_up` pixels above the baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    /// The decoded bitmap. Blank glyphs carry a 1×1 transparent placeholder.
    pub image: Canvas,
    /// The width of the raster, in pixels. 0 for blank glyphs.
    pub raster_width: i32,
    /// The height of the raster, in pixels. 0 for blank glyphs.
    pub raster_height: i32,
    /// Space before the raster, in pixels.
    pub left_bearing: i32,
    /// Space after the raster, in pixels.
    pub right_bearing: i32,
    /// How far the raster is raised above the baseline, in pixels.
    pub shift_up: i32,
    /// `left_bearing + raster_width + right_bearing`.
    pub bounding_width: i32,
    /// `raster_height + |shift_up|`.
    pub bounding_height: i32,
    /// The labels the glyph was declared with.
    pub labels: Vec<Label>,
    /// True if and only if the glyph was declared without ink.
    pub blank: bool,
}

impl Glyph {
    /// Compiles a glyph source. `global_shift_up` applies unless the glyph sets its own.
    pub fn compile(source: GlyphSource, global_shift_up: i32) -> Glyph {
        let (image, blank) = match source.ink {
            Ink::Raster(raster) => (
                Canvas::from_pixels(
                    Vector2I::new(raster.width() as i32, raster.height() as i32),
                    Format::Rgba32,
                    raster.into_pixels(),
                ),
                false,
            ),
            Ink::Blank => (Canvas::new(Vector2I::new(1, 1), Format::Rgba32), true),
        };
        let (raster_width, raster_height) = if blank {
            (0, 0)
        } else {
            (image.size.x(), image.size.y())
        };

        let left_bearing = source.props.left_bearing.unwrap_or(0);
        let right_bearing = source.props.right_bearing.unwrap_or(0);
        let shift_up = source.props.shift_up.unwrap_or(global_shift_up);

        Glyph {
            image,
            raster_width,
            raster_height,
            left_bearing,
            right_bearing,
            shift_up,
            bounding_width: left_bearing + raster_width + right_bearing,
            bounding_height: raster_height + shift_up.abs(),
            labels: source.labels,
            blank,
        }
    }

    /// Returns the raster size.
    #[inline]
    pub fn raster_size(&self) -> Vector2I {
        Vector2I::new(self.raster_width, self.raster_height)
    }

    /// Returns the advance box size.
    #[inline]
    pub fn bounding_size(&self) -> Vector2I {
        Vector2I::new(self.bounding_width, self.bounding_height)
    }

    /// Returns the pixel boundaries of the raster relative to the pen position on the
    /// baseline. The origin of the coordinate space is at the top left, so y grows downwards.
    #[inline]
    pub fn raster_bounds(&self) -> RectI {
        RectI::new(
            Vector2I::new(self.left_bearing, -(self.raster_height + self.shift_up)),
            self.raster_size(),
        )
    }
}

/// Compiles glyph sources, preserving their order.
///
/// Glyphs don't depend on each other, so large fonts are compiled on several threads.
pub fn compile_glyphs(sources: Vec<GlyphSource>, global_shift_up: i32) -> Vec<Glyph> {
    let threads = thread::available_parallelism()
        .map(|count| count.get())
        .unwrap_or(1);
    if threads < 2 || sources.len() < PARALLEL_COMPILE_THRESHOLD {
        return sources
            .into_iter()
            .map(|source| Glyph::compile(source, global_shift_up))
            .collect();
    }

    let chunk_size = cmp::max(1, (sources.len() + threads - 1) / threads);
    let mut chunks: Vec<Vec<GlyphSource>> = vec![];
    let mut sources = sources.into_iter().peekable();
    while sources.peek().is_some() {
        chunks.push(sources.by_ref().take(chunk_size).collect());
    }

    thread::scope(|scope| {
        let workers: Vec<_> = chunks
            .into_iter()
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .into_iter()
                        .map(|source| Glyph::compile(source, global_shift_up))
                        .collect::<Vec<Glyph>>()
                })
            })
            .collect();
        workers
            .into_iter()
            .flat_map(|worker| match worker.join() {
                Ok(glyphs) => glyphs,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}
