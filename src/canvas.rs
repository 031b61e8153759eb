// yaff-kit/src/canvas.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An in-memory bitmap surface for glyph compositing, and the trait that output surfaces
//! implement.

use pathfinder_geometry::rect::RectI;
use pathfinder_geometry::vector::Vector2I;
use std::cmp;

/// An 8-bit-per-channel color with straight (not premultiplied) alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ColorU {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl ColorU {
    /// Creates a color from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> ColorU {
        ColorU { r, g, b, a }
    }

    /// Fully transparent black, the color a fresh canvas is filled with.
    #[inline]
    pub const fn transparent_black() -> ColorU {
        ColorU::new(0, 0, 0, 0)
    }

    /// Opaque black.
    #[inline]
    pub const fn black() -> ColorU {
        ColorU::new(0, 0, 0, 0xff)
    }

    /// Opaque white, the color of decoded ink.
    #[inline]
    pub const fn white() -> ColorU {
        ColorU::new(0xff, 0xff, 0xff, 0xff)
    }

    #[inline]
    pub(crate) fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A 2D pixel surface that text can be composited onto.
///
/// Rendering takes the surface by `&mut`, so a surface is never shared between two render
/// calls at once. Use one surface per thread (or per call) to render concurrently.
pub trait Surface {
    /// Returns the size of the surface, in pixels.
    fn size(&self) -> Vector2I;

    /// Resizes the surface. The contents afterwards are fully transparent.
    fn resize(&mut self, size: Vector2I);

    /// Resets every pixel to transparent black.
    fn clear(&mut self);

    /// Copies `bitmap` onto the surface with its top left corner at `origin`, replacing the
    /// destination pixels. Parts that fall outside the surface are clipped.
    fn draw_bitmap(&mut self, bitmap: &Canvas, origin: Vector2I);

    /// Replaces the color of every pixel that is not fully transparent with `color`, keeping
    /// the pixel's alpha.
    fn stencil_fill(&mut self, color: ColorU);

    /// Returns the raw pixel data.
    fn pixels(&self) -> &[u8];
}

/// An in-memory bitmap surface for glyph compositing.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    /// The raw pixel data.
    pub pixels: Vec<u8>,
    /// The size of the buffer, in pixels.
    pub size: Vector2I,
    /// The number of *bytes* between successive rows.
    pub stride: usize,
    /// The image format of the canvas.
    pub format: Format,
}

impl Canvas {
    /// Creates a new blank canvas with the given pixel size and format.
    ///
    /// Stride is automatically calculated from width. Negative dimensions are treated as 0.
    ///
    /// The canvas is initialized with transparent black (all values 0).
    #[inline]
    pub fn new(size: Vector2I, format: Format) -> Canvas {
        let size = clamp_size(size);
        Canvas::with_stride(
            size,
            size.x() as usize * format.bytes_per_pixel() as usize,
            format,
        )
    }

    /// Creates a new blank canvas with the given pixel size, stride (number of bytes between
    /// successive rows), and format.
    ///
    /// The canvas is initialized with transparent black (all values 0).
    pub fn with_stride(size: Vector2I, stride: usize, format: Format) -> Canvas {
        let size = clamp_size(size);
        Canvas {
            pixels: vec![0; stride * size.y() as usize],
            size,
            stride,
            format,
        }
    }

    /// Wraps already decoded, tightly packed pixels.
    ///
    /// Panics if `pixels` does not hold exactly `size.x() * size.y()` pixels.
    pub(crate) fn from_pixels(size: Vector2I, format: Format, pixels: Vec<u8>) -> Canvas {
        let stride = size.x() as usize * format.bytes_per_pixel() as usize;
        assert_eq!(
            pixels.len(),
            stride * size.y() as usize,
            "pixel buffer doesn't match the canvas size"
        );
        Canvas {
            pixels,
            size,
            stride,
            format,
        }
    }

    /// Returns the rectangle this canvas covers, with its origin at (0, 0).
    #[inline]
    pub fn bounds(&self) -> RectI {
        RectI::new(Vector2I::zero(), self.size)
    }

    /// Returns the pixel at `position` as RGBA, or `None` if it lies outside the canvas.
    ///
    /// `A8` pixels are reported as white with the stored alpha.
    pub fn pixel(&self, position: Vector2I) -> Option<ColorU> {
        if position.x() < 0
            || position.y() < 0
            || position.x() >= self.size.x()
            || position.y() >= self.size.y()
        {
            return None;
        }
        let bytes_per_pixel = self.format.bytes_per_pixel() as usize;
        let start = position.y() as usize * self.stride + position.x() as usize * bytes_per_pixel;
        let pixel = &self.pixels[start..(start + bytes_per_pixel)];
        Some(match self.format {
            Format::Rgba32 => ColorU::new(pixel[0], pixel[1], pixel[2], pixel[3]),
            Format::A8 => ColorU::new(0xff, 0xff, 0xff, pixel[0]),
        })
    }

    /// Returns true if and only if every pixel is fully transparent.
    pub fn is_transparent(&self) -> bool {
        match self.format {
            Format::Rgba32 => self.pixels.chunks(4).all(|pixel| pixel[3] == 0),
            Format::A8 => self.pixels.iter().all(|&alpha| alpha == 0),
        }
    }

    /// Copies `src` onto this canvas at `origin`, converting formats as needed.
    pub fn blit_from_canvas(&mut self, src: &Canvas, origin: Vector2I) {
        self.blit_from(&src.pixels, src.size, src.stride, src.format, origin)
    }

    /// Copies raw pixels onto this canvas at `origin`, converting formats as needed.
    ///
    /// Pixels that land outside this canvas are clipped.
    pub fn blit_from(
        &mut self,
        src_bytes: &[u8],
        src_size: Vector2I,
        src_stride: usize,
        src_format: Format,
        origin: Vector2I,
    ) {
        let src_size = clamp_size(src_size);
        let min_x = cmp::max(origin.x(), 0);
        let min_y = cmp::max(origin.y(), 0);
        let max_x = cmp::min(origin.x() + src_size.x(), self.size.x());
        let max_y = cmp::min(origin.y() + src_size.y(), self.size.y());
        if min_x >= max_x || min_y >= max_y {
            return;
        }
        let dest_rect = RectI::new(
            Vector2I::new(min_x, min_y),
            Vector2I::new(max_x - min_x, max_y - min_y),
        );
        let src_offset = dest_rect.origin() - origin;

        match (self.format, src_format) {
            (Format::A8, Format::A8) | (Format::Rgba32, Format::Rgba32) => self
                .blit_from_with::<BlitMemcpy>(
                    src_bytes, src_stride, src_format, src_offset, dest_rect,
                ),
            (Format::A8, Format::Rgba32) => self.blit_from_with::<BlitRgba32ToA8>(
                src_bytes, src_stride, src_format, src_offset, dest_rect,
            ),
            (Format::Rgba32, Format::A8) => self.blit_from_with::<BlitA8ToRgba32>(
                src_bytes, src_stride, src_format, src_offset, dest_rect,
            ),
        }
    }

    fn blit_from_with<B>(
        &mut self,
        src_bytes: &[u8],
        src_stride: usize,
        src_format: Format,
        src_offset: Vector2I,
        dest_rect: RectI,
    ) where
        B: Blit,
    {
        let src_bytes_per_pixel = src_format.bytes_per_pixel() as usize;
        let dest_bytes_per_pixel = self.format.bytes_per_pixel() as usize;
        let width = dest_rect.width() as usize;

        for y in 0..(dest_rect.height() as usize) {
            let dest_row_start = (dest_rect.origin_y() as usize + y) * self.stride
                + dest_rect.origin_x() as usize * dest_bytes_per_pixel;
            let src_row_start = (src_offset.y() as usize + y) * src_stride
                + src_offset.x() as usize * src_bytes_per_pixel;
            let dest_row_end = dest_row_start + width * dest_bytes_per_pixel;
            let src_row_end = src_row_start + width * src_bytes_per_pixel;
            let dest_row_pixels = &mut self.pixels[dest_row_start..dest_row_end];
            let src_row_pixels = &src_bytes[src_row_start..src_row_end];
            B::blit(dest_row_pixels, src_row_pixels)
        }
    }
}

impl Surface for Canvas {
    #[inline]
    fn size(&self) -> Vector2I {
        self.size
    }

    fn resize(&mut self, size: Vector2I) {
        *self = Canvas::new(size, self.format);
    }

    fn clear(&mut self) {
        for byte in &mut self.pixels {
            *byte = 0;
        }
    }

    #[inline]
    fn draw_bitmap(&mut self, bitmap: &Canvas, origin: Vector2I) {
        self.blit_from_canvas(bitmap, origin)
    }

    fn stencil_fill(&mut self, color: ColorU) {
        // An alpha-only canvas has no color to replace.
        if self.format != Format::Rgba32 {
            return;
        }
        let [r, g, b, _] = color.to_rgba();
        for pixel in self.pixels.chunks_mut(4) {
            if pixel[3] != 0 {
                pixel[0] = r;
                pixel[1] = g;
                pixel[2] = b;
            }
        }
    }

    #[inline]
    fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// The image format for the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Format {
    /// R8G8B8A8 with straight alpha.
    Rgba32,
    /// A8.
    A8,
}

impl Format {
    /// Returns the number of bits per pixel that this image format corresponds to.
    #[inline]
    pub fn bits_per_pixel(self) -> u8 {
        match self {
            Format::Rgba32 => 32,
            Format::A8 => 8,
        }
    }

    /// Returns the number of color channels per pixel that this image format corresponds to.
    #[inline]
    pub fn components_per_pixel(self) -> u8 {
        match self {
            Format::Rgba32 => 4,
            Format::A8 => 1,
        }
    }

    /// Returns the number of bytes per pixel that this image format corresponds to.
    #[inline]
    pub fn bytes_per_pixel(self) -> u8 {
        self.bits_per_pixel() / 8
    }
}

#[inline]
fn clamp_size(size: Vector2I) -> Vector2I {
    Vector2I::new(cmp::max(size.x(), 0), cmp::max(size.y(), 0))
}

trait Blit {
    fn blit(dest: &mut [u8], src: &[u8]);
}

struct BlitMemcpy;

impl Blit for BlitMemcpy {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        dest.clone_from_slice(src)
    }
}

struct BlitRgba32ToA8;

impl Blit for BlitRgba32ToA8 {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        for (dest, src) in dest.iter_mut().zip(src.chunks(4)) {
            *dest = src[3]
        }
    }
}

struct BlitA8ToRgba32;

impl Blit for BlitA8ToRgba32 {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        for (dest, src) in dest.chunks_mut(4).zip(src.iter()) {
            let value = if *src == 0 { 0 } else { 0xff };
            dest[0] = value;
            dest[1] = value;
            dest[2] = value;
            dest[3] = *src;
        }
    }
}
