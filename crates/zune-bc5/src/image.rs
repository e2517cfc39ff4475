/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use zune_core::colorspace::ColorSpace;

use crate::errors::Bc5Errors;
use crate::plane::InterleavedChannel;

/// An 8 bit RGBA image, the pixel format the codec consumes and produces
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bc5Image {
    width:  usize,
    height: usize,
    pixels: Vec<u8>
}

impl Bc5Image {
    /// Number of interleaved components per pixel
    pub const COMPONENTS: usize = 4;

    /// Wrap interleaved `[R,G,B,A,R,G,B,A..]` pixels
    ///
    /// Fails if `pixels.len() != width * height * 4`
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Bc5Image, Bc5Errors> {
        let expected = width
            .checked_mul(height)
            .and_then(|x| x.checked_mul(Self::COMPONENTS))
            .ok_or(Bc5Errors::TooLargeDimensions(width.max(height)))?;

        if pixels.len() != expected {
            return Err(Bc5Errors::PixelBufferMismatch(expected, pixels.len()));
        }
        Ok(Bc5Image {
            width,
            height,
            pixels
        })
    }
    pub const fn width(&self) -> usize {
        self.width
    }
    pub const fn height(&self) -> usize {
        self.height
    }
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
    /// Always [`ColorSpace::RGBA`]
    pub const fn colorspace(&self) -> ColorSpace {
        ColorSpace::RGBA
    }
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
    /// View of the red component
    pub fn red(&self) -> InterleavedChannel<'_> {
        self.channel(0)
    }
    /// View of the green component
    pub fn green(&self) -> InterleavedChannel<'_> {
        self.channel(1)
    }

    fn channel(&self, channel: usize) -> InterleavedChannel<'_> {
        // the buffer length was validated in new
        InterleavedChannel::from_parts(
            &self.pixels,
            self.width,
            self.height,
            Self::COMPONENTS,
            channel
        )
    }
}
