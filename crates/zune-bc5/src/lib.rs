/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Decoding and encoding two channel BC5 block compressed images
//!
//! BC5 keeps the red and green channels of an image, each in its own
//! 8 byte block per 4x4 pixel tile. It is mostly used for tangent space
//! normal maps where blue can be recomputed from red and green.
//!
//! A stream is a 12 byte header followed by one 16 byte block pair
//! (red block then green block) per tile, tiles in row major order.
//! Headerless streams holding only the block pairs are also supported.
//!
//! # Features
//! - Decoding and encoding
//! - Four ways of rebuilding blue, see [`BlueMode`]
//! - Multithreaded encoding and decoding behind the `threads` feature
//! - `no_std`
//!
//! # Example
//! ```
//! use zune_bc5::{decode, encode, BlueMode, Bc5Image};
//!
//! let image = Bc5Image::new(2, 2, vec![255, 0, 0, 255].repeat(4)).unwrap();
//! let stream = encode(&image).unwrap();
//! assert_eq!(stream.len(), 12 + 16);
//!
//! let back = decode(&stream, BlueMode::One).unwrap();
//! assert_eq!(back.pixels(), &[255, 0, 255, 255].repeat(4)[..]);
//! ```
//!
//! ## `no_std`
//! You can use `no_std` with alloc feature to compile for `no_std` endpoints,
//! the `threads` feature requires `std`

#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;
extern crate core;

use alloc::vec::Vec;

pub use blue::BlueMode;
pub use decoder::*;
pub use encoder::*;
pub use errors::*;
pub use header::Bc5Header;
pub use image::Bc5Image;
pub use zune_core;
use zune_core::options::{DecoderOptions, EncoderOptions};

pub mod block;
mod blue;
pub mod constants;
mod decoder;
mod encoder;
mod errors;
pub mod header;
mod image;
pub mod plane;

/// Encode an RGBA image into a headed BC5 stream
///
/// Only red and green are stored, blue and alpha are ignored.
///
/// Fails with [`ZeroDimensions`](Bc5Errors::ZeroDimensions) if the image has no pixels.
pub fn encode(image: &Bc5Image) -> Result<Vec<u8>, Bc5Errors> {
    let num_threads = usize::from(EncoderOptions::default().get_num_threads());

    encoder::encode_channels(&image.red(), &image.green(), num_threads, true)
}

/// Decode a headed BC5 stream into an RGBA image
///
/// Unlike [`Bc5Decoder::new`] no dimension limits are applied, any
/// well formed stream decodes.
pub fn decode(data: &[u8], blue_mode: BlueMode) -> Result<Bc5Image, Bc5Errors> {
    let options = DecoderOptions::default()
        .set_max_width(usize::MAX)
        .set_max_height(usize::MAX);

    let mut decoder = Bc5Decoder::new_with_options(data, options);
    decoder.set_blue_mode(blue_mode);
    decoder.decode_image()
}
