/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during encoding and decoding
use core::fmt::{Debug, Display, Formatter};

use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;

/// Broad classification of a [`Bc5Errors`] value
///
/// Batch callers usually only care about which of these
/// went wrong, the variant carries the details.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Bc5ErrorKind {
    /// Malformed or truncated stream
    Format,
    /// Zero area images or byte counts that don't fit the block grid
    Dimension,
    /// The pixels handed to the encoder do not match their description
    Input
}

/// Possible errors that may occur during encoding and decoding
pub enum Bc5Errors {
    /// The stream does not start with `BC5 `
    ///
    /// The argument is the four bytes actually found
    WrongMagicBytes([u8; 4]),
    /// The input buffer is too short to hold a header
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes we expected
    /// - 2nd argument is number of bytes actually present
    InsufficientData(usize, usize),
    /// The block stream length does not match the dimensions
    /// declared in the header
    ///
    /// # Arguments
    /// - 1st argument is the expected stream length
    /// - 2nd argument is the length found
    StreamLengthMismatch(usize, usize),
    /// Width or height is zero
    ZeroDimensions(usize, usize),
    /// A dimension that cannot be stored in the 32 bit header fields
    TooLargeDimensions(usize),
    /// A dimension larger than what the decoder was configured to accept
    ///
    /// # Arguments
    /// - 1st argument is the configured maximum
    /// - 2nd argument is the value found
    LargeDimensions(usize, usize),
    /// Byte count handed to the plane decoder is not exactly
    /// one block per grid cell
    BlockBytesMismatch(usize, usize),
    /// Two planes of one image have different sizes
    ///
    /// Arguments are the `(width, height)` of the red and green planes
    PlaneSizeMismatch((usize, usize), (usize, usize)),
    /// Pixel buffer length does not match `width*height*components`
    PixelBufferMismatch(usize, usize),
    /// A channel index past the components of an interleaved buffer
    ///
    /// # Arguments
    /// - 1st argument is the channel requested
    /// - 2nd argument is the number of components per pixel
    ChannelOutOfRange(usize, usize),
    /// Colorspace the encoder can't project into red and green planes
    ///
    /// The first argument is the colorspace encountered
    /// The second argument is list of supported colorspaces
    UnsupportedColorspace(ColorSpace, &'static [ColorSpace]),
    /// Only 8 bit samples can be encoded
    UnsupportedBitDepth(BitDepth)
}

impl Bc5Errors {
    /// Return the class of this error
    pub const fn kind(&self) -> Bc5ErrorKind {
        match self {
            Bc5Errors::WrongMagicBytes(_)
            | Bc5Errors::InsufficientData(_, _)
            | Bc5Errors::StreamLengthMismatch(_, _) => Bc5ErrorKind::Format,
            Bc5Errors::ZeroDimensions(_, _)
            | Bc5Errors::TooLargeDimensions(_)
            | Bc5Errors::LargeDimensions(_, _)
            | Bc5Errors::BlockBytesMismatch(_, _)
            | Bc5Errors::PlaneSizeMismatch(_, _) => Bc5ErrorKind::Dimension,
            Bc5Errors::PixelBufferMismatch(_, _)
            | Bc5Errors::ChannelOutOfRange(_, _)
            | Bc5Errors::UnsupportedColorspace(_, _)
            | Bc5Errors::UnsupportedBitDepth(_) => Bc5ErrorKind::Input
        }
    }
}

impl Debug for Bc5Errors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Bc5Errors::WrongMagicBytes(found) => {
                writeln!(f, "Wrong magic bytes, expected `BC5 ` as stream start but found {found:?}")
            }
            Bc5Errors::InsufficientData(expected, found) => {
                writeln!(
                    f,
                    "Insufficient data required {expected} but remaining stream has {found}"
                )
            }
            Bc5Errors::StreamLengthMismatch(expected, found) => {
                writeln!(
                    f,
                    "Block stream length {found} does not match the {expected} bytes implied by the header dimensions"
                )
            }
            Bc5Errors::ZeroDimensions(width, height) => {
                writeln!(f, "Cannot encode an image of zero area ({width}x{height})")
            }
            Bc5Errors::TooLargeDimensions(found) => {
                writeln!(
                    f,
                    "Too large image dimensions {found}, BC5 can only encode images less than {}",
                    u32::MAX
                )
            }
            Bc5Errors::LargeDimensions(max, found) => {
                writeln!(
                    f,
                    "Image dimension {found} greater than max configured dimension {max}"
                )
            }
            Bc5Errors::BlockBytesMismatch(expected, found) => {
                writeln!(
                    f,
                    "Expected {expected} bytes of blocks for the plane grid, but found {found}"
                )
            }
            Bc5Errors::PlaneSizeMismatch(red, green) => {
                writeln!(
                    f,
                    "Red plane is {}x{} but green plane is {}x{}",
                    red.0, red.1, green.0, green.1
                )
            }
            Bc5Errors::ChannelOutOfRange(channel, components) => {
                writeln!(
                    f,
                    "Channel {channel} does not exist in pixels with {components} components"
                )
            }
            Bc5Errors::PixelBufferMismatch(expected, found) => {
                writeln!(
                    f,
                    "Expected length {expected} doesn't match pixels length {found}"
                )
            }
            Bc5Errors::UnsupportedColorspace(found, supported) => {
                writeln!(f, "Cannot encode image with colorspace {found:?} into BC5, supported ones are {supported:?}")
            }
            Bc5Errors::UnsupportedBitDepth(depth) => {
                writeln!(f, "Cannot encode image with bit depth {depth:?}, only 8 bit images are supported")
            }
        }
    }
}

impl Display for Bc5Errors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Bc5Errors {}
