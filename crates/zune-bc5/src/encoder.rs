/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;
use zune_core::log::trace;
use zune_core::options::EncoderOptions;

use crate::constants::{BC5_HEADER_SIZE, BLOCK_PAIR_SIZE, CHANNEL_BLOCK_SIZE};
use crate::errors::Bc5Errors;
use crate::header::Bc5Header;
use crate::plane::{encode_plane_into, BlockGrid, InterleavedChannel, PlaneSource};

const SUPPORTED_COLORSPACES: [ColorSpace; 4] = [
    ColorSpace::RGBA,
    ColorSpace::RGB,
    ColorSpace::LumaA,
    ColorSpace::Luma
];

/// BC5 encoder
///
/// Red and green of the input are stored, everything else is dropped.
/// For single luma images the luma channel is stored in both planes.
///
/// # Example
/// - Encode a 100 by 100 RGBA image
///
/// ```
/// use zune_core::colorspace::ColorSpace;
/// use zune_core::options::EncoderOptions;
/// use zune_bc5::{Bc5Encoder, Bc5Errors};
///
/// const W: usize = 100;
/// const H: usize = 100;
///
/// fn main() -> Result<(), Bc5Errors> {
///     let pixels = vec![127_u8; W * H * 4];
///     let options = EncoderOptions::default().set_colorspace(ColorSpace::RGBA);
///     let encoder = Bc5Encoder::new(&pixels, W, H, options);
///     let stream = encoder.encode()?;
///     assert_eq!(stream.len(), 12 + 16 * 25 * 25);
///     Ok(())
/// }
/// ```
pub struct Bc5Encoder<'a> {
    pixel_data: &'a [u8],
    width:      usize,
    height:     usize,
    options:    EncoderOptions
}

impl<'a> Bc5Encoder<'a> {
    /// Create a new encoder
    ///
    /// # Arguments
    /// - data: Pixel data, size must be equal to `width*height*colorspace channels`
    /// - width, height: Image dimensions, zero is reported as an error by the encode functions
    /// - options: colorspace, bit depth and number of threads to use.
    ///   The width and height stored in the options are not read.
    pub const fn new(
        data: &'a [u8], width: usize, height: usize, options: EncoderOptions
    ) -> Bc5Encoder<'a> {
        Bc5Encoder {
            pixel_data: data,
            width,
            height,
            options
        }
    }

    /// Size of the headed stream this encoder produces
    ///
    /// Returns `None` if the block count overflows
    pub fn output_size(&self) -> Option<usize> {
        BlockGrid::new(self.width, self.height)
            .stream_size(BLOCK_PAIR_SIZE)?
            .checked_add(BC5_HEADER_SIZE)
    }

    /// Check the options against the pixels and return `(components, green channel)`
    fn validate(&self) -> Result<(usize, usize), Bc5Errors> {
        let (width, height) = (self.width, self.height);

        check_dimensions(width, height)?;

        let options = &self.options;

        if options.get_depth() != BitDepth::Eight {
            return Err(Bc5Errors::UnsupportedBitDepth(options.get_depth()));
        }
        let (components, green) = match options.get_colorspace() {
            ColorSpace::RGBA => (4, 1),
            ColorSpace::RGB => (3, 1),
            ColorSpace::LumaA => (2, 0),
            ColorSpace::Luma => (1, 0),
            colorspace => {
                return Err(Bc5Errors::UnsupportedColorspace(
                    colorspace,
                    &SUPPORTED_COLORSPACES
                ))
            }
        };
        let expected = width
            .checked_mul(height)
            .and_then(|x| x.checked_mul(components))
            .ok_or(Bc5Errors::TooLargeDimensions(width.max(height)))?;

        if self.pixel_data.len() != expected {
            return Err(Bc5Errors::PixelBufferMismatch(
                expected,
                self.pixel_data.len()
            ));
        }
        Ok((components, green))
    }

    fn encode_with(&self, with_header: bool) -> Result<Vec<u8>, Bc5Errors> {
        let (components, green_channel) = self.validate()?;
        let (width, height) = (self.width, self.height);

        trace!("Image colorspace: {:?}", self.options.get_colorspace());

        // validate checked the buffer against these
        let red = InterleavedChannel::from_parts(self.pixel_data, width, height, components, 0);
        let green = InterleavedChannel::from_parts(
            self.pixel_data,
            width,
            height,
            components,
            green_channel
        );
        let num_threads = usize::from(self.options.get_num_threads());

        encode_channels(&red, &green, num_threads, with_header)
    }

    /// Encode the image into a stream starting with the 12 byte header
    ///
    /// # Returns
    /// - Ok(stream): `12 + 16 * ceil(width/4) * ceil(height/4)` bytes
    /// - Err: The error encountered during encoding, nothing is partially written
    pub fn encode(&self) -> Result<Vec<u8>, Bc5Errors> {
        self.encode_with(true)
    }

    /// Encode the image into block pairs only, without the header
    ///
    /// The dimensions have to be communicated out of band, decode the
    /// result with [`Bc5Decoder::new_raw`](crate::Bc5Decoder::new_raw)
    pub fn encode_blocks(&self) -> Result<Vec<u8>, Bc5Errors> {
        self.encode_with(false)
    }
}

/// Zero area images and dimensions past the 32 bit header fields can't be encoded
fn check_dimensions(width: usize, height: usize) -> Result<(), Bc5Errors> {
    if width == 0 || height == 0 {
        return Err(Bc5Errors::ZeroDimensions(width, height));
    }
    if (width as u64) > u64::from(u32::MAX) {
        return Err(Bc5Errors::TooLargeDimensions(width));
    }
    if (height as u64) > u64::from(u32::MAX) {
        return Err(Bc5Errors::TooLargeDimensions(height));
    }
    Ok(())
}

/// Encode a red and a green plane of the same size into a stream,
/// optionally preceded by the header
pub(crate) fn encode_channels<P: PlaneSource + Sync>(
    red: &P, green: &P, num_threads: usize, with_header: bool
) -> Result<Vec<u8>, Bc5Errors> {
    let (width, height) = (red.width(), red.height());

    check_dimensions(width, height)?;

    if (green.width(), green.height()) != (width, height) {
        return Err(Bc5Errors::PlaneSizeMismatch(
            (width, height),
            (green.width(), green.height())
        ));
    }
    let header_size = if with_header { BC5_HEADER_SIZE } else { 0 };

    let size = BlockGrid::new(width, height)
        .stream_size(BLOCK_PAIR_SIZE)
        .and_then(|x| x.checked_add(header_size))
        .ok_or(Bc5Errors::TooLargeDimensions(width.max(height)))?;

    let num_threads = num_threads.max(1);

    trace!(
        "Encoding {}x{} image with {} threads",
        width,
        height,
        num_threads
    );
    let mut stream = vec![0; size];

    if with_header {
        // dimensions were checked to fit in a u32
        let header = Bc5Header::new(width as u32, height as u32);
        stream[..BC5_HEADER_SIZE].copy_from_slice(&header.to_bytes());
    }
    let blocks = &mut stream[header_size..];

    encode_plane_into(red, blocks, BLOCK_PAIR_SIZE, 0, num_threads)?;
    encode_plane_into(
        green,
        blocks,
        BLOCK_PAIR_SIZE,
        CHANNEL_BLOCK_SIZE,
        num_threads
    )?;

    Ok(stream)
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use zune_core::bit_depth::BitDepth;
    use zune_core::colorspace::ColorSpace;
    use zune_core::options::EncoderOptions;

    use crate::encoder::{encode_channels, Bc5Encoder};
    use crate::errors::{Bc5ErrorKind, Bc5Errors};
    use crate::plane::ChannelPlane;

    fn options(colorspace: ColorSpace) -> EncoderOptions {
        EncoderOptions::default()
            .set_colorspace(colorspace)
            .set_depth(BitDepth::Eight)
    }

    #[test]
    fn test_single_pixel_rgba() {
        let pixels = [10, 200, 33, 44];
        let stream = Bc5Encoder::new(&pixels, 1, 1, options(ColorSpace::RGBA))
            .encode()
            .unwrap();

        assert_eq!(stream.len(), 28);
        assert_eq!(&stream[..12], b"BC5 \x00\x00\x00\x01\x00\x00\x00\x01");
        assert_eq!(&stream[12..20], &[10, 10, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&stream[20..28], &[200, 200, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_luma_fills_both_planes() {
        let pixels = vec![90; 5 * 3];
        let stream = Bc5Encoder::new(&pixels, 5, 3, options(ColorSpace::Luma))
            .encode()
            .unwrap();

        assert_eq!(stream.len(), 12 + 16 * 2);
        for pair in stream[12..].chunks_exact(16) {
            assert_eq!(pair[..8], pair[8..]);
            assert_eq!(pair[0], 90);
        }
    }

    #[test]
    fn test_rgb_and_rgba_agree() {
        let rgba: Vec<u8> = (0..6 * 6 * 4).map(|x| (x * 13) as u8).collect();
        let rgb: Vec<u8> = rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();

        let a = Bc5Encoder::new(&rgba, 6, 6, options(ColorSpace::RGBA))
            .encode()
            .unwrap();
        let b = Bc5Encoder::new(&rgb, 6, 6, options(ColorSpace::RGB))
            .encode()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_blocks_are_stream_without_header() {
        let pixels: Vec<u8> = (0..9 * 7 * 4).map(|x| x as u8).collect();
        let encoder = Bc5Encoder::new(&pixels, 9, 7, options(ColorSpace::RGBA));

        let stream = encoder.encode().unwrap();
        let blocks = encoder.encode_blocks().unwrap();

        assert_eq!(&stream[12..], &blocks[..]);
        assert_eq!(encoder.output_size(), Some(stream.len()));
    }

    #[test]
    fn test_rejections() {
        let pixels = [0; 16];

        let err = Bc5Encoder::new(&pixels, 0, 4, options(ColorSpace::RGBA))
            .encode()
            .unwrap_err();
        assert!(matches!(err, Bc5Errors::ZeroDimensions(0, 4)));

        let err = Bc5Encoder::new(&pixels[..15], 2, 2, options(ColorSpace::RGBA))
            .encode()
            .unwrap_err();
        assert!(matches!(err, Bc5Errors::PixelBufferMismatch(16, 15)));

        let err = Bc5Encoder::new(&pixels, 2, 2, options(ColorSpace::YCbCr))
            .encode()
            .unwrap_err();
        assert!(matches!(err, Bc5Errors::UnsupportedColorspace(_, _)));

        let err = Bc5Encoder::new(
            &pixels,
            2,
            2,
            options(ColorSpace::RGBA).set_depth(BitDepth::Sixteen)
        )
        .encode_blocks()
        .unwrap_err();
        assert!(matches!(err, Bc5Errors::UnsupportedBitDepth(_)));
    }

    #[test]
    fn test_zero_height_is_an_error() {
        for (w, h) in [(4, 0), (0, 0)] {
            let encoder = Bc5Encoder::new(&[], w, h, options(ColorSpace::RGBA));

            let err = encoder.encode().unwrap_err();
            assert!(matches!(err, Bc5Errors::ZeroDimensions(a, b) if (a, b) == (w, h)));

            let err = encoder.encode_blocks().unwrap_err();
            assert_eq!(err.kind(), Bc5ErrorKind::Dimension);

            assert_eq!(encoder.output_size(), Some(12));
        }
    }

    #[test]
    fn test_planes_must_match() {
        let red = ChannelPlane::new(4, 4, vec![0; 16]).unwrap();
        let green = ChannelPlane::new(4, 2, vec![0; 8]).unwrap();

        let err = encode_channels(&red, &green, 1, true).unwrap_err();
        assert!(matches!(err, Bc5Errors::PlaneSizeMismatch((4, 4), (4, 2))));
    }

    #[test]
    fn test_thread_count_does_not_change_output() {
        let pixels: Vec<u8> = (0..33 * 41 * 4).map(|x| (x * 7 % 251) as u8).collect();

        let single = Bc5Encoder::new(
            &pixels,
            33,
            41,
            options(ColorSpace::RGBA).set_num_threads(1)
        )
        .encode()
        .unwrap();

        let many = Bc5Encoder::new(
            &pixels,
            33,
            41,
            options(ColorSpace::RGBA).set_num_threads(8)
        )
        .encode()
        .unwrap();

        assert_eq!(single, many);
    }
}
