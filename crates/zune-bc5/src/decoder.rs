/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use zune_core::colorspace::ColorSpace;
use zune_core::log::{trace, warn};
use zune_core::options::DecoderOptions;

use crate::blue::BlueMode;
use crate::constants::{BLOCK_PAIR_SIZE, CHANNEL_BLOCK_SIZE};
use crate::errors::Bc5Errors;
use crate::header::decode_header;
use crate::image::Bc5Image;
use crate::plane::{decode_plane_from, BlockGrid, ChannelPlane};

/// A BC5 decoder
///
/// The decoder is initialized by calling `new` and either of
/// [`decode_headers`] to read the dimensions or [`decode`] to return
/// uncompressed RGBA pixels.
///
/// Red and green come from the stream, blue is rebuilt according to the
/// configured [`BlueMode`] and alpha is always 255.
///
/// [`decode_headers`]: Bc5Decoder::decode_headers
/// [`decode`]: Bc5Decoder::decode
pub struct Bc5Decoder<'a> {
    data:            &'a [u8],
    width:           usize,
    height:          usize,
    headerless:      bool,
    decoded_headers: bool,
    blue_mode:       BlueMode,
    num_threads:     usize,
    options:         DecoderOptions
}

impl<'a> Bc5Decoder<'a> {
    /// Create a decoder for a headed stream with the default options
    ///
    /// # Example
    ///
    /// ```no_run
    /// let mut decoder = zune_bc5::Bc5Decoder::new(&[]);
    /// // additional code
    /// ```
    pub fn new(data: &'a [u8]) -> Bc5Decoder<'a> {
        Bc5Decoder::new_with_options(data, DecoderOptions::default())
    }
    /// Create a decoder for a headed stream that obeys specified restrictions
    ///
    /// E.g can be used to set width and height limits to prevent OOM attacks
    ///
    /// # Example
    /// ```
    /// use zune_core::options::DecoderOptions;
    /// use zune_bc5::Bc5Decoder;
    /// // only decode images less than 10 in both width and height
    /// let options = DecoderOptions::default().set_max_width(10).set_max_height(10);
    ///
    /// let mut decoder = Bc5Decoder::new_with_options(&[], options);
    /// ```
    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> Bc5Decoder<'a> {
        Bc5Decoder {
            data,
            width: 0,
            height: 0,
            headerless: false,
            decoded_headers: false,
            blue_mode: BlueMode::default(),
            num_threads: default_threads(),
            options
        }
    }
    /// Create a decoder for a stream of block pairs without a header
    ///
    /// Such streams are produced by [`Bc5Encoder::encode_blocks`](crate::Bc5Encoder::encode_blocks),
    /// the dimensions are supplied by the caller.
    pub fn new_raw(data: &'a [u8], width: usize, height: usize) -> Bc5Decoder<'a> {
        Bc5Decoder::new_raw_with_options(data, width, height, DecoderOptions::default())
    }
    /// Same as [`new_raw`](Bc5Decoder::new_raw) but with explicit limits
    pub fn new_raw_with_options(
        data: &'a [u8], width: usize, height: usize, options: DecoderOptions
    ) -> Bc5Decoder<'a> {
        Bc5Decoder {
            width,
            height,
            headerless: true,
            ..Bc5Decoder::new_with_options(data, options)
        }
    }
    /// Set how the blue channel is reconstructed, defaults to [`BlueMode::Zero`]
    pub fn set_blue_mode(&mut self, mode: BlueMode) {
        self.blue_mode = mode;
    }
    pub const fn blue_mode(&self) -> BlueMode {
        self.blue_mode
    }
    /// Number of threads used to decode the two planes
    ///
    /// Values less than two decode on the calling thread.
    /// Has no effect without the `threads` feature
    pub fn set_num_threads(&mut self, num_threads: usize) {
        self.num_threads = num_threads;
    }

    /// Block stream following the header
    fn blocks(&self) -> Result<&'a [u8], Bc5Errors> {
        if self.headerless {
            Ok(self.data)
        } else {
            Ok(decode_header(self.data)?.1)
        }
    }

    /// Read the header, and check the stream is consistent with it
    ///
    /// For headerless streams only the checks are done.
    ///
    /// # Returns
    /// - On success: Nothing
    /// - On error: A [`Format`](crate::Bc5ErrorKind::Format) error for malformed streams or a
    ///   [`Dimension`](crate::Bc5ErrorKind::Dimension) one for zero or over limit dimensions
    pub fn decode_headers(&mut self) -> Result<(), Bc5Errors> {
        if self.decoded_headers {
            return Ok(());
        }
        let blocks = if self.headerless {
            self.data
        } else {
            let (header, remainder) = decode_header(self.data)?;

            self.width = header.width as usize;
            self.height = header.height as usize;
            remainder
        };
        let (width, height) = (self.width, self.height);

        if width == 0 || height == 0 {
            return Err(Bc5Errors::ZeroDimensions(width, height));
        }
        if width > self.options.get_max_width() {
            return Err(Bc5Errors::LargeDimensions(
                self.options.get_max_width(),
                width
            ));
        }
        if height > self.options.get_max_height() {
            return Err(Bc5Errors::LargeDimensions(
                self.options.get_max_height(),
                height
            ));
        }
        // validated before allocating anything
        let expected = BlockGrid::new(width, height)
            .stream_size(BLOCK_PAIR_SIZE)
            .unwrap_or(usize::MAX);

        if blocks.len() != expected {
            if blocks.len() > expected {
                warn!(
                    "Stream has {} trailing bytes after the last block",
                    blocks.len() - expected
                );
            }
            return Err(Bc5Errors::StreamLengthMismatch(expected, blocks.len()));
        }
        trace!("Image width: {}", width);
        trace!("Image height: {}", height);
        trace!("Headerless stream: {}", self.headerless);

        self.decoded_headers = true;

        Ok(())
    }
    /// Image dimensions as `(width, height)`
    ///
    /// Returns `None` if headers haven't been decoded
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if self.decoded_headers {
            return Some((self.width, self.height));
        }
        None
    }
    /// Colorspace of the decoded pixels, always RGBA
    ///
    /// Returns `None` if headers haven't been decoded
    pub const fn colorspace(&self) -> Option<ColorSpace> {
        if self.decoded_headers {
            return Some(ColorSpace::RGBA);
        }
        None
    }
    /// Size of the buffer [`decode_into`](Bc5Decoder::decode_into) needs
    ///
    /// Returns `None` if headers haven't been decoded or the size overflows
    pub fn output_buffer_size(&self) -> Option<usize> {
        if self.decoded_headers {
            return self
                .width
                .checked_mul(self.height)?
                .checked_mul(ColorSpace::RGBA.num_components());
        }
        None
    }

    /// Decode the red and green planes without assembling pixels
    pub fn decode_planes(&mut self) -> Result<(ChannelPlane, ChannelPlane), Bc5Errors> {
        self.decode_headers()?;

        let blocks = self.blocks()?;
        let (width, height) = (self.width, self.height);

        let red = decode_plane_from(blocks, width, height, BLOCK_PAIR_SIZE, 0, self.num_threads)?;
        let green = decode_plane_from(
            blocks,
            width,
            height,
            BLOCK_PAIR_SIZE,
            CHANNEL_BLOCK_SIZE,
            self.num_threads
        )?;
        Ok((red, green))
    }

    /// Decode into a pre-allocated buffer of exactly
    /// [`output_buffer_size`](Bc5Decoder::output_buffer_size) bytes
    pub fn decode_into(&mut self, pixels: &mut [u8]) -> Result<(), Bc5Errors> {
        self.decode_headers()?;

        let expected = self
            .output_buffer_size()
            .ok_or(Bc5Errors::TooLargeDimensions(self.width.max(self.height)))?;

        if pixels.len() != expected {
            return Err(Bc5Errors::PixelBufferMismatch(expected, pixels.len()));
        }
        let (red, green) = self.decode_planes()?;
        let mode = self.blue_mode;

        trace!("Reconstructing blue with {:?}", mode);

        for ((px, r), g) in pixels
            .chunks_exact_mut(4)
            .zip(red.data())
            .zip(green.data())
        {
            px[0] = *r;
            px[1] = *g;
            px[2] = mode.reconstruct(*r, *g);
            px[3] = 255;
        }
        Ok(())
    }

    /// Decode the stream into interleaved RGBA pixels
    ///
    /// # Returns
    /// - On success: `width*height*4` bytes
    /// - On error: the first problem found, nothing is partially returned
    pub fn decode(&mut self) -> Result<Vec<u8>, Bc5Errors> {
        self.decode_headers()?;

        let size = self
            .output_buffer_size()
            .ok_or(Bc5Errors::TooLargeDimensions(self.width.max(self.height)))?;

        let mut pixels = vec![0; size];

        self.decode_into(&mut pixels)?;

        Ok(pixels)
    }

    /// Decode the stream into a [`Bc5Image`]
    pub fn decode_image(&mut self) -> Result<Bc5Image, Bc5Errors> {
        let pixels = self.decode()?;

        Bc5Image::new(self.width, self.height, pixels)
    }
}

fn default_threads() -> usize {
    #[cfg(feature = "threads")]
    {
        std::thread::available_parallelism()
            .map(|x| x.get())
            .unwrap_or(1)
    }
    #[cfg(not(feature = "threads"))]
    {
        1
    }
}
