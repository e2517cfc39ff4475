/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Tiling single channel planes into blocks and back
//!
//! A plane is padded up to a multiple of four in both directions by
//! repeating its last column and row, then cut into 4x4 blocks which
//! are visited left to right, top to bottom.
//!
//! The `*_into`/`*_from` variants take a `stride` and `offset` so that two planes can
//! share one stream, the red plane writes blocks at `k*16`, the green one at `k*16+8`.
use alloc::vec;
use alloc::vec::Vec;

use zune_core::log::trace;

use crate::block::{decode_block, encode_block};
use crate::constants::{BLOCK_DIMENSION, BLOCK_SAMPLES, CHANNEL_BLOCK_SIZE};
use crate::errors::Bc5Errors;

/// Read access to a grid of 8 bit samples
///
/// This is what the plane encoder needs from an image, implement it to
/// feed pixels from any container without copying them into a [`ChannelPlane`] first.
pub trait PlaneSource {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Sample at column `x`, row `y`
    ///
    /// Callers guarantee `x < width()` and `y < height()`
    fn sample_at(&self, x: usize, y: usize) -> u8;
}

/// An owned, row major single channel plane
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChannelPlane {
    width:  usize,
    height: usize,
    data:   Vec<u8>
}

impl ChannelPlane {
    /// Create a plane from row major samples
    ///
    /// Fails if `data.len() != width * height`
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<ChannelPlane, Bc5Errors> {
        let expected = width
            .checked_mul(height)
            .ok_or(Bc5Errors::TooLargeDimensions(width.max(height)))?;

        if data.len() != expected {
            return Err(Bc5Errors::PixelBufferMismatch(expected, data.len()));
        }
        Ok(ChannelPlane {
            width,
            height,
            data
        })
    }
    /// Copy the samples of any plane source, e.g. one channel of an interleaved buffer
    pub fn from_source<P: PlaneSource>(source: &P) -> ChannelPlane {
        let (width, height) = (source.width(), source.height());

        let mut data = Vec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                data.push(source.sample_at(x, y));
            }
        }
        ChannelPlane {
            width,
            height,
            data
        }
    }
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl PlaneSource for ChannelPlane {
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.height
    }
    #[inline(always)]
    fn sample_at(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

/// A view of one component of an interleaved pixel buffer
///
/// E.g. channel `1` of an RGBA buffer is the green plane
#[derive(Copy, Clone, Debug)]
pub struct InterleavedChannel<'a> {
    pixels:     &'a [u8],
    width:      usize,
    height:     usize,
    components: usize,
    channel:    usize
}

impl<'a> InterleavedChannel<'a> {
    /// Create a view over `pixels`
    ///
    /// Fails if the buffer length isn't `width*height*components`
    /// or if `channel` is not below `components`
    pub fn new(
        pixels: &'a [u8], width: usize, height: usize, components: usize, channel: usize
    ) -> Result<InterleavedChannel<'a>, Bc5Errors> {
        let expected = width
            .checked_mul(height)
            .and_then(|x| x.checked_mul(components))
            .ok_or(Bc5Errors::TooLargeDimensions(width.max(height)))?;

        if channel >= components {
            return Err(Bc5Errors::ChannelOutOfRange(channel, components));
        }
        if pixels.len() != expected {
            return Err(Bc5Errors::PixelBufferMismatch(expected, pixels.len()));
        }
        Ok(InterleavedChannel::from_parts(
            pixels, width, height, components, channel
        ))
    }
    /// Create a view without checking the buffer
    ///
    /// Callers must have validated the length and channel already
    pub(crate) const fn from_parts(
        pixels: &'a [u8], width: usize, height: usize, components: usize, channel: usize
    ) -> InterleavedChannel<'a> {
        InterleavedChannel {
            pixels,
            width,
            height,
            components,
            channel
        }
    }
}

impl<'a> PlaneSource for InterleavedChannel<'a> {
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.height
    }
    #[inline(always)]
    fn sample_at(&self, x: usize, y: usize) -> u8 {
        self.pixels[(y * self.width + x) * self.components + self.channel]
    }
}

/// Block layout of a `width` by `height` plane
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BlockGrid {
    pub width:    usize,
    pub height:   usize,
    pub blocks_x: usize,
    pub blocks_y: usize
}

impl BlockGrid {
    pub const fn new(width: usize, height: usize) -> BlockGrid {
        BlockGrid {
            width,
            height,
            blocks_x: width.div_ceil(BLOCK_DIMENSION),
            blocks_y: height.div_ceil(BLOCK_DIMENSION)
        }
    }
    /// Number of blocks, or `None` on overflow
    pub fn num_blocks(&self) -> Option<usize> {
        self.blocks_x.checked_mul(self.blocks_y)
    }
    /// Width after padding to a multiple of four
    pub const fn padded_width(&self) -> usize {
        self.blocks_x * BLOCK_DIMENSION
    }
    /// Height after padding to a multiple of four
    pub const fn padded_height(&self) -> usize {
        self.blocks_y * BLOCK_DIMENSION
    }
    /// Bytes needed when every block occupies `stride` bytes
    pub fn stream_size(&self, stride: usize) -> Option<usize> {
        self.num_blocks()?.checked_mul(stride)
    }
}

/// Gather block `(bx, by)`, clamping coordinates past the edge to the last row/column
fn gather_block<P: PlaneSource>(source: &P, bx: usize, by: usize) -> [u8; BLOCK_SAMPLES] {
    let max_x = source.width() - 1;
    let max_y = source.height() - 1;

    let mut samples = [0; BLOCK_SAMPLES];

    for (py, row) in samples.chunks_exact_mut(BLOCK_DIMENSION).enumerate() {
        let y = (by * BLOCK_DIMENSION + py).min(max_y);

        for (px, sample) in row.iter_mut().enumerate() {
            let x = (bx * BLOCK_DIMENSION + px).min(max_x);
            *sample = source.sample_at(x, y);
        }
    }
    samples
}

/// Encode block rows starting at `first_row` into `output`
///
/// `output` starts at the first byte of that block row
fn encode_rows<P: PlaneSource>(
    source: &P, grid: &BlockGrid, first_row: usize, output: &mut [u8], stride: usize,
    offset: usize
) {
    let row_bytes = grid.blocks_x * stride;

    for (row, row_output) in output.chunks_mut(row_bytes).enumerate() {
        let by = first_row + row;

        for (bx, block_output) in row_output.chunks_mut(stride).enumerate() {
            let samples = gather_block(source, bx, by);
            block_output[offset..offset + CHANNEL_BLOCK_SIZE]
                .copy_from_slice(&encode_block(&samples));
        }
    }
}

/// Encode a plane into a stream where every block takes `stride` bytes and this plane's
/// block lives `offset` bytes into it
///
/// `output` must be exactly `num_blocks * stride` bytes long.
///
/// `num_threads` greater than one splits the block rows into bands processed in parallel
/// when the `threads` feature is enabled, the result is identical either way.
pub fn encode_plane_into<P: PlaneSource + Sync>(
    source: &P, output: &mut [u8], stride: usize, offset: usize,
    #[cfg_attr(not(feature = "threads"), allow(unused_variables))] num_threads: usize
) -> Result<(), Bc5Errors> {
    let grid = BlockGrid::new(source.width(), source.height());

    if grid.width == 0 || grid.height == 0 {
        return Err(Bc5Errors::ZeroDimensions(grid.width, grid.height));
    }
    debug_assert!(offset + CHANNEL_BLOCK_SIZE <= stride);

    let expected = grid
        .stream_size(stride)
        .ok_or(Bc5Errors::TooLargeDimensions(grid.width.max(grid.height)))?;

    if output.len() != expected {
        return Err(Bc5Errors::BlockBytesMismatch(expected, output.len()));
    }
    trace!(
        "Encoding {}x{} plane as {}x{} blocks",
        grid.width,
        grid.height,
        grid.blocks_x,
        grid.blocks_y
    );
    #[cfg(feature = "threads")]
    {
        if num_threads > 1 && grid.blocks_y > 1 {
            let rows_per_band = grid.blocks_y.div_ceil(num_threads);
            let row_bytes = grid.blocks_x * stride;

            std::thread::scope(|s| {
                for (band, band_output) in output.chunks_mut(rows_per_band * row_bytes).enumerate()
                {
                    let grid = &grid;
                    s.spawn(move || {
                        encode_rows(
                            source,
                            grid,
                            band * rows_per_band,
                            band_output,
                            stride,
                            offset
                        );
                    });
                }
            });
            return Ok(());
        }
    }
    encode_rows(source, &grid, 0, output, stride, offset);

    Ok(())
}

/// Encode a plane into a freshly allocated run of 8 byte blocks
pub fn encode_plane<P: PlaneSource + Sync>(source: &P) -> Result<Vec<u8>, Bc5Errors> {
    let grid = BlockGrid::new(source.width(), source.height());

    let size = grid
        .stream_size(CHANNEL_BLOCK_SIZE)
        .ok_or(Bc5Errors::TooLargeDimensions(grid.width.max(grid.height)))?;

    let mut output = vec![0; size];

    encode_plane_into(source, &mut output, CHANNEL_BLOCK_SIZE, 0, 1)?;

    Ok(output)
}

/// Decode the block rows covering `output`, which holds whole pixel
/// rows beginning at block row `first_row`
fn decode_rows(
    blocks: &[u8], grid: &BlockGrid, first_row: usize, output: &mut [u8], stride: usize,
    offset: usize
) {
    let width = grid.width;
    let band_rows = output.len() / width;
    let band_blocks_y = band_rows.div_ceil(BLOCK_DIMENSION);

    for row in 0..band_blocks_y {
        let by = first_row + row;

        for bx in 0..grid.blocks_x {
            let start = (by * grid.blocks_x + bx) * stride + offset;

            let mut block = [0; CHANNEL_BLOCK_SIZE];
            block.copy_from_slice(&blocks[start..start + CHANNEL_BLOCK_SIZE]);

            let samples = decode_block(&block);

            for (py, sample_row) in samples.chunks_exact(BLOCK_DIMENSION).enumerate() {
                let local_y = row * BLOCK_DIMENSION + py;

                if local_y >= band_rows {
                    break;
                }
                let x = bx * BLOCK_DIMENSION;
                // drop the padding columns of the last block column
                let count = BLOCK_DIMENSION.min(width - x);
                let out_start = local_y * width + x;

                output[out_start..out_start + count].copy_from_slice(&sample_row[..count]);
            }
        }
    }
}

/// Reconstruct a `width` by `height` plane from a stream of blocks where each
/// block takes `stride` bytes and this plane's block is `offset` bytes into it
///
/// Padding added during encoding is cropped away.
///
/// Fails with [`BlockBytesMismatch`](Bc5Errors::BlockBytesMismatch) if `blocks` is not
/// exactly one stride per block of the grid.
pub fn decode_plane_from(
    blocks: &[u8], width: usize, height: usize, stride: usize, offset: usize,
    #[cfg_attr(not(feature = "threads"), allow(unused_variables))] num_threads: usize
) -> Result<ChannelPlane, Bc5Errors> {
    if width == 0 || height == 0 {
        return Err(Bc5Errors::ZeroDimensions(width, height));
    }
    debug_assert!(offset + CHANNEL_BLOCK_SIZE <= stride);

    let grid = BlockGrid::new(width, height);

    let expected = grid
        .stream_size(stride)
        .ok_or(Bc5Errors::TooLargeDimensions(width.max(height)))?;

    if blocks.len() != expected {
        return Err(Bc5Errors::BlockBytesMismatch(expected, blocks.len()));
    }
    let mut data = vec![0; width * height];

    #[cfg(feature = "threads")]
    {
        if num_threads > 1 && grid.blocks_y > 1 {
            let rows_per_band = grid.blocks_y.div_ceil(num_threads);
            let band_size = rows_per_band * BLOCK_DIMENSION * width;

            std::thread::scope(|s| {
                for (band, band_output) in data.chunks_mut(band_size).enumerate() {
                    let grid = &grid;
                    s.spawn(move || {
                        decode_rows(
                            blocks,
                            grid,
                            band * rows_per_band,
                            band_output,
                            stride,
                            offset
                        );
                    });
                }
            });
            return ChannelPlane::new(width, height, data);
        }
    }
    decode_rows(blocks, &grid, 0, &mut data, stride, offset);

    ChannelPlane::new(width, height, data)
}

/// Reconstruct a plane from a run of 8 byte blocks, the inverse of [`encode_plane`]
pub fn decode_plane(blocks: &[u8], width: usize, height: usize) -> Result<ChannelPlane, Bc5Errors> {
    decode_plane_from(blocks, width, height, CHANNEL_BLOCK_SIZE, 0, 1)
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::errors::Bc5Errors;
    use crate::plane::{
        decode_plane, decode_plane_from, encode_plane, encode_plane_into, gather_block,
        BlockGrid, ChannelPlane, InterleavedChannel, PlaneSource
    };

    fn gradient(width: usize, height: usize) -> ChannelPlane {
        let data = (0..width * height)
            .map(|i| ((i % width) * 7 + (i / width) * 3) as u8)
            .collect();
        ChannelPlane::new(width, height, data).unwrap()
    }

    #[test]
    fn test_grid_sizes() {
        let grid = BlockGrid::new(5, 9);
        assert_eq!((grid.blocks_x, grid.blocks_y), (2, 3));
        assert_eq!((grid.padded_width(), grid.padded_height()), (8, 12));
        assert_eq!(grid.stream_size(8), Some(48));

        let huge = BlockGrid::new(usize::MAX, usize::MAX);
        assert_eq!(huge.stream_size(16), None);
    }

    #[test]
    fn test_edge_clamping() {
        // 2x1 plane, every padded sample must repeat the nearest edge sample
        let plane = ChannelPlane::new(2, 1, vec![10, 20]).unwrap();
        let block = gather_block(&plane, 0, 0);

        for row in block.chunks_exact(4) {
            assert_eq!(row, &[10, 20, 20, 20]);
        }
    }

    #[test]
    fn test_constant_plane_round_trip_crops() {
        for (w, h) in [(1, 1), (3, 5), (4, 4), (7, 2), (9, 13)] {
            let plane = ChannelPlane::new(w, h, vec![77; w * h]).unwrap();
            let blocks = encode_plane(&plane).unwrap();

            assert_eq!(blocks.len(), 8 * w.div_ceil(4) * h.div_ceil(4));

            let decoded = decode_plane(&blocks, w, h).unwrap();
            assert_eq!(decoded, plane);
        }
    }

    #[test]
    fn test_gradient_round_trip_is_close() {
        let plane = gradient(13, 6);
        let blocks = encode_plane(&plane).unwrap();
        let decoded = decode_plane(&blocks, 13, 6).unwrap();

        assert_eq!((decoded.width(), decoded.height()), (13, 6));

        for (a, b) in plane.data().iter().zip(decoded.data()) {
            assert!(a.abs_diff(*b) <= 4, "{a} vs {b}");
        }
    }

    #[test]
    fn test_interleaved_projection() {
        let pixels: Vec<u8> = (0..4 * 3 * 2).map(|x| x as u8).collect();
        let green = InterleavedChannel::new(&pixels, 3, 2, 4, 1).unwrap();

        assert_eq!(green.sample_at(0, 0), 1);
        assert_eq!(green.sample_at(2, 1), 21);
        assert_eq!(
            ChannelPlane::from_source(&green).data(),
            &[1, 5, 9, 13, 17, 21]
        );
        assert!(matches!(
            InterleavedChannel::new(&pixels, 3, 2, 4, 4),
            Err(Bc5Errors::ChannelOutOfRange(4, 4))
        ));
        assert!(InterleavedChannel::new(&pixels[1..], 3, 2, 4, 0).is_err());
    }

    #[test]
    fn test_wrong_block_byte_count() {
        let err = decode_plane(&[0; 15], 4, 8).unwrap_err();
        assert!(matches!(err, Bc5Errors::BlockBytesMismatch(16, 15)));

        let err = decode_plane_from(&[0; 16], 4, 4, 16, 8, 1);
        assert!(err.is_ok());
        let err = decode_plane_from(&[0; 8], 4, 4, 16, 8, 1).unwrap_err();
        assert!(matches!(err, Bc5Errors::BlockBytesMismatch(16, 8)));
    }

    #[test]
    fn test_zero_sized_plane() {
        let plane = ChannelPlane::new(0, 4, vec![]).unwrap();
        assert!(matches!(
            encode_plane(&plane),
            Err(Bc5Errors::ZeroDimensions(0, 4))
        ));
    }

    #[test]
    fn test_strided_planes_share_stream() {
        let red = gradient(6, 7);
        let green = ChannelPlane::new(6, 7, vec![200; 42]).unwrap();

        let mut stream = vec![0; 16 * 2 * 2];
        encode_plane_into(&red, &mut stream, 16, 0, 1).unwrap();
        encode_plane_into(&green, &mut stream, 16, 8, 1).unwrap();

        assert_eq!(&stream[8..16], &[200, 200, 0, 0, 0, 0, 0, 0]);
        assert_eq!(stream[16..24], encode_plane(&red).unwrap()[8..16]);

        let green_back = decode_plane_from(&stream, 6, 7, 16, 8, 1).unwrap();
        assert_eq!(green_back, green);
    }

    #[cfg(feature = "threads")]
    #[test]
    fn test_threaded_matches_single_thread() {
        let plane = gradient(37, 61);
        let single = encode_plane(&plane).unwrap();

        for threads in [2, 3, 8, 64] {
            let mut threaded = vec![0; single.len()];
            encode_plane_into(&plane, &mut threaded, 8, 0, threads).unwrap();
            assert_eq!(threaded, single);

            let decoded = decode_plane_from(&threaded, 37, 61, 8, 0, threads).unwrap();
            assert_eq!(decoded, decode_plane(&single, 37, 61).unwrap());
        }
    }
}
