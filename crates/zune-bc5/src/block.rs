/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Single channel 4x4 block coding
//!
//! Every block is stored in 8 bytes
//!
//! ```text
//! byte 0    : endpoint0
//! byte 1    : endpoint1
//! bytes 2..8: sixteen 3 bit palette indices
//! ```
//!
//! The order of the endpoints selects the palette.
//!
//! - `endpoint0 > endpoint1`: eight evenly spaced values going from endpoint0 down to endpoint1
//! - `endpoint0 <= endpoint1`: six evenly spaced values going from endpoint0 up to endpoint1,
//!   followed by the anchors `0` and `255`
use crate::constants::{BLOCK_SAMPLES, CHANNEL_BLOCK_SIZE};

/// Interpolation scheme of a block, derived from the endpoint order
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BlockMode {
    /// Eight interpolated values between the endpoints
    EightStep,
    /// Six interpolated values plus the anchors 0 and 255
    SixStep
}

impl BlockMode {
    /// Mode a decoder infers from the stored endpoint bytes
    pub const fn from_endpoints(endpoint0: u8, endpoint1: u8) -> BlockMode {
        if endpoint0 > endpoint1 {
            BlockMode::EightStep
        } else {
            BlockMode::SixStep
        }
    }
}

/// Construct the 8 entry palette for a pair of endpoints
///
/// Entry 0 is always `endpoint0`.
pub fn build_palette(endpoint0: u8, endpoint1: u8) -> [u8; 8] {
    let e0 = u32::from(endpoint0);
    let e1 = u32::from(endpoint1);

    let mut palette = [0_u8; 8];

    // the exact value is e0 + (e1 - e0) * i / n, its fractional part is a
    // multiple of 1/n and never exactly one half for n = 5 or 7, so
    // adding floor(n/2) before dividing rounds to nearest
    match BlockMode::from_endpoints(endpoint0, endpoint1) {
        BlockMode::EightStep => {
            for (i, entry) in (0_u32..).zip(palette.iter_mut()) {
                *entry = ((e0 * (7 - i) + e1 * i + 3) / 7) as u8;
            }
        }
        BlockMode::SixStep => {
            for (i, entry) in (0_u32..).zip(palette[..6].iter_mut()) {
                *entry = ((e0 * (5 - i) + e1 * i + 2) / 5) as u8;
            }
            palette[6] = 0;
            palette[7] = 255;
        }
    }
    palette
}

/// Pack 16 indices into 6 bytes
///
/// Index `i` occupies bits `3*i..3*i+3` of a 48 bit little endian
/// integer, i.e. bits are consumed low bit first, byte by byte.
/// Only the low 3 bits of every index are used.
pub fn pack_indices(indices: &[u8; BLOCK_SAMPLES]) -> [u8; 6] {
    let mut bits = 0_u64;

    for (i, index) in indices.iter().enumerate() {
        bits |= u64::from(index & 7) << (3 * i);
    }
    let mut packed = [0; 6];

    for (j, byte) in packed.iter_mut().enumerate() {
        *byte = (bits >> (8 * j)) as u8;
    }
    packed
}

/// Inverse of [`pack_indices`]
pub fn unpack_indices(packed: &[u8; 6]) -> [u8; BLOCK_SAMPLES] {
    let mut bits = 0_u64;

    for (j, byte) in packed.iter().enumerate() {
        bits |= u64::from(*byte) << (8 * j);
    }
    let mut indices = [0; BLOCK_SAMPLES];

    for (i, index) in indices.iter_mut().enumerate() {
        *index = ((bits >> (3 * i)) & 7) as u8;
    }
    indices
}

/// Map every sample to its closest palette entry
///
/// Returns the indices and the sum of squared errors. Ties go to the lower index.
fn fit_palette(samples: &[u8; BLOCK_SAMPLES], palette: &[u8; 8]) -> ([u8; BLOCK_SAMPLES], u32) {
    let mut indices = [0; BLOCK_SAMPLES];
    let mut total_error = 0;

    for (sample, index) in samples.iter().zip(indices.iter_mut()) {
        let mut best_index = 0;
        let mut best_error = u32::MAX;

        for (i, entry) in palette.iter().enumerate() {
            let diff = u32::from(sample.abs_diff(*entry));
            let error = diff * diff;

            if error < best_error {
                best_error = error;
                best_index = i as u8;
            }
        }
        *index = best_index;
        total_error += best_error;
    }
    (indices, total_error)
}

/// A possible encoding of a block with its reconstruction error
struct Candidate {
    endpoint0: u8,
    endpoint1: u8,
    indices:   [u8; BLOCK_SAMPLES],
    error:     u32
}

impl Candidate {
    fn new(samples: &[u8; BLOCK_SAMPLES], endpoint0: u8, endpoint1: u8) -> Candidate {
        let palette = build_palette(endpoint0, endpoint1);
        let (indices, error) = fit_palette(samples, &palette);

        Candidate {
            endpoint0,
            endpoint1,
            indices,
            error
        }
    }
}

/// Encode one 4x4 block of samples laid out in row major order
pub fn encode_block(samples: &[u8; BLOCK_SAMPLES]) -> [u8; CHANNEL_BLOCK_SIZE] {
    let mut lo = u8::MAX;
    let mut hi = u8::MIN;

    for sample in samples {
        lo = lo.min(*sample);
        hi = hi.max(*sample);
    }
    let mut output = [0; CHANNEL_BLOCK_SIZE];

    if lo == hi {
        // palette entry 0 is endpoint0 in both modes, so all zero
        // indices reproduce the constant exactly
        output[0] = lo;
        output[1] = lo;
        return output;
    }

    let mut best = Candidate::new(samples, hi, lo);

    let six_step = Candidate::new(samples, lo, hi);

    if six_step.error < best.error {
        best = six_step;
    }

    // let the anchors carry exact 0 and 255 samples and spend the
    // six steps on whatever lies between
    if best.error != 0 && (lo == 0 || hi == 255) {
        let mut inner_lo = u8::MAX;
        let mut inner_hi = u8::MIN;

        for sample in samples.iter().filter(|x| **x != 0 && **x != 255) {
            inner_lo = inner_lo.min(*sample);
            inner_hi = inner_hi.max(*sample);
        }
        if inner_lo <= inner_hi && (inner_lo, inner_hi) != (lo, hi) {
            let anchored = Candidate::new(samples, inner_lo, inner_hi);

            if anchored.error < best.error {
                best = anchored;
            }
        }
    }

    output[0] = best.endpoint0;
    output[1] = best.endpoint1;
    output[2..].copy_from_slice(&pack_indices(&best.indices));

    output
}

/// Decode an 8 byte block into 16 samples in row major order
///
/// Every byte pattern is a valid block, so this never fails.
pub fn decode_block(block: &[u8; CHANNEL_BLOCK_SIZE]) -> [u8; BLOCK_SAMPLES] {
    let palette = build_palette(block[0], block[1]);

    let packed = [block[2], block[3], block[4], block[5], block[6], block[7]];

    unpack_indices(&packed).map(|index| palette[usize::from(index)])
}
