/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// `BC5 `, the four bytes every headed stream starts with
pub const BC5_MAGIC: [u8; 4] = *b"BC5 ";
/// Magic + big endian u32 width + big endian u32 height
pub const BC5_HEADER_SIZE: usize = 12;

/// Width and height of a block in pixels
pub const BLOCK_DIMENSION: usize = 4;
/// Number of samples a single channel block covers
pub const BLOCK_SAMPLES: usize = BLOCK_DIMENSION * BLOCK_DIMENSION;
/// Size of one encoded single channel block, 2 endpoints + 48 index bits
pub const CHANNEL_BLOCK_SIZE: usize = 8;
/// Size of one red + green block pair in the stream
pub const BLOCK_PAIR_SIZE: usize = 2 * CHANNEL_BLOCK_SIZE;
