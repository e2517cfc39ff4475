/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_bc5::Bc5Image;

/// A synthetic tangent space normal map of bumps, RGBA
///
/// Smooth areas with sharp rims, which is what BC5 usually sees in practice
pub fn normal_map(width: usize, height: usize) -> Bc5Image {
    let mut pixels = Vec::with_capacity(width * height * 4);

    for y in 0..height {
        for x in 0..width {
            let fx = ((x % 64) as f32 - 31.5) / 32.0;
            let fy = ((y % 64) as f32 - 31.5) / 32.0;

            let nx = (fx * 127.5 + 127.5) as u8;
            let ny = (fy * 127.5 + 127.5) as u8;

            pixels.extend_from_slice(&[nx, ny, 255, 255]);
        }
    }
    Bc5Image::new(width, height, pixels).unwrap()
}
