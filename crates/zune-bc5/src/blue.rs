/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Rebuilding a third channel from the two stored ones

/// How the decoder fills the blue channel
///
/// BC5 only stores red and green, blue is derived per pixel from
/// those two when decoding.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum BlueMode {
    /// Blue is always 0
    #[default]
    Zero,
    /// Blue is always 255
    One,
    /// Blue is a copy of red, use this for greyscale images
    Greyscale,
    /// Red and green are the X and Y of a unit tangent space normal
    /// mapped from `[-1,1]` to `[0,255]`, blue becomes the implied Z
    ComputeNormal
}

impl BlueMode {
    /// Compute blue for one pixel
    #[inline]
    pub fn reconstruct(self, red: u8, green: u8) -> u8 {
        match self {
            BlueMode::Zero => 0,
            BlueMode::One => 255,
            BlueMode::Greyscale => red,
            BlueMode::ComputeNormal => compute_normal_z(red, green)
        }
    }
}

/// Z of a normalized vector whose X and Y are `red` and `green`
///
/// When quantization pushes `x²+y²` above one, z falls back to 0
fn compute_normal_z(red: u8, green: u8) -> u8 {
    let x = f32::from(red) / 127.5 - 1.0;
    let y = f32::from(green) / 127.5 - 1.0;

    let z = sqrt((1.0 - x * x - y * y).max(0.0));

    // z is in [0,1], so the value is in [127.5, 255], add a half and
    // truncate to round
    let blue = (z + 1.0) * 127.5 + 0.5;

    blue.clamp(0.0, 255.0) as u8
}

#[cfg(feature = "std")]
#[inline(always)]
fn sqrt(x: f32) -> f32 {
    x.sqrt()
}

/// Newton iteration from a bit level estimate, core has no `sqrt`
#[cfg(not(feature = "std"))]
fn sqrt(x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    let mut guess = f32::from_bits((x.to_bits() >> 1) + 0x1fbd_1df5);

    for _ in 0..4 {
        guess = 0.5 * (guess + x / guess);
    }
    guess
}
