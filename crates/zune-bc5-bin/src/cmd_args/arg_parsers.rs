/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::builder::PossibleValue;
use clap::ValueEnum;
use zune_bc5::BlueMode;
use zune_image::codecs::ImageFormat;

/// Direction of the conversion
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mode {
    Compress,
    Decompress
}

impl Mode {
    /// File name patterns picked from `--input-dir` when `--pattern` isn't given
    pub fn default_patterns(self) -> &'static [&'static str] {
        match self {
            Mode::Compress => &["*.png", "*.jpg", "*.jpeg", "*.ppm", "*.pgm", "*.pam", "*.qoi"],
            Mode::Decompress => &["*.bc5"]
        }
    }
}

/// Container format written when decompressing
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutFormat {
    Png,
    Jpg,
    Ppm,
    Qoi
}

impl OutFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            OutFormat::Png => "png",
            OutFormat::Jpg => "jpg",
            OutFormat::Ppm => "ppm",
            OutFormat::Qoi => "qoi"
        }
    }
    pub const fn image_format(self) -> ImageFormat {
        match self {
            OutFormat::Png => ImageFormat::PNG,
            OutFormat::Jpg => ImageFormat::JPEG,
            OutFormat::Ppm => ImageFormat::PPM,
            OutFormat::Qoi => ImageFormat::QOI
        }
    }
    /// Whether the alpha channel is written, alpha is always opaque after decoding
    /// so formats that can't carry it get RGB
    pub const fn keeps_alpha(self) -> bool {
        matches!(self, OutFormat::Png | OutFormat::Qoi)
    }
}

impl ValueEnum for OutFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Png, Self::Jpg, Self::Ppm, Self::Qoi]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Png => PossibleValue::new("png"),
            Self::Jpg => PossibleValue::new("jpg").alias("jpeg"),
            Self::Ppm => PossibleValue::new("ppm"),
            Self::Qoi => PossibleValue::new("qoi")
        })
    }
}

/// Command line spelling of [`BlueMode`]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BlueArg {
    Zero,
    One,
    Greyscale,
    ComputeNormal
}

impl BlueArg {
    pub const fn to_blue_mode(self) -> BlueMode {
        match self {
            BlueArg::Zero => BlueMode::Zero,
            BlueArg::One => BlueMode::One,
            BlueArg::Greyscale => BlueMode::Greyscale,
            BlueArg::ComputeNormal => BlueMode::ComputeNormal
        }
    }
}

impl ValueEnum for BlueArg {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Zero, Self::One, Self::Greyscale, Self::ComputeNormal]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Zero => PossibleValue::new("0").help("Blue is always 0"),
            Self::One => PossibleValue::new("1").help("Blue is always 255"),
            Self::Greyscale => PossibleValue::new("gs").help("Blue copies red, for greyscale images"),
            Self::ComputeNormal => {
                PossibleValue::new("cn").help("Blue is the Z of the normal stored in red and green")
            }
        })
    }
}
