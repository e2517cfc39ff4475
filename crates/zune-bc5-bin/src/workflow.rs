/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, error, info};
use zune_bc5::{Bc5Decoder, Bc5Encoder};
use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;
use zune_core::options::EncoderOptions;
use zune_image::image::Image;

use crate::cmd_args::arg_parsers::Mode;
use crate::cmd_parsers::global_options::CmdOptions;
use crate::errors::Bc5CliErrors;
use crate::file_io::{collect_inputs, output_path};

/// Outcome of a whole batch
#[derive(Debug, Copy, Clone)]
pub struct BatchSummary {
    pub converted: usize,
    pub failed:    usize,
    pub elapsed:   Duration
}

impl BatchSummary {
    pub fn files_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();

        if seconds > 0.0 {
            self.converted as f64 / seconds
        } else {
            0.0
        }
    }
}

impl Display for BatchSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Done! Converted {} files ({} failed) in {:.3} seconds ({:.2} files/sec).",
            self.converted,
            self.failed,
            self.elapsed.as_secs_f64(),
            self.files_per_second()
        )
    }
}

/// Convert every input of the batch
///
/// A file that fails is reported and skipped, only problems that stop the
/// whole batch (no input directory, unwritable output directory) are returned as errors.
pub fn run_batch(options: &CmdOptions) -> Result<BatchSummary, Bc5CliErrors> {
    let files = collect_inputs(options)?;

    info!("Converting {} files", files.len());

    fs::create_dir_all(&options.output_dir)?;

    let start = Instant::now();
    let (mut converted, mut failed) = (0, 0);

    for file in &files {
        match convert_file(file, options) {
            Ok(out) => {
                info!("{:?} -> {:?}", file, out);
                converted += 1;
            }
            Err(err) => {
                error!(
                    "Could not convert {:?}, {} error: {}",
                    file,
                    err.kind_name(),
                    err
                );
                failed += 1;
            }
        }
    }
    Ok(BatchSummary {
        converted,
        failed,
        elapsed: start.elapsed()
    })
}

/// Convert a single file according to the batch mode, returning the path written
pub fn convert_file(path: &Path, options: &CmdOptions) -> Result<PathBuf, Bc5CliErrors> {
    match options.mode {
        Mode::Compress => compress_file(path, options),
        Mode::Decompress => decompress_file(path, options)
    }
}

fn compress_file(path: &Path, options: &CmdOptions) -> Result<PathBuf, Bc5CliErrors> {
    debug!("Compressing {:?}", path);

    let data = fs::read(path)?;
    let mut image = Image::read(data.as_slice(), options.decoder_options())?;

    let colorspace = image.colorspace();

    if !matches!(
        colorspace,
        ColorSpace::RGBA | ColorSpace::RGB | ColorSpace::LumaA | ColorSpace::Luma
    ) {
        debug!("Converting {:?} to RGBA", colorspace);
        image.convert_color(ColorSpace::RGBA)?;
    }
    let (width, height) = image.dimensions();

    // animated inputs only contribute their first frame
    let frames = image.flatten_to_u8();
    let pixels = frames
        .first()
        .ok_or_else(|| Bc5CliErrors::Generic(format!("{:?} contains no frames", path)))?;

    let encoder_options = EncoderOptions::default()
        .set_colorspace(image.colorspace())
        .set_depth(BitDepth::Eight)
        .set_num_threads(options.num_threads);

    let encoder = Bc5Encoder::new(pixels, width, height, encoder_options);

    let stream = if options.header {
        encoder.encode()?
    } else {
        encoder.encode_blocks()?
    };
    let out = output_path(&options.output_dir, path, "bc5")?;

    fs::write(&out, stream)?;

    Ok(out)
}

fn decompress_file(path: &Path, options: &CmdOptions) -> Result<PathBuf, Bc5CliErrors> {
    debug!("Decompressing {:?}", path);

    let data = fs::read(path)?;

    let mut decoder = match (options.header, options.raw_size) {
        (true, _) => Bc5Decoder::new_with_options(&data, options.decoder_options()),
        (false, Some((width, height))) => {
            Bc5Decoder::new_raw_with_options(&data, width, height, options.decoder_options())
        }
        (false, None) => {
            return Err(Bc5CliErrors::Generic(
                "Headerless streams need --width and --height".to_string()
            ))
        }
    };
    decoder.set_blue_mode(options.blue_mode);
    decoder.set_num_threads(usize::from(options.num_threads));

    let pixels = decoder.decode()?;

    let (width, height) = decoder
        .dimensions()
        .ok_or_else(|| Bc5CliErrors::Generic(format!("{:?} has no dimensions", path)))?;

    debug!(
        "Decoded {}x{} image, blue rebuilt with {:?}",
        width,
        height,
        decoder.blue_mode()
    );

    let image = if options.out_format.keeps_alpha() {
        Image::from_u8(&pixels, width, height, ColorSpace::RGBA)
    } else {
        let rgb: Vec<u8> = pixels
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        Image::from_u8(&rgb, width, height, ColorSpace::RGB)
    };
    let out = output_path(&options.output_dir, path, options.out_format.extension())?;

    image.save_to(&out, options.out_format.image_format())?;

    Ok(out)
}
