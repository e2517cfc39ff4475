/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::ArgMatches;
use log::{info, Level};
use zune_bc5::BlueMode;
use zune_core::options::DecoderOptions;

use crate::cmd_args::arg_parsers::{BlueArg, Mode, OutFormat};
use crate::errors::Bc5CliErrors;

/// Everything a batch needs, built once from the command line
#[derive(Debug, Clone)]
pub struct CmdOptions {
    pub mode:        Mode,
    /// Files given with `-i`, converted regardless of `patterns`
    pub inputs:      Vec<PathBuf>,
    pub input_dir:   Option<PathBuf>,
    pub output_dir:  PathBuf,
    pub patterns:    Vec<String>,
    pub out_format:  OutFormat,
    pub blue_mode:   BlueMode,
    pub header:      bool,
    /// Dimensions of headerless streams when decompressing
    pub raw_size:    Option<(usize, usize)>,
    pub num_threads: u8,
    pub max_width:   usize,
    pub max_height:  usize
}

impl CmdOptions {
    pub fn new(mode: Mode, output_dir: PathBuf) -> CmdOptions {
        CmdOptions {
            mode,
            inputs: vec![],
            input_dir: None,
            output_dir,
            patterns: mode
                .default_patterns()
                .iter()
                .map(|x| x.to_string())
                .collect(),
            out_format: OutFormat::Png,
            blue_mode: BlueMode::Zero,
            header: true,
            raw_size: None,
            num_threads: 4,
            max_width: 1 << 14,
            max_height: 1 << 14
        }
    }
    /// Limits applied to both image containers and BC5 streams
    pub fn decoder_options(&self) -> DecoderOptions {
        DecoderOptions::new_cmd()
            .set_max_width(self.max_width)
            .set_max_height(self.max_height)
    }
}

pub fn parse_options(options: &ArgMatches) -> Result<CmdOptions, Bc5CliErrors> {
    let mode = if options.get_flag("decompress") {
        Mode::Decompress
    } else {
        Mode::Compress
    };
    info!("Mode: {:?}", mode);

    let output_dir = match options.get_one::<PathBuf>("output") {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?
    };
    let mut cmd_options = CmdOptions::new(mode, output_dir);

    if let Some(inputs) = options.get_many::<PathBuf>("input") {
        cmd_options.inputs = inputs.cloned().collect();
    }
    cmd_options.input_dir = options.get_one::<PathBuf>("input-dir").cloned();

    if let Some(patterns) = options.get_many::<String>("pattern") {
        cmd_options.patterns = patterns.cloned().collect();
        info!("Using file patterns {:?}", cmd_options.patterns);
    }
    if let Some(format) = options.get_one::<OutFormat>("outformat") {
        cmd_options.out_format = *format;
    }
    if let Some(blue) = options.get_one::<BlueArg>("blue") {
        cmd_options.blue_mode = blue.to_blue_mode();
    }
    if let Some(threads) = options.get_one::<u8>("threads") {
        cmd_options.num_threads = *threads;
    }
    if let Some(width) = options.get_one::<usize>("max-width") {
        cmd_options.max_width = *width;
    }
    if let Some(height) = options.get_one::<usize>("max-height") {
        cmd_options.max_height = *height;
    }
    cmd_options.header = !options.get_flag("no-header");

    if !cmd_options.header && mode == Mode::Decompress {
        let width = options.get_one::<usize>("width").copied();
        let height = options.get_one::<usize>("height").copied();

        match (width, height) {
            (Some(w), Some(h)) => cmd_options.raw_size = Some((w, h)),
            _ => {
                return Err(Bc5CliErrors::Generic(
                    "--width and --height are required to decompress headerless streams"
                        .to_string()
                ))
            }
        }
    }
    Ok(cmd_options)
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level = if options.get_flag("debug") {
        Level::Debug
    } else if options.get_flag("trace") {
        Level::Trace
    } else if options.get_flag("warn") {
        Level::Warn
    } else if options.get_flag("info") {
        Level::Info
    } else {
        Level::Warn
    };

    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {err}");
        return;
    }
    info!("Initialized logger");
    info!("Log level :{}", log_level);
}
