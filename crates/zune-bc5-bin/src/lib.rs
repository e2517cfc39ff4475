/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Batch conversion between raster images and BC5 textures
use std::process::exit;

use log::error;

pub use crate::cmd_args::arg_parsers::{BlueArg, Mode, OutFormat};
pub use crate::cmd_parsers::global_options::CmdOptions;
pub use crate::errors::Bc5CliErrors;
pub use crate::workflow::{convert_file, run_batch, BatchSummary};

mod cmd_args;
mod cmd_parsers;
mod errors;
mod file_io;
mod workflow;

pub fn main() {
    let cmd = cmd_args::create_cmd_args();
    let matches = cmd.get_matches();

    cmd_parsers::global_options::setup_logger(&matches);

    let options = match cmd_parsers::global_options::parse_options(&matches) {
        Ok(options) => options,
        Err(err) => {
            error!(" Invalid options, reason {:?}", err);
            exit(1);
        }
    };

    match run_batch(&options) {
        Ok(summary) => {
            println!("{summary}");

            if summary.failed > 0 {
                exit(1);
            }
        }
        Err(err) => {
            println!();
            error!(" Could not complete conversion, reason {:?}", err);
            println!();
            exit(-1);
        }
    }
}
