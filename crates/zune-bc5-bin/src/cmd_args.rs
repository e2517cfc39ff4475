/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgGroup, Command};

use crate::cmd_args::arg_parsers::{BlueArg, OutFormat};
use crate::cmd_args::help_strings::{
    ABOUT_HELP, BLUE_HELP, EXAMPLES_HELP, INPUT_DIR_HELP, NO_HEADER_HELP, PATTERN_HELP
};

pub mod arg_parsers;
pub mod help_strings;

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("bc5-converter")
        .about("BC5 compression/decompression tool")
        .long_about(ABOUT_HELP)
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(EXAMPLES_HELP)
        .arg(Arg::new("input")
            .short('i')
            .long("input")
            .help("Input file to convert")
            .action(ArgAction::Append)
            .value_parser(value_parser!(PathBuf)))
        .arg(Arg::new("input-dir")
            .long("input-dir")
            .visible_alias("inputdir")
            .help("Input directory, matching files in it are converted")
            .long_help(INPUT_DIR_HELP)
            .value_parser(value_parser!(PathBuf)))
        .group(ArgGroup::new("inputs")
            .args(["input", "input-dir"])
            .multiple(true)
            .required(true))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .help("Directory to write results to, defaults to the working directory")
            .value_parser(value_parser!(PathBuf)))
        .arg(Arg::new("compress")
            .short('c')
            .long("compress")
            .action(ArgAction::SetTrue)
            .help_heading("MODE")
            .help("Compress images into .bc5 files, the default"))
        .arg(Arg::new("decompress")
            .short('d')
            .long("decompress")
            .action(ArgAction::SetTrue)
            .conflicts_with("compress")
            .help_heading("MODE")
            .help("Decompress .bc5 files into --outformat images"))
        .arg(Arg::new("pattern")
            .short('p')
            .long("pattern")
            .action(ArgAction::Append)
            .help("File name wildcard used with --input-dir")
            .long_help(PATTERN_HELP))
        .arg(Arg::new("outformat")
            .long("outformat")
            .help_heading("DECOMPRESSION")
            .help("Output image format")
            .value_parser(value_parser!(OutFormat))
            .default_value("png"))
        .arg(Arg::new("blue")
            .short('b')
            .long("blue")
            .help_heading("DECOMPRESSION")
            .help(BLUE_HELP)
            .value_parser(value_parser!(BlueArg))
            .default_value("0"))
        .arg(Arg::new("no-header")
            .long("no-header")
            .action(ArgAction::SetTrue)
            .help_heading("ADVANCED")
            .help("Read and write streams without the 12 byte header")
            .long_help(NO_HEADER_HELP))
        .arg(Arg::new("width")
            .long("width")
            .help_heading("ADVANCED")
            .help("Image width of headerless streams")
            .value_parser(value_parser!(usize))
            .requires("no-header"))
        .arg(Arg::new("height")
            .long("height")
            .help_heading("ADVANCED")
            .help("Image height of headerless streams")
            .value_parser(value_parser!(usize))
            .requires("no-header"))
        .arg(Arg::new("threads")
            .long("threads")
            .help_heading("ADVANCED")
            .help("Number of threads used to compress or decompress one image")
            .value_parser(value_parser!(u8).range(1..))
            .default_value("4"))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("ADVANCED")
            .help("Maximum width of images to decode")
            .value_parser(value_parser!(usize))
            .default_value("16384"))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("ADVANCED")
            .help("Maximum height of images to decode")
            .value_parser(value_parser!(usize))
            .default_value("16384"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display per file progress"))
}
