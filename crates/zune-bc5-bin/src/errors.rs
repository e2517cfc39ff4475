/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors surfaced by the converter
use std::fmt::{Debug, Display, Formatter};

use zune_bc5::{Bc5ErrorKind, Bc5Errors};
use zune_image::errors::ImageErrors;

/// All errors possible while converting one file or setting up a batch
pub enum Bc5CliErrors {
    /// The BC5 codec rejected the data
    Codec(Bc5Errors),
    /// Reading or writing an image container failed
    Image(ImageErrors),
    Io(std::io::Error),
    /// A directory entry could not be visited
    Walk(walkdir::Error),
    Generic(String)
}

impl Bc5CliErrors {
    /// Short class name reported next to the file that failed
    pub fn kind_name(&self) -> &'static str {
        match self {
            Bc5CliErrors::Codec(err) => match err.kind() {
                Bc5ErrorKind::Format => "format",
                Bc5ErrorKind::Dimension => "dimension",
                Bc5ErrorKind::Input => "input"
            },
            Bc5CliErrors::Image(_) => "image",
            Bc5CliErrors::Io(_) | Bc5CliErrors::Walk(_) => "io",
            Bc5CliErrors::Generic(_) => "generic"
        }
    }
}

impl Debug for Bc5CliErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Bc5CliErrors::Codec(err) => writeln!(f, "{err:?}"),
            Bc5CliErrors::Image(err) => writeln!(f, "{err:?}"),
            Bc5CliErrors::Io(err) => writeln!(f, "{err}"),
            Bc5CliErrors::Walk(err) => writeln!(f, "{err}"),
            Bc5CliErrors::Generic(msg) => writeln!(f, "{msg}")
        }
    }
}

impl Display for Bc5CliErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for Bc5CliErrors {}

impl From<Bc5Errors> for Bc5CliErrors {
    fn from(value: Bc5Errors) -> Self {
        Bc5CliErrors::Codec(value)
    }
}

impl From<ImageErrors> for Bc5CliErrors {
    fn from(value: ImageErrors) -> Self {
        Bc5CliErrors::Image(value)
    }
}

impl From<std::io::Error> for Bc5CliErrors {
    fn from(value: std::io::Error) -> Self {
        Bc5CliErrors::Io(value)
    }
}

impl From<walkdir::Error> for Bc5CliErrors {
    fn from(value: walkdir::Error) -> Self {
        Bc5CliErrors::Walk(value)
    }
}

impl From<String> for Bc5CliErrors {
    fn from(value: String) -> Self {
        Bc5CliErrors::Generic(value)
    }
}
