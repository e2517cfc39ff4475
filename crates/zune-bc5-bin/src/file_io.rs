/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::cmd_parsers::global_options::CmdOptions;
use crate::errors::Bc5CliErrors;

/// Match `name` against a wildcard where `*` is any run of characters
/// and `?` exactly one, ignoring ASCII case
pub fn matches_pattern(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();

    let (mut p, mut n) = (0, 0);
    // position of the last `*` and the name position it is currently absorbing up to
    let mut star: Option<(usize, usize)> = None;

    while n < name.len() {
        if p < pattern.len()
            && (pattern[p] == '?' || pattern[p].eq_ignore_ascii_case(&name[n]))
        {
            p += 1;
            n += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, n));
            p += 1;
        } else if let Some((star_p, star_n)) = star {
            // let the last star swallow one more character
            p = star_p + 1;
            n = star_n + 1;
            star = Some((star_p, star_n + 1));
        } else {
            return false;
        }
    }
    pattern[p..].iter().all(|c| *c == '*')
}

/// Files the batch should convert, explicit inputs first followed by
/// matching files below the input directory in file name order
///
/// Entries that can't be visited are skipped with a warning.
pub fn collect_inputs(options: &CmdOptions) -> Result<Vec<PathBuf>, Bc5CliErrors> {
    let mut files = options.inputs.clone();

    if let Some(dir) = &options.input_dir {
        if !dir.is_dir() {
            return Err(Bc5CliErrors::Generic(format!(
                "Path {:?} is not a directory",
                dir
            )));
        }
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping directory entry: {}", err);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let matched = {
                let name = entry.file_name().to_string_lossy();
                options.patterns.iter().any(|p| matches_pattern(p, &name))
            };
            if matched {
                debug!("Adding {:?}", entry.path());
                files.push(entry.into_path());
            } else {
                debug!("Ignoring {:?}", entry.path());
            }
        }
    }
    Ok(files)
}

/// `output_dir/<input file name>.<extension>`
///
/// The input's own extension is kept, `image.png` becomes `image.png.bc5`
pub fn output_path(output_dir: &Path, input: &Path, extension: &str) -> Result<PathBuf, Bc5CliErrors> {
    let name = input.file_name().ok_or_else(|| {
        Bc5CliErrors::Generic(format!("Path {:?} has no file name", input))
    })?;
    let mut name = name.to_os_string();
    name.push(".");
    name.push(extension);

    Ok(output_dir.join(name))
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use crate::file_io::{matches_pattern, output_path};

    #[test]
    fn test_wildcards() {
        assert!(matches_pattern("*.png", "image.png"));
        assert!(matches_pattern("*.png", "IMAGE.PNG"));
        assert!(matches_pattern("*", ""));
        assert!(matches_pattern("*.bc5", ".bc5"));
        assert!(matches_pattern("tex_??.png", "tex_01.png"));
        assert!(matches_pattern("*_n*.bc5", "rock_normal_n2.png.bc5"));
        assert!(matches_pattern("a*b*c", "aXbYbZc"));

        assert!(!matches_pattern("*.png", "image.png.bc5"));
        assert!(!matches_pattern("tex_??.png", "tex_1.png"));
        assert!(!matches_pattern("?", ""));
        assert!(!matches_pattern("a*b", "aXbYc"));
    }

    #[test]
    fn test_output_names() {
        let out = output_path(Path::new("out"), Path::new("in/dir/image.png"), "bc5").unwrap();
        assert_eq!(out, PathBuf::from("out/image.png.bc5"));

        let out = output_path(Path::new("out"), Path::new("a.bc5"), "jpg").unwrap();
        assert_eq!(out, PathBuf::from("out/a.bc5.jpg"));

        assert!(output_path(Path::new("out"), Path::new(".."), "png").is_err());
    }
}
