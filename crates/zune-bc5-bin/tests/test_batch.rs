/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs;
use std::path::Path;

use zune_bc5::BlueMode;
use zune_bc5_bin::{run_batch, CmdOptions, Mode, OutFormat};
use zune_core::colorspace::ColorSpace;
use zune_image::codecs::ImageFormat;
use zune_image::image::Image;

fn write_png(path: &Path, width: usize, height: usize) {
    let pixels: Vec<u8> = (0..width * height)
        .flat_map(|i| [(i % 256) as u8, (i * 3 % 256) as u8, 90, 255])
        .collect();

    Image::from_u8(&pixels, width, height, ColorSpace::RGBA)
        .save_to(path, ImageFormat::PNG)
        .unwrap();
}

#[test]
fn test_compress_then_decompress_directory() {
    let input = tempfile::tempdir().unwrap();
    let compressed = tempfile::tempdir().unwrap();
    let restored = tempfile::tempdir().unwrap();

    write_png(&input.path().join("a.png"), 9, 5);
    write_png(&input.path().join("b.png"), 4, 4);
    fs::write(input.path().join("notes.txt"), b"not an image").unwrap();

    let mut options = CmdOptions::new(Mode::Compress, compressed.path().to_path_buf());
    options.input_dir = Some(input.path().to_path_buf());

    let summary = run_batch(&options).unwrap();
    assert_eq!((summary.converted, summary.failed), (2, 0));

    let stream = fs::read(compressed.path().join("a.png.bc5")).unwrap();
    assert_eq!(stream.len(), 12 + 16 * 3 * 2);
    assert_eq!(&stream[..4], b"BC5 ");

    let mut options = CmdOptions::new(Mode::Decompress, restored.path().to_path_buf());
    options.input_dir = Some(compressed.path().to_path_buf());
    options.blue_mode = BlueMode::One;

    let summary = run_batch(&options).unwrap();
    assert_eq!((summary.converted, summary.failed), (2, 0));

    let image = Image::open(restored.path().join("a.png.bc5.png")).unwrap();
    assert_eq!(image.dimensions(), (9, 5));
}

#[test]
fn test_bad_file_does_not_stop_batch() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let mut good = b"BC5 ".to_vec();
    good.extend_from_slice(&[0, 0, 0, 4, 0, 0, 0, 4]);
    good.extend_from_slice(&[0; 16]);

    fs::write(input.path().join("good.bc5"), &good).unwrap();
    fs::write(input.path().join("bad.bc5"), b"nope").unwrap();
    fs::write(input.path().join("short.bc5"), &good[..20]).unwrap();

    let mut options = CmdOptions::new(Mode::Decompress, output.path().to_path_buf());
    options.input_dir = Some(input.path().to_path_buf());
    options.out_format = OutFormat::Ppm;

    let summary = run_batch(&options).unwrap();
    assert_eq!((summary.converted, summary.failed), (1, 2));
    assert!(output.path().join("good.bc5.ppm").exists());
    assert!(!output.path().join("bad.bc5.ppm").exists());
}

#[test]
fn test_headerless_streams() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let png = input.path().join("tile.png");
    write_png(&png, 8, 8);

    let mut options = CmdOptions::new(Mode::Compress, output.path().to_path_buf());
    options.inputs = vec![png];
    options.header = false;

    let summary = run_batch(&options).unwrap();
    assert_eq!(summary.converted, 1);

    let raw = output.path().join("tile.png.bc5");
    assert_eq!(fs::read(&raw).unwrap().len(), 16 * 2 * 2);

    let mut options = CmdOptions::new(Mode::Decompress, output.path().to_path_buf());
    options.inputs = vec![raw];
    options.header = false;
    options.raw_size = Some((8, 8));
    options.out_format = OutFormat::Qoi;

    let summary = run_batch(&options).unwrap();
    assert_eq!((summary.converted, summary.failed), (1, 0));
    assert!(output.path().join("tile.png.bc5.qoi").exists());
}

#[test]
fn test_patterns_filter_directory() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    write_png(&input.path().join("rock_n.png"), 4, 4);
    write_png(&input.path().join("rock_d.png"), 4, 4);

    let mut options = CmdOptions::new(Mode::Compress, output.path().to_path_buf());
    options.input_dir = Some(input.path().to_path_buf());
    options.patterns = vec!["*_n.png".to_string()];

    let summary = run_batch(&options).unwrap();
    assert_eq!(summary.converted, 1);
    assert!(output.path().join("rock_n.png.bc5").exists());
    assert!(!output.path().join("rock_d.png.bc5").exists());
}
