/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![no_main]

use libfuzzer_sys::fuzz_target;
use zune_bc5::{decode, encode, Bc5Image, BlueMode};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let width = usize::from(data[0] % 32) + 1;
    let height = usize::from(data[1] % 32) + 1;

    let pixels: Vec<u8> = data[2..]
        .iter()
        .copied()
        .cycle()
        .take(width * height * 4)
        .collect();

    if pixels.len() != width * height * 4 {
        return;
    }
    let image = Bc5Image::new(width, height, pixels).unwrap();
    let stream = encode(&image).unwrap();

    assert_eq!(stream.len(), 12 + 16 * width.div_ceil(4) * height.div_ceil(4));

    let back = decode(&stream, BlueMode::Zero).unwrap();
    assert_eq!(back.dimensions(), (width, height));
});
