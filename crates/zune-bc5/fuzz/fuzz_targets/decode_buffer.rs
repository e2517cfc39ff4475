/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![no_main]

use libfuzzer_sys::fuzz_target;
use zune_bc5::{Bc5Decoder, BlueMode};

fuzz_target!(|data: &[u8]| {
    let mut decoder = Bc5Decoder::new(data);
    decoder.set_blue_mode(BlueMode::ComputeNormal);
    let _ = decoder.decode();
});
