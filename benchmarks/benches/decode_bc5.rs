/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use zune_bc5::{encode, Bc5Decoder, BlueMode};
use zune_bc5_benches::normal_map;

fn decode_zune_bc5(data: &[u8], blue_mode: BlueMode, threads: usize) -> Vec<u8> {
    let mut decoder = Bc5Decoder::new(data);
    decoder.set_blue_mode(blue_mode);
    decoder.set_num_threads(threads);
    decoder.decode().unwrap()
}

fn bench_decode(c: &mut Criterion) {
    let data = encode(&normal_map(1024, 1024)).unwrap();

    let mut group = c.benchmark_group("bc5: Simple decode (1024x1024 normal map)");

    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("zune-bc5/blue-zero", |b| {
        b.iter(|| black_box(decode_zune_bc5(data.as_slice(), BlueMode::Zero, 1)))
    });

    group.bench_function("zune-bc5/compute-normal", |b| {
        b.iter(|| black_box(decode_zune_bc5(data.as_slice(), BlueMode::ComputeNormal, 1)))
    });

    group.bench_function("zune-bc5/compute-normal-4-threads", |b| {
        b.iter(|| black_box(decode_zune_bc5(data.as_slice(), BlueMode::ComputeNormal, 4)))
    });
}

criterion_group!(name=benches;
      config={
      let c = Criterion::default();
        c.measurement_time(Duration::from_secs(20))
      };
    targets=bench_decode);

criterion_main!(benches);
