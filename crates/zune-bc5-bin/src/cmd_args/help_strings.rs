/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

pub static ABOUT_HELP: &str = "BC5 compression/decompression tool

Converts raster images to two channel BC5 textures and back.
Only red and green survive compression, blue is rebuilt on decompression
according to --blue and alpha is always opaque.";

pub static INPUT_DIR_HELP: &str = "Convert every file below a directory

The directory is walked recursively. Only files whose name matches one of
the --pattern wildcards are converted, by default the common image
extensions when compressing and *.bc5 when decompressing";

pub static PATTERN_HELP: &str = "File name wildcard for --input-dir

`*` matches any run of characters, `?` a single character.
Matching ignores ASCII case. Can be given multiple times";

pub static NO_HEADER_HELP: &str = "Read and write bare block streams

Compression skips the 12 byte header. Decompression expects no header,
the image size then has to be given with --width and --height";

pub static BLUE_HELP: &str = "How blue is computed during decompression";

pub static EXAMPLES_HELP: &str = "Examples:
    bc5-converter -c -i image.jpeg -o compressed
    bc5-converter --compress --input-dir textures
    bc5-converter -d --input-dir compressed -o uncompressed --outformat jpg -b gs
    bc5-converter --decompress -i compressed/image.png.bc5 --outformat png --blue cn";
