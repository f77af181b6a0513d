#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// A PNG signature plus IHDR chunk: enough for header-only size probing.
pub fn png_header_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(33);
    bytes.extend_from_slice(&[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    // bit depth, color type (RGB), compression, filter, interlace
    bytes.extend_from_slice(&[8, 2, 0, 0, 0]);
    // CRC is not checked when reading the size.
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes
}

pub fn write_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, png_header_bytes(width, height)).expect("write png file");
}

pub fn write_label(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, content).expect("write label file");
}

/// Images `img0..imgN` of one size, each with a single-box label file.
pub fn create_uniform_dataset(dir: &Path, n: usize, width: u32, height: u32) {
    for i in 0..n {
        write_png(&dir.join(format!("img{i}.png")), width, height);
        write_label(&dir.join(format!("img{i}.txt")), "0 0.5 0.5 0.5 0.5\n");
    }
}
