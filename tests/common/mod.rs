//! Shared fixtures: a minimal embedder that writes carriers the decoder
//! understands.

#![allow(dead_code)]

use image::{ImageFormat, Rgb, RgbImage};
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub const SALT: [u8; 16] = [
    0x5a, 0x17, 0x00, 0xff, 0x42, 0x99, 0x0c, 0xde, 0x31, 0x88, 0x6b, 0x02, 0xe4, 0x7f, 0x10, 0xa3,
];

pub fn black_carrier(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([0, 0, 0]))
}

/// Header blob for an unprotected payload
pub fn plain_blob(extension: &str, data: &[u8]) -> Vec<u8> {
    let mut blob = vec![0u8];
    push_tail(&mut blob, extension, data);
    blob
}

/// Header blob for a password protected payload; `plaintext` is encrypted here
pub fn protected_blob(extension: &str, plaintext: &[u8], password: &str, salt: &[u8; 16]) -> Vec<u8> {
    let material = [password.as_bytes(), hex::encode(salt).as_bytes()].concat();
    let verifier = Sha256::digest(&material);

    let mut keystream = Vec::new();
    let mut counter = 0u32;
    while keystream.len() < plaintext.len() {
        let block = Sha256::digest([material.as_slice(), counter.to_string().as_bytes()].concat());
        keystream.extend_from_slice(&block);
        counter += 1;
    }
    let cipher: Vec<u8> = plaintext
        .iter()
        .zip(&keystream)
        .map(|(p, k)| p ^ k)
        .collect();

    let mut blob = vec![1u8];
    blob.extend_from_slice(&verifier);
    blob.extend_from_slice(salt);
    push_tail(&mut blob, extension, &cipher);
    blob
}

fn push_tail(blob: &mut Vec<u8>, extension: &str, data: &[u8]) {
    blob.push(extension.len() as u8);
    blob.extend_from_slice(extension.as_bytes());
    blob.extend_from_slice(&(data.len() as u32).to_be_bytes());
    blob.extend_from_slice(data);
}

/// Prefixes a blob with its 32-bit big-endian length
pub fn framed(blob: &[u8]) -> Vec<u8> {
    let mut out = (blob.len() as u32).to_be_bytes().to_vec();
    out.extend_from_slice(blob);
    out
}

fn is_watermark(x: u32, y: u32, width: u32, height: u32) -> bool {
    let skip_w = (f64::from(width) * 0.40) as u32;
    let skip_h = (f64::from(height) * 0.08) as u32;
    skip_w > 0 && skip_h > 0 && x < skip_w && y < skip_h
}

/// Writes `stream` MSB-first into the low `k` bits of eligible channels
pub fn embed(img: &mut RgbImage, k: u32, stream: &[u8]) {
    let total_bits = stream.len() * 8;
    let bit_at = |i: usize| -> u8 {
        if i < total_bits {
            (stream[i / 8] >> (7 - i % 8)) & 1
        } else {
            0
        }
    };
    let low_mask: u16 = (1 << k) - 1;
    let (width, height) = img.dimensions();
    let mut pos = 0usize;

    for y in 0..height {
        for x in 0..width {
            if is_watermark(x, y, width, height) {
                continue;
            }
            let pixel = img.get_pixel_mut(x, y);
            for channel in 0..3 {
                if pos >= total_bits {
                    return;
                }
                let mut chunk = 0u16;
                for _ in 0..k {
                    chunk = (chunk << 1) | u16::from(bit_at(pos));
                    pos += 1;
                }
                let value = u16::from(pixel[channel]);
                pixel[channel] = ((value & !low_mask) | chunk) as u8;
            }
        }
    }
    assert!(pos >= total_bits, "carrier too small for stream");
}

pub fn save_png(img: &RgbImage, dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    img.save_with_format(&path, ImageFormat::Png).unwrap();
    path
}

/// Encodes raw bytes as the pixels of a zero-padded RGB PNG
pub fn bytes_as_png(data: &[u8], width: u32, height: u32) -> Vec<u8> {
    let mut raw = data.to_vec();
    raw.resize((width * height * 3) as usize, 0);
    let img = RgbImage::from_raw(width, height, raw).unwrap();
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .unwrap();
    out
}

/// Saves a 64x64 black carrier holding `blob` at depth `k`
pub fn carrier_with_blob(dir: &Path, name: &str, k: u32, blob: &[u8]) -> PathBuf {
    let mut img = black_carrier(64, 64);
    embed(&mut img, k, &framed(blob));
    save_png(&img, dir, name)
}
