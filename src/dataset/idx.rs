//! Decoder for the IDX binary dataset files used by MNIST and its
//! derivatives (Fashion-MNIST, EMNIST, …).
//!
//! # IDX3 image file layout
//! ```text
//! bytes  0-3:   0x00000803  (magic, big-endian u32)
//! bytes  4-7:   N           (number of images, big-endian u32)
//! bytes  8-11:  height      (image height in pixels, big-endian u32)
//! bytes 12-15:  width       (image width in pixels, big-endian u32)
//! bytes 16..:   N * height * width bytes, row-major, uint8
//! ```
//!
//! # IDX1 label file layout
//! ```text
//! bytes  0-3:   0x00000801  (magic, big-endian u32)
//! bytes  4-7:   N           (number of labels, big-endian u32)
//! bytes  8..:   N bytes, each a class index
//! ```
//!
//! Pixels are widened to `f64` with no scaling (0–255 stay 0.0–255.0);
//! normalization is the caller's business, done on each Matrix via `scale`.
//! Failures here are diagnostics for the loader's caller, never one of the
//! matrix core's error kinds.

use std::fs;

use crate::math::matrix::Matrix;

const IMAGE_MAGIC: u32 = 0x0000_0803;
const LABEL_MAGIC: u32 = 0x0000_0801;

/// A decoded IDX3 image file: `count` matrices of shape `height×width`.
#[derive(Debug)]
pub struct IdxImages {
    count: usize,
    height: usize,
    width: usize,
    images: Vec<Matrix>,
}

impl IdxImages {
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn images(&self) -> &[Matrix] {
        &self.images
    }
}

/// A decoded IDX1 label file.
#[derive(Debug)]
pub struct IdxLabels {
    labels: Vec<u8>,
}

impl IdxLabels {
    pub fn count(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// One-hot encodes the label at `index` into a 1×`classes` row vector.
    /// Returns `None` when the index is out of range or the label does not
    /// fit in `classes`.
    pub fn one_hot(&self, index: usize, classes: usize) -> Option<Matrix> {
        let label = *self.labels.get(index)? as usize;
        if label >= classes {
            return None;
        }
        let mut row = Matrix::zeros(1, classes);
        row.set(0, label, 1.0).ok()?;
        Some(row)
    }
}

fn read_be_u32(bytes: &[u8], offset: usize) -> Option<u32> {
    let chunk = bytes.get(offset..offset + 4)?;
    Some(u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
}

/// Decodes an IDX3 image file from raw bytes.
pub fn parse_images(bytes: &[u8]) -> Result<IdxImages, String> {
    let magic = read_be_u32(bytes, 0)
        .ok_or_else(|| format!("IDX image file too short: {} bytes", bytes.len()))?;
    if magic != IMAGE_MAGIC {
        return Err(format!(
            "IDX image file: bad magic 0x{magic:08X}, expected 0x{IMAGE_MAGIC:08X}"
        ));
    }

    let count = read_be_u32(bytes, 4)
        .ok_or_else(|| "IDX image file: missing item count".to_owned())? as usize;
    let height = read_be_u32(bytes, 8)
        .ok_or_else(|| "IDX image file: missing height".to_owned())? as usize;
    let width = read_be_u32(bytes, 12)
        .ok_or_else(|| "IDX image file: missing width".to_owned())? as usize;

    if height == 0 || width == 0 {
        return Err(format!(
            "IDX image file: zero image dimension ({height}x{width})"
        ));
    }
    let pixels = height
        .checked_mul(width)
        .ok_or_else(|| format!("IDX image file: {height}x{width} overflows"))?;
    let needed = 16 + count
        .checked_mul(pixels)
        .ok_or_else(|| format!("IDX image file: {count} items of {pixels} pixels overflows"))?;
    if bytes.len() < needed {
        return Err(format!(
            "IDX image file too short: header declares {count} images of {height}x{width}, \
             need {needed} bytes but file holds {}",
            bytes.len()
        ));
    }

    let mut images = Vec::with_capacity(count);
    for chunk in bytes[16..needed].chunks_exact(pixels) {
        let mut image = Matrix::from_bytes(chunk);
        // from_bytes yields a 1×pixels row; same buffer, image-shaped.
        image
            .reshape(height, width)
            .map_err(|e| format!("IDX image file: {e}"))?;
        images.push(image);
    }

    Ok(IdxImages { count, height, width, images })
}

/// Decodes an IDX1 label file from raw bytes.
pub fn parse_labels(bytes: &[u8]) -> Result<IdxLabels, String> {
    let magic = read_be_u32(bytes, 0)
        .ok_or_else(|| format!("IDX label file too short: {} bytes", bytes.len()))?;
    if magic != LABEL_MAGIC {
        return Err(format!(
            "IDX label file: bad magic 0x{magic:08X}, expected 0x{LABEL_MAGIC:08X}"
        ));
    }

    let count = read_be_u32(bytes, 4)
        .ok_or_else(|| "IDX label file: missing label count".to_owned())? as usize;
    let needed = 8 + count;
    if bytes.len() < needed {
        return Err(format!(
            "IDX label file too short: header declares {count} labels, \
             need {needed} bytes but file holds {}",
            bytes.len()
        ));
    }

    Ok(IdxLabels {
        labels: bytes[8..needed].to_vec(),
    })
}

/// Reads and decodes an IDX3 image file from disk. Any I/O or format failure
/// is reported as an absent result plus a diagnostic on stderr.
pub fn read_images(path: &str) -> Option<IdxImages> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("failed to read {path}: {e}");
            return None;
        }
    };
    match parse_images(&bytes) {
        Ok(images) => Some(images),
        Err(e) => {
            eprintln!("failed to decode {path}: {e}");
            None
        }
    }
}

/// Reads and decodes an IDX1 label file from disk. Same failure contract as
/// [`read_images`].
pub fn read_labels(path: &str) -> Option<IdxLabels> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("failed to read {path}: {e}");
            return None;
        }
    };
    match parse_labels(&bytes) {
        Ok(labels) => Some(labels),
        Err(e) => {
            eprintln!("failed to decode {path}: {e}");
            None
        }
    }
}
