#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Bytes of a minimal 24-bit uncompressed BMP, decodable by the `image` crate.
pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    const HEADER_LEN: u32 = 54;
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixels_len = row_stride * height;

    let mut bytes = Vec::with_capacity((HEADER_LEN + pixels_len) as usize);

    // File header
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&(HEADER_LEN + pixels_len).to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&HEADER_LEN.to_le_bytes());

    // BITMAPINFOHEADER
    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // planes
    bytes.extend_from_slice(&24u16.to_le_bytes()); // bits per pixel
    bytes.extend_from_slice(&0u32.to_le_bytes()); // no compression
    bytes.extend_from_slice(&pixels_len.to_le_bytes());
    for _ in 0..4 {
        bytes.extend_from_slice(&0u32.to_le_bytes());
    }

    // Black pixel rows
    bytes.resize((HEADER_LEN + pixels_len) as usize, 0);
    bytes
}

pub fn write_bmp(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height)).expect("write bmp file");
}

/// Create `root/folder/` containing the given file names with junk contents.
///
/// Split runs never decode pixels, so the contents only matter for the
/// extension filter.
pub fn write_class_files(root: &Path, folder: &str, names: &[&str]) {
    let dir = root.join(folder);
    fs::create_dir_all(&dir).expect("create class dir");
    for name in names {
        fs::write(dir.join(name), b"not really pixels").expect("write class file");
    }
}

/// Sorted file names directly inside `dir`, empty if it does not exist.
pub fn file_names(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
