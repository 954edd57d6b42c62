//! Image format and dimensions from the first bytes of a file
//!
//! ```
//! # use std::io::Cursor;
//! # use imgpeek::{Dimensions, Format};
//! let mut data = b"GIF89a".to_vec();
//! data.extend_from_slice(&[0x40, 0x01, 0xF0, 0x00, 0, 0]);
//!
//! let info = imgpeek::detect(Cursor::new(data));
//! assert_eq!(info.format, Format::Gif);
//! assert_eq!(info.dimensions(), Some(Dimensions::new(320, 240)));
//! ```

mod detect;
pub mod raster;

use std::io::BufReader;
use std::path::Path;

pub use detect::{detect, guess_format, try_detect, Signature, PREFIX_LEN, SIGNATURES};
pub use imgpeek_common::image::{Dimensions, Format, Info};
pub use imgpeek_jpeg as jpeg;
pub use imgpeek_png as png;
pub use imgpeek_text as text;
pub use imgpeek_tiff as tiff;
pub use imgpeek_webp as webp;

/// Detects the image in a byte slice
pub fn detect_bytes(data: &[u8]) -> Info {
    detect(std::io::Cursor::new(data))
}

/// Detects the image in the file at `path`
///
/// Only opening the file can fail. Problems while reading result in
/// [`Info::unknown`].
pub fn detect_path(path: impl AsRef<Path>) -> std::io::Result<Info> {
    let file = std::fs::File::open(path)?;
    Ok(detect(BufReader::new(file)))
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No supported filetype found")]
    NoSupportedFiletypeFound,
    #[error("Less than 12 bytes available")]
    PrefixTooShort,
    #[error("Unexpected end of file")]
    UnexpectedEof,
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("PNG: {0}")]
    Png(#[from] imgpeek_png::Error),
    #[error("WEBP: {0}")]
    WebP(#[from] imgpeek_webp::Error),
    #[error("JPEG: {0}")]
    Jpeg(#[from] imgpeek_jpeg::Error),
    #[error("TIFF: {0}")]
    Tiff(#[from] imgpeek_tiff::Error),
    #[error("Text header: {0}")]
    Text(#[from] imgpeek_text::Error),
    #[error("Raster: {0}")]
    Raster(#[from] raster::Error),
}
