mod segments;

use std::io::{Read, Seek};

use imgpeek_common::math::MathError;
use imgpeek_common::prelude::*;

pub use segments::*;

pub const MAGIC_BYTES: &[u8] = &[0xFF, 0xD8];

/// JPEG stream
///
/// Only reads the parts of `source` that are needed to find the frame header.
#[derive(Debug)]
pub struct Jpeg<R> {
    source: R,
}

impl<R: Read + Seek> Jpeg<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Iterate segments in their order of appearance, starting after SOI
    pub fn segments(&mut self) -> Segments<'_, R> {
        Segments::new(&mut self.source)
    }

    /// Dimensions from the first start of frame segment
    ///
    /// Segments before the frame header are skipped by their declared length
    /// without reading their payload.
    pub fn dimensions(&mut self) -> Result<Dimensions, Error> {
        for segment in self.segments() {
            let segment = segment?;
            if let Some(dimensions) = segment.frame_dimensions() {
                tracing::debug!(
                    "Found {:?} at byte {} with {dimensions:?}",
                    segment.marker(),
                    segment.pos()
                );
                return Ok(dimensions);
            }
            tracing::debug!(
                "Skipping {:?} with length {} at byte {}",
                segment.marker(),
                segment.length(),
                segment.pos()
            );
        }

        Err(Error::NoFrameHeader)
    }
}

/// Checks if passed data start with the SOI marker
pub fn is_filetype(data: &[u8]) -> bool {
    data.starts_with(MAGIC_BYTES)
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected end of file")]
    UnexpectedEof,
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Expected marker start at byte {0}, found {1:#x}")]
    NoMarker(u64, u8),
    #[error("No start of frame segment")]
    NoFrameHeader,
    #[error("Math: {0}")]
    Math(#[from] MathError),
}

imgpeek_common::utils::convertible_enum!(
    #[repr(u8)]
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub enum Marker {
        /// Baseline DCT
        SOF0 = 0xC0,
        /// Extended sequential DCT
        SOF1 = 0xC1,
        /// Progressive DCT
        SOF2 = 0xC2,
        /// Lossless
        SOF3 = 0xC3,
        /// Define Huffman table
        DHT = 0xC4,
        /// Start of image
        SOI = 0xD8,
        /// End of image
        EOI = 0xD9,
        /// Start of scan
        SOS = 0xDA,
        DQT = 0xDB,
        DRI = 0xDD,
        /// JFIF
        APP0 = 0xE0,
        /// Exif, XMP
        APP1 = 0xE1,
        /// ICC color profile
        APP2 = 0xE2,
        /// Adobe
        APP14 = 0xEE,
        /// Comment
        COM = 0xFE,
    }
);

impl Marker {
    /// Start of frame markers that carry the image dimensions
    pub fn is_sof(self) -> bool {
        matches!(self, Self::SOF0 | Self::SOF1 | Self::SOF2 | Self::SOF3)
    }
}
