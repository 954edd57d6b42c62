use imgpeek_common::math::{MathError, SafeAdd};
use imgpeek_common::prelude::*;

pub const RIFF_MAGIC_BYTES: &[u8] = b"RIFF";
pub const WEBP_MAGIC_BYTES: &[u8] = b"WEBP";

/// Bytes needed to read the dimensions of any of the supported first chunks
pub const HEADER_LEN: usize = 30;

const FOUR_CC_OFFSET: usize = 12;

/// Header of a WEBP image
#[derive(Debug, Clone)]
pub struct WebP {
    four_cc: FourCC,
    header: [u8; HEADER_LEN],
}

/// Representation of a WEBP header
impl WebP {
    /// Returns WEBP header representation
    ///
    /// * `data`: WEBP image data starting with RIFF magic byte, at least
    ///   [`HEADER_LEN`] long
    pub fn new(data: &[u8]) -> Result<Self, Error> {
        let header: [u8; HEADER_LEN] = data
            .get(..HEADER_LEN)
            .and_then(|x| x.try_into().ok())
            .ok_or(Error::UnexpectedEof)?;

        if !header.starts_with(RIFF_MAGIC_BYTES) {
            return Err(Error::RiffMagicBytesMissing(slice4(&header, 0)));
        }

        let webp_magic_bytes = slice4(&header, 8);
        if webp_magic_bytes != WEBP_MAGIC_BYTES {
            return Err(Error::WebpMagicBytesMissing(webp_magic_bytes));
        }

        let four_cc = FourCC::from(slice4(&header, FOUR_CC_OFFSET));
        if let FourCC::Unknown(_) = four_cc {
            return Err(Error::UnsupportedChunk(four_cc));
        }

        Ok(Self { four_cc, header })
    }

    /// Type of the first chunk
    pub fn four_cc(&self) -> FourCC {
        self.four_cc
    }

    /// Canvas size from the first chunk
    pub fn dimensions(&self) -> Result<Dimensions, Error> {
        let h = &self.header;
        match self.four_cc {
            FourCC::VP8 => {
                // Lossy bitstream: 3 bytes frame tag, 3 bytes start code, then
                // 14 bit width and height, the top bits are scaling factors
                let width = u16::from_le_bytes([h[26], h[27]]) & 0x3fff;
                let height = u16::from_le_bytes([h[28], h[29]]) & 0x3fff;
                Ok(Dimensions::new(width.into(), height.into()))
            }
            FourCC::VP8L => {
                // Lossless bitstream: signature byte 0x2f, then width - 1 and
                // height - 1 packed as 14 bit each
                let bits = u32::from_le_bytes(slice4(h, 21));
                let width = (bits & 0x3fff).safe_add(1)?;
                let height = (bits.wrapping_shr(14) & 0x3fff).safe_add(1)?;
                Ok(Dimensions::new(width, height))
            }
            FourCC::VP8X => {
                // Extended format: 4 bytes flags, then canvas width - 1 and
                // height - 1 as 24 bit each
                let width = u32::from_le_bytes([h[24], h[25], h[26], 0]).safe_add(1)?;
                let height = u32::from_le_bytes([h[27], h[28], h[29], 0]).safe_add(1)?;
                Ok(Dimensions::new(width, height))
            }
            four_cc @ FourCC::Unknown(_) => Err(Error::UnsupportedChunk(four_cc)),
        }
    }
}

impl ImageFormat for WebP {
    fn is_filetype(data: &[u8]) -> bool {
        data.starts_with(RIFF_MAGIC_BYTES)
            && data.get(8..12).is_some_and(|x| x == WEBP_MAGIC_BYTES)
    }
}

fn slice4(header: &[u8; HEADER_LEN], offset: usize) -> [u8; 4] {
    header
        .get(offset..)
        .and_then(|x| x.get(..4))
        .and_then(|x| x.try_into().ok())
        .unwrap_or_default()
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("RIFF magic bytes missing: {0:x?}")]
    RiffMagicBytesMissing([u8; 4]),
    #[error("WEBP magic bytes missing: {0:x?}")]
    WebpMagicBytesMissing([u8; 4]),
    #[error("Unexpected end of file")]
    UnexpectedEof,
    #[error("Unsupported first chunk {0:?}")]
    UnsupportedChunk(FourCC),
    #[error("Math: {0}")]
    Math(#[from] MathError),
}

/// Type of a chunk
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum FourCC {
    /// Lossy data
    VP8,
    /// Lossless data
    VP8L,
    /// Information about features used in the file
    VP8X,
    Unknown([u8; 4]),
}

impl From<[u8; 4]> for FourCC {
    fn from(v: [u8; 4]) -> Self {
        match &v {
            b"VP8 " => Self::VP8,
            b"VP8L" => Self::VP8L,
            b"VP8X" => Self::VP8X,
            _ => Self::Unknown(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn riff(four_cc: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(RIFF_MAGIC_BYTES);
        data.extend_from_slice(&1000_u32.to_le_bytes());
        data.extend_from_slice(WEBP_MAGIC_BYTES);
        data.extend_from_slice(four_cc);
        data.extend_from_slice(&100_u32.to_le_bytes());
        data.extend_from_slice(payload);
        data.resize(HEADER_LEN, 0);
        data
    }

    #[test]
    fn lossy() {
        let mut payload = vec![0x30, 0x01, 0x00, 0x9d, 0x01, 0x2a];
        payload.extend_from_slice(&400_u16.to_le_bytes());
        // Scaling bits must be ignored
        payload.extend_from_slice(&(0xc000_u16 | 301).to_le_bytes());
        let data = riff(b"VP8 ", &payload);

        assert!(WebP::is_filetype(&data));
        let webp = WebP::new(&data).unwrap();
        assert_eq!(webp.four_cc(), FourCC::VP8);
        assert_eq!(webp.dimensions().unwrap(), Dimensions::new(400, 301));
    }

    #[test]
    fn lossless() {
        let (width, height) = (1000_u32, 3000_u32);
        let bits = (width - 1) | ((height - 1) << 14);
        let mut payload = vec![0x2f];
        payload.extend_from_slice(&bits.to_le_bytes());
        let data = riff(b"VP8L", &payload);

        let webp = WebP::new(&data).unwrap();
        assert_eq!(webp.dimensions().unwrap(), Dimensions::new(width, height));
    }

    #[test]
    fn extended() {
        let mut payload = vec![0x10, 0, 0, 0];
        payload.extend_from_slice(&(70_000_u32 - 1).to_le_bytes()[..3]);
        payload.extend_from_slice(&(2_u32 - 1).to_le_bytes()[..3]);
        let data = riff(b"VP8X", &payload);

        let webp = WebP::new(&data).unwrap();
        assert_eq!(webp.dimensions().unwrap(), Dimensions::new(70_000, 2));
    }

    #[test]
    fn unknown_chunk() {
        let data = riff(b"ALPH", &[]);
        assert!(matches!(WebP::new(&data), Err(Error::UnsupportedChunk(_))));
    }

    #[test]
    fn not_webp() {
        let mut data = riff(b"VP8 ", &[]);
        data[8..12].copy_from_slice(b"WAVE");
        assert!(!WebP::is_filetype(&data));
        assert!(matches!(
            WebP::new(&data),
            Err(Error::WebpMagicBytesMissing(_))
        ));
        assert!(matches!(
            WebP::new(&data[..HEADER_LEN - 1]),
            Err(Error::UnexpectedEof)
        ));
    }
}
