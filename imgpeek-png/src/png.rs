use imgpeek_common::prelude::*;

use crate::Error;

pub const MAGIC_BYTES: &[u8] = &[137, 80, 78, 71, 13, 10, 26, 10];
pub const MNG_MAGIC_BYTES: &[u8] = &[138, 77, 78, 71, 13, 10, 26, 10];

/// Bytes up to the end of the height field of the first chunk
///
/// The first chunk is `IHDR` for PNG and `MHDR` for MNG. Both start with
/// width and height as big endian [`u32`].
pub const HEADER_LEN: usize = 24;

/// Header of a PNG image
#[derive(Debug, Clone)]
pub struct Png {
    header: [u8; HEADER_LEN],
}

impl Png {
    /// Returns PNG header representation
    ///
    /// * `data`: PNG image data starting with magic byte, at least
    ///   [`HEADER_LEN`] long
    pub fn new(data: &[u8]) -> Result<Self, Error> {
        let header = header(data, MAGIC_BYTES)?;
        Ok(Self { header })
    }

    /// Width and height from the `IHDR` chunk
    pub fn dimensions(&self) -> Dimensions {
        dimensions(&self.header)
    }
}

impl ImageFormat for Png {
    fn is_filetype(data: &[u8]) -> bool {
        data.starts_with(MAGIC_BYTES)
    }
}

/// Header of an MNG animation
#[derive(Debug, Clone)]
pub struct Mng {
    header: [u8; HEADER_LEN],
}

impl Mng {
    pub fn new(data: &[u8]) -> Result<Self, Error> {
        let header = header(data, MNG_MAGIC_BYTES)?;
        Ok(Self { header })
    }

    /// Frame width and height from the `MHDR` chunk
    pub fn dimensions(&self) -> Dimensions {
        dimensions(&self.header)
    }
}

impl ImageFormat for Mng {
    fn is_filetype(data: &[u8]) -> bool {
        data.starts_with(MNG_MAGIC_BYTES)
    }
}

fn header(data: &[u8], magic_bytes: &[u8]) -> Result<[u8; HEADER_LEN], Error> {
    let header: [u8; HEADER_LEN] = data
        .get(..HEADER_LEN)
        .and_then(|x| x.try_into().ok())
        .ok_or(Error::HeaderTooShort(data.len(), HEADER_LEN))?;

    if !header.starts_with(magic_bytes) {
        return Err(Error::InvalidMagicBytes(
            header.get(..magic_bytes.len()).unwrap_or_default().to_vec(),
        ));
    }

    Ok(header)
}

fn dimensions(header: &[u8; HEADER_LEN]) -> Dimensions {
    // Width at byte 16, height at byte 20
    let [.., w0, w1, w2, w3, h0, h1, h2, h3] = *header;

    Dimensions::new(
        u32::from_be_bytes([w0, w1, w2, w3]),
        u32::from_be_bytes([h0, h1, h2, h3]),
    )
}
