//! Formats with width and height at fixed offsets in a short header
//!
//! GIF, BMP, PSD, SGI, Sun raster and PCX. Each parser takes the first
//! `*_HEADER_LEN` bytes of the file.
//!
//! Decoded values are reported as stored, zero included. There are two
//! exceptions: a negative BMP width ([`Error::NegativeWidth`]) and a PCX window
//! whose end lies before its start ([`Error::InvertedWindow`]) are rejected as
//! malformed instead of being passed through.

use imgpeek_common::math::{MathError, SafeAdd, SafeSub};
use imgpeek_common::prelude::*;

pub const GIF_MAGIC_BYTES: &[u8] = b"GIF8";
pub const BMP_MAGIC_BYTES: &[u8] = b"BM";
pub const PSD_MAGIC_BYTES: &[u8] = b"8BPS";
pub const RGB_MAGIC_BYTES: &[u8] = &[0x01, 0xDA, 0x5B, 0x01, 0x00, 0x5D];
pub const RAS_MAGIC_BYTES: &[u8] = &[0x59, 0xA6, 0x6A, 0x95];

pub const GIF_HEADER_LEN: usize = 10;
pub const BMP_HEADER_LEN: usize = 26;
pub const PSD_HEADER_LEN: usize = 22;
pub const RGB_HEADER_LEN: usize = 10;
pub const RAS_HEADER_LEN: usize = 12;
pub const PCX_HEADER_LEN: usize = 12;

/// `GIF87a`, `GIF89a` and the rare `GIF8,a`
pub fn is_gif(data: &[u8]) -> bool {
    data.starts_with(GIF_MAGIC_BYTES)
        && matches!(data.get(4), Some(b'7' | b',' | b'9'))
        && data.get(5) == Some(&b'a')
}

pub fn is_bmp(data: &[u8]) -> bool {
    data.starts_with(BMP_MAGIC_BYTES)
}

pub fn is_psd(data: &[u8]) -> bool {
    data.starts_with(PSD_MAGIC_BYTES)
}

/// SGI magic 474, storage and bytes per channel, dimension 3
pub fn is_rgb(data: &[u8]) -> bool {
    data.starts_with(RGB_MAGIC_BYTES)
}

pub fn is_ras(data: &[u8]) -> bool {
    data.starts_with(RAS_MAGIC_BYTES)
}

/// Manufacturer byte `0x0A` and run length encoding
pub fn is_pcx(data: &[u8]) -> bool {
    matches!(data, [0x0A, _, 0x01, ..])
}

/// Logical screen width and height
pub fn gif(header: &[u8]) -> Result<Dimensions, Error> {
    let h = Header::new(header, GIF_HEADER_LEN)?;
    Ok(Dimensions::new(
        h.u16(ByteOrder::Little, 6)?.into(),
        h.u16(ByteOrder::Little, 8)?.into(),
    ))
}

/// Width and height from the `BITMAPINFOHEADER`
///
/// Top-down bitmaps store a negative height.
pub fn bmp(header: &[u8]) -> Result<Dimensions, Error> {
    let h = Header::new(header, BMP_HEADER_LEN)?;
    let width = h.i32_le(18)?;
    let height = h.i32_le(22)?;

    let width = u32::try_from(width).map_err(|_| Error::NegativeWidth(width))?;

    Ok(Dimensions::new(width, height.unsigned_abs()))
}

/// Height comes before width in the PSD header
pub fn psd(header: &[u8]) -> Result<Dimensions, Error> {
    let h = Header::new(header, PSD_HEADER_LEN)?;
    let height = h.u32(ByteOrder::Big, 14)?;
    let width = h.u32(ByteOrder::Big, 18)?;

    Ok(Dimensions::new(width, height))
}

/// X and Y size of an SGI image
pub fn rgb(header: &[u8]) -> Result<Dimensions, Error> {
    let h = Header::new(header, RGB_HEADER_LEN)?;
    Ok(Dimensions::new(
        h.u16(ByteOrder::Big, 6)?.into(),
        h.u16(ByteOrder::Big, 8)?.into(),
    ))
}

pub fn ras(header: &[u8]) -> Result<Dimensions, Error> {
    let h = Header::new(header, RAS_HEADER_LEN)?;
    Ok(Dimensions::new(
        h.u32(ByteOrder::Big, 4)?,
        h.u32(ByteOrder::Big, 8)?,
    ))
}

/// Size of the image window
///
/// The window bounds are inclusive.
pub fn pcx(header: &[u8]) -> Result<Dimensions, Error> {
    let h = Header::new(header, PCX_HEADER_LEN)?;
    let x_min = h.u16(ByteOrder::Little, 4)?;
    let y_min = h.u16(ByteOrder::Little, 6)?;
    let x_max = h.u16(ByteOrder::Little, 8)?;
    let y_max = h.u16(ByteOrder::Little, 10)?;

    let span = |min: u16, max: u16| -> Result<u32, Error> {
        let diff = max
            .safe_sub(min)
            .map_err(|_| Error::InvertedWindow(min, max))?;
        Ok(u32::from(diff).safe_add(1)?)
    };

    Ok(Dimensions::new(span(x_min, x_max)?, span(y_min, y_max)?))
}

struct Header<'a> {
    data: &'a [u8],
}

impl<'a> Header<'a> {
    fn new(data: &'a [u8], len: usize) -> Result<Self, Error> {
        let data = data
            .get(..len)
            .ok_or(Error::HeaderTooShort(data.len(), len))?;
        Ok(Self { data })
    }

    fn u16(&self, byte_order: ByteOrder, offset: usize) -> Result<u16, Error> {
        byte_order
            .u16_at(self.data, offset)
            .ok_or_else(|| self.too_short(offset, 2))
    }

    fn u32(&self, byte_order: ByteOrder, offset: usize) -> Result<u32, Error> {
        byte_order
            .u32_at(self.data, offset)
            .ok_or_else(|| self.too_short(offset, 4))
    }

    /// Error for a value of `size` bytes at `offset` that is not covered
    fn too_short(&self, offset: usize, size: usize) -> Error {
        match offset.safe_add(size) {
            Ok(end) => Error::HeaderTooShort(self.data.len(), end),
            Err(err) => err.into(),
        }
    }

    fn i32_le(&self, offset: usize) -> Result<i32, Error> {
        let value = self.u32(ByteOrder::Little, offset)?;
        Ok(i32::from_le_bytes(value.to_le_bytes()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Header has {0} bytes, {1} required")]
    HeaderTooShort(usize, usize),
    #[error("Negative width: {0}")]
    NegativeWidth(i32),
    #[error("Window end {1} before start {0}")]
    InvertedWindow(u16, u16),
    #[error("Math: {0}")]
    Math(#[from] MathError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gif_header() {
        let mut data = b"GIF89a".to_vec();
        data.extend_from_slice(&500_u16.to_le_bytes());
        data.extend_from_slice(&375_u16.to_le_bytes());

        assert!(is_gif(&data));
        assert_eq!(gif(&data).unwrap(), Dimensions::new(500, 375));
        assert!(is_gif(b"GIF87a"));
        assert!(is_gif(b"GIF8,a"));
        assert!(!is_gif(b"GIF88a"));
    }

    #[test]
    fn bmp_header() {
        let mut data = b"BM".to_vec();
        data.resize(18, 0);
        data.extend_from_slice(&640_i32.to_le_bytes());
        data.extend_from_slice(&(-480_i32).to_le_bytes());

        assert!(is_bmp(&data));
        assert_eq!(bmp(&data).unwrap(), Dimensions::new(640, 480));

        data[18..22].copy_from_slice(&(-1_i32).to_le_bytes());
        assert!(matches!(bmp(&data), Err(Error::NegativeWidth(-1))));
    }

    #[test]
    fn psd_header() {
        let mut data = b"8BPS".to_vec();
        data.extend_from_slice(&[0, 1, 0, 0, 0, 0, 0, 0, 0, 3]);
        data.extend_from_slice(&300_u32.to_be_bytes());
        data.extend_from_slice(&200_u32.to_be_bytes());

        assert!(is_psd(&data));
        assert_eq!(psd(&data).unwrap(), Dimensions::new(200, 300));
    }

    #[test]
    fn rgb_header() {
        let mut data = RGB_MAGIC_BYTES.to_vec();
        data.extend_from_slice(&64_u16.to_be_bytes());
        data.extend_from_slice(&32_u16.to_be_bytes());

        assert!(is_rgb(&data));
        assert_eq!(rgb(&data).unwrap(), Dimensions::new(64, 32));
    }

    #[test]
    fn ras_header() {
        let mut data = RAS_MAGIC_BYTES.to_vec();
        data.extend_from_slice(&1024_u32.to_be_bytes());
        data.extend_from_slice(&768_u32.to_be_bytes());

        assert!(is_ras(&data));
        assert_eq!(ras(&data).unwrap(), Dimensions::new(1024, 768));
    }

    #[test]
    fn pcx_header() {
        let mut data = vec![0x0A, 5, 1, 8];
        for x in [10_u16, 20, 109, 69] {
            data.extend_from_slice(&x.to_le_bytes());
        }

        assert!(is_pcx(&data));
        assert_eq!(pcx(&data).unwrap(), Dimensions::new(100, 50));

        data[8..10].copy_from_slice(&5_u16.to_le_bytes());
        assert!(matches!(pcx(&data), Err(Error::InvertedWindow(10, 5))));
    }

    #[test]
    fn zero_is_passed_through() {
        let data = b"GIF87a\0\0\x01\0";
        assert_eq!(gif(data).unwrap(), Dimensions::new(0, 1));
    }

    #[test]
    fn short_header() {
        assert!(matches!(
            ras(&RAS_MAGIC_BYTES[..]),
            Err(Error::HeaderTooShort(4, RAS_HEADER_LEN))
        ));
        assert!(!is_pcx(&[0x0A, 5]));
    }

    #[test]
    fn value_past_header_end() {
        let h = Header::new(&[0; 8], 6).unwrap();

        assert_eq!(h.u16(ByteOrder::Big, 4).unwrap(), 0);
        assert!(matches!(
            h.u16(ByteOrder::Big, 5),
            Err(Error::HeaderTooShort(6, 7))
        ));
        assert!(matches!(
            h.u32(ByteOrder::Little, 4),
            Err(Error::HeaderTooShort(6, 8))
        ));
        assert!(matches!(
            h.u32(ByteOrder::Little, usize::MAX),
            Err(Error::Math(_))
        ));
    }
}
