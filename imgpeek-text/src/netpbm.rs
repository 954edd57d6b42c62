//! Netpbm family: PBM, PGM, PPM and XV thumbnails
//!
//! The header is `P`, a type digit and whitespace separated width and height.
//! Only space, tab, CR and LF separate the numbers, anything else ends the
//! header.

use std::io::{Read, Seek};

use imgpeek_common::prelude::*;

use crate::Error;

/// Format for the type digit after `P`
///
/// ASCII and binary variants share a format.
///
/// ```
/// # use imgpeek_common::image::Format;
/// assert_eq!(imgpeek_text::netpbm::format(b'5'), Some(Format::Pgm));
/// assert_eq!(imgpeek_text::netpbm::format(b'8'), None);
/// ```
pub fn format(type_: u8) -> Option<Format> {
    match type_ {
        b'1' => Some(Format::Pbm),
        b'2' | b'5' => Some(Format::Pgm),
        b'3' | b'6' => Some(Format::Ppm),
        b'4' => Some(Format::Bpm),
        b'7' => Some(Format::Xv),
        _ => None,
    }
}

/// Reads format and dimensions from the start of `source`
pub fn read_info<R: Read + Seek>(source: &mut R) -> Result<Info, Error> {
    let mut s = crate::scanner(source)?;

    // Skip 'P'
    s.next_byte()?;
    let type_ = s.next_byte()?;
    let format = format(type_).ok_or(Error::UnknownNetpbmType(char::from(type_)))?;

    s.skip_whitespace()?;
    let width = s.parse_u32()?;
    s.skip_whitespace()?;
    let height = s.parse_u32()?;

    tracing::debug!("Netpbm type {} with {width}x{height}", char::from(type_));

    Ok(Info::new(format, crate::determined(width, height)?))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use imgpeek_common::scan::ScanError;

    use super::*;

    fn info(data: &[u8]) -> Result<Info, Error> {
        read_info(&mut Cursor::new(data))
    }

    #[test]
    fn ascii_graymap() {
        let info = info(b"P2\n10 20\n255\n0 1 2 3").unwrap();
        assert_eq!(info, Info::new(Format::Pgm, Dimensions::new(10, 20)));
    }

    #[test]
    fn all_types() {
        let types = [
            (b'1', Format::Pbm),
            (b'2', Format::Pgm),
            (b'3', Format::Ppm),
            (b'4', Format::Bpm),
            (b'5', Format::Pgm),
            (b'6', Format::Ppm),
            (b'7', Format::Xv),
        ];

        for (type_, format) in types {
            let data = [b'P', type_, b' ', b'3', b'\t', b'4', b'\r', b'\n'];
            assert_eq!(info(&data).unwrap(), Info::new(format, (3, 4).into()));
        }
    }

    #[test]
    fn comment_is_not_whitespace() {
        assert!(matches!(
            info(b"P6\n# c\n640 480\n255\n"),
            Err(Error::Scan(ScanError::NoDigits))
        ));
    }

    #[test]
    fn xv_thumbnail_header() {
        let data = b"P7 332\n#XVVERSION:Version 2.28  Rev: 9/26/92\n\
            #IMGINFO:512x512 Color JPEG\n#END_OF_COMMENTS\n48 40 255\n";
        assert!(matches!(info(data), Err(Error::Scan(ScanError::NoDigits))));
    }

    #[test]
    fn zero_width() {
        assert!(matches!(info(b"P3 0 5"), Err(Error::ZeroDimension(_))));
    }

    #[test]
    fn missing_height() {
        assert!(info(b"P1 12").is_err());
        assert!(info(b"P1 12 x").is_err());
    }

    #[test]
    fn not_netpbm() {
        assert_eq!(format(b'0'), None);
        assert_eq!(format(b'K'), None);
        assert!(matches!(info(b"P9 1 1"), Err(Error::UnknownNetpbmType('9'))));
    }
}
