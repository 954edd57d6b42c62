//! X11 bitmap
//!
//! C source that starts with
//! `#define <name>_width <width>` and `#define <name>_height <height>`.

use std::io::{Read, Seek};

use imgpeek_common::prelude::*;

use crate::Error;

pub const DEFINE: &[u8] = b"#define";

/// Checks for `#define` followed by a space or tab
pub fn is_filetype(data: &[u8]) -> bool {
    data.starts_with(DEFINE) && matches!(data.get(DEFINE.len()), Some(b' ' | b'\t'))
}

/// Reads width and height from the first two defines
pub fn read_dimensions<R: Read + Seek>(source: &mut R) -> Result<Dimensions, Error> {
    let mut s = crate::scanner(source)?;

    s.skip_token()?;
    s.skip_whitespace()?;
    // <name>_width
    s.skip_token()?;
    s.skip_whitespace()?;
    let width = s.parse_u32()?;

    s.skip_whitespace()?;
    let define = s.read_token()?;
    if define != DEFINE {
        return Err(Error::DefineMissing(
            String::from_utf8_lossy(&define).into_owned(),
        ));
    }

    s.skip_whitespace()?;
    // <name>_height
    s.skip_token()?;
    s.skip_whitespace()?;
    let height = s.parse_u32()?;

    crate::determined(width, height)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn dimensions(data: &[u8]) -> Result<Dimensions, Error> {
        read_dimensions(&mut Cursor::new(data))
    }

    #[test]
    fn xbm() {
        let data = b"#define test_width 16\n#define test_height 7\nstatic char test_bits[] = {\n";
        assert!(is_filetype(data));
        assert_eq!(dimensions(data).unwrap(), Dimensions::new(16, 7));
    }

    #[test]
    fn tabs() {
        let data = b"#define\tx_width\t\t3\r\n#define\tx_height\t5\r\n";
        assert!(is_filetype(data));
        assert_eq!(dimensions(data).unwrap(), Dimensions::new(3, 5));
    }

    #[test]
    fn second_define_missing() {
        let data = b"#define a_width 16\nstatic char a_bits[] = {\n";
        assert!(matches!(dimensions(data), Err(Error::DefineMissing(x)) if x == "static"));
    }

    #[test]
    fn zero_height() {
        let data = b"#define a_width 16\n#define a_height 0\n";
        assert!(matches!(dimensions(data), Err(Error::ZeroDimension(_))));
    }

    #[test]
    fn not_xbm() {
        assert!(!is_filetype(b"#defined a 1"));
        assert!(!is_filetype(b"#include <x.h>"));
    }
}
