//! X11 pixmap
//!
//! The first line that starts with a quote holds the values
//! `"<width> <height> <colors> <chars per pixel>"`.

use std::io::{Read, Seek};

use imgpeek_common::prelude::*;
use imgpeek_common::scan::Scanner;

use crate::Error;

pub const MAGIC_BYTES: &[u8] = b"/* XPM */";

pub fn is_filetype(data: &[u8]) -> bool {
    data.starts_with(MAGIC_BYTES)
}

/// Reads width and height from the values line
pub fn read_dimensions<R: Read + Seek>(source: &mut R) -> Result<Dimensions, Error> {
    let mut s = crate::scanner(source)?;

    loop {
        let line = s.read_line()?;
        if line.is_empty() {
            return Err(Error::NoDimensionLine);
        }

        let mut line = Scanner::new(line.as_slice());
        line.skip_whitespace()?;
        if line.peek()? != Some(b'"') {
            continue;
        }

        // Skip quote
        line.next_byte()?;
        let width = line.parse_u32()?;
        line.skip_whitespace()?;
        let height = line.parse_u32()?;

        return crate::determined(width, height);
    }
}
