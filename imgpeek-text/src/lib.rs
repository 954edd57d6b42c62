pub mod netpbm;
pub mod xbm;
pub mod xpm;

use std::io::{BufReader, Read, Seek, SeekFrom};

use imgpeek_common::prelude::*;
use imgpeek_common::scan::{ScanError, Scanner};

/// Rewinds `source` and returns a scanner over it
fn scanner<R: Read + Seek>(source: &mut R) -> Result<Scanner<BufReader<&mut R>>, Error> {
    source.seek(SeekFrom::Start(0))?;
    Ok(Scanner::new(BufReader::new(source)))
}

/// Both sides have to be non-zero
fn determined(width: u32, height: u32) -> Result<Dimensions, Error> {
    let dimensions = Dimensions::new(width, height);
    if dimensions.is_determined() {
        Ok(dimensions)
    } else {
        Err(Error::ZeroDimension(dimensions))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scan: {0}")]
    Scan(#[from] ScanError),
    #[error("Unknown Netpbm type {0:?}")]
    UnknownNetpbmType(char),
    #[error("Width or height is zero: {0:?}")]
    ZeroDimension(Dimensions),
    #[error("Expected '#define', found {0:?}")]
    DefineMissing(String),
    #[error("No line with dimensions found")]
    NoDimensionLine,
}
