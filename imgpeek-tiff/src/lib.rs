mod ifd;
mod type_;

pub use ifd::*;
pub use type_::*;

use std::io::{Read, Seek, SeekFrom};

use imgpeek_common::prelude::*;

pub const LE_MAGIC_BYTES: &[u8] = b"II*\0";
pub const BE_MAGIC_BYTES: &[u8] = b"MM\0*";

/// Byte order mark, magic number and offset of the first IFD
pub const HEADER_LEN: usize = 8;

/// Checks if passed data have TIFF magic bytes in either byte order
pub fn is_filetype(data: &[u8]) -> bool {
    data.starts_with(LE_MAGIC_BYTES) || data.starts_with(BE_MAGIC_BYTES)
}

/// Representation of a TIFF stream
#[derive(Debug)]
pub struct Tiff<R> {
    source: R,
    byte_order: ByteOrder,
}

impl<R: Read + Seek> Tiff<R> {
    pub fn new(source: R, byte_order: ByteOrder) -> Self {
        Self { source, byte_order }
    }

    /// Reads the header from the start of `source`
    ///
    /// The byte order is taken from the byte order mark.
    pub fn from_header(mut source: R) -> Result<(Self, [u8; HEADER_LEN]), Error> {
        source.seek(SeekFrom::Start(0))?;
        let mut header = [0; HEADER_LEN];
        source
            .read_exact(&mut header)
            .map_err(|_| Error::UnexpectedEof)?;

        let byte_order = ByteOrder::from_mark(&header)
            .ok_or(Error::UnknownByteOrder([header[0], header[1]]))?;

        Ok((Self::new(source, byte_order), header))
    }

    /// Offset of the first IFD as given in `header`
    pub fn first_ifd_offset(&self, header: &[u8; HEADER_LEN]) -> Result<u32, Error> {
        let magic = self.byte_order.u16([header[2], header[3]]);
        if magic != 42 {
            return Err(Error::MagicBytesWrong(magic));
        }

        Ok(self
            .byte_order
            .u32([header[4], header[5], header[6], header[7]]))
    }

    /// Image width and length from the first IFD
    ///
    /// * `header`: First [`HEADER_LEN`] bytes of the data
    pub fn dimensions(&mut self, header: &[u8; HEADER_LEN]) -> Result<Dimensions, Error> {
        let offset = self.first_ifd_offset(header)?;
        let ifd = Ifd::new(&mut self.source, self.byte_order, offset)?;
        ifd.dimensions()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected end of file")]
    UnexpectedEof,
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown byte order mark: {0:x?}")]
    UnknownByteOrder([u8; 2]),
    #[error("Wrong magic number: {0}")]
    MagicBytesWrong(u16),
    #[error("Unsupported type {1:?} for tag {0}")]
    UnsupportedType(u16, Type),
    #[error("Width or height missing in IFD")]
    MissingDimensions,
}
