use std::io::{Read, Seek, SeekFrom};

use imgpeek_common::prelude::*;

use crate::{Error, Type};

/// Tag, type, count and value or offset
pub const ENTRY_LEN: usize = 12;

pub const TAG_IMAGE_WIDTH: u16 = 256;
pub const TAG_IMAGE_LENGTH: u16 = 257;

/// Entry of an image file directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    tag: u16,
    type_: Type,
    value_offset: [u8; 4],
}

impl Entry {
    pub fn from_data(data: [u8; ENTRY_LEN], byte_order: ByteOrder) -> Self {
        // Count is skipped, only single values stored in the entry are read
        let [t0, t1, y0, y1, _, _, _, _, v0, v1, v2, v3] = data;

        Self {
            tag: byte_order.u16([t0, t1]),
            type_: Type::from(byte_order.u16([y0, y1])),
            value_offset: [v0, v1, v2, v3],
        }
    }

    pub fn tag(&self) -> u16 {
        self.tag
    }

    pub fn type_(&self) -> Type {
        self.type_
    }

    /// Integer value stored inside the entry
    ///
    /// Bytes are read from the second byte of the value field. Returns `None`
    /// for types that are not integers.
    pub fn value(&self, byte_order: ByteOrder) -> Option<u32> {
        let [v0, v1, v2, v3] = self.value_offset;

        match self.type_.integer_size()? {
            1 => Some(v1.into()),
            2 => Some(byte_order.u16([v0, v1]).into()),
            _ => Some(byte_order.u32([v0, v1, v2, v3])),
        }
    }
}

/// Image file directory, read entry by entry
#[derive(Debug)]
pub struct Ifd<'a, R> {
    source: &'a mut R,
    byte_order: ByteOrder,
    n_entries: u16,
    remaining: u16,
}

impl<'a, R: Read + Seek> Ifd<'a, R> {
    /// Seeks to `offset` and reads the number of entries
    pub fn new(source: &'a mut R, byte_order: ByteOrder, offset: u32) -> Result<Self, Error> {
        source.seek(SeekFrom::Start(offset.into()))?;
        let n_entries = byte_order
            .read_u16(&mut *source)
            .map_err(|_| Error::UnexpectedEof)?;

        tracing::debug!("Reading IFD at byte {offset} with {n_entries} entries");

        Ok(Self {
            source,
            byte_order,
            n_entries,
            remaining: n_entries,
        })
    }

    pub fn n_entries(&self) -> u16 {
        self.n_entries
    }

    /// Reads the next entry, `None` after the last one
    pub fn next_entry(&mut self) -> Result<Option<Entry>, Error> {
        let Some(remaining) = self.remaining.checked_sub(1) else {
            return Ok(None);
        };

        let mut data = [0; ENTRY_LEN];
        self.source
            .read_exact(&mut data)
            .map_err(|_| Error::UnexpectedEof)?;
        self.remaining = remaining;

        Ok(Some(Entry::from_data(data, self.byte_order)))
    }

    /// Reads entries until image width and length are both known
    ///
    /// Entries with a non-integer type abort the walk.
    pub fn dimensions(mut self) -> Result<Dimensions, Error> {
        let mut dimensions = Dimensions::default();

        while let Some(entry) = self.next_entry()? {
            let value = entry
                .value(self.byte_order)
                .ok_or(Error::UnsupportedType(entry.tag(), entry.type_()))?;

            tracing::debug!(
                "Entry with tag {} of type {:?}: {value}",
                entry.tag(),
                entry.type_()
            );

            match entry.tag() {
                TAG_IMAGE_WIDTH => dimensions.width = value,
                TAG_IMAGE_LENGTH => dimensions.height = value,
                _ => {}
            }

            if dimensions.is_determined() {
                return Ok(dimensions);
            }
        }

        Err(Error::MissingDimensions)
    }
}
