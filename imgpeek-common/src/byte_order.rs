use std::io::Read;

/// Byte order of multi-byte integers
///
/// Passed explicitly to every reader that depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most significant byte first, TIFF `MM`
    Big,
    /// Least significant byte first, TIFF `II`
    Little,
}

impl ByteOrder {
    /// Byte order given by a TIFF byte order mark
    ///
    /// ```
    /// # use imgpeek_common::byte_order::ByteOrder;
    /// assert_eq!(ByteOrder::from_mark(b"II*\0"), Some(ByteOrder::Little));
    /// assert_eq!(ByteOrder::from_mark(b"MM\0*"), Some(ByteOrder::Big));
    /// assert_eq!(ByteOrder::from_mark(b"XX"), None);
    /// ```
    pub fn from_mark(data: &[u8]) -> Option<Self> {
        match data.get(..2)? {
            b"II" => Some(Self::Little),
            b"MM" => Some(Self::Big),
            _ => None,
        }
    }

    pub fn u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Self::Big => u16::from_be_bytes(bytes),
            Self::Little => u16::from_le_bytes(bytes),
        }
    }

    pub fn u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::Big => u32::from_be_bytes(bytes),
            Self::Little => u32::from_le_bytes(bytes),
        }
    }

    /// Decodes a `u16` at `offset` of `data`
    ///
    /// Returns `None` if `data` is too short.
    pub fn u16_at(self, data: &[u8], offset: usize) -> Option<u16> {
        let bytes = data.get(offset..offset.checked_add(2)?)?;
        Some(self.u16(bytes.try_into().ok()?))
    }

    /// Decodes a `u32` at `offset` of `data`
    ///
    /// ```
    /// # use imgpeek_common::byte_order::ByteOrder;
    /// let data = [0, 0, 1, 2, 3, 4];
    /// assert_eq!(ByteOrder::Big.u32_at(&data, 2), Some(0x01020304));
    /// assert_eq!(ByteOrder::Little.u32_at(&data, 2), Some(0x04030201));
    /// assert_eq!(ByteOrder::Little.u32_at(&data, 3), None);
    /// ```
    pub fn u32_at(self, data: &[u8], offset: usize) -> Option<u32> {
        let bytes = data.get(offset..offset.checked_add(4)?)?;
        Some(self.u32(bytes.try_into().ok()?))
    }

    pub fn read_u16<R: Read + ?Sized>(self, r: &mut R) -> std::io::Result<u16> {
        let buf = &mut [0; 2];
        r.read_exact(buf)?;
        Ok(self.u16(*buf))
    }

    pub fn read_u32<R: Read + ?Sized>(self, r: &mut R) -> std::io::Result<u32> {
        let buf = &mut [0; 4];
        r.read_exact(buf)?;
        Ok(self.u32(*buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_value_both_orders() {
        let value = 0x1234_u16;
        assert_eq!(ByteOrder::Big.u16(value.to_be_bytes()), value);
        assert_eq!(ByteOrder::Little.u16(value.to_le_bytes()), value);

        let value = 0xdead_beef_u32;
        assert_eq!(ByteOrder::Big.u32(value.to_be_bytes()), value);
        assert_eq!(ByteOrder::Little.u32(value.to_le_bytes()), value);
    }

    #[test]
    fn read_from_slice() {
        let mut data: &[u8] = &[0x00, 0x2a, 0x08, 0x00, 0x00, 0x00];
        assert_eq!(ByteOrder::Big.read_u16(&mut data).unwrap(), 42);
        assert_eq!(ByteOrder::Little.read_u32(&mut data).unwrap(), 8);
        assert!(ByteOrder::Little.read_u16(&mut data).is_err());
    }
}
