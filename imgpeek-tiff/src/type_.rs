imgpeek_common::utils::convertible_enum!(
    #[repr(u16)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Type {
        Byte = 1,
        Ascii = 2,
        Short = 3,
        Long = 4,
        Rational = 5,
        SByte = 6,
        Undefined = 7,
        SShort = 8,
        SLong = 9,
        SRational = 10,
        Float = 11,
        Double = 12,
    }
);

impl Type {
    /// Size of an integer value that fits into the entry
    ///
    /// `None` for types that do not hold a single integer.
    pub fn integer_size(self) -> Option<u8> {
        match self {
            Self::Byte | Self::SByte => Some(1),
            Self::Short | Self::SShort => Some(2),
            Self::Long | Self::SLong => Some(4),
            _ => None,
        }
    }
}
