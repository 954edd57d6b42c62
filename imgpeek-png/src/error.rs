#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Header has {0} bytes, {1} required")]
    HeaderTooShort(usize, usize),
    #[error("Invalid magic bytes: {0:x?}")]
    InvalidMagicBytes(Vec<u8>),
}
