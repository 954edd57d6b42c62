use std::io::BufRead;

use crate::math::*;

/// Longest token that [`Scanner::read_token`] returns
pub const MAX_TOKEN_LEN: usize = 256;
/// Longest line prefix that [`Scanner::read_line`] keeps
pub const MAX_LINE_LEN: usize = 4096;

/// Space, tab, carriage return or line feed
pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

/// Cursor for whitespace separated header grammars
///
/// Works on everything that implements [`BufRead`], including in-memory
/// buffers.
///
/// ```
/// # use imgpeek_common::scan::Scanner;
/// let mut s = Scanner::new(b"#define w 12\n".as_slice());
/// assert_eq!(s.read_token().unwrap(), b"#define");
/// s.skip_whitespace().unwrap();
/// s.skip_token().unwrap();
/// s.skip_whitespace().unwrap();
/// assert_eq!(s.parse_u32().unwrap(), 12);
/// ```
#[derive(Debug)]
pub struct Scanner<R> {
    inner: R,
}

impl<R: BufRead> Scanner<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Next byte without consuming it, `None` at the end
    pub fn peek(&mut self) -> Result<Option<u8>, ScanError> {
        Ok(self.inner.fill_buf()?.first().copied())
    }

    /// Consume and return the next byte
    pub fn next_byte(&mut self) -> Result<u8, ScanError> {
        let byte = self.peek()?.ok_or(ScanError::UnexpectedEof)?;
        self.inner.consume(1);
        Ok(byte)
    }

    /// Skips whitespace, returns number of skipped bytes
    pub fn skip_whitespace(&mut self) -> Result<usize, ScanError> {
        self.consume_until(|x| !is_whitespace(x), false, None)
    }

    /// Skips everything up to the next whitespace
    pub fn skip_token(&mut self) -> Result<usize, ScanError> {
        self.consume_until(is_whitespace, false, None)
    }

    /// Reads everything up to the next whitespace
    ///
    /// The whitespace itself is not consumed.
    pub fn read_token(&mut self) -> Result<Vec<u8>, ScanError> {
        let mut token = Vec::new();
        let len = self.consume_until(is_whitespace, false, Some((&mut token, MAX_TOKEN_LEN)))?;
        if len > MAX_TOKEN_LEN {
            return Err(ScanError::TokenTooLong(len));
        }
        Ok(token)
    }

    /// Reads a line including the trailing line feed
    ///
    /// Bytes beyond [`MAX_LINE_LEN`] are consumed but not returned. Returns an
    /// empty line at the end of the data.
    ///
    /// ```
    /// # use imgpeek_common::scan::Scanner;
    /// let mut s = Scanner::new(b"abc\n\"1 2\"".as_slice());
    /// assert_eq!(s.read_line().unwrap(), b"abc\n");
    /// assert_eq!(s.read_line().unwrap(), b"\"1 2\"");
    /// assert!(s.read_line().unwrap().is_empty());
    /// ```
    pub fn read_line(&mut self) -> Result<Vec<u8>, ScanError> {
        let mut line = Vec::new();
        self.consume_until(|x| x == b'\n', true, Some((&mut line, MAX_LINE_LEN)))?;
        Ok(line)
    }

    /// Parses a decimal number starting at the current position
    ///
    /// Stops at the first byte that is not a digit, without consuming it.
    ///
    /// ```
    /// # use imgpeek_common::scan::Scanner;
    /// let mut s = Scanner::new(b"640x480".as_slice());
    /// assert_eq!(s.parse_u32().unwrap(), 640);
    /// assert!(s.parse_u32().is_err());
    /// ```
    pub fn parse_u32(&mut self) -> Result<u32, ScanError> {
        let mut value: u32 = 0;
        let mut digits: usize = 0;

        while let Some(byte) = self.peek()? {
            let Some(digit) = char::from(byte).to_digit(10) else {
                break;
            };
            value = value.safe_mul(10)?.safe_add(digit)?;
            digits = digits.safe_add(1)?;
            self.inner.consume(1);
        }

        if digits == 0 {
            return Err(ScanError::NoDigits);
        }

        Ok(value)
    }

    /// Consumes bytes until `stop` matches
    ///
    /// The matching byte is only consumed if `inclusive` is set. Consumed bytes
    /// are appended to `out` until its length reaches the given limit. Returns
    /// the number of consumed bytes.
    fn consume_until(
        &mut self,
        stop: impl Fn(u8) -> bool,
        inclusive: bool,
        mut out: Option<(&mut Vec<u8>, usize)>,
    ) -> Result<usize, ScanError> {
        let mut consumed: usize = 0;
        loop {
            let (used, done) = {
                let available = self.inner.fill_buf()?;
                if available.is_empty() {
                    return Ok(consumed);
                }

                let (used, done) = match available.iter().position(|x| stop(*x)) {
                    Some(i) if inclusive => (i.safe_add(1)?, true),
                    Some(i) => (i, true),
                    None => (available.len(), false),
                };

                if let Some((out, limit)) = out.as_mut() {
                    let room = limit.saturating_sub(out.len());
                    if let Some(keep) = available.get(..used.min(room)) {
                        out.extend_from_slice(keep);
                    }
                }

                (used, done)
            };

            self.inner.consume(used);
            consumed = consumed.safe_add(used)?;

            if done {
                return Ok(consumed);
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Math: {0}")]
    Math(#[from] MathError),
    #[error("Unexpected end of data")]
    UnexpectedEof,
    #[error("Expected a decimal number")]
    NoDigits,
    #[error("Token of {0} bytes is too long")]
    TokenTooLong(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_kinds() {
        let mut s = Scanner::new(b" \t\r\n42".as_slice());
        assert_eq!(s.skip_whitespace().unwrap(), 4);
        assert_eq!(s.parse_u32().unwrap(), 42);
        assert_eq!(s.peek().unwrap(), None);
    }

    #[test]
    fn hash_is_not_whitespace() {
        let mut s = Scanner::new(b"\n# 7".as_slice());
        assert_eq!(s.skip_whitespace().unwrap(), 1);
        assert_eq!(s.peek().unwrap(), Some(b'#'));
        assert!(matches!(s.parse_u32(), Err(ScanError::NoDigits)));
    }

    #[test]
    fn overflowing_number() {
        let mut s = Scanner::new(b"99999999999".as_slice());
        assert!(matches!(s.parse_u32(), Err(ScanError::Math(_))));
    }

    #[test]
    fn token_at_end() {
        let mut s = Scanner::new(b"last".as_slice());
        assert_eq!(s.read_token().unwrap(), b"last");
        assert_eq!(s.read_token().unwrap(), b"");
    }

    #[test]
    fn long_token() {
        let data = vec![b'a'; MAX_TOKEN_LEN + 1];
        let mut s = Scanner::new(data.as_slice());
        assert!(matches!(s.read_token(), Err(ScanError::TokenTooLong(_))));
    }

    #[test]
    fn long_line_is_cut() {
        let mut data = vec![b'x'; MAX_LINE_LEN * 2];
        data.extend_from_slice(b"\nnext\n");
        let mut s = Scanner::new(data.as_slice());
        assert_eq!(s.read_line().unwrap().len(), MAX_LINE_LEN);
        assert_eq!(s.read_line().unwrap(), b"next\n");
    }

    #[test]
    fn small_buffer() {
        let data = b"   1234   56";
        let reader = std::io::BufReader::with_capacity(2, data.as_slice());
        let mut s = Scanner::new(reader);
        s.skip_whitespace().unwrap();
        assert_eq!(s.parse_u32().unwrap(), 1234);
        s.skip_whitespace().unwrap();
        assert_eq!(s.parse_u32().unwrap(), 56);
    }
}
