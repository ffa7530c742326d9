//! Byte reader with one byte of pushback, shared by the header parser and
//! the sample loader.

use std::io::{self, BufRead, ErrorKind, Read};

pub(crate) struct ByteReader<R> {
    inner: R,
    pushback: Option<u8>,
}

impl<R: BufRead> ByteReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            pushback: None,
        }
    }

    /// Next byte, or `None` at end of stream.
    pub(crate) fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(b) = self.pushback.take() {
            return Ok(Some(b));
        }
        loop {
            let b = match self.inner.fill_buf() {
                Ok(buf) => match buf.first() {
                    Some(&b) => b,
                    None => return Ok(None),
                },
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            self.inner.consume(1);
            return Ok(Some(b));
        }
    }

    /// Push one byte back; the next read returns it.
    pub(crate) fn unread(&mut self, b: u8) {
        debug_assert!(self.pushback.is_none(), "only one byte of pushback");
        self.pushback = Some(b);
    }

    /// Skip whitespace and `#` comments (to end of line).
    ///
    /// Returns the number of bytes consumed. Stops at end of stream or at
    /// the first byte that is neither, which is pushed back.
    pub(crate) fn skip_separators(&mut self) -> io::Result<usize> {
        let mut skipped = 0;
        while let Some(b) = self.next_byte()? {
            if b.is_ascii_whitespace() {
                skipped += 1;
            } else if b == b'#' {
                skipped += 1 + self.skip_comment()?;
            } else {
                self.unread(b);
                break;
            }
        }
        Ok(skipped)
    }

    fn skip_comment(&mut self) -> io::Result<usize> {
        let mut len = 0;
        while let Some(b) = self.next_byte()? {
            len += 1;
            if b == b'\n' || b == b'\r' {
                break;
            }
        }
        log::trace!("skipped {len}-byte comment");
        Ok(len)
    }

    /// Read an unsigned decimal token at the cursor.
    ///
    /// Returns `None` if the cursor is not on a digit. Values that do not
    /// fit saturate to `u64::MAX`; callers range-check.
    pub(crate) fn read_decimal(&mut self) -> io::Result<Option<u64>> {
        let mut value: Option<u64> = None;
        while let Some(b) = self.next_byte()? {
            if !b.is_ascii_digit() {
                self.unread(b);
                break;
            }
            let digit = u64::from(b - b'0');
            value = Some(
                value
                    .unwrap_or(0)
                    .saturating_mul(10)
                    .saturating_add(digit),
            );
        }
        Ok(value)
    }

    /// Fill `buf` as far as the stream allows; returns the byte count read.
    pub(crate) fn read_block(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        if buf.is_empty() {
            return Ok(0);
        }
        if let Some(b) = self.pushback.take() {
            buf[0] = b;
            filled = 1;
        }
        while filled < buf.len() {
            match Read::read(&mut self.inner, &mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(data: &[u8]) -> ByteReader<&[u8]> {
        ByteReader::new(data)
    }

    #[test]
    fn pushback_is_returned_first() {
        let mut r = reader(b"ab");
        assert_eq!(r.next_byte().unwrap(), Some(b'a'));
        r.unread(b'a');
        assert_eq!(r.next_byte().unwrap(), Some(b'a'));
        assert_eq!(r.next_byte().unwrap(), Some(b'b'));
        assert_eq!(r.next_byte().unwrap(), None);
    }

    #[test]
    fn skips_runs_of_comments() {
        let mut r = reader(b"  # one\n#two\n\t# three\r\n 42");
        let skipped = r.skip_separators().unwrap();
        assert_eq!(skipped, 24);
        assert_eq!(r.read_decimal().unwrap(), Some(42));
    }

    #[test]
    fn comment_at_end_of_stream() {
        let mut r = reader(b"\n# trailing comment with no newline");
        r.skip_separators().unwrap();
        assert_eq!(r.next_byte().unwrap(), None);
    }

    #[test]
    fn many_comment_lines_do_not_recurse() {
        let mut data = Vec::new();
        for _ in 0..100_000 {
            data.extend_from_slice(b"#c\n");
        }
        data.extend_from_slice(b"7");
        let mut r = ByteReader::new(&data[..]);
        r.skip_separators().unwrap();
        assert_eq!(r.read_decimal().unwrap(), Some(7));
    }

    #[test]
    fn decimal_stops_at_non_digit() {
        let mut r = reader(b"123x");
        assert_eq!(r.read_decimal().unwrap(), Some(123));
        assert_eq!(r.next_byte().unwrap(), Some(b'x'));
    }

    #[test]
    fn decimal_missing() {
        let mut r = reader(b"x1");
        assert_eq!(r.read_decimal().unwrap(), None);
        assert_eq!(r.next_byte().unwrap(), Some(b'x'));
        assert_eq!(reader(b"").read_decimal().unwrap(), None);
    }

    #[test]
    fn decimal_saturates() {
        let mut r = reader(b"99999999999999999999999999");
        assert_eq!(r.read_decimal().unwrap(), Some(u64::MAX));
    }

    #[test]
    fn block_includes_pushback() {
        let mut r = reader(b"xyz");
        let b = r.next_byte().unwrap().unwrap();
        r.unread(b);
        let mut buf = [0u8; 5];
        assert_eq!(r.read_block(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], b"xyz");
    }
}
