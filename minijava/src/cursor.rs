//! Character cursor over a byte stream.
use std::io::{self, BufReader, Bytes, Read};

use itertools::{multipeek, MultiPeek};

use crate::tokens::Pos;

/// Character returned by the cursor once the stream is exhausted.
///
/// The source may contain literal null characters, so
/// [`Cursor::at_end`] is the authority on end-of-stream.
pub const EOF_CHAR: char = '\0';

/// Cursor pointing at the current character of an input stream.
///
/// Characters are decoded from the stream on demand, one at a time,
/// so the source never has to be held in memory in full.
pub struct Cursor<R: Read> {
    /// Decoded characters.
    ///
    /// `MultiPeek` buffers characters that were looked at with
    /// [`Cursor::peek`] but not consumed yet. Its peek cursor is
    /// reset before every peek so lookahead is always exactly one
    /// character past the current.
    chars: MultiPeek<Utf8Chars<R>>,
    current: char,
    at_end: bool,
    /// Position of the current character.
    pos: Pos,
    /// Read failure that ended the stream, waiting to be collected
    /// by the scanner.
    error: Option<io::Error>,
}

impl<R: Read> Cursor<R> {
    pub fn new(reader: R) -> Self {
        let mut cursor = Self {
            chars: multipeek(Utf8Chars::new(reader)),
            current: EOF_CHAR,
            at_end: false,
            // Priming below moves to column 1.
            pos: Pos::new(1, 0),
            error: None,
        };

        // Initial state of the cursor must be the first character
        // of the source, so the scanner can match on it immediately.
        cursor.next();

        cursor
    }

    /// The character under the cursor.
    #[inline]
    pub fn current(&self) -> char {
        self.current
    }

    /// Position of the character under the cursor.
    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Look at the character after the current one, without consuming it.
    pub fn peek(&mut self) -> char {
        if self.at_end {
            return EOF_CHAR;
        }

        self.chars.reset_peek();
        match self.chars.peek() {
            Some(Ok(c)) => *c,
            // Errors surface when the cursor actually advances onto them.
            Some(Err(_)) | None => EOF_CHAR,
        }
    }

    /// Advance the cursor to the next character and return it.
    pub fn next(&mut self) -> char {
        if self.at_end {
            return EOF_CHAR;
        }

        if self.current == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }

        match self.chars.next() {
            Some(Ok(c)) => {
                self.current = c;
            }
            Some(Err(err)) => {
                // A broken stream can't be resumed.
                self.error = Some(err);
                self.current = EOF_CHAR;
                self.at_end = true;
            }
            None => {
                self.current = EOF_CHAR;
                self.at_end = true;
            }
        }

        self.current
    }

    /// Indicates whether the cursor has moved past the last character.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.at_end
    }

    /// Take the read error that ended the stream, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

/// Iterator decoding UTF-8 characters from a byte reader.
///
/// Malformed sequences are replaced by [`char::REPLACEMENT_CHARACTER`].
pub struct Utf8Chars<R: Read> {
    bytes: Bytes<BufReader<R>>,
    /// Byte that ended a malformed sequence, and starts the next one.
    pending: Option<u8>,
}

impl<R: Read> Utf8Chars<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            pending: None,
        }
    }

    fn next_byte(&mut self) -> Option<io::Result<u8>> {
        match self.pending.take() {
            Some(byte) => Some(Ok(byte)),
            None => self.bytes.next(),
        }
    }
}

impl<R: Read> Iterator for Utf8Chars<R> {
    type Item = io::Result<char>;

    fn next(&mut self) -> Option<Self::Item> {
        let lead = match self.next_byte()? {
            Ok(byte) => byte,
            Err(err) => return Some(Err(err)),
        };

        let width = utf8_width(lead);
        if width == 1 {
            return Some(Ok(lead as char));
        }
        if width == 0 {
            return Some(Ok(char::REPLACEMENT_CHARACTER));
        }

        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            match self.next_byte() {
                Some(Ok(byte)) if is_continuation(byte) => *slot = byte,
                Some(Ok(byte)) => {
                    self.pending = Some(byte);
                    return Some(Ok(char::REPLACEMENT_CHARACTER));
                }
                Some(Err(err)) => return Some(Err(err)),
                None => return Some(Ok(char::REPLACEMENT_CHARACTER)),
            }
        }

        let c = std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        Some(Ok(c))
    }
}

/// Encoded length of a character, determined by its leading byte.
///
/// Returns 0 for bytes that can't start a character.
fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

fn is_continuation(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cursor_walk() {
        let mut cursor = Cursor::new("ab\nc".as_bytes());
        assert_eq!(cursor.current(), 'a');
        assert_eq!(cursor.pos(), Pos::new(1, 1));
        assert_eq!(cursor.peek(), 'b');
        assert_eq!(cursor.peek(), 'b', "peek must not advance");

        assert_eq!(cursor.next(), 'b');
        assert_eq!(cursor.next(), '\n');
        assert_eq!(cursor.pos(), Pos::new(1, 3));
        assert_eq!(cursor.next(), 'c');
        assert_eq!(cursor.pos(), Pos::new(2, 1));
        assert!(!cursor.at_end());

        assert_eq!(cursor.next(), EOF_CHAR);
        assert!(cursor.at_end());
        assert_eq!(cursor.next(), EOF_CHAR);
        assert!(cursor.at_end());
    }

    #[test]
    fn test_cursor_empty() {
        let cursor = Cursor::new("".as_bytes());
        assert!(cursor.at_end());
        assert_eq!(cursor.current(), EOF_CHAR);
    }

    #[test]
    fn test_null_char_is_not_end() {
        let mut cursor = Cursor::new("\0x".as_bytes());
        assert_eq!(cursor.current(), EOF_CHAR);
        assert!(!cursor.at_end());
        assert_eq!(cursor.next(), 'x');
    }

    #[test]
    fn test_utf8_decoding() {
        let chars = Utf8Chars::new("aé€😀".as_bytes())
            .collect::<io::Result<String>>()
            .unwrap();
        assert_eq!(chars, "aé€😀");
    }

    #[test]
    fn test_utf8_malformed() {
        // Truncated two byte sequence followed by ASCII.
        let bytes: &[u8] = &[b'a', 0xC3, b'b', 0xFF];
        let chars = Utf8Chars::new(bytes)
            .collect::<io::Result<Vec<char>>>()
            .unwrap();
        assert_eq!(
            chars,
            vec![
                'a',
                char::REPLACEMENT_CHARACTER,
                'b',
                char::REPLACEMENT_CHARACTER
            ]
        );
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device unplugged"))
        }
    }

    #[test]
    fn test_read_error_ends_stream() {
        let mut cursor = Cursor::new(FailingReader);
        assert!(cursor.at_end());
        let err = cursor.take_error().expect("read error must be kept");
        assert_eq!(err.to_string(), "device unplugged");
        assert!(cursor.take_error().is_none());
    }
}
