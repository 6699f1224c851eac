//! Reader of the length-prefixed input format.
//!
//! The input is a decimal byte count followed by that many bytes of subject text (or, when
//! the subject comes from a file, a first line holding the path), then a decimal pattern
//! count followed by that many length-prefixed patterns. Whitespace before every integer and
//! before every byte string is skipped.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Errors in the input.
#[derive(Debug, Eq, PartialEq)]
pub enum ProtocolError {
    /// The input ended while `expected` was being read.
    UnexpectedEof { expected: &'static str },

    /// `token` is not a decimal integer fitting in `usize`.
    InvalidInteger { expected: &'static str, token: String },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnexpectedEof { expected } => {
                write!(f, "ProtocolError: unexpected end of input reading {expected}")
            }
            Self::InvalidInteger { expected, token } => {
                write!(f, "ProtocolError: invalid {expected}: {token:?}")
            }
        }
    }
}

impl Error for ProtocolError {}

/// Where the subject text comes from.
#[derive(Debug, Eq, PartialEq)]
pub enum Subject {
    Inline(Vec<u8>),
    File(PathBuf),
}

/// A parsed input.
#[derive(Debug, Eq, PartialEq)]
pub struct Request {
    pub subject: Subject,
    pub patterns: Vec<Vec<u8>>,
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn skip_whitespace(&mut self) {
        while self.buf.get(self.pos).map_or(false, u8::is_ascii_whitespace) {
            self.pos += 1;
        }
    }

    fn read_integer(&mut self, expected: &'static str) -> Result<usize, ProtocolError> {
        self.skip_whitespace();
        let start = self.pos;
        while self
            .buf
            .get(self.pos)
            .map_or(false, |c| !c.is_ascii_whitespace())
        {
            self.pos += 1;
        }
        let token = &self.buf[start..self.pos];
        if token.is_empty() {
            return Err(ProtocolError::UnexpectedEof { expected });
        }
        std::str::from_utf8(token)
            .ok()
            .filter(|s| s.bytes().all(|c| c.is_ascii_digit()))
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| ProtocolError::InvalidInteger {
                expected,
                token: String::from_utf8_lossy(token).into_owned(),
            })
    }

    fn read_bytes(&mut self, len: usize, expected: &'static str) -> Result<&'a [u8], ProtocolError> {
        self.skip_whitespace();
        let bytes = self
            .buf
            .get(self.pos..)
            .and_then(|rest| rest.get(..len))
            .ok_or(ProtocolError::UnexpectedEof { expected })?;
        self.pos += len;
        Ok(bytes)
    }

    fn read_line(&mut self) -> &'a [u8] {
        let rest = &self.buf[self.pos..];
        let len = rest.iter().position(|&c| c == b'\n').unwrap_or(rest.len());
        self.pos += (len + 1).min(rest.len());
        let line = &rest[..len];
        line.strip_suffix(b"\r").unwrap_or(line)
    }
}

/// Parses the whole input.
///
/// When `subject_from_file` is set, the first line is taken as the path of the subject file.
pub fn parse_request(input: &[u8], subject_from_file: bool) -> Result<Request, ProtocolError> {
    let mut reader = Reader::new(input);

    let subject = if subject_from_file {
        let line = reader.read_line();
        let path = String::from_utf8_lossy(line).trim().to_string();
        if path.is_empty() {
            return Err(ProtocolError::UnexpectedEof {
                expected: "subject path",
            });
        }
        Subject::File(PathBuf::from(path))
    } else {
        let len = reader.read_integer("subject length")?;
        Subject::Inline(reader.read_bytes(len, "subject")?.to_vec())
    };

    let num_patterns = reader.read_integer("pattern count")?;
    let mut patterns = Vec::with_capacity(num_patterns.min(input.len()));
    for _ in 0..num_patterns {
        let len = reader.read_integer("pattern length")?;
        patterns.push(reader.read_bytes(len, "pattern")?.to_vec());
    }

    Ok(Request { subject, patterns })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inline() {
        let request = parse_request(b"11 abracadabra\n3\n3 rac\n5 barak\n2 ab\n", false).unwrap();

        assert_eq!(Subject::Inline(b"abracadabra".to_vec()), request.subject);
        assert_eq!(
            vec![b"rac".to_vec(), b"barak".to_vec(), b"ab".to_vec()],
            request.patterns
        );
    }

    #[test]
    fn test_parse_keeps_inner_whitespace() {
        let request = parse_request(b"7\n  a b\nc d\n1 3 x y", false).unwrap();

        assert_eq!(Subject::Inline(b"a b\nc d".to_vec()), request.subject);
        assert_eq!(vec![b"x y".to_vec()], request.patterns);
    }

    #[test]
    fn test_parse_empty_pattern() {
        let request = parse_request(b"2 ab 2 0 1 a", false).unwrap();

        assert_eq!(vec![b"".to_vec(), b"a".to_vec()], request.patterns);
    }

    #[test]
    fn test_parse_file_subject() {
        let request = parse_request(b"data/input.txt\r\n1 2 ab", true).unwrap();

        assert_eq!(Subject::File(PathBuf::from("data/input.txt")), request.subject);
        assert_eq!(vec![b"ab".to_vec()], request.patterns);
    }

    #[test]
    fn test_parse_truncated() {
        assert_eq!(
            Err(ProtocolError::UnexpectedEof {
                expected: "subject"
            }),
            parse_request(b"5 abc", false)
        );
        assert_eq!(
            Err(ProtocolError::UnexpectedEof {
                expected: "pattern length"
            }),
            parse_request(b"3 abc 2 1 a", false)
        );
    }

    #[test]
    fn test_parse_invalid_integer() {
        assert_eq!(
            Err(ProtocolError::InvalidInteger {
                expected: "pattern count",
                token: "-1".to_string(),
            }),
            parse_request(b"3 abc -1", false)
        );
        assert!(parse_request(b"x abc", false).is_err());
        assert!(parse_request(b"", true).is_err());
    }
}
