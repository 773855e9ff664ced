//! Character sources.
//!
//! A [`Reader`] hands out one character at a time and can re-deliver exactly
//! one: the most recent read. The tokenizer never relies on more than that.

use std::io::{self, BufRead};

/// A character stream with one level of pushback.
pub trait Reader {
    /// Read the next character. `Ok(None)` marks end-of-stream and keeps being
    /// returned once reached.
    fn read_char(&mut self) -> io::Result<Option<char>>;

    /// Re-deliver the most recent read on the next [`read_char`](Self::read_char).
    ///
    /// Pushing back twice without a read in between still replays a single
    /// character.
    fn push_back(&mut self);
}

/// Single-slot replay buffer shared by the readers in this module.
#[derive(Clone, Copy, Debug, Default)]
struct Replay {
    last: Option<Option<char>>,
    pending: bool,
}

impl Replay {
    fn take(&mut self) -> Option<Option<char>> {
        if self.pending {
            self.pending = false;
            self.last
        } else {
            None
        }
    }

    fn record(&mut self, read: Option<char>) -> Option<char> {
        self.last = Some(read);
        read
    }

    fn push_back(&mut self) {
        self.pending = self.last.is_some();
    }
}

/// Reader over in-memory text.
#[derive(Clone, Debug)]
pub struct StrReader<'a> {
    chars: std::str::Chars<'a>,
    replay: Replay,
}

impl<'a> StrReader<'a> {
    pub fn new(source: &'a str) -> Self {
        StrReader {
            chars: source.chars(),
            replay: Replay::default(),
        }
    }
}

impl Reader for StrReader<'_> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        if let Some(read) = self.replay.take() {
            return Ok(read);
        }
        Ok(self.replay.record(self.chars.next()))
    }

    fn push_back(&mut self) {
        self.replay.push_back();
    }
}

/// Reader decoding UTF-8 from any buffered byte source (files, stdin).
///
/// Malformed input surfaces as an [`io::ErrorKind::InvalidData`] error.
#[derive(Debug)]
pub struct IoReader<R> {
    inner: R,
    replay: Replay,
}

impl<R: BufRead> IoReader<R> {
    pub fn new(inner: R) -> Self {
        IoReader {
            inner,
            replay: Replay::default(),
        }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = loop {
            match self.inner.fill_buf() {
                Ok(buf) => break buf.first().copied(),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        };
        if byte.is_some() {
            self.inner.consume(1);
        }
        Ok(byte)
    }

    fn decode(&mut self) -> io::Result<Option<char>> {
        let Some(first) = self.read_byte()? else {
            return Ok(None);
        };
        let width = utf8_width(first).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid UTF-8 lead byte 0x{first:02x}"),
            )
        })?;

        let mut bytes = [first, 0, 0, 0];
        for slot in &mut bytes[1..width] {
            *slot = self.read_byte()?.ok_or_else(|| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "truncated UTF-8 sequence")
            })?;
        }

        let text = std::str::from_utf8(&bytes[..width])
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        Ok(text.chars().next())
    }
}

impl<R: BufRead> Reader for IoReader<R> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        if let Some(read) = self.replay.take() {
            return Ok(read);
        }
        let read = self.decode()?;
        Ok(self.replay.record(read))
    }

    fn push_back(&mut self) {
        self.replay.push_back();
    }
}

/// Encoded length of a UTF-8 sequence from its lead byte.
fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
