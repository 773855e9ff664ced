#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;
use std::io::Cursor;

fn drain(reader: &mut impl Reader) -> String {
    let mut out = String::new();
    while let Some(c) = reader.read_char().unwrap() {
        out.push(c);
    }
    out
}

// === StrReader ===

#[test]
fn str_reader_yields_every_char() {
    let mut reader = StrReader::new("héllo");
    assert_eq!(drain(&mut reader), "héllo");
}

#[test]
fn str_reader_repeats_end_of_stream() {
    let mut reader = StrReader::new("");
    assert_eq!(reader.read_char().unwrap(), None);
    assert_eq!(reader.read_char().unwrap(), None);
}

#[test]
fn str_reader_push_back_replays_last_char() {
    let mut reader = StrReader::new("ab");
    assert_eq!(reader.read_char().unwrap(), Some('a'));
    reader.push_back();
    assert_eq!(reader.read_char().unwrap(), Some('a'));
    assert_eq!(reader.read_char().unwrap(), Some('b'));
}

#[test]
fn push_back_is_single_level() {
    let mut reader = StrReader::new("ab");
    reader.read_char().unwrap();
    reader.read_char().unwrap();
    reader.push_back();
    reader.push_back();
    assert_eq!(reader.read_char().unwrap(), Some('b'));
    assert_eq!(reader.read_char().unwrap(), None);
}

#[test]
fn push_back_before_any_read_is_ignored() {
    let mut reader = StrReader::new("x");
    reader.push_back();
    assert_eq!(reader.read_char().unwrap(), Some('x'));
}

#[test]
fn push_back_of_end_of_stream() {
    let mut reader = StrReader::new("");
    assert_eq!(reader.read_char().unwrap(), None);
    reader.push_back();
    assert_eq!(reader.read_char().unwrap(), None);
}

// === IoReader ===

#[test]
fn io_reader_decodes_multibyte_utf8() {
    let mut reader = IoReader::new(Cursor::new("tortue → 🐢".as_bytes()));
    assert_eq!(drain(&mut reader), "tortue → 🐢");
}

#[test]
fn io_reader_push_back() {
    let mut reader = IoReader::new(Cursor::new(b"xy".to_vec()));
    assert_eq!(reader.read_char().unwrap(), Some('x'));
    reader.push_back();
    assert_eq!(reader.read_char().unwrap(), Some('x'));
    assert_eq!(reader.read_char().unwrap(), Some('y'));
}

#[test]
fn io_reader_rejects_invalid_lead_byte() {
    let mut reader = IoReader::new(Cursor::new(vec![b'a', 0xFF]));
    assert_eq!(reader.read_char().unwrap(), Some('a'));
    let err = reader.read_char().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn io_reader_rejects_truncated_sequence() {
    let mut reader = IoReader::new(Cursor::new(vec![0xE2, 0x86]));
    let err = reader.read_char().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
}

#[test]
fn io_reader_rejects_bad_continuation() {
    let mut reader = IoReader::new(Cursor::new(vec![0xC3, b'a']));
    let err = reader.read_char().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}
