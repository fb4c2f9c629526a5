/*
** This file is a part of Littlexml (XML subset parser and writer)
** Copyright (C) 2026 Gurer Ozen
**
** Littlexml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use crate::DocumentError;
use crate::FormatError;

use super::Location;

const INITIAL_LEXEME_CAPACITY: usize = 128;

/// Byte cursor over the input plus the lexeme accumulator.
///
/// The lexeme grows on demand up to `max_token_size` bytes, longer
/// tokens are refused with [FormatError::TokenTooLong].
pub(super) struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    location: Location,
    lexeme: Vec<u8>,
    max_token_size: usize,
}

impl<'a> Scanner<'a> {
    pub(super) fn new(bytes: &'a [u8], max_token_size: usize) -> Scanner<'a> {
        Scanner {
            bytes,
            pos: 0,
            location: Location::new(),
            lexeme: Vec::with_capacity(std::cmp::min(INITIAL_LEXEME_CAPACITY, max_token_size)),
            max_token_size,
        }
    }

    pub(super) fn location(&self) -> Location {
        self.location
    }

    pub(super) fn error(&self, error: FormatError) -> DocumentError {
        DocumentError::BadXml {
            error,
            location: self.location,
        }
    }

    pub(super) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    pub(super) fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    pub(super) fn starts_with(&self, prefix: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(prefix)
    }

    pub(super) fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        self.location.advance(c);
        Some(c)
    }

    /// Like [bump()](Scanner::bump) but running out of input is an error.
    pub(super) fn expect_byte(&mut self) -> Result<u8, DocumentError> {
        match self.bump() {
            Some(c) => Ok(c),
            None => Err(self.error(FormatError::UnexpectedEnd)),
        }
    }

    pub(super) fn skip(&mut self, count: usize) {
        let end = std::cmp::min(self.pos + count, self.bytes.len());
        self.location.advance_all(&self.bytes[self.pos..end]);
        self.pos = end;
    }

    /// Moves past the next occurence of `needle`.
    ///
    /// Moves to the end of input and returns false if there is none.
    pub(super) fn skip_past(&mut self, needle: &[u8]) -> bool {
        match memchr::memmem::find(&self.bytes[self.pos..], needle) {
            Some(offset) => {
                self.skip(offset + needle.len());
                true
            }
            None => {
                self.skip(self.bytes.len() - self.pos);
                false
            }
        }
    }

    pub(super) fn push(&mut self, c: u8) -> Result<(), DocumentError> {
        if self.lexeme.len() >= self.max_token_size {
            return Err(self.error(FormatError::TokenTooLong));
        }
        if self.lexeme.len() >= self.lexeme.capacity() {
            let grow = std::cmp::max(self.lexeme.capacity(), 1);
            if self.lexeme.try_reserve_exact(grow).is_err() {
                return Err(DocumentError::NoMemory);
            }
        }
        self.lexeme.push(c);
        Ok(())
    }

    pub(super) fn lexeme(&self) -> &[u8] {
        &self.lexeme
    }

    pub(super) fn clear(&mut self) {
        self.lexeme.clear();
    }

    /// Returns the lexeme as a string and clears it for reuse.
    pub(super) fn take_string(&mut self) -> Result<String, DocumentError> {
        let s = match std::str::from_utf8(&self.lexeme) {
            Ok(s) => s.to_string(),
            Err(_) => return Err(self.error(FormatError::InvalidUtf8)),
        };
        self.lexeme.clear();
        Ok(s)
    }

    /// Moves the pending lexeme out, leaving an empty one behind.
    pub(super) fn take_bytes(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.lexeme)
    }

    pub(super) fn decode(&self, bytes: Vec<u8>) -> Result<String, DocumentError> {
        String::from_utf8(bytes).map_err(|_| self.error(FormatError::InvalidUtf8))
    }
}

pub(super) fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}
