/*
** This file is a part of Littlexml (XML subset parser and writer)
** Copyright (C) 2026 Gurer Ozen
**
** Littlexml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

macro_rules! whitespace {
    () => {
        b' ' | b'\t' | b'\r' | b'\n'
    };
}

macro_rules! format_error {
    ($scanner:expr, $error:expr) => {
        return Err($scanner.error($error))
    };
}

mod error;
mod location;
mod scanner;
mod tag;

use crate::Document;
use crate::DocumentError;
use crate::NodeId;

pub use error::FormatError;
pub use location::Location;
use scanner::Scanner;
use scanner::is_blank;
use tag::TagKind;
use tag::parse_tag;

/// Default limit for the size of a single name, value, or text run.
pub const DEFAULT_MAX_TOKEN_SIZE: usize = 64 * 1024;

const LOG_TARGET: &str = "littlexml::parser";

/// Parser building a [Document] tree from XML bytes.
///
/// The whole document is parsed in one pass. The parser keeps a cursor
/// on the currently open element: start tags add a child under it and
/// make the child current, end tags must match its name and move the
/// cursor back to the parent. Parsing stops at the first error and the
/// partially built tree is dropped.
///
/// # Examples
///
/// ```
/// use littlexml::DocumentParser;
/// use littlexml::DocumentError;
///
/// let mut parser = DocumentParser::with_max_token_size(1024);
/// match parser.parse_bytes(b"<a><b></a>") {
///     Ok(_) => unreachable!(),
///     Err(DocumentError::BadXml { error, location }) => {
///         println!("syntax error at {}: {}", location, error);
///     }
///     Err(err) => println!("{}", err),
/// }
/// ```
pub struct DocumentParser {
    max_token_size: usize,
    location: Location,
}

impl DocumentParser {
    pub fn new() -> DocumentParser {
        Self::with_max_token_size(DEFAULT_MAX_TOKEN_SIZE)
    }

    /// Creates a parser which refuses names, values, and text runs
    /// longer than `max_token_size` bytes.
    pub fn with_max_token_size(max_token_size: usize) -> DocumentParser {
        DocumentParser {
            max_token_size,
            location: Location::new(),
        }
    }

    pub fn max_token_size(&self) -> usize {
        self.max_token_size
    }

    /// Parses a complete document.
    pub fn parse_bytes(&mut self, bytes: &[u8]) -> Result<Document, DocumentError> {
        let mut builder = TreeBuilder::new(bytes, self.max_token_size);
        let result = builder.parse();
        self.location = builder.scanner.location();
        match result {
            Ok(()) => {
                log::trace!(
                    target: LOG_TARGET,
                    "parsed {} elements from {} bytes",
                    builder.doc.nr_elements(),
                    bytes.len()
                );
                Ok(builder.doc)
            }
            Err(err) => {
                log::debug!(target: LOG_TARGET, "parse failed: {}", err);
                Err(err)
            }
        }
    }

    /// Location where the last parse stopped.
    pub fn location(&self) -> Location {
        self.location
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

struct TreeBuilder<'a> {
    scanner: Scanner<'a>,
    doc: Document,
    current: NodeId,
    seen_element: bool,
    seen_declaration: bool,
}

impl<'a> TreeBuilder<'a> {
    fn new(bytes: &'a [u8], max_token_size: usize) -> TreeBuilder<'a> {
        let doc = Document::new();
        let current = doc.root_id();
        TreeBuilder {
            scanner: Scanner::new(bytes, max_token_size),
            doc,
            current,
            seen_element: false,
            seen_declaration: false,
        }
    }

    fn is_at_root(&self) -> bool {
        self.current == self.doc.root_id()
    }

    fn parse(&mut self) -> Result<(), DocumentError> {
        while let Some(c) = self.scanner.peek() {
            if c == b'<' {
                self.markup()?;
            } else {
                self.scanner.bump();
                self.scanner.push(c)?;
            }
        }
        self.finish()
    }

    fn markup(&mut self) -> Result<(), DocumentError> {
        let text = self.scanner.take_bytes();
        match self.scanner.peek_at(1) {
            Some(b'/') => self.end_tag(text),
            Some(b'!') => {
                self.flush_text(text)?;
                self.comment()
            }
            Some(b'?') => {
                self.flush_text(text)?;
                self.processing_instruction()
            }
            Some(_) => {
                self.flush_text(text)?;
                self.start_tag()
            }
            None => {
                self.scanner.bump();
                format_error!(self.scanner, FormatError::UnexpectedEnd);
            }
        }
    }

    /// Stores the text collected before a tag in the open element.
    ///
    /// Whitespace runs are layout and are dropped here, end tags of leaf
    /// elements keep them as content instead.
    fn flush_text(&mut self, text: Vec<u8>) -> Result<(), DocumentError> {
        if is_blank(&text) {
            return Ok(());
        }
        if self.is_at_root() {
            format_error!(self.scanner, FormatError::TextOutsideDocument);
        }
        let text = self.scanner.decode(text)?;
        self.doc.node_mut(self.current).set_text(Some(text));
        Ok(())
    }

    fn start_tag(&mut self) -> Result<(), DocumentError> {
        self.scanner.bump(); // '<'
        let tag = parse_tag(&mut self.scanner, false)?;
        log::trace!(target: LOG_TARGET, "start tag <{}> {:?}", tag.name, tag.kind);
        let node = self.doc.append_child(self.current, tag.name, tag.attributes)?;
        self.seen_element = true;
        if tag.kind == TagKind::Open {
            self.current = node;
        }
        Ok(())
    }

    fn end_tag(&mut self, text: Vec<u8>) -> Result<(), DocumentError> {
        self.scanner.skip(2); // "</"
        loop {
            match self.scanner.expect_byte()? {
                b'>' => break,
                c => self.scanner.push(c)?,
            }
        }
        let name = self.scanner.take_string()?;
        let name = name.trim_ascii();
        log::trace!(target: LOG_TARGET, "end tag </{}>", name);

        let node = self.doc.node(self.current);
        let parent = match node.parent() {
            Some(parent) => parent,
            None => format_error!(
                self.scanner,
                FormatError::CloseWithoutOpen(name.to_string())
            ),
        };
        let open = node.tag().unwrap_or("");
        if open != name {
            format_error!(
                self.scanner,
                FormatError::TagMismatch {
                    open: open.to_string(),
                    close: name.to_string(),
                }
            );
        }

        if node.children().is_empty() {
            // Leaf content is kept even if blank or empty
            if node.text().is_none() || !is_blank(&text) {
                let text = self.scanner.decode(text)?;
                self.doc.node_mut(self.current).set_text(Some(text));
            }
        } else {
            self.flush_text(text)?;
        }

        self.current = parent;
        Ok(())
    }

    fn comment(&mut self) -> Result<(), DocumentError> {
        if !self.scanner.starts_with(b"<!--") {
            format_error!(self.scanner, FormatError::UnsupportedMarkup);
        }
        self.scanner.skip(4);
        if !self.scanner.skip_past(b"-->") {
            format_error!(self.scanner, FormatError::UnexpectedEnd);
        }
        Ok(())
    }

    fn processing_instruction(&mut self) -> Result<(), DocumentError> {
        let is_declaration = self.scanner.starts_with(b"<?xml")
            && matches!(self.scanner.peek_at(5), Some(b' ' | b'\t' | b'\r' | b'\n' | b'?'));
        if !is_declaration {
            self.scanner.skip(2);
            if !self.scanner.skip_past(b"?>") {
                format_error!(self.scanner, FormatError::UnexpectedEnd);
            }
            return Ok(());
        }

        if self.seen_element || self.seen_declaration {
            format_error!(self.scanner, FormatError::MisplacedDeclaration);
        }
        self.scanner.skip(2); // "<?"
        let tag = parse_tag(&mut self.scanner, true)?;
        let version = tag.attribute("version").map(str::to_string);
        let encoding = tag.attribute("encoding").map(str::to_string);
        log::trace!(
            target: LOG_TARGET,
            "declaration version={:?} encoding={:?}",
            version,
            encoding
        );
        self.doc.set_declaration(version, encoding);
        self.seen_declaration = true;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), DocumentError> {
        if !self.is_at_root() {
            let name = self.doc.node(self.current).tag().unwrap_or("").to_string();
            format_error!(self.scanner, FormatError::UnclosedTag(name));
        }
        let text = self.scanner.take_bytes();
        self.flush_text(text)
    }
}
