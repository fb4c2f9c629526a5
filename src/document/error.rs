/*
** This file is a part of Littlexml (XML subset parser and writer)
** Copyright (C) 2026 Gurer Ozen
**
** Littlexml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::error::Error;
use std::fmt::Display;

use crate::FormatError;
use crate::Location;
use crate::NoMemory;

/// Error type of the document operations.
///
/// Every error is fatal for the call which returned it. A failed load
/// never hands out a partial document.
#[derive(Debug)]
pub enum DocumentError {
    /// Input file could not be read or the output file could not be written.
    Io(std::io::Error),

    /// Storage for the tree or the parser buffers could not be grown.
    NoMemory,

    /// The input is not in the supported XML subset.
    ///
    /// The location points at the byte where the parser stopped.
    BadXml {
        error: FormatError,
        location: Location,
    },

    /// A tree edit would produce a document which cannot be written
    /// and parsed back.
    BadInput(&'static str),
}

impl DocumentError {
    /// Returns the syntax error if this is a [BadXml](DocumentError::BadXml).
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            DocumentError::BadXml { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::Io(err) => write!(f, "i/o error: {}", err),
            DocumentError::NoMemory => write!(f, "not enough memory"),
            DocumentError::BadXml { error, location } => {
                write!(f, "invalid XML syntax at {}: {}", location, error)
            }
            DocumentError::BadInput(msg) => write!(f, "invalid document edit: {}", msg),
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DocumentError::Io(err) => Some(err),
            DocumentError::BadXml { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DocumentError {
    fn from(err: std::io::Error) -> Self {
        DocumentError::Io(err)
    }
}

impl From<NoMemory> for DocumentError {
    fn from(_: NoMemory) -> Self {
        DocumentError::NoMemory
    }
}

pub(super) mod description {
    pub(in super::super) const EMPTY_TAG_NAME: &str = "tag name cannot be empty";
    pub(in super::super) const BAD_TAG_NAME: &str =
        "tag name cannot have whitespace or any of '<', '>', '/', '=', '\"', '?', '!'";
    pub(in super::super) const EMPTY_ATTRIBUTE_KEY: &str = "attribute key cannot be empty";
    pub(in super::super) const BAD_ATTRIBUTE_KEY: &str =
        "attribute key cannot have whitespace or any of '<', '>', '/', '=', '\"', '?', '!'";
    pub(in super::super) const BAD_VALUE: &str = "values cannot have the '\"' character";
    pub(in super::super) const BAD_TEXT: &str = "text cannot have the '<' character";
    pub(in super::super) const ROOT_TEXT: &str = "document root cannot have text";
}
