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

/// Syntax problems found by the [DocumentParser](super::DocumentParser).
///
/// Parsing stops at the first problem, these are reported inside
/// [DocumentError::BadXml](crate::DocumentError::BadXml) together with
/// the location.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FormatError {
    /// End tag name differs from the open element's name.
    TagMismatch { open: String, close: String },

    /// End tag appeared while no element was open.
    CloseWithoutOpen(String),

    /// Non-whitespace text appeared before or after the elements.
    TextOutsideDocument,

    /// A quoted value appeared without an attribute key before it.
    ValueWithoutKey,

    /// An attribute key is not followed by `=` and a value.
    AttributeWithoutValue,

    /// Attribute values must start with a double quote.
    MissingQuote,

    /// Tag has an empty name or a name with reserved characters.
    BadTagName,

    /// A character which cannot appear at that point of a tag.
    UnexpectedCharacter(char),

    /// Input ended inside a tag or a comment.
    UnexpectedEnd,

    /// Input ended while this element was still open.
    UnclosedTag(String),

    /// A tag name, attribute, or text run is longer than the parser limit.
    TokenTooLong,

    /// The XML declaration appeared after an element or twice.
    MisplacedDeclaration,

    /// `<!` markup other than a comment.
    UnsupportedMarkup,

    /// Names, values, and text must be valid UTF-8.
    InvalidUtf8,
}

impl Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::TagMismatch { open, close } => {
                write!(f, "mismatched tags ({} != {})", open, close)
            }
            FormatError::CloseWithoutOpen(name) => {
                write!(f, "close tag '{}' without an open element", name)
            }
            FormatError::TextOutsideDocument => write!(f, "text outside of document"),
            FormatError::ValueWithoutKey => write!(f, "value has no key"),
            FormatError::AttributeWithoutValue => write!(f, "attribute has no value"),
            FormatError::MissingQuote => write!(f, "attribute value must be in double quotes"),
            FormatError::BadTagName => write!(f, "tag has no valid name"),
            FormatError::UnexpectedCharacter(c) => write!(f, "unexpected character '{}'", c),
            FormatError::UnexpectedEnd => write!(f, "unexpected end of document"),
            FormatError::UnclosedTag(name) => {
                write!(f, "document ends before tag '{}' is closed", name)
            }
            FormatError::TokenTooLong => write!(f, "token is longer than the parser limit"),
            FormatError::MisplacedDeclaration => {
                write!(f, "XML declaration must come once before any element")
            }
            FormatError::UnsupportedMarkup => write!(f, "markup is not a comment"),
            FormatError::InvalidUtf8 => write!(f, "invalid UTF-8 sequence"),
        }
    }
}

impl Error for FormatError {}
