/*
** This file is a part of Littlexml (XML subset parser and writer)
** Copyright (C) 2026 Gurer Ozen
**
** Littlexml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

//! Parser and writer for a small subset of XML.
//!
//! Documents are nested elements with double quoted attributes,
//! optional inline text, self-closing tags, comments, and an optional
//! leading `<?xml ...?>` declaration. There is no entity decoding,
//! CDATA, namespace or DTD support.
//!
//! ```
//! use littlexml::Document;
//!
//! let mut doc = Document::new();
//! let server = doc.insert_tag(doc.root_id(), "server")?;
//! doc.insert_attribute(server, "port", "8080")?;
//! let name = doc.insert_tag(server, "name")?;
//! doc.set_text(name, Some("demo"))?;
//!
//! let xml = doc.to_string_indented(2);
//! assert_eq!(
//!     xml,
//!     "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n\
//!      <server port=\"8080\">\n  <name>demo</name>\n</server>\n"
//! );
//! let doc2 = Document::parse_bytes(xml.as_bytes())?;
//! assert_eq!(doc2.root().child(0).find_tag("name").and_then(|c| c.text()), Some("demo"));
//! # Ok::<(), littlexml::DocumentError>(())
//! ```

mod document;
mod list;
mod parser;
mod writer;

pub use list::GrowList;
pub use list::NoMemory;

pub use parser::DEFAULT_MAX_TOKEN_SIZE;
pub use parser::DocumentParser;
pub use parser::FormatError;
pub use parser::Location;

pub use document::Attribute;
pub use document::Attributes;
pub use document::Children;
pub use document::Cursor;
pub use document::Document;
pub use document::DocumentError;
pub use document::Node;
pub use document::NodeId;

pub use writer::DEFAULT_INDENT;
