// Copyright 2026 The tagsoup Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! High-level interface to the parser.

use crate::dom::Handle;
use crate::interface::{ParseError, ParseErrorList, QuirksMode};
use crate::tree_builder::TreeBuilder;

/// The result of parsing a document.
pub struct Dom {
    /// The document node. Owns the whole tree.
    pub document: Handle,

    /// Quirks mode the doctype selected.
    pub quirks_mode: QuirksMode,

    /// Parse errors, if error tracking was enabled.
    pub errors: Vec<ParseError>,
}

impl Dom {
    /// The `<body>` (or `<frameset>`) element, if the parse produced one.
    pub fn body(&self) -> Option<Handle> {
        let html = self
            .document
            .children
            .borrow()
            .iter()
            .find(|n| n.is_element_named("html"))
            .cloned()?;
        let found = html
            .children
            .borrow()
            .iter()
            .find(|n| n.is_element_named("body") || n.is_element_named("frameset"))
            .cloned();
        found
    }
}

/// Parse a full document. Errors are not collected.
pub fn parse_document(input: &str, base_uri: &str) -> Dom {
    parse_document_with_errors(input, base_uri, 0)
}

/// Parse a full document, retaining at most `max_errors` parse errors
/// (zero disables tracking).
pub fn parse_document_with_errors(input: &str, base_uri: &str, max_errors: usize) -> Dom {
    let errors = if max_errors > 0 {
        ParseErrorList::tracking(max_errors)
    } else {
        ParseErrorList::no_tracking()
    };
    let mut tb = TreeBuilder::new(input, base_uri, errors);
    tb.run();
    Dom {
        document: tb.document(),
        quirks_mode: tb.quirks_mode(),
        errors: tb.take_errors().into_vec(),
    }
}

/// Parse a fragment of HTML as it would appear inside `context` (an
/// element name such as `td` or `title`), returning the parsed sibling
/// nodes.
pub fn parse_fragment(input: &str, context: &str, base_uri: &str) -> Vec<Handle> {
    let mut tb = TreeBuilder::new_for_fragment(input, context, base_uri, ParseErrorList::no_tracking());
    tb.run();
    tb.take_fragment_nodes()
}
