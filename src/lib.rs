// Copyright 2026 The tagsoup Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A permissive HTML parser.
//!
//! `tagsoup` implements the WHATWG HTML parsing algorithm: a state-machine
//! tokenizer over a random-access character reader, and a tree builder that
//! drives the insertion-mode machine (adoption agency, foster parenting,
//! active formatting elements and all) to turn arbitrary markup into a
//! reference-counted document tree. Parsing never fails; malformed input is
//! recovered the way the HTML standard mandates, with parse errors
//! optionally collected on the side.

pub use tendril::StrTendril;

mod util;

pub mod driver;
pub mod entities;
pub mod interface;
pub mod reader;
pub mod serialize;
pub mod tokenizer;
pub mod tree_builder;

pub mod dom;

pub use crate::driver::{parse_document, parse_document_with_errors, parse_fragment, Dom};
pub use crate::dom::{Handle, Node, NodeData};
pub use crate::interface::{Attribute, LocalName, ParseError, ParseErrorList, QuirksMode};
pub use crate::serialize::{serialize, serialize_children};
