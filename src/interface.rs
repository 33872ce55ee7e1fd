// Copyright 2026 The tagsoup Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Types shared between the tokenizer, the tree builder and the DOM.

use std::borrow::Cow;
use std::fmt;

use tendril::StrTendril;

/// An interned HTML tag or attribute name, lowercase ASCII.
pub type LocalName = string_cache::DefaultAtom;

/// A tag attribute.
///
/// The name is case-folded to lowercase when the tag is finalized; within a
/// tag, the first occurrence of a name wins and later duplicates are dropped
/// with a parse error.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Attribute {
    pub name: LocalName,
    pub value: StrTendril,
}

/// A document's quirks mode, as determined by the doctype.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Debug)]
pub enum QuirksMode {
    Quirks,
    LimitedQuirks,
    NoQuirks,
}

/// A recoverable parse error: where it happened and what went wrong.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ParseError {
    /// Offset into the preprocessed input, in characters.
    pub pos: usize,
    pub msg: Cow<'static, str>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.msg, self.pos)
    }
}

/// A bounded collection of parse errors.
///
/// With a capacity of zero nothing is recorded at all; otherwise at most
/// `max` errors are retained and the rest are silently dropped. Callers are
/// expected to check `can_add_error()` before formatting a message.
#[derive(Clone, Debug, Default)]
pub struct ParseErrorList {
    errors: Vec<ParseError>,
    max: usize,
}

impl ParseErrorList {
    /// A sink that records nothing.
    pub fn no_tracking() -> ParseErrorList {
        ParseErrorList {
            errors: Vec::new(),
            max: 0,
        }
    }

    /// A sink that retains at most `max` errors.
    pub fn tracking(max: usize) -> ParseErrorList {
        ParseErrorList {
            errors: Vec::with_capacity(max.min(16)),
            max,
        }
    }

    pub fn can_add_error(&self) -> bool {
        self.errors.len() < self.max
    }

    pub fn is_tracking(&self) -> bool {
        self.max > 0
    }

    pub fn add(&mut self, pos: usize, msg: Cow<'static, str>) {
        if self.can_add_error() {
            self.errors.push(ParseError { pos, msg });
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.errors.iter()
    }

    pub fn into_vec(self) -> Vec<ParseError> {
        self.errors
    }
}
