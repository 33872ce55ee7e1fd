// Copyright 2026 The tagsoup Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The token types emitted by the tokenizer.

use tendril::StrTendril;

use crate::interface::{Attribute, LocalName};

pub use self::TagKind::{EndTag, StartTag};
pub use self::Token::{CharacterTokens, CommentToken, DoctypeToken, EOFToken, TagToken};

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum TagKind {
    StartTag,
    EndTag,
}

/// A tag token. The name is lowercase ASCII and attribute names are unique
/// within `attrs`, both guaranteed at finalization.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Tag {
    pub kind: TagKind,
    pub name: LocalName,
    pub self_closing: bool,
    pub attrs: Vec<Attribute>,
}

impl Tag {
    pub fn start(name: &str) -> Tag {
        Tag {
            kind: StartTag,
            name: LocalName::from(name),
            self_closing: false,
            attrs: vec![],
        }
    }

    pub fn end(name: &str) -> Tag {
        Tag {
            kind: EndTag,
            name: LocalName::from(name),
            self_closing: false,
            attrs: vec![],
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_str_ignore_ascii_case(name))
            .map(|a| &*a.value)
    }
}

/// A doctype token, with text accumulators for the name and identifiers.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Doctype {
    pub name: Option<StrTendril>,
    pub public_id: Option<StrTendril>,
    pub system_id: Option<StrTendril>,
    pub force_quirks: bool,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Token {
    DoctypeToken(Doctype),
    TagToken(Tag),
    CommentToken(StrTendril),
    CharacterTokens(StrTendril),
    EOFToken,
}
