// Copyright 2026 The tagsoup Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The HTML tokenizer.
//!
//! A pull tokenizer: the tree builder calls [`Tokenizer::read`] to obtain
//! the next token, and steers the machine into the raw-text states through
//! [`Tokenizer::transition`] when an element like `<script>` or `<title>`
//! changes how the following input must be lexed.

pub use self::interface::{CharacterTokens, CommentToken, DoctypeToken, EOFToken, TagToken};
pub use self::interface::{Doctype, EndTag, StartTag, Tag, TagKind, Token};

use self::char_ref::consume_character_reference;
use self::states::{DoctypeIdKind, Public, System};
use self::states::{DoubleEscaped, Escaped};
use self::states::{DoubleQuoted, SingleQuoted, Unquoted};
use self::states::{Rawtext, Rcdata, ScriptData, ScriptDataEscaped};

use std::borrow::Cow::{self, Borrowed};
use std::mem;

use log::trace;
use tendril::StrTendril;

use crate::interface::{Attribute, LocalName, ParseErrorList};
use crate::reader::{CharacterReader, EOF};
use crate::util::str::lower_ascii_letter;

mod char_ref;
mod interface;
pub mod states;

/// Tokenizer options, with an impl for `Default`.
#[derive(Clone, Default)]
pub struct TokenizerOpts {
    /// Initial state override, used by fragment parsing and tests.
    pub initial_state: Option<states::State>,

    /// Last start tag seen, used by fragment parsing to make end tags in
    /// the raw-text states "appropriate".
    pub last_start_tag_name: Option<String>,
}

/// The HTML tokenizer.
pub struct Tokenizer {
    /// The input cursor.
    reader: CharacterReader,

    /// Recoverable errors seen so far, bounded.
    errors: ParseErrorList,

    /// The abstract machine state.
    state: states::State,

    /// The token waiting to be returned from `read()`. At most one.
    pending: Option<Token>,

    /// Coalesced run of character data awaiting emission.
    chars: StrTendril,

    /// Current tag kind.
    tag_kind: TagKind,

    /// Current tag name, raw; case-folded at finalization.
    tag_name: StrTendril,

    /// Current tag is self-closing?
    tag_self_closing: bool,

    /// Finished attributes of the current tag.
    tag_attrs: Vec<Attribute>,

    /// Current attribute name, raw.
    attr_name: StrTendril,

    /// Current attribute value.
    attr_value: StrTendril,

    /// Current comment data.
    comment: StrTendril,

    /// Current doctype token.
    doctype: Doctype,

    /// The "temporary buffer": raw-text end-tag speculation and script
    /// double-escape detection.
    temp_buf: StrTendril,

    /// Last start tag name, for the appropriate-end-tag check.
    last_start_tag: Option<LocalName>,

    /// False while an emitted self-closing start tag awaits
    /// acknowledgement from the tree builder.
    self_closing_acknowledged: bool,
}

impl Tokenizer {
    pub fn new(input: &str, errors: ParseErrorList, opts: TokenizerOpts) -> Tokenizer {
        Tokenizer {
            reader: CharacterReader::new(input),
            errors,
            state: opts.initial_state.unwrap_or(states::Data),
            pending: None,
            chars: StrTendril::new(),
            tag_kind: StartTag,
            tag_name: StrTendril::new(),
            tag_self_closing: false,
            tag_attrs: vec![],
            attr_name: StrTendril::new(),
            attr_value: StrTendril::new(),
            comment: StrTendril::new(),
            doctype: Doctype::default(),
            temp_buf: StrTendril::new(),
            last_start_tag: opts.last_start_tag_name.map(|s| LocalName::from(&*s)),
            self_closing_acknowledged: true,
        }
    }

    /// Read the next token, running the state machine as far as needed.
    ///
    /// If character data and another token are both ready, the character
    /// run is returned first and the other token stays queued for the next
    /// call.
    pub fn read(&mut self) -> Token {
        if !self.self_closing_acknowledged {
            self.parse_error(Borrowed("Self-closing flag not acknowledged"));
            self.self_closing_acknowledged = true;
        }

        while self.pending.is_none() {
            self.step();
        }

        if !self.chars.is_empty() {
            return CharacterTokens(mem::take(&mut self.chars));
        }
        self.pending.take().expect("no pending token")
    }

    /// The tree builder calls this after handling a self-closing start tag.
    pub fn acknowledge_self_closing_flag(&mut self) {
        self.self_closing_acknowledged = true;
    }

    pub fn transition(&mut self, state: states::State) {
        self.state = state;
    }

    pub fn advance_transition(&mut self, state: states::State) {
        self.reader.advance();
        self.state = state;
    }

    /// Offset of the cursor, for error positions.
    pub fn pos(&self) -> usize {
        self.reader.pos()
    }

    /// Record a recoverable error at the current position.
    pub fn parse_error(&mut self, msg: Cow<'static, str>) {
        let pos = self.reader.pos();
        self.errors.add(pos, msg);
    }

    pub fn errors(&self) -> &ParseErrorList {
        &self.errors
    }

    pub fn take_errors(&mut self) -> ParseErrorList {
        mem::take(&mut self.errors)
    }

    fn bad_char_error(&mut self) {
        if self.errors.can_add_error() {
            let msg = format!(
                "Saw {:?} in state {:?}",
                self.reader.current(),
                self.state
            );
            let pos = self.reader.pos();
            self.errors.add(pos, Cow::from(msg));
        }
    }

    fn bad_eof_error(&mut self) {
        if self.errors.can_add_error() {
            let msg = format!("Saw EOF in state {:?}", self.state);
            let pos = self.reader.pos();
            self.errors.add(pos, Cow::from(msg));
        }
    }

    //§ emission

    fn emit_char(&mut self, c: char) {
        self.chars.push_char(c);
    }

    fn emit_str(&mut self, s: &str) {
        self.chars.push_slice(s);
    }

    fn emit_eof(&mut self) {
        self.pending = Some(EOFToken);
    }

    fn emit_tag(&mut self) {
        self.finish_attribute();

        let lower = self.tag_name.to_ascii_lowercase();
        let name = LocalName::from(&*lower);
        self.tag_name.clear();

        match self.tag_kind {
            StartTag => {
                self.last_start_tag = Some(name.clone());
                if self.tag_self_closing {
                    self.self_closing_acknowledged = false;
                }
            },
            EndTag => {
                if !self.tag_attrs.is_empty() {
                    self.parse_error(Borrowed("Attributes incorrectly present on end tag"));
                    self.tag_attrs.clear();
                }
                if self.tag_self_closing {
                    self.parse_error(Borrowed("Self-closing flag on end tag"));
                }
            },
        }

        let tag = Tag {
            kind: self.tag_kind,
            name,
            self_closing: self.tag_self_closing,
            attrs: mem::take(&mut self.tag_attrs),
        };
        self.pending = Some(TagToken(tag));
    }

    fn emit_comment(&mut self) {
        let comment = mem::take(&mut self.comment);
        self.pending = Some(CommentToken(comment));
    }

    fn emit_doctype(&mut self) {
        let doctype = mem::take(&mut self.doctype);
        self.pending = Some(DoctypeToken(doctype));
    }

    //§ token construction

    fn create_tag(&mut self, kind: TagKind) {
        self.tag_kind = kind;
        self.tag_name.clear();
        self.tag_self_closing = false;
        self.tag_attrs.clear();
        self.attr_name.clear();
        self.attr_value.clear();
    }

    fn create_attribute(&mut self) {
        self.finish_attribute();
    }

    fn finish_attribute(&mut self) {
        if self.attr_name.is_empty() {
            self.attr_value.clear();
            return;
        }

        let lower = self.attr_name.to_ascii_lowercase();
        self.attr_name.clear();
        let dup = self
            .tag_attrs
            .iter()
            .any(|a| *a.name == *lower);
        if dup {
            self.parse_error(Borrowed("Duplicate attribute"));
            self.attr_value.clear();
        } else {
            self.tag_attrs.push(Attribute {
                name: LocalName::from(&*lower),
                value: mem::take(&mut self.attr_value),
            });
        }
    }

    fn create_comment(&mut self) {
        self.comment.clear();
    }

    fn create_doctype(&mut self) {
        self.doctype = Doctype::default();
    }

    fn doctype_id(&mut self, kind: DoctypeIdKind) -> &mut StrTendril {
        let id = match kind {
            Public => &mut self.doctype.public_id,
            System => &mut self.doctype.system_id,
        };
        id.get_or_insert_with(StrTendril::new)
    }

    fn clear_temp_buf(&mut self) {
        self.temp_buf.clear();
    }

    fn have_appropriate_end_tag(&self) -> bool {
        match self.last_start_tag {
            Some(ref last) => {
                self.tag_kind == EndTag && self.tag_name.eq_ignore_ascii_case(last)
            },
            None => false,
        }
    }

    fn consume_char_ref_to_chars(&mut self, additional_allowed: Option<char>) {
        match consume_character_reference(
            &mut self.reader,
            additional_allowed,
            false,
            &mut self.errors,
        ) {
            Some(char_ref) => {
                for &c in char_ref.chars() {
                    self.chars.push_char(c);
                }
            },
            None => self.chars.push_char('&'),
        }
    }

    fn consume_char_ref_to_attr(&mut self, additional_allowed: Option<char>) {
        match consume_character_reference(
            &mut self.reader,
            additional_allowed,
            true,
            &mut self.errors,
        ) {
            Some(char_ref) => {
                for &c in char_ref.chars() {
                    self.attr_value.push_char(c);
                }
            },
            None => self.attr_value.push_char('&'),
        }
    }

    //§ the state machine

    /// Run one step. Every step either consumes input or leaves a token
    /// pending, so the `read()` loop always terminates.
    fn step(&mut self) {
        trace!("processing in state {:?}", self.state);
        match self.state {
            //§ data-state
            states::Data => match self.reader.current() {
                '&' => self.advance_transition(states::CharacterReferenceInData),
                '<' => self.advance_transition(states::TagOpen),
                '\0' => {
                    self.bad_char_error();
                    let c = self.reader.consume();
                    self.emit_char(c);
                },
                EOF if self.reader.is_empty() => self.emit_eof(),
                _ => {
                    let data = self.reader.consume_to_any(&['&', '<', '\0']);
                    self.emit_str(&data);
                },
            },

            //§ character-reference-in-data-state
            states::CharacterReferenceInData => {
                self.consume_char_ref_to_chars(None);
                self.transition(states::Data);
            },

            //§ rcdata-state
            states::RawData(Rcdata) => match self.reader.current() {
                '&' => self.advance_transition(states::CharacterReferenceInRcdata),
                '<' => self.advance_transition(states::RawLessThanSign(Rcdata)),
                '\0' => {
                    self.bad_char_error();
                    self.reader.advance();
                    self.emit_char('\u{fffd}');
                },
                EOF if self.reader.is_empty() => self.emit_eof(),
                _ => {
                    let data = self.reader.consume_to_any(&['&', '<', '\0']);
                    self.emit_str(&data);
                },
            },

            //§ character-reference-in-rcdata-state
            states::CharacterReferenceInRcdata => {
                self.consume_char_ref_to_chars(None);
                self.transition(states::RawData(Rcdata));
            },

            //§ rawtext-state script-data-state
            states::RawData(kind @ (Rawtext | ScriptData)) => match self.reader.current() {
                '<' => self.advance_transition(states::RawLessThanSign(kind)),
                '\0' => {
                    self.bad_char_error();
                    self.reader.advance();
                    self.emit_char('\u{fffd}');
                },
                EOF if self.reader.is_empty() => self.emit_eof(),
                _ => {
                    let data = self.reader.consume_to_any(&['<', '\0']);
                    self.emit_str(&data);
                },
            },

            //§ script-data-escaped-state script-data-double-escaped-state
            states::RawData(ScriptDataEscaped(esc)) => match self.reader.current() {
                '-' => {
                    self.emit_char('-');
                    self.advance_transition(states::ScriptDataEscapedDash(esc));
                },
                '<' => {
                    if esc == DoubleEscaped {
                        self.emit_char('<');
                    }
                    self.advance_transition(states::RawLessThanSign(ScriptDataEscaped(esc)));
                },
                '\0' => {
                    self.bad_char_error();
                    self.reader.advance();
                    self.emit_char('\u{fffd}');
                },
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.transition(states::Data);
                },
                _ => {
                    let data = self.reader.consume_to_any(&['-', '<', '\0']);
                    self.emit_str(&data);
                },
            },

            //§ plaintext-state
            states::Plaintext => match self.reader.current() {
                '\0' => {
                    self.bad_char_error();
                    self.reader.advance();
                    self.emit_char('\u{fffd}');
                },
                EOF if self.reader.is_empty() => self.emit_eof(),
                _ => {
                    let data = self.reader.consume_to_any(&['\0']);
                    self.emit_str(&data);
                },
            },

            //§ tag-open-state
            states::TagOpen => match self.reader.current() {
                '!' => self.advance_transition(states::MarkupDeclarationOpen),
                '/' => self.advance_transition(states::EndTagOpen),
                '?' => {
                    self.bad_char_error();
                    self.create_comment();
                    self.transition(states::BogusComment);
                },
                c if c.is_ascii_alphabetic() => {
                    self.create_tag(StartTag);
                    self.transition(states::TagName);
                },
                _ => {
                    self.bad_char_error();
                    self.emit_char('<');
                    self.transition(states::Data);
                },
            },

            //§ end-tag-open-state
            states::EndTagOpen => match self.reader.current() {
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.emit_str("</");
                    self.transition(states::Data);
                },
                '>' => {
                    self.bad_char_error();
                    self.advance_transition(states::Data);
                },
                c if c.is_ascii_alphabetic() => {
                    self.create_tag(EndTag);
                    self.transition(states::TagName);
                },
                _ => {
                    self.bad_char_error();
                    self.create_comment();
                    self.transition(states::BogusComment);
                },
            },

            //§ tag-name-state
            states::TagName => {
                let name = self
                    .reader
                    .consume_to_any(&['\t', '\n', '\x0C', ' ', '/', '>', '\0']);
                self.tag_name.push_slice(&name);
                match self.reader.consume() {
                    '\t' | '\n' | '\x0C' | ' ' => self.transition(states::BeforeAttributeName),
                    '/' => self.transition(states::SelfClosingStartTag),
                    '>' => {
                        self.emit_tag();
                        self.transition(states::Data);
                    },
                    '\0' => {
                        self.bad_char_error();
                        self.tag_name.push_char('\u{fffd}');
                    },
                    _ => {
                        // EOF
                        self.bad_eof_error();
                        self.transition(states::Data);
                    },
                }
            },

            //§ script-data-double-escaped-less-than-sign-state
            states::RawLessThanSign(ScriptDataEscaped(DoubleEscaped)) => {
                if self.reader.matches_char('/') {
                    self.clear_temp_buf();
                    self.emit_char('/');
                    self.advance_transition(states::ScriptDataDoubleEscapeEnd);
                } else {
                    self.transition(states::RawData(ScriptDataEscaped(DoubleEscaped)));
                }
            },

            //§ script-data-escaped-less-than-sign-state
            states::RawLessThanSign(ScriptDataEscaped(Escaped)) => {
                if self.reader.matches_char('/') {
                    self.clear_temp_buf();
                    self.advance_transition(states::RawEndTagOpen(ScriptDataEscaped(Escaped)));
                } else if self.reader.matches_letter() {
                    self.clear_temp_buf();
                    self.emit_char('<');
                    self.transition(states::ScriptDataEscapeStart(DoubleEscaped));
                } else {
                    self.emit_char('<');
                    self.transition(states::RawData(ScriptDataEscaped(Escaped)));
                }
            },

            //§ rcdata-less-than-sign-state rawtext-less-than-sign-state
            //§ script-data-less-than-sign-state
            states::RawLessThanSign(kind) => {
                if self.reader.matches_char('/') {
                    self.clear_temp_buf();
                    self.advance_transition(states::RawEndTagOpen(kind));
                } else if kind == ScriptData && self.reader.matches_char('!') {
                    self.emit_str("<!");
                    self.advance_transition(states::ScriptDataEscapeStart(Escaped));
                } else {
                    self.emit_char('<');
                    self.transition(states::RawData(kind));
                }
            },

            //§ rcdata-end-tag-open-state rawtext-end-tag-open-state
            //§ script-data-end-tag-open-state script-data-escaped-end-tag-open-state
            states::RawEndTagOpen(kind) => {
                if self.reader.matches_letter() {
                    self.create_tag(EndTag);
                    self.transition(states::RawEndTagName(kind));
                } else {
                    self.emit_str("</");
                    self.transition(states::RawData(kind));
                }
            },

            //§ rcdata-end-tag-name-state rawtext-end-tag-name-state
            //§ script-data-end-tag-name-state script-data-escaped-end-tag-name-state
            states::RawEndTagName(kind) => {
                if self.reader.matches_letter() {
                    let name = self.reader.consume_letter_sequence();
                    self.tag_name.push_slice(&name);
                    self.temp_buf.push_slice(&name);
                    return;
                }

                let appropriate = self.have_appropriate_end_tag();
                match self.reader.current() {
                    '\t' | '\n' | '\x0C' | ' ' if appropriate => {
                        self.advance_transition(states::BeforeAttributeName);
                    },
                    '/' if appropriate => {
                        self.advance_transition(states::SelfClosingStartTag);
                    },
                    '>' if appropriate => {
                        self.reader.advance();
                        self.emit_tag();
                        self.transition(states::Data);
                    },
                    _ => {
                        self.emit_str("</");
                        let temp = mem::take(&mut self.temp_buf);
                        self.emit_str(&temp);
                        self.create_tag(StartTag); // discard the speculative end tag
                        self.transition(states::RawData(kind));
                    },
                }
            },

            //§ script-data-escape-start-state
            states::ScriptDataEscapeStart(Escaped) => {
                if self.reader.matches_char('-') {
                    self.emit_char('-');
                    self.advance_transition(states::ScriptDataEscapeStartDash);
                } else {
                    self.transition(states::RawData(ScriptData));
                }
            },

            //§ script-data-double-escape-start-state
            states::ScriptDataEscapeStart(DoubleEscaped) => {
                let c = self.reader.current();
                match c {
                    '\t' | '\n' | '\x0C' | ' ' | '/' | '>' => {
                        let esc = if &*self.temp_buf == "script" {
                            DoubleEscaped
                        } else {
                            Escaped
                        };
                        self.emit_char(c);
                        self.advance_transition(states::RawData(ScriptDataEscaped(esc)));
                    },
                    _ => match lower_ascii_letter(c) {
                        Some(cl) => {
                            self.temp_buf.push_char(cl);
                            self.emit_char(c);
                            self.reader.advance();
                        },
                        None => {
                            self.transition(states::RawData(ScriptDataEscaped(Escaped)));
                        },
                    },
                }
            },

            //§ script-data-escape-start-dash-state
            states::ScriptDataEscapeStartDash => {
                if self.reader.matches_char('-') {
                    self.emit_char('-');
                    self.advance_transition(states::ScriptDataEscapedDashDash(Escaped));
                } else {
                    self.transition(states::RawData(ScriptData));
                }
            },

            //§ script-data-escaped-dash-state script-data-double-escaped-dash-state
            states::ScriptDataEscapedDash(esc) => match self.reader.current() {
                '-' => {
                    self.emit_char('-');
                    self.advance_transition(states::ScriptDataEscapedDashDash(esc));
                },
                '<' => {
                    if esc == DoubleEscaped {
                        self.emit_char('<');
                    }
                    self.advance_transition(states::RawLessThanSign(ScriptDataEscaped(esc)));
                },
                '\0' => {
                    self.bad_char_error();
                    self.reader.advance();
                    self.emit_char('\u{fffd}');
                    self.transition(states::RawData(ScriptDataEscaped(esc)));
                },
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.transition(states::Data);
                },
                c => {
                    self.emit_char(c);
                    self.advance_transition(states::RawData(ScriptDataEscaped(esc)));
                },
            },

            //§ script-data-escaped-dash-dash-state
            //§ script-data-double-escaped-dash-dash-state
            states::ScriptDataEscapedDashDash(esc) => match self.reader.current() {
                '-' => {
                    self.emit_char('-');
                    self.reader.advance();
                },
                '<' => {
                    if esc == DoubleEscaped {
                        self.emit_char('<');
                    }
                    self.advance_transition(states::RawLessThanSign(ScriptDataEscaped(esc)));
                },
                '>' => {
                    self.emit_char('>');
                    self.advance_transition(states::RawData(ScriptData));
                },
                '\0' => {
                    self.bad_char_error();
                    self.reader.advance();
                    self.emit_char('\u{fffd}');
                    self.transition(states::RawData(ScriptDataEscaped(esc)));
                },
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.transition(states::Data);
                },
                c => {
                    self.emit_char(c);
                    self.advance_transition(states::RawData(ScriptDataEscaped(esc)));
                },
            },

            //§ script-data-double-escape-end-state
            states::ScriptDataDoubleEscapeEnd => {
                let c = self.reader.current();
                match c {
                    '\t' | '\n' | '\x0C' | ' ' | '/' | '>' => {
                        let esc = if &*self.temp_buf == "script" {
                            Escaped
                        } else {
                            DoubleEscaped
                        };
                        self.emit_char(c);
                        self.advance_transition(states::RawData(ScriptDataEscaped(esc)));
                    },
                    _ => match lower_ascii_letter(c) {
                        Some(cl) => {
                            self.temp_buf.push_char(cl);
                            self.emit_char(c);
                            self.reader.advance();
                        },
                        None => {
                            self.transition(states::RawData(ScriptDataEscaped(DoubleEscaped)));
                        },
                    },
                }
            },

            //§ before-attribute-name-state
            states::BeforeAttributeName => match self.reader.consume() {
                '\t' | '\n' | '\x0C' | ' ' => (),
                '/' => self.transition(states::SelfClosingStartTag),
                '>' => {
                    self.emit_tag();
                    self.transition(states::Data);
                },
                '\0' => {
                    self.bad_char_error();
                    self.create_attribute();
                    self.attr_name.push_char('\u{fffd}');
                    self.transition(states::AttributeName);
                },
                c @ ('"' | '\'' | '<' | '=') => {
                    self.bad_char_error();
                    self.create_attribute();
                    self.attr_name.push_char(c);
                    self.transition(states::AttributeName);
                },
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.transition(states::Data);
                },
                _ => {
                    self.create_attribute();
                    self.reader.unconsume();
                    self.transition(states::AttributeName);
                },
            },

            //§ attribute-name-state
            states::AttributeName => {
                let name = self.reader.consume_to_any(&[
                    '\t', '\n', '\x0C', ' ', '/', '=', '>', '\0', '"', '\'', '<',
                ]);
                self.attr_name.push_slice(&name);
                match self.reader.consume() {
                    '\t' | '\n' | '\x0C' | ' ' => self.transition(states::AfterAttributeName),
                    '/' => self.transition(states::SelfClosingStartTag),
                    '=' => self.transition(states::BeforeAttributeValue),
                    '>' => {
                        self.emit_tag();
                        self.transition(states::Data);
                    },
                    '\0' => {
                        self.bad_char_error();
                        self.attr_name.push_char('\u{fffd}');
                    },
                    c @ ('"' | '\'' | '<') => {
                        self.bad_char_error();
                        self.attr_name.push_char(c);
                    },
                    _ => {
                        // EOF
                        self.bad_eof_error();
                        self.transition(states::Data);
                    },
                }
            },

            //§ after-attribute-name-state
            states::AfterAttributeName => match self.reader.consume() {
                '\t' | '\n' | '\x0C' | ' ' => (),
                '/' => self.transition(states::SelfClosingStartTag),
                '=' => self.transition(states::BeforeAttributeValue),
                '>' => {
                    self.emit_tag();
                    self.transition(states::Data);
                },
                '\0' => {
                    self.bad_char_error();
                    self.create_attribute();
                    self.attr_name.push_char('\u{fffd}');
                    self.transition(states::AttributeName);
                },
                c @ ('"' | '\'' | '<') => {
                    self.bad_char_error();
                    self.create_attribute();
                    self.attr_name.push_char(c);
                    self.transition(states::AttributeName);
                },
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.transition(states::Data);
                },
                _ => {
                    self.create_attribute();
                    self.reader.unconsume();
                    self.transition(states::AttributeName);
                },
            },

            //§ before-attribute-value-state
            states::BeforeAttributeValue => match self.reader.consume() {
                '\t' | '\n' | '\x0C' | ' ' => (),
                '"' => self.transition(states::AttributeValue(DoubleQuoted)),
                '\'' => self.transition(states::AttributeValue(SingleQuoted)),
                '&' => {
                    self.reader.unconsume();
                    self.transition(states::AttributeValue(Unquoted));
                },
                '\0' => {
                    self.bad_char_error();
                    self.attr_value.push_char('\u{fffd}');
                    self.transition(states::AttributeValue(Unquoted));
                },
                '>' => {
                    self.bad_char_error();
                    self.emit_tag();
                    self.transition(states::Data);
                },
                c @ ('<' | '=' | '`') => {
                    self.bad_char_error();
                    self.attr_value.push_char(c);
                    self.transition(states::AttributeValue(Unquoted));
                },
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.emit_tag();
                    self.transition(states::Data);
                },
                _ => {
                    self.reader.unconsume();
                    self.transition(states::AttributeValue(Unquoted));
                },
            },

            //§ attribute-value-(double-quoted)-state
            states::AttributeValue(DoubleQuoted) => {
                let value = self.reader.consume_to_any(&['"', '&', '\0']);
                self.attr_value.push_slice(&value);
                match self.reader.consume() {
                    '"' => self.transition(states::AfterAttributeValueQuoted),
                    '&' => self.consume_char_ref_to_attr(Some('"')),
                    '\0' => {
                        self.bad_char_error();
                        self.attr_value.push_char('\u{fffd}');
                    },
                    _ => {
                        // EOF
                        self.bad_eof_error();
                        self.transition(states::Data);
                    },
                }
            },

            //§ attribute-value-(single-quoted)-state
            states::AttributeValue(SingleQuoted) => {
                let value = self.reader.consume_to_any(&['\'', '&', '\0']);
                self.attr_value.push_slice(&value);
                match self.reader.consume() {
                    '\'' => self.transition(states::AfterAttributeValueQuoted),
                    '&' => self.consume_char_ref_to_attr(Some('\'')),
                    '\0' => {
                        self.bad_char_error();
                        self.attr_value.push_char('\u{fffd}');
                    },
                    _ => {
                        // EOF
                        self.bad_eof_error();
                        self.transition(states::Data);
                    },
                }
            },

            //§ attribute-value-(unquoted)-state
            states::AttributeValue(Unquoted) => {
                let value = self.reader.consume_to_any(&[
                    '\t', '\n', '\x0C', ' ', '&', '>', '\0', '"', '\'', '<', '=', '`',
                ]);
                self.attr_value.push_slice(&value);
                match self.reader.consume() {
                    '\t' | '\n' | '\x0C' | ' ' => self.transition(states::BeforeAttributeName),
                    '&' => self.consume_char_ref_to_attr(Some('>')),
                    '>' => {
                        self.emit_tag();
                        self.transition(states::Data);
                    },
                    '\0' => {
                        self.bad_char_error();
                        self.attr_value.push_char('\u{fffd}');
                    },
                    c @ ('"' | '\'' | '<' | '=' | '`') => {
                        self.bad_char_error();
                        self.attr_value.push_char(c);
                    },
                    _ => {
                        // EOF
                        self.bad_eof_error();
                        self.transition(states::Data);
                    },
                }
            },

            //§ after-attribute-value-(quoted)-state
            states::AfterAttributeValueQuoted => match self.reader.consume() {
                '\t' | '\n' | '\x0C' | ' ' => self.transition(states::BeforeAttributeName),
                '/' => self.transition(states::SelfClosingStartTag),
                '>' => {
                    self.emit_tag();
                    self.transition(states::Data);
                },
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.transition(states::Data);
                },
                _ => {
                    self.bad_char_error();
                    self.reader.unconsume();
                    self.transition(states::BeforeAttributeName);
                },
            },

            //§ self-closing-start-tag-state
            states::SelfClosingStartTag => match self.reader.consume() {
                '>' => {
                    self.tag_self_closing = true;
                    self.emit_tag();
                    self.transition(states::Data);
                },
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.transition(states::Data);
                },
                _ => {
                    self.bad_char_error();
                    self.reader.unconsume();
                    self.transition(states::BeforeAttributeName);
                },
            },

            //§ bogus-comment-state
            states::BogusComment => {
                let data = self.reader.consume_to('>');
                self.comment.push_slice(&data);
                self.reader.match_consume(">");
                self.emit_comment();
                self.transition(states::Data);
            },

            //§ markup-declaration-open-state
            states::MarkupDeclarationOpen => {
                if self.reader.match_consume("--") {
                    self.create_comment();
                    self.transition(states::CommentStart);
                } else if self.reader.match_consume_ignore_case("DOCTYPE") {
                    self.transition(states::Doctype);
                } else if self.reader.match_consume("[CDATA[") {
                    self.transition(states::CdataSection);
                } else {
                    self.bad_char_error();
                    self.create_comment();
                    self.transition(states::BogusComment);
                }
            },

            //§ comment-start-state
            states::CommentStart => match self.reader.consume() {
                '-' => self.transition(states::CommentStartDash),
                '\0' => {
                    self.bad_char_error();
                    self.comment.push_char('\u{fffd}');
                    self.transition(states::Comment);
                },
                '>' => {
                    self.bad_char_error();
                    self.emit_comment();
                    self.transition(states::Data);
                },
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.emit_comment();
                    self.transition(states::Data);
                },
                _ => {
                    self.reader.unconsume();
                    self.transition(states::Comment);
                },
            },

            //§ comment-start-dash-state
            states::CommentStartDash => match self.reader.consume() {
                '-' => self.transition(states::CommentEnd),
                '\0' => {
                    self.bad_char_error();
                    self.comment.push_slice("-\u{fffd}");
                    self.transition(states::Comment);
                },
                '>' => {
                    self.bad_char_error();
                    self.emit_comment();
                    self.transition(states::Data);
                },
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.emit_comment();
                    self.transition(states::Data);
                },
                _ => {
                    self.comment.push_char('-');
                    self.reader.unconsume();
                    self.transition(states::Comment);
                },
            },

            //§ comment-state
            states::Comment => match self.reader.current() {
                '-' => self.advance_transition(states::CommentEndDash),
                '\0' => {
                    self.bad_char_error();
                    self.reader.advance();
                    self.comment.push_char('\u{fffd}');
                },
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.emit_comment();
                    self.transition(states::Data);
                },
                _ => {
                    let data = self.reader.consume_to_any(&['-', '\0']);
                    self.comment.push_slice(&data);
                },
            },

            //§ comment-end-dash-state
            states::CommentEndDash => match self.reader.consume() {
                '-' => self.transition(states::CommentEnd),
                '\0' => {
                    self.bad_char_error();
                    self.comment.push_slice("-\u{fffd}");
                    self.transition(states::Comment);
                },
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.emit_comment();
                    self.transition(states::Data);
                },
                c => {
                    self.comment.push_char('-');
                    self.comment.push_char(c);
                    self.transition(states::Comment);
                },
            },

            //§ comment-end-state
            states::CommentEnd => match self.reader.consume() {
                '>' => {
                    self.emit_comment();
                    self.transition(states::Data);
                },
                '\0' => {
                    self.bad_char_error();
                    self.comment.push_slice("--\u{fffd}");
                    self.transition(states::Comment);
                },
                '!' => {
                    self.bad_char_error();
                    self.transition(states::CommentEndBang);
                },
                '-' => {
                    self.bad_char_error();
                    self.comment.push_char('-');
                },
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.emit_comment();
                    self.transition(states::Data);
                },
                c => {
                    self.bad_char_error();
                    self.comment.push_slice("--");
                    self.comment.push_char(c);
                    self.transition(states::Comment);
                },
            },

            //§ comment-end-bang-state
            states::CommentEndBang => match self.reader.consume() {
                '-' => {
                    self.comment.push_slice("--!");
                    self.transition(states::CommentEndDash);
                },
                '>' => {
                    self.emit_comment();
                    self.transition(states::Data);
                },
                '\0' => {
                    self.bad_char_error();
                    self.comment.push_slice("--!\u{fffd}");
                    self.transition(states::Comment);
                },
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.emit_comment();
                    self.transition(states::Data);
                },
                c => {
                    self.comment.push_slice("--!");
                    self.comment.push_char(c);
                    self.transition(states::Comment);
                },
            },

            //§ doctype-state
            states::Doctype => match self.reader.consume() {
                '\t' | '\n' | '\x0C' | ' ' => self.transition(states::BeforeDoctypeName),
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.create_doctype();
                    self.doctype.force_quirks = true;
                    self.emit_doctype();
                    self.transition(states::Data);
                },
                _ => {
                    self.bad_char_error();
                    self.reader.unconsume();
                    self.transition(states::BeforeDoctypeName);
                },
            },

            //§ before-doctype-name-state
            states::BeforeDoctypeName => {
                if self.reader.matches_letter() {
                    self.create_doctype();
                    self.transition(states::DoctypeName);
                    return;
                }
                match self.reader.consume() {
                    '\t' | '\n' | '\x0C' | ' ' => (),
                    '\0' => {
                        self.bad_char_error();
                        self.create_doctype();
                        self.doctype
                            .name
                            .get_or_insert_with(StrTendril::new)
                            .push_char('\u{fffd}');
                        self.transition(states::DoctypeName);
                    },
                    '>' => {
                        self.bad_char_error();
                        self.create_doctype();
                        self.doctype.force_quirks = true;
                        self.emit_doctype();
                        self.transition(states::Data);
                    },
                    EOF if self.reader.is_empty() => {
                        self.bad_eof_error();
                        self.create_doctype();
                        self.doctype.force_quirks = true;
                        self.emit_doctype();
                        self.transition(states::Data);
                    },
                    c => {
                        self.create_doctype();
                        self.doctype
                            .name
                            .get_or_insert_with(StrTendril::new)
                            .push_char(c.to_ascii_lowercase());
                        self.transition(states::DoctypeName);
                    },
                }
            },

            //§ doctype-name-state
            states::DoctypeName => {
                if self.reader.matches_letter() {
                    let name = self.reader.consume_letter_sequence();
                    self.doctype
                        .name
                        .get_or_insert_with(StrTendril::new)
                        .push_slice(&name.to_ascii_lowercase());
                    return;
                }
                match self.reader.consume() {
                    '\t' | '\n' | '\x0C' | ' ' => self.transition(states::AfterDoctypeName),
                    '>' => {
                        self.emit_doctype();
                        self.transition(states::Data);
                    },
                    '\0' => {
                        self.bad_char_error();
                        self.doctype
                            .name
                            .get_or_insert_with(StrTendril::new)
                            .push_char('\u{fffd}');
                    },
                    EOF if self.reader.is_empty() => {
                        self.bad_eof_error();
                        self.doctype.force_quirks = true;
                        self.emit_doctype();
                        self.transition(states::Data);
                    },
                    c => {
                        self.doctype
                            .name
                            .get_or_insert_with(StrTendril::new)
                            .push_char(c.to_ascii_lowercase());
                    },
                }
            },

            //§ after-doctype-name-state
            states::AfterDoctypeName => {
                if self.reader.is_empty() {
                    self.bad_eof_error();
                    self.doctype.force_quirks = true;
                    self.emit_doctype();
                    self.transition(states::Data);
                } else if self.reader.matches_any(&['\t', '\n', '\x0C', ' ']) {
                    self.reader.advance();
                } else if self.reader.matches_char('>') {
                    self.reader.advance();
                    self.emit_doctype();
                    self.transition(states::Data);
                } else if self.reader.match_consume_ignore_case("PUBLIC") {
                    self.transition(states::AfterDoctypeKeyword(Public));
                } else if self.reader.match_consume_ignore_case("SYSTEM") {
                    self.transition(states::AfterDoctypeKeyword(System));
                } else {
                    self.bad_char_error();
                    self.doctype.force_quirks = true;
                    self.advance_transition(states::BogusDoctype);
                }
            },

            //§ after-doctype-public-keyword-state after-doctype-system-keyword-state
            states::AfterDoctypeKeyword(kind) => match self.reader.consume() {
                '\t' | '\n' | '\x0C' | ' ' => {
                    self.transition(states::BeforeDoctypeIdentifier(kind))
                },
                '"' => {
                    self.bad_char_error();
                    *self.doctype_id(kind) = StrTendril::new();
                    self.transition(states::DoctypeIdentifierDoubleQuoted(kind));
                },
                '\'' => {
                    self.bad_char_error();
                    *self.doctype_id(kind) = StrTendril::new();
                    self.transition(states::DoctypeIdentifierSingleQuoted(kind));
                },
                '>' => {
                    self.bad_char_error();
                    self.doctype.force_quirks = true;
                    self.emit_doctype();
                    self.transition(states::Data);
                },
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.doctype.force_quirks = true;
                    self.emit_doctype();
                    self.transition(states::Data);
                },
                _ => {
                    self.bad_char_error();
                    self.doctype.force_quirks = true;
                    self.transition(states::BogusDoctype);
                },
            },

            //§ before-doctype-public-identifier-state
            //§ before-doctype-system-identifier-state
            states::BeforeDoctypeIdentifier(kind) => match self.reader.consume() {
                '\t' | '\n' | '\x0C' | ' ' => (),
                '"' => {
                    *self.doctype_id(kind) = StrTendril::new();
                    self.transition(states::DoctypeIdentifierDoubleQuoted(kind));
                },
                '\'' => {
                    *self.doctype_id(kind) = StrTendril::new();
                    self.transition(states::DoctypeIdentifierSingleQuoted(kind));
                },
                '>' => {
                    self.bad_char_error();
                    self.doctype.force_quirks = true;
                    self.emit_doctype();
                    self.transition(states::Data);
                },
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.doctype.force_quirks = true;
                    self.emit_doctype();
                    self.transition(states::Data);
                },
                _ => {
                    self.bad_char_error();
                    self.doctype.force_quirks = true;
                    self.transition(states::BogusDoctype);
                },
            },

            //§ doctype-public-identifier-(double-quoted)-state
            //§ doctype-system-identifier-(double-quoted)-state
            states::DoctypeIdentifierDoubleQuoted(kind) => {
                let id = self.reader.consume_to_any(&['"', '\0', '>']);
                self.doctype_id(kind).push_slice(&id);
                match self.reader.consume() {
                    '"' => self.transition(states::AfterDoctypeIdentifier(kind)),
                    '\0' => {
                        self.bad_char_error();
                        self.doctype_id(kind).push_char('\u{fffd}');
                    },
                    '>' => {
                        self.bad_char_error();
                        self.doctype.force_quirks = true;
                        self.emit_doctype();
                        self.transition(states::Data);
                    },
                    _ => {
                        // EOF
                        self.bad_eof_error();
                        self.doctype.force_quirks = true;
                        self.emit_doctype();
                        self.transition(states::Data);
                    },
                }
            },

            //§ doctype-public-identifier-(single-quoted)-state
            //§ doctype-system-identifier-(single-quoted)-state
            states::DoctypeIdentifierSingleQuoted(kind) => {
                let id = self.reader.consume_to_any(&['\'', '\0', '>']);
                self.doctype_id(kind).push_slice(&id);
                match self.reader.consume() {
                    '\'' => self.transition(states::AfterDoctypeIdentifier(kind)),
                    '\0' => {
                        self.bad_char_error();
                        self.doctype_id(kind).push_char('\u{fffd}');
                    },
                    '>' => {
                        self.bad_char_error();
                        self.doctype.force_quirks = true;
                        self.emit_doctype();
                        self.transition(states::Data);
                    },
                    _ => {
                        // EOF
                        self.bad_eof_error();
                        self.doctype.force_quirks = true;
                        self.emit_doctype();
                        self.transition(states::Data);
                    },
                }
            },

            //§ after-doctype-public-identifier-state
            states::AfterDoctypeIdentifier(Public) => match self.reader.consume() {
                '\t' | '\n' | '\x0C' | ' ' => {
                    self.transition(states::BetweenDoctypePublicAndSystemIdentifiers)
                },
                '>' => {
                    self.emit_doctype();
                    self.transition(states::Data);
                },
                '"' => {
                    self.bad_char_error();
                    *self.doctype_id(System) = StrTendril::new();
                    self.transition(states::DoctypeIdentifierDoubleQuoted(System));
                },
                '\'' => {
                    self.bad_char_error();
                    *self.doctype_id(System) = StrTendril::new();
                    self.transition(states::DoctypeIdentifierSingleQuoted(System));
                },
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.doctype.force_quirks = true;
                    self.emit_doctype();
                    self.transition(states::Data);
                },
                _ => {
                    self.bad_char_error();
                    self.doctype.force_quirks = true;
                    self.transition(states::BogusDoctype);
                },
            },

            //§ after-doctype-system-identifier-state
            states::AfterDoctypeIdentifier(System) => match self.reader.consume() {
                '\t' | '\n' | '\x0C' | ' ' => (),
                '>' => {
                    self.emit_doctype();
                    self.transition(states::Data);
                },
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.doctype.force_quirks = true;
                    self.emit_doctype();
                    self.transition(states::Data);
                },
                _ => {
                    self.bad_char_error();
                    self.transition(states::BogusDoctype);
                },
            },

            //§ between-doctype-public-and-system-identifiers-state
            states::BetweenDoctypePublicAndSystemIdentifiers => match self.reader.consume() {
                '\t' | '\n' | '\x0C' | ' ' => (),
                '>' => {
                    self.emit_doctype();
                    self.transition(states::Data);
                },
                '"' => {
                    *self.doctype_id(System) = StrTendril::new();
                    self.transition(states::DoctypeIdentifierDoubleQuoted(System));
                },
                '\'' => {
                    *self.doctype_id(System) = StrTendril::new();
                    self.transition(states::DoctypeIdentifierSingleQuoted(System));
                },
                EOF if self.reader.is_empty() => {
                    self.bad_eof_error();
                    self.doctype.force_quirks = true;
                    self.emit_doctype();
                    self.transition(states::Data);
                },
                _ => {
                    self.bad_char_error();
                    self.doctype.force_quirks = true;
                    self.transition(states::BogusDoctype);
                },
            },

            //§ bogus-doctype-state
            states::BogusDoctype => {
                self.reader.consume_to('>');
                self.reader.match_consume(">");
                self.emit_doctype();
                self.transition(states::Data);
            },

            //§ cdata-section-state
            states::CdataSection => {
                let data = self.reader.consume_to_seq("]]>");
                self.emit_str(&data);
                self.reader.match_consume("]]>");
                self.transition(states::Data);
            },
        }
    }
}
//§ END
