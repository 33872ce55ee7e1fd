// Copyright 2026 The tagsoup Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Character reference resolution.
//!
//! Invoked from the data states and, with the closing quote as the
//! additional allowed character, from the attribute-value states. The
//! resolver speculates over the reader and rewinds to the mark when the
//! text turns out not to be a reference after all.

use std::borrow::Cow::Borrowed;
use std::char::from_u32;

use crate::entities;
use crate::interface::ParseErrorList;
use crate::reader::CharacterReader;

/// One or two resolved code points.
pub struct CharRef {
    chars: [char; 2],
    num_chars: u8,
}

impl CharRef {
    fn one(c: char) -> CharRef {
        CharRef {
            chars: [c, '\0'],
            num_chars: 1,
        }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars[..self.num_chars as usize]
    }
}

/// windows-1252 mappings for the C1 control range, 0x80..=0x9F.
/// `None` means the raw code point passes through (with a parse error).
static C1_REPLACEMENTS: [Option<char>; 32] = [
    Some('\u{20ac}'), None,             Some('\u{201a}'), Some('\u{0192}'),
    Some('\u{201e}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02c6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None,             Some('\u{017d}'), None,
    None,             Some('\u{2018}'), Some('\u{2019}'), Some('\u{201c}'),
    Some('\u{201d}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02dc}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203a}'),
    Some('\u{0153}'), None,             Some('\u{017e}'), Some('\u{0178}'),
];

/// Try to resolve a character reference at the cursor (which sits just past
/// the `&`). `None` means "no reference here": the caller emits a literal
/// ampersand and the reader is back where it started.
pub(super) fn consume_character_reference(
    reader: &mut CharacterReader,
    additional_allowed: Option<char>,
    in_attribute: bool,
    errors: &mut ParseErrorList,
) -> Option<CharRef> {
    if reader.is_empty() {
        return None;
    }
    if let Some(allowed) = additional_allowed {
        if reader.current() == allowed {
            return None;
        }
    }
    if reader.matches_any(&['\t', '\n', '\x0C', ' ', '<', '&']) {
        return None;
    }

    reader.mark();
    if reader.match_consume("#") {
        consume_numeric(reader, errors)
    } else {
        consume_named(reader, in_attribute, errors)
    }
}

fn consume_numeric(
    reader: &mut CharacterReader,
    errors: &mut ParseErrorList,
) -> Option<CharRef> {
    let is_hex = reader.match_consume_ignore_case("X");
    let body = if is_hex {
        reader.consume_hex_sequence()
    } else {
        reader.consume_digit_sequence()
    };
    if body.is_empty() {
        errors.add(
            reader.pos(),
            Borrowed("Numeric character reference without digits"),
        );
        reader.rewind_to_mark();
        return None;
    }
    if !reader.match_consume(";") {
        errors.add(
            reader.pos(),
            Borrowed("Semicolon missing after numeric character reference"),
        );
    }

    let base = if is_hex { 16 } else { 10 };
    // Overflow saturates out of range, which maps to U+FFFD below.
    let num = u32::from_str_radix(&body, base).unwrap_or(u32::MAX);
    let c = match num {
        0 | 0xD800..=0xDFFF => {
            errors.add(
                reader.pos(),
                Borrowed("Character reference outside valid range"),
            );
            '\u{fffd}'
        },
        n if n > 0x10FFFF => {
            errors.add(
                reader.pos(),
                Borrowed("Character reference outside valid range"),
            );
            '\u{fffd}'
        },
        0x80..=0x9F => {
            errors.add(
                reader.pos(),
                Borrowed("Character reference in C1 control range"),
            );
            match C1_REPLACEMENTS[(num - 0x80) as usize] {
                Some(c) => c,
                None => from_u32(num).unwrap_or('\u{fffd}'),
            }
        },
        n => from_u32(n).unwrap_or('\u{fffd}'),
    };
    Some(CharRef::one(c))
}

fn consume_named(
    reader: &mut CharacterReader,
    in_attribute: bool,
    errors: &mut ParseErrorList,
) -> Option<CharRef> {
    let name = reader.consume_letter_then_digit_sequence();
    let looks_legit = reader.matches_char(';');
    let found = entities::is_base_named_entity(&name)
        || (entities::is_named_entity(&name) && looks_legit);

    if !found {
        reader.rewind_to_mark();
        if looks_legit && !name.is_empty() {
            errors.add(
                reader.pos(),
                Borrowed("Invalid named character reference"),
            );
        }
        return None;
    }

    // A base entity without its semicolon followed by '=' or an
    // alphanumeric, '-' or '_' is more likely a bare ampersand in a URL;
    // leave the author's text alone in attribute values.
    if in_attribute
        && !looks_legit
        && (reader.matches_letter() || reader.matches_digit() || reader.matches_any(&['=', '-', '_']))
    {
        reader.rewind_to_mark();
        return None;
    }

    if !reader.match_consume(";") {
        errors.add(
            reader.pos(),
            Borrowed("Semicolon missing after named character reference"),
        );
    }

    let cps = entities::codepoints_for_name(&name)
        .expect("entity table lookup after successful match");
    let first = from_u32(cps[0]).unwrap_or('\u{fffd}');
    if cps[1] == 0 {
        Some(CharRef::one(first))
    } else {
        Some(CharRef {
            chars: [first, from_u32(cps[1]).unwrap_or('\u{fffd}')],
            num_chars: 2,
        })
    }
}
