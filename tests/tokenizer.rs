// Copyright 2026 The tagsoup Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Token-level tests: drive the tokenizer directly, without a tree builder.

use tagsoup::interface::{Attribute, LocalName, ParseError, ParseErrorList};
use tagsoup::tokenizer::states;
use tagsoup::tokenizer::TagKind::{EndTag, StartTag};
use tagsoup::tokenizer::Token::{self, CharacterTokens, CommentToken, DoctypeToken, EOFToken, TagToken};
use tagsoup::tokenizer::{Tag, Tokenizer, TokenizerOpts};
use tagsoup::StrTendril;

fn tokenize_opts(input: &str, opts: TokenizerOpts) -> (Vec<Token>, Vec<ParseError>) {
    let mut tok = Tokenizer::new(input, ParseErrorList::tracking(64), opts);
    let mut tokens = vec![];
    loop {
        let token = tok.read();
        let at_eof = matches!(token, EOFToken);
        if let TagToken(ref tag) = token {
            if tag.kind == StartTag && tag.self_closing {
                tok.acknowledge_self_closing_flag();
            }
        }
        tokens.push(token);
        if at_eof {
            break;
        }
    }
    (tokens, tok.take_errors().into_vec())
}

fn tokenize(input: &str) -> (Vec<Token>, Vec<ParseError>) {
    tokenize_opts(input, TokenizerOpts::default())
}

fn chars(s: &str) -> Token {
    CharacterTokens(StrTendril::from(s))
}

fn start(name: &str) -> Token {
    TagToken(Tag::start(name))
}

fn end(name: &str) -> Token {
    TagToken(Tag::end(name))
}

fn start_attrs(name: &str, attrs: &[(&str, &str)]) -> Token {
    let mut tag = Tag::start(name);
    tag.attrs = attrs
        .iter()
        .map(|&(k, v)| Attribute {
            name: LocalName::from(k),
            value: StrTendril::from(v),
        })
        .collect();
    TagToken(tag)
}

#[test]
fn character_runs_coalesce() {
    let (tokens, errors) = tokenize("one two three");
    assert_eq!(tokens, vec![chars("one two three"), EOFToken]);
    assert!(errors.is_empty());
}

#[test]
fn simple_tags() {
    let (tokens, errors) = tokenize("<p>Hello</p>");
    assert_eq!(tokens, vec![start("p"), chars("Hello"), end("p"), EOFToken]);
    assert!(errors.is_empty());
}

#[test]
fn tag_and_attr_names_are_lowercased() {
    let (tokens, _) = tokenize("<DIV CLASS=Big>");
    assert_eq!(tokens, vec![start_attrs("div", &[("class", "Big")]), EOFToken]);
}

#[test]
fn attribute_quoting_styles() {
    let (tokens, errors) = tokenize("<a one=1 two='2' three=\"3\" four>");
    assert_eq!(
        tokens,
        vec![
            start_attrs("a", &[("one", "1"), ("two", "2"), ("three", "3"), ("four", "")]),
            EOFToken
        ]
    );
    assert!(errors.is_empty());
}

#[test]
fn duplicate_attribute_dropped_with_error() {
    let (tokens, errors) = tokenize("<p id=a id=b>");
    assert_eq!(tokens, vec![start_attrs("p", &[("id", "a")]), EOFToken]);
    assert_eq!(errors.len(), 1);
}

#[test]
fn attributes_on_end_tag_are_an_error() {
    let (tokens, errors) = tokenize("</p id=x>");
    assert_eq!(tokens, vec![end("p"), EOFToken]);
    assert_eq!(errors.len(), 1);
}

#[test]
fn self_closing_flag() {
    let (tokens, errors) = tokenize("<br/>");
    match &tokens[0] {
        TagToken(tag) => {
            assert_eq!(&*tag.name, "br");
            assert!(tag.self_closing);
        },
        other => panic!("expected tag, got {:?}", other),
    }
    assert!(errors.is_empty());
}

#[test]
fn unacknowledged_self_closing_is_an_error() {
    let mut tok = Tokenizer::new(
        "<div/>x",
        ParseErrorList::tracking(8),
        TokenizerOpts::default(),
    );
    tok.read(); // the tag; deliberately not acknowledged
    tok.read();
    assert_eq!(tok.errors().len(), 1);
}

#[test]
fn named_character_reference() {
    let (tokens, errors) = tokenize("fish &amp; chips");
    assert_eq!(tokens, vec![chars("fish & chips"), EOFToken]);
    assert!(errors.is_empty());
}

#[test]
fn named_reference_without_semicolon() {
    let (tokens, errors) = tokenize("a &amp b");
    assert_eq!(tokens, vec![chars("a & b"), EOFToken]);
    assert_eq!(errors.len(), 1);
}

#[test]
fn unknown_named_reference_is_literal() {
    let (tokens, errors) = tokenize("&foo;");
    assert_eq!(tokens, vec![chars("&foo;"), EOFToken]);
    assert_eq!(errors.len(), 1);
}

#[test]
fn numeric_references() {
    let (tokens, errors) = tokenize("&#x41;&#66;");
    assert_eq!(tokens, vec![chars("AB"), EOFToken]);
    assert!(errors.is_empty());
}

#[test]
fn out_of_range_numeric_reference() {
    let (tokens, errors) = tokenize("&#xFFFFFF;");
    assert_eq!(tokens, vec![chars("\u{fffd}"), EOFToken]);
    assert_eq!(errors.len(), 1);
}

#[test]
fn c1_numeric_reference_is_remapped() {
    let (tokens, errors) = tokenize("&#x80;");
    assert_eq!(tokens, vec![chars("\u{20ac}"), EOFToken]);
    assert_eq!(errors.len(), 1);
}

#[test]
fn bare_ampersand_in_attribute_url_is_kept() {
    let (tokens, errors) = tokenize("<a href=\"?x=1&not=2\">");
    assert_eq!(tokens, vec![start_attrs("a", &[("href", "?x=1&not=2")]), EOFToken]);
    assert!(errors.is_empty());
}

#[test]
fn reference_in_attribute_value_resolves() {
    let (tokens, _) = tokenize("<a href=\"a&amp;b\">");
    assert_eq!(tokens, vec![start_attrs("a", &[("href", "a&b")]), EOFToken]);
}

#[test]
fn comment_token() {
    let (tokens, errors) = tokenize("<!-- a comment -->");
    assert_eq!(
        tokens,
        vec![CommentToken(StrTendril::from(" a comment ")), EOFToken]
    );
    assert!(errors.is_empty());
}

#[test]
fn bogus_comment_from_question_mark() {
    let (tokens, errors) = tokenize("<?php echo ?>");
    assert_eq!(
        tokens,
        vec![CommentToken(StrTendril::from("?php echo ?")), EOFToken]
    );
    assert_eq!(errors.len(), 1);
}

#[test]
fn unterminated_comment_is_emitted_at_eof() {
    let (tokens, errors) = tokenize("<!--never ends");
    assert_eq!(
        tokens,
        vec![CommentToken(StrTendril::from("never ends")), EOFToken]
    );
    assert_eq!(errors.len(), 1);
}

#[test]
fn doctype_html() {
    let (tokens, errors) = tokenize("<!DOCTYPE html>");
    match &tokens[0] {
        DoctypeToken(dt) => {
            assert_eq!(dt.name.as_deref(), Some("html"));
            assert_eq!(dt.public_id, None);
            assert_eq!(dt.system_id, None);
            assert!(!dt.force_quirks);
        },
        other => panic!("expected doctype, got {:?}", other),
    }
    assert!(errors.is_empty());
}

#[test]
fn doctype_with_public_and_system_id() {
    let (tokens, _) = tokenize(
        "<!doctype HTML PUBLIC \"-//W3C//DTD HTML 4.01//EN\" \"http://www.w3.org/TR/html4/strict.dtd\">",
    );
    match &tokens[0] {
        DoctypeToken(dt) => {
            assert_eq!(dt.name.as_deref(), Some("html"));
            assert_eq!(dt.public_id.as_deref(), Some("-//W3C//DTD HTML 4.01//EN"));
            assert_eq!(
                dt.system_id.as_deref(),
                Some("http://www.w3.org/TR/html4/strict.dtd")
            );
        },
        other => panic!("expected doctype, got {:?}", other),
    }
}

#[test]
fn empty_doctype_forces_quirks() {
    let (tokens, errors) = tokenize("<!DOCTYPE>");
    match &tokens[0] {
        DoctypeToken(dt) => {
            assert_eq!(dt.name, None);
            assert!(dt.force_quirks);
        },
        other => panic!("expected doctype, got {:?}", other),
    }
    assert!(!errors.is_empty());
}

#[test]
fn rcdata_treats_markup_as_text() {
    let opts = TokenizerOpts {
        initial_state: Some(states::RawData(states::Rcdata)),
        last_start_tag_name: Some("title".to_string()),
    };
    let (tokens, _) = tokenize_opts("foo<b>bar</title>after", opts);
    assert_eq!(
        tokens,
        vec![chars("foo<b>bar"), end("title"), chars("after"), EOFToken]
    );
}

#[test]
fn rcdata_ignores_inappropriate_end_tag() {
    let opts = TokenizerOpts {
        initial_state: Some(states::RawData(states::Rcdata)),
        last_start_tag_name: Some("title".to_string()),
    };
    let (tokens, _) = tokenize_opts("x</b>y</title>", opts);
    assert_eq!(tokens, vec![chars("x</b>y"), end("title"), EOFToken]);
}

#[test]
fn script_data_escaped_comment() {
    let opts = TokenizerOpts {
        initial_state: Some(states::RawData(states::ScriptData)),
        last_start_tag_name: Some("script".to_string()),
    };
    let (tokens, _) = tokenize_opts("a<!--b-->c</script>", opts);
    assert_eq!(
        tokens,
        vec![chars("a<!--b-->c"), end("script"), EOFToken]
    );
}

#[test]
fn cdata_section_becomes_characters() {
    let (tokens, _) = tokenize("<![CDATA[x < y]]>");
    assert_eq!(tokens, vec![chars("x < y"), EOFToken]);
}

#[test]
fn null_in_data_is_passed_through_with_error() {
    let (tokens, errors) = tokenize("a\0b");
    assert_eq!(tokens, vec![chars("a\0b"), EOFToken]);
    assert_eq!(errors.len(), 1);
}

#[test]
fn stray_less_than_is_text() {
    let (tokens, errors) = tokenize("1 < 2");
    assert_eq!(tokens, vec![chars("1 < 2"), EOFToken]);
    assert_eq!(errors.len(), 1);
}

#[test]
fn error_positions_are_recorded() {
    let (_, errors) = tokenize("ab &foo; cd");
    assert_eq!(errors.len(), 1);
    // The reference starts at offset 3; the error lands within it.
    assert!(errors[0].pos >= 3 && errors[0].pos <= 8, "pos {}", errors[0].pos);
}

#[test]
fn error_list_is_bounded() {
    let mut tok = Tokenizer::new(
        "&foo;&foo;&foo;&foo;",
        ParseErrorList::tracking(2),
        TokenizerOpts::default(),
    );
    loop {
        if matches!(tok.read(), EOFToken) {
            break;
        }
    }
    assert_eq!(tok.errors().len(), 2);
}
