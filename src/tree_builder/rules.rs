// Copyright 2026 The tagsoup Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// The tree builder rules, as one enormous match over the insertion modes.
// Every mode handler returns `false` when the token was ignored.

use std::borrow::Cow::Borrowed;

use tendril::StrTendril;

use super::data;
use super::tag_sets::*;
use super::types::InsertionMode;
use super::TreeBuilder;
use crate::dom;
use crate::interface::{Attribute, LocalName, QuirksMode};
use crate::tokenizer::states;
use crate::tokenizer::states::{Rawtext, Rcdata, ScriptData};
use crate::tokenizer::TagKind::{EndTag, StartTag};
use crate::tokenizer::Token::{self, CharacterTokens, CommentToken, DoctypeToken, EOFToken, TagToken};
use crate::tokenizer::Tag;
use crate::util::str::is_all_whitespace;

fn is_null_run(text: &str) -> bool {
    text.chars().all(|c| c == '\0')
}

impl TreeBuilder {
    pub(crate) fn step(&mut self, mode: InsertionMode, token: Token) -> bool {
        self.debug_step(mode, &token);

        match mode {
            InsertionMode::Initial => self.step_initial(token),
            InsertionMode::BeforeHtml => self.step_before_html(token),
            InsertionMode::BeforeHead => self.step_before_head(token),
            InsertionMode::InHead => self.step_in_head(token),
            InsertionMode::InHeadNoscript => self.step_in_head_noscript(token),
            InsertionMode::AfterHead => self.step_after_head(token),
            InsertionMode::InBody => self.step_in_body(token),
            InsertionMode::Text => self.step_text(token),
            InsertionMode::InTable => self.step_in_table(token),
            InsertionMode::InTableText => self.step_in_table_text(token),
            InsertionMode::InCaption => self.step_in_caption(token),
            InsertionMode::InColumnGroup => self.step_in_column_group(token),
            InsertionMode::InTableBody => self.step_in_table_body(token),
            InsertionMode::InRow => self.step_in_row(token),
            InsertionMode::InCell => self.step_in_cell(token),
            InsertionMode::InSelect => self.step_in_select(token),
            InsertionMode::InSelectInTable => self.step_in_select_in_table(token),
            InsertionMode::AfterBody => self.step_after_body(token),
            InsertionMode::InFrameset => self.step_in_frameset(token),
            InsertionMode::AfterFrameset => self.step_after_frameset(token),
            InsertionMode::AfterAfterBody => self.step_after_after_body(token),
            InsertionMode::AfterAfterFrameset => self.step_after_after_frameset(token),
            // SVG and MathML subtrees are parsed as opaque markup.
            InsertionMode::ForeignContent => self.step_in_body(token),
        }
    }

    //§ the-initial-insertion-mode
    fn step_initial(&mut self, token: Token) -> bool {
        match token {
            CharacterTokens(ref text) if is_all_whitespace(text) => true,
            CommentToken(text) => {
                self.append_comment_to_doc(text);
                true
            },
            DoctypeToken(dt) => {
                let (err, quirks) = data::doctype_error_and_quirks(&dt);
                if err {
                    self.error(Borrowed("Bad DOCTYPE"));
                }
                self.append_doctype_to_doc(
                    dt.name.unwrap_or_default(),
                    dt.public_id.unwrap_or_default(),
                    dt.system_id.unwrap_or_default(),
                );
                self.set_quirks_mode(quirks);
                self.set_mode(InsertionMode::BeforeHtml);
                true
            },
            token => {
                self.set_mode(InsertionMode::BeforeHtml);
                self.step(InsertionMode::BeforeHtml, token)
            },
        }
    }

    //§ the-before-html-insertion-mode
    fn step_before_html(&mut self, token: Token) -> bool {
        match token {
            DoctypeToken(_) => self.unexpected(&token),
            CommentToken(text) => {
                self.append_comment_to_doc(text);
                true
            },
            CharacterTokens(ref text) if is_all_whitespace(text) => true,
            TagToken(ref tag) if tag.kind == StartTag && &*tag.name == "html" => {
                let attrs = tag.attrs.clone();
                self.create_root(attrs);
                self.set_mode(InsertionMode::BeforeHead);
                true
            },
            TagToken(ref tag)
                if tag.kind == EndTag
                    && !matches!(&*tag.name, "head" | "body" | "html" | "br") =>
            {
                self.unexpected(&token)
            },
            token => {
                self.create_root(vec![]);
                self.set_mode(InsertionMode::BeforeHead);
                self.step(InsertionMode::BeforeHead, token)
            },
        }
    }

    //§ the-before-head-insertion-mode
    fn step_before_head(&mut self, token: Token) -> bool {
        match token {
            CharacterTokens(ref text) if is_all_whitespace(text) => true,
            CommentToken(text) => {
                self.insert_comment(text);
                true
            },
            DoctypeToken(_) => self.unexpected(&token),
            TagToken(ref tag) if tag.kind == StartTag && &*tag.name == "html" => {
                self.step(InsertionMode::InBody, token)
            },
            TagToken(ref tag) if tag.kind == StartTag && &*tag.name == "head" => {
                let head = self.insert_element_for(tag);
                self.set_head_elem(head);
                self.set_mode(InsertionMode::InHead);
                true
            },
            TagToken(ref tag)
                if tag.kind == EndTag
                    && !matches!(&*tag.name, "head" | "body" | "html" | "br") =>
            {
                self.unexpected(&token)
            },
            token => {
                let head = self.insert_phantom("head");
                self.set_head_elem(head);
                self.set_mode(InsertionMode::InHead);
                self.step(InsertionMode::InHead, token)
            },
        }
    }

    //§ parsing-main-inhead
    fn step_in_head(&mut self, token: Token) -> bool {
        match token {
            CharacterTokens(ref text) if is_all_whitespace(text) => {
                let text = text.clone();
                self.insert_characters(&text);
                true
            },
            CommentToken(text) => {
                self.insert_comment(text);
                true
            },
            DoctypeToken(_) => self.unexpected(&token),
            TagToken(tag) => match tag.kind {
                StartTag => match &*tag.name.clone() {
                    "html" => self.step(InsertionMode::InBody, TagToken(tag)),
                    "base" | "basefont" | "bgsound" | "command" | "link" => {
                        let el = self.insert_empty(&tag);
                        if &*tag.name == "base" {
                            self.maybe_set_base_uri(&el);
                        }
                        true
                    },
                    "meta" => {
                        self.insert_empty(&tag);
                        true
                    },
                    "title" => {
                        self.parse_raw_data(&tag, Rcdata);
                        true
                    },
                    "noframes" | "style" => {
                        self.parse_raw_data(&tag, Rawtext);
                        true
                    },
                    "noscript" => {
                        self.insert_element_for(&tag);
                        self.set_mode(InsertionMode::InHeadNoscript);
                        true
                    },
                    "script" => {
                        self.parse_raw_data(&tag, ScriptData);
                        true
                    },
                    "head" => {
                        self.error(Borrowed("Unexpected <head> inside head"));
                        false
                    },
                    _ => self.in_head_anything_else(TagToken(tag)),
                },
                EndTag => match &*tag.name.clone() {
                    "head" => {
                        self.pop();
                        self.set_mode(InsertionMode::AfterHead);
                        true
                    },
                    "body" | "html" | "br" => self.in_head_anything_else(TagToken(tag)),
                    _ => {
                        self.error(Borrowed("Unexpected end tag in head"));
                        false
                    },
                },
            },
            token => self.in_head_anything_else(token),
        }
    }

    fn in_head_anything_else(&mut self, token: Token) -> bool {
        self.pop();
        self.set_mode(InsertionMode::AfterHead);
        self.step(InsertionMode::AfterHead, token)
    }

    //§ parsing-main-inheadnoscript
    fn step_in_head_noscript(&mut self, token: Token) -> bool {
        match token {
            DoctypeToken(_) => self.unexpected(&token),
            TagToken(ref tag) if tag.kind == StartTag && &*tag.name == "html" => {
                self.step(InsertionMode::InBody, token)
            },
            TagToken(ref tag) if tag.kind == EndTag && &*tag.name == "noscript" => {
                self.pop();
                self.set_mode(InsertionMode::InHead);
                true
            },
            CharacterTokens(ref text) if is_all_whitespace(text) => {
                self.step(InsertionMode::InHead, token)
            },
            CommentToken(_) => self.step(InsertionMode::InHead, token),
            TagToken(ref tag)
                if tag.kind == StartTag
                    && matches!(
                        &*tag.name,
                        "basefont" | "bgsound" | "link" | "meta" | "noframes" | "style"
                    ) =>
            {
                self.step(InsertionMode::InHead, token)
            },
            TagToken(ref tag)
                if tag.kind == StartTag && matches!(&*tag.name, "head" | "noscript") =>
            {
                self.unexpected(&token)
            },
            TagToken(ref tag) if tag.kind == EndTag && &*tag.name != "br" => {
                self.unexpected(&token)
            },
            token => {
                self.error(Borrowed("Unexpected token in <noscript> in head"));
                self.pop();
                self.set_mode(InsertionMode::InHead);
                self.step(InsertionMode::InHead, token)
            },
        }
    }

    //§ the-after-head-insertion-mode
    fn step_after_head(&mut self, token: Token) -> bool {
        match token {
            CharacterTokens(ref text) if is_all_whitespace(text) => {
                let text = text.clone();
                self.insert_characters(&text);
                true
            },
            CommentToken(text) => {
                self.insert_comment(text);
                true
            },
            DoctypeToken(_) => self.unexpected(&token),
            TagToken(tag) => match tag.kind {
                StartTag => match &*tag.name.clone() {
                    "html" => self.step(InsertionMode::InBody, TagToken(tag)),
                    "body" => {
                        self.insert_element_for(&tag);
                        self.set_frameset_ok(false);
                        self.set_mode(InsertionMode::InBody);
                        true
                    },
                    "frameset" => {
                        self.insert_element_for(&tag);
                        self.set_mode(InsertionMode::InFrameset);
                        true
                    },
                    "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
                    | "style" | "title" => {
                        self.error(Borrowed("Unexpected head-content tag after head"));
                        let head = self.head_elem().expect("no head element");
                        self.push(&head);
                        let result = self.step(InsertionMode::InHead, TagToken(tag));
                        self.remove_from_stack(&head);
                        result
                    },
                    "head" => {
                        self.error(Borrowed("Unexpected <head> after head"));
                        false
                    },
                    _ => self.after_head_anything_else(TagToken(tag)),
                },
                EndTag => match &*tag.name.clone() {
                    "body" | "html" | "br" => self.after_head_anything_else(TagToken(tag)),
                    _ => {
                        self.error(Borrowed("Unexpected end tag after head"));
                        false
                    },
                },
            },
            token => self.after_head_anything_else(token),
        }
    }

    fn after_head_anything_else(&mut self, token: Token) -> bool {
        self.insert_phantom("body");
        self.set_mode(InsertionMode::InBody);
        self.step(InsertionMode::InBody, token)
    }

    //§ parsing-main-inbody
    fn step_in_body(&mut self, token: Token) -> bool {
        match token {
            CharacterTokens(text) => {
                if is_null_run(&text) {
                    self.error(Borrowed("Null character in body"));
                    return false;
                }
                if self.frameset_ok() && !is_all_whitespace(&text) {
                    self.set_frameset_ok(false);
                }
                self.reconstruct_formatting_elements();
                self.insert_characters(&text);
                true
            },
            CommentToken(text) => {
                self.insert_comment(text);
                true
            },
            DoctypeToken(_) => self.unexpected(&token),
            EOFToken => {
                self.check_body_end();
                true
            },
            TagToken(tag) => match tag.kind {
                StartTag => self.in_body_start_tag(tag),
                EndTag => self.in_body_end_tag(tag),
            },
        }
    }

    fn in_body_start_tag(&mut self, tag: Tag) -> bool {
        let name = tag.name.clone();
        match &*name {
            "html" => {
                self.error(Borrowed("Unexpected duplicate <html>"));
                let root = self.html_root();
                self.merge_attrs(&root, &tag.attrs);
                true
            },

            "base" | "basefont" | "bgsound" | "command" | "link" | "meta" | "noframes"
            | "script" | "style" | "title" => self.step(InsertionMode::InHead, TagToken(tag)),

            "body" => {
                self.error(Borrowed("Unexpected duplicate <body>"));
                if self.stack_len() == 1 {
                    return false;
                }
                let second = self.stack_item(1);
                if !second.is_element_named("body") {
                    return false;
                }
                self.set_frameset_ok(false);
                self.merge_attrs(&second, &tag.attrs);
                true
            },

            "frameset" => {
                self.error(Borrowed("Unexpected <frameset> in body"));
                if self.stack_len() == 1 {
                    return false;
                }
                let second = self.stack_item(1);
                if !second.is_element_named("body") {
                    return false;
                }
                if !self.frameset_ok() {
                    return false;
                }
                // The frameset replaces the body entirely.
                dom::remove_from_parent(&second);
                self.truncate_stack_to_root();
                self.insert_element_for(&tag);
                self.set_mode(InsertionMode::InFrameset);
                true
            },

            "address" | "article" | "aside" | "blockquote" | "center" | "details" | "dir"
            | "div" | "dl" | "fieldset" | "figcaption" | "figure" | "footer" | "header"
            | "hgroup" | "main" | "menu" | "nav" | "ol" | "p" | "section" | "summary"
            | "ul" => {
                self.close_p_if_in_button_scope();
                self.insert_element_for(&tag);
                true
            },

            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.close_p_if_in_button_scope();
                if heading_tag(self.current_element().node_name()) {
                    self.error(Borrowed("Unexpected heading in heading"));
                    self.pop();
                }
                self.insert_element_for(&tag);
                true
            },

            "pre" | "listing" => {
                self.close_p_if_in_button_scope();
                self.insert_element_for(&tag);
                self.set_ignore_lf();
                self.set_frameset_ok(false);
                true
            },

            "form" => {
                if self.form_elem().is_some() {
                    self.error(Borrowed("Unexpected nested <form>"));
                    return false;
                }
                self.close_p_if_in_button_scope();
                self.insert_form(&tag, true);
                true
            },

            "li" => {
                self.set_frameset_ok(false);
                for el in self.stack_top_down() {
                    if el.is_element_named("li") {
                        self.process_end_tag("li");
                        break;
                    }
                    if Self::is_special(&el)
                        && !matches!(el.node_name(), "address" | "div" | "p")
                    {
                        break;
                    }
                }
                self.close_p_if_in_button_scope();
                self.insert_element_for(&tag);
                true
            },

            "dd" | "dt" => {
                self.set_frameset_ok(false);
                for el in self.stack_top_down() {
                    let el_name = el.node_name().to_string();
                    if matches!(&*el_name, "dd" | "dt") {
                        self.process_end_tag(&el_name);
                        break;
                    }
                    if Self::is_special(&el)
                        && !matches!(&*el_name, "address" | "div" | "p")
                    {
                        break;
                    }
                }
                self.close_p_if_in_button_scope();
                self.insert_element_for(&tag);
                true
            },

            "plaintext" => {
                self.close_p_if_in_button_scope();
                self.insert_element_for(&tag);
                self.tokenizer.transition(states::Plaintext);
                true
            },

            "button" => {
                if self.in_scope_named("button") {
                    self.error(Borrowed("Unexpected nested <button>"));
                    self.process_end_tag("button");
                    self.process(TagToken(tag))
                } else {
                    self.reconstruct_formatting_elements();
                    self.insert_element_for(&tag);
                    self.set_frameset_ok(false);
                    true
                }
            },

            "a" => {
                if self.get_active_formatting_element("a").is_some() {
                    self.error(Borrowed("Unexpected <a> implicitly closes previous <a>"));
                    self.process_end_tag("a");
                    if let Some(remaining) = self.get_from_stack("a") {
                        self.remove_from_active_formatting_elements(&remaining);
                        self.remove_from_stack(&remaining);
                    }
                }
                self.reconstruct_formatting_elements();
                let el = self.insert_element_for(&tag);
                self.push_active_formatting_elements(el, &tag);
                true
            },

            "b" | "big" | "code" | "em" | "font" | "i" | "s" | "small" | "strike"
            | "strong" | "tt" | "u" => {
                self.reconstruct_formatting_elements();
                let el = self.insert_element_for(&tag);
                self.push_active_formatting_elements(el, &tag);
                true
            },

            "nobr" => {
                self.reconstruct_formatting_elements();
                if self.in_scope_named("nobr") {
                    self.error(Borrowed("Unexpected nested <nobr>"));
                    self.process_end_tag("nobr");
                    self.reconstruct_formatting_elements();
                }
                let el = self.insert_element_for(&tag);
                self.push_active_formatting_elements(el, &tag);
                true
            },

            "applet" | "marquee" | "object" => {
                self.reconstruct_formatting_elements();
                self.insert_element_for(&tag);
                self.insert_marker_to_formatting_elements();
                self.set_frameset_ok(false);
                true
            },

            "table" => {
                if self.quirks_mode() != QuirksMode::Quirks && self.in_button_scope("p") {
                    self.process_end_tag("p");
                }
                self.insert_element_for(&tag);
                self.set_frameset_ok(false);
                self.set_mode(InsertionMode::InTable);
                true
            },

            "area" | "br" | "embed" | "img" | "keygen" | "wbr" => {
                self.reconstruct_formatting_elements();
                self.insert_empty(&tag);
                self.set_frameset_ok(false);
                true
            },

            "input" => {
                self.reconstruct_formatting_elements();
                self.insert_empty(&tag);
                let hidden = tag
                    .attr("type")
                    .map(|t| t.eq_ignore_ascii_case("hidden"))
                    .unwrap_or(false);
                if !hidden {
                    self.set_frameset_ok(false);
                }
                true
            },

            "param" | "source" | "track" => {
                self.insert_empty(&tag);
                true
            },

            "hr" => {
                self.close_p_if_in_button_scope();
                self.insert_empty(&tag);
                self.set_frameset_ok(false);
                true
            },

            "image" => {
                if self.get_from_stack("svg").is_none() {
                    // How much do we love you, IE? An <image> is an <img>.
                    self.error(Borrowed("<image> renamed to <img>"));
                    let mut tag = tag;
                    tag.name = LocalName::from("img");
                    self.process(TagToken(tag))
                } else {
                    self.insert_element_for(&tag);
                    true
                }
            },

            "isindex" => {
                self.error(Borrowed("<isindex> rewritten as a form"));
                if self.form_elem().is_some() {
                    return false;
                }
                self.tokenizer.acknowledge_self_closing_flag();
                self.process_start_tag("form");
                if let Some(form) = self.form_elem() {
                    if let Some(action) = tag.attr("action") {
                        form.set_attr("action", StrTendril::from(action));
                    }
                }
                self.process_start_tag("hr");
                self.process_start_tag("label");
                let prompt = tag
                    .attr("prompt")
                    .map(String::from)
                    .unwrap_or_else(|| {
                        "This is a searchable index. Enter search keywords: ".to_string()
                    });
                self.process(CharacterTokens(StrTendril::from(&*prompt)));
                let mut input_attrs: Vec<Attribute> = tag
                    .attrs
                    .iter()
                    .filter(|a| !matches!(&*a.name, "name" | "action" | "prompt"))
                    .cloned()
                    .collect();
                input_attrs.push(Attribute {
                    name: LocalName::from("name"),
                    value: StrTendril::from("isindex"),
                });
                self.process_start_tag_attrs("input", input_attrs);
                self.process_end_tag("label");
                self.process_start_tag("hr");
                self.process_end_tag("form");
                true
            },

            "textarea" => {
                self.parse_raw_data(&tag, Rcdata);
                self.set_ignore_lf();
                self.set_frameset_ok(false);
                true
            },

            "xmp" => {
                self.close_p_if_in_button_scope();
                self.reconstruct_formatting_elements();
                self.set_frameset_ok(false);
                self.parse_raw_data(&tag, Rawtext);
                true
            },

            "iframe" => {
                self.set_frameset_ok(false);
                self.parse_raw_data(&tag, Rawtext);
                true
            },

            "noembed" => {
                self.parse_raw_data(&tag, Rawtext);
                true
            },

            "select" => {
                self.reconstruct_formatting_elements();
                self.insert_element_for(&tag);
                self.set_frameset_ok(false);
                let mode = self.mode();
                if matches!(
                    mode,
                    InsertionMode::InTable
                        | InsertionMode::InCaption
                        | InsertionMode::InTableBody
                        | InsertionMode::InRow
                        | InsertionMode::InCell
                ) {
                    self.set_mode(InsertionMode::InSelectInTable);
                } else {
                    self.set_mode(InsertionMode::InSelect);
                }
                true
            },

            "optgroup" | "option" => {
                if self.current_element_named("option") {
                    self.process_end_tag("option");
                }
                self.reconstruct_formatting_elements();
                self.insert_element_for(&tag);
                true
            },

            "rp" | "rt" => {
                if self.in_scope_named("ruby") {
                    self.generate_implied_end_tags();
                    if !self.current_element_named("ruby") {
                        self.error(Borrowed("Unexpected open elements in ruby"));
                        self.pop_stack_to_before("ruby");
                    }
                    self.insert_element_for(&tag);
                }
                true
            },

            "math" | "svg" => {
                self.reconstruct_formatting_elements();
                self.insert_element_for(&tag);
                if tag.self_closing {
                    self.pop();
                    self.tokenizer.acknowledge_self_closing_flag();
                }
                true
            },

            "caption" | "col" | "colgroup" | "frame" | "head" | "tbody" | "td" | "tfoot"
            | "th" | "thead" | "tr" => {
                self.error(Borrowed("Unexpected table-structure tag in body"));
                false
            },

            _ => {
                self.reconstruct_formatting_elements();
                self.insert_element_for(&tag);
                true
            },
        }
    }

    fn in_body_end_tag(&mut self, tag: Tag) -> bool {
        let name = tag.name.clone();
        match &*name {
            "a" | "b" | "big" | "code" | "em" | "font" | "i" | "nobr" | "s" | "small"
            | "strike" | "strong" | "tt" | "u" => {
                self.adoption_agency(&name);
                true
            },

            "body" => {
                if !self.in_scope_named("body") {
                    self.error(Borrowed("Unexpected </body> with no body in scope"));
                    return false;
                }
                self.check_body_end();
                self.set_mode(InsertionMode::AfterBody);
                true
            },

            "html" => {
                let not_ignored = self.process_end_tag("body");
                if not_ignored {
                    self.process(TagToken(tag))
                } else {
                    false
                }
            },

            "address" | "article" | "aside" | "blockquote" | "button" | "center"
            | "details" | "dir" | "div" | "dl" | "fieldset" | "figcaption" | "figure"
            | "footer" | "header" | "hgroup" | "listing" | "main" | "menu" | "nav" | "ol"
            | "pre" | "section" | "summary" | "ul" => {
                if !self.in_scope_named(&name) {
                    self.error(Borrowed("Unexpected end tag with no matching element"));
                    false
                } else {
                    self.generate_implied_end_tags();
                    if !self.current_element_named(&name) {
                        self.error(Borrowed("Unexpected open elements at end tag"));
                    }
                    self.pop_stack_to_close(&[&*name]);
                    true
                }
            },

            "form" => {
                let current_form = self.form_elem();
                self.set_form_elem(None);
                match current_form {
                    Some(form) if self.in_scope_named("form") => {
                        self.generate_implied_end_tags();
                        if !self.current_element_named("form") {
                            self.error(Borrowed("Unexpected open elements at </form>"));
                        }
                        // Not a pop-to-close; the form may be buried.
                        self.remove_from_stack(&form);
                        true
                    },
                    _ => {
                        self.error(Borrowed("Unexpected </form> with no form in scope"));
                        false
                    },
                }
            },

            "p" => {
                if !self.in_button_scope("p") {
                    self.error(Borrowed("Unexpected </p> with no <p> in scope"));
                    self.process_start_tag("p");
                    self.process(TagToken(tag))
                } else {
                    self.generate_implied_end_except("p");
                    if !self.current_element_named("p") {
                        self.error(Borrowed("Unexpected open elements at </p>"));
                    }
                    self.pop_stack_to_close(&["p"]);
                    true
                }
            },

            "li" => {
                if !self.in_list_item_scope("li") {
                    self.error(Borrowed("Unexpected </li> with no <li> in scope"));
                    false
                } else {
                    self.generate_implied_end_except("li");
                    if !self.current_element_named("li") {
                        self.error(Borrowed("Unexpected open elements at </li>"));
                    }
                    self.pop_stack_to_close(&["li"]);
                    true
                }
            },

            "dd" | "dt" => {
                if !self.in_scope_named(&name) {
                    self.error(Borrowed("Unexpected end tag with no matching element"));
                    false
                } else {
                    self.generate_implied_end_except(&name);
                    if !self.current_element_named(&name) {
                        self.error(Borrowed("Unexpected open elements at end tag"));
                    }
                    self.pop_stack_to_close(&[&*name]);
                    true
                }
            },

            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                if !self.in_scope_any(&["h1", "h2", "h3", "h4", "h5", "h6"]) {
                    self.error(Borrowed("Unexpected heading end tag"));
                    false
                } else {
                    self.generate_implied_end_tags();
                    if !self.current_element_named(&name) {
                        self.error(Borrowed("Unexpected open elements at heading end"));
                    }
                    self.pop_stack_to_close(&["h1", "h2", "h3", "h4", "h5", "h6"]);
                    true
                }
            },

            "applet" | "marquee" | "object" => {
                if !self.in_scope_named(&name) {
                    self.error(Borrowed("Unexpected end tag with no matching element"));
                    false
                } else {
                    self.generate_implied_end_tags();
                    if !self.current_element_named(&name) {
                        self.error(Borrowed("Unexpected open elements at end tag"));
                    }
                    self.pop_stack_to_close(&[&*name]);
                    self.clear_formatting_elements_to_last_marker();
                    true
                }
            },

            "br" => {
                self.error(Borrowed("Unexpected </br>; treated as <br>"));
                self.process_start_tag("br");
                false
            },

            // "sarcasm", and anything else.
            _ => self.any_other_end_tag(&name),
        }
    }

    /// The any-other-end-tag fallback: walk the stack, close if a match is
    /// found before a special element, otherwise ignore.
    pub(crate) fn any_other_end_tag(&mut self, name: &str) -> bool {
        for node in self.stack_top_down() {
            if node.is_element_named(name) {
                self.generate_implied_end_except(name);
                if !self.current_element_named(name) {
                    self.error(Borrowed("Unexpected open elements at end tag"));
                }
                self.pop_stack_to_close(&[name]);
                return true;
            }
            if Self::is_special(&node) {
                self.error(Borrowed("Unexpected end tag"));
                return false;
            }
        }
        true
    }

    //§ parsing-main-incdata (the "text" insertion mode)
    fn step_text(&mut self, token: Token) -> bool {
        match token {
            CharacterTokens(text) => {
                self.insert_characters(&text);
                true
            },
            EOFToken => {
                self.error(Borrowed("Unexpected EOF in raw text"));
                self.pop();
                let orig = self.original_state();
                self.set_mode(orig);
                self.step(orig, token)
            },
            TagToken(ref tag) if tag.kind == EndTag => {
                self.pop();
                self.set_mode(self.original_state());
                true
            },
            _ => self.unexpected(&token),
        }
    }

    //§ parsing-main-intable
    fn step_in_table(&mut self, token: Token) -> bool {
        match token {
            CharacterTokens(_) if table_structural(self.current_element().node_name()) => {
                self.new_pending_table_characters();
                self.mark_insertion_mode();
                self.set_mode(InsertionMode::InTableText);
                self.step(InsertionMode::InTableText, token)
            },
            CommentToken(text) => {
                self.insert_comment(text);
                true
            },
            DoctypeToken(_) => self.unexpected(&token),
            TagToken(tag) => match tag.kind {
                StartTag => match &*tag.name.clone() {
                    "caption" => {
                        self.clear_stack_to_table_context();
                        self.insert_marker_to_formatting_elements();
                        self.insert_element_for(&tag);
                        self.set_mode(InsertionMode::InCaption);
                        true
                    },
                    "colgroup" => {
                        self.clear_stack_to_table_context();
                        self.insert_element_for(&tag);
                        self.set_mode(InsertionMode::InColumnGroup);
                        true
                    },
                    "col" => {
                        self.process_start_tag("colgroup");
                        self.process(TagToken(tag))
                    },
                    "tbody" | "tfoot" | "thead" => {
                        self.clear_stack_to_table_context();
                        self.insert_element_for(&tag);
                        self.set_mode(InsertionMode::InTableBody);
                        true
                    },
                    "td" | "th" | "tr" => {
                        self.process_start_tag("tbody");
                        self.process(TagToken(tag))
                    },
                    "table" => {
                        self.error(Borrowed("Unexpected nested <table>"));
                        let processed = self.process_end_tag("table");
                        if processed {
                            self.process(TagToken(tag))
                        } else {
                            true
                        }
                    },
                    "style" | "script" => self.step(InsertionMode::InHead, TagToken(tag)),
                    "input" => {
                        let hidden = tag
                            .attr("type")
                            .map(|t| t.eq_ignore_ascii_case("hidden"))
                            .unwrap_or(false);
                        if hidden {
                            self.error(Borrowed("Unexpected hidden input in table"));
                            self.insert_empty(&tag);
                            true
                        } else {
                            self.in_table_anything_else(TagToken(tag))
                        }
                    },
                    "form" => {
                        self.error(Borrowed("Unexpected <form> in table"));
                        if self.form_elem().is_none() {
                            self.insert_form(&tag, false);
                        }
                        false
                    },
                    _ => self.in_table_anything_else(TagToken(tag)),
                },
                EndTag => match &*tag.name.clone() {
                    "table" => {
                        if !self.in_table_scope("table") {
                            self.error(Borrowed("Unexpected </table> with no table in scope"));
                            false
                        } else {
                            self.pop_stack_to_close(&["table"]);
                            self.reset_insertion_mode();
                            true
                        }
                    },
                    "body" | "caption" | "col" | "colgroup" | "html" | "tbody" | "td"
                    | "tfoot" | "th" | "thead" | "tr" => {
                        self.error(Borrowed("Unexpected end tag in table"));
                        false
                    },
                    _ => self.in_table_anything_else(TagToken(tag)),
                },
            },
            EOFToken => {
                if self.current_element_named("html") {
                    self.error(Borrowed("Unexpected EOF in table"));
                }
                true
            },
            token => self.in_table_anything_else(token),
        }
    }

    fn in_table_anything_else(&mut self, token: Token) -> bool {
        self.error(Borrowed("Unexpected token in table; foster parenting"));
        if table_structural(self.current_element().node_name()) {
            self.set_foster_inserts(true);
            let result = self.step(InsertionMode::InBody, token);
            self.set_foster_inserts(false);
            result
        } else {
            self.step(InsertionMode::InBody, token)
        }
    }

    //§ parsing-main-intabletext
    fn step_in_table_text(&mut self, token: Token) -> bool {
        match token {
            CharacterTokens(text) => {
                if is_null_run(&text) {
                    self.error(Borrowed("Null character in table text"));
                    return false;
                }
                self.push_pending_table_characters(text);
                true
            },
            token => {
                let pending = self.take_pending_table_characters();
                if pending.iter().any(|t| !is_all_whitespace(t)) {
                    // Non-whitespace in a table gets foster-parented as body
                    // content.
                    self.error(Borrowed("Unexpected text in table"));
                    for text in pending {
                        if table_structural(self.current_element().node_name()) {
                            self.set_foster_inserts(true);
                            self.step(InsertionMode::InBody, CharacterTokens(text));
                            self.set_foster_inserts(false);
                        } else {
                            self.step(InsertionMode::InBody, CharacterTokens(text));
                        }
                    }
                } else {
                    for text in pending {
                        self.insert_characters(&text);
                    }
                }
                self.set_mode(self.original_state());
                self.process(token)
            },
        }
    }

    //§ parsing-main-incaption
    fn step_in_caption(&mut self, token: Token) -> bool {
        match token {
            TagToken(ref tag) if tag.kind == EndTag && &*tag.name == "caption" => {
                if !self.in_table_scope("caption") {
                    self.error(Borrowed("Unexpected </caption> with no caption in scope"));
                    false
                } else {
                    self.generate_implied_end_tags();
                    if !self.current_element_named("caption") {
                        self.error(Borrowed("Unexpected open elements at </caption>"));
                    }
                    self.pop_stack_to_close(&["caption"]);
                    self.clear_formatting_elements_to_last_marker();
                    self.set_mode(InsertionMode::InTable);
                    true
                }
            },
            TagToken(ref tag)
                if (tag.kind == StartTag
                    && matches!(
                        &*tag.name,
                        "caption"
                            | "col"
                            | "colgroup"
                            | "tbody"
                            | "td"
                            | "tfoot"
                            | "th"
                            | "thead"
                            | "tr"
                    ))
                    || (tag.kind == EndTag && &*tag.name == "table") =>
            {
                let processed = self.process_end_tag("caption");
                if processed {
                    self.process(token)
                } else {
                    false
                }
            },
            TagToken(ref tag)
                if tag.kind == EndTag
                    && matches!(
                        &*tag.name,
                        "body" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot"
                            | "th" | "thead" | "tr"
                    ) =>
            {
                self.unexpected(&token)
            },
            token => self.step(InsertionMode::InBody, token),
        }
    }

    //§ parsing-main-incolgroup
    fn step_in_column_group(&mut self, token: Token) -> bool {
        match token {
            CharacterTokens(ref text) if is_all_whitespace(text) => {
                let text = text.clone();
                self.insert_characters(&text);
                true
            },
            CommentToken(text) => {
                self.insert_comment(text);
                true
            },
            DoctypeToken(_) => self.unexpected(&token),
            TagToken(ref tag) if tag.kind == StartTag && &*tag.name == "html" => {
                self.step(InsertionMode::InBody, token)
            },
            TagToken(ref tag) if tag.kind == StartTag && &*tag.name == "col" => {
                self.insert_empty(tag);
                true
            },
            TagToken(ref tag) if tag.kind == EndTag && &*tag.name == "colgroup" => {
                if self.current_element_named("html") {
                    self.error(Borrowed("Unexpected </colgroup> at root"));
                    false
                } else {
                    self.pop();
                    self.set_mode(InsertionMode::InTable);
                    true
                }
            },
            TagToken(ref tag) if tag.kind == EndTag && &*tag.name == "col" => {
                self.unexpected(&token)
            },
            EOFToken => {
                if self.current_element_named("html") {
                    return true;
                }
                self.in_column_group_anything_else(token)
            },
            token => self.in_column_group_anything_else(token),
        }
    }

    fn in_column_group_anything_else(&mut self, token: Token) -> bool {
        let processed = self.process_end_tag("colgroup");
        if processed {
            self.process(token)
        } else {
            true
        }
    }

    //§ parsing-main-intbody
    fn step_in_table_body(&mut self, token: Token) -> bool {
        match token {
            TagToken(tag) if tag.kind == StartTag && &*tag.name == "tr" => {
                self.clear_stack_to_table_body_context();
                self.insert_element_for(&tag);
                self.set_mode(InsertionMode::InRow);
                true
            },
            TagToken(tag)
                if tag.kind == StartTag && matches!(&*tag.name, "th" | "td") =>
            {
                self.error(Borrowed("Unexpected cell without row"));
                self.process_start_tag("tr");
                self.process(TagToken(tag))
            },
            TagToken(ref tag)
                if (tag.kind == StartTag
                    && matches!(
                        &*tag.name,
                        "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead"
                    ))
                    || (tag.kind == EndTag && &*tag.name == "table") =>
            {
                self.exit_table_body(token)
            },
            TagToken(ref tag)
                if tag.kind == EndTag
                    && matches!(&*tag.name, "tbody" | "tfoot" | "thead") =>
            {
                let name = tag.name.clone();
                if !self.in_table_scope(&name) {
                    self.error(Borrowed("Unexpected end tag with no matching section"));
                    false
                } else {
                    self.clear_stack_to_table_body_context();
                    self.pop();
                    self.set_mode(InsertionMode::InTable);
                    true
                }
            },
            TagToken(ref tag)
                if tag.kind == EndTag
                    && matches!(
                        &*tag.name,
                        "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th" | "tr"
                    ) =>
            {
                self.unexpected(&token)
            },
            token => self.step(InsertionMode::InTable, token),
        }
    }

    fn exit_table_body(&mut self, token: Token) -> bool {
        if !(self.in_table_scope("tbody")
            || self.in_table_scope("thead")
            || self.in_table_scope("tfoot"))
        {
            self.error(Borrowed("Unexpected table section crossing"));
            return false;
        }
        self.clear_stack_to_table_body_context();
        let name = self.current_element().node_name().to_string();
        self.process_end_tag(&name);
        self.process(token)
    }

    //§ parsing-main-intr
    fn step_in_row(&mut self, token: Token) -> bool {
        match token {
            TagToken(tag)
                if tag.kind == StartTag && matches!(&*tag.name, "td" | "th") =>
            {
                self.clear_stack_to_table_row_context();
                self.insert_element_for(&tag);
                self.set_mode(InsertionMode::InCell);
                self.insert_marker_to_formatting_elements();
                true
            },
            TagToken(ref tag) if tag.kind == EndTag && &*tag.name == "tr" => {
                if !self.in_table_scope("tr") {
                    self.error(Borrowed("Unexpected </tr> with no row in scope"));
                    false
                } else {
                    self.clear_stack_to_table_row_context();
                    self.pop();
                    self.set_mode(InsertionMode::InTableBody);
                    true
                }
            },
            TagToken(ref tag)
                if (tag.kind == StartTag
                    && matches!(
                        &*tag.name,
                        "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead" | "tr"
                    ))
                    || (tag.kind == EndTag && &*tag.name == "table") =>
            {
                let processed = self.process_end_tag("tr");
                if processed {
                    self.process(token)
                } else {
                    false
                }
            },
            TagToken(ref tag)
                if tag.kind == EndTag
                    && matches!(&*tag.name, "tbody" | "tfoot" | "thead") =>
            {
                let name = tag.name.clone();
                if !self.in_table_scope(&name) {
                    self.error(Borrowed("Unexpected end tag with no matching section"));
                    false
                } else {
                    self.process_end_tag("tr");
                    self.process(token)
                }
            },
            TagToken(ref tag)
                if tag.kind == EndTag
                    && matches!(
                        &*tag.name,
                        "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th"
                    ) =>
            {
                self.unexpected(&token)
            },
            token => self.step(InsertionMode::InTable, token),
        }
    }

    //§ parsing-main-intd
    fn step_in_cell(&mut self, token: Token) -> bool {
        match token {
            TagToken(ref tag)
                if tag.kind == EndTag && matches!(&*tag.name, "td" | "th") =>
            {
                let name = tag.name.clone();
                if !self.in_table_scope(&name) {
                    self.error(Borrowed("Unexpected cell end tag with no cell in scope"));
                    false
                } else {
                    self.generate_implied_end_tags();
                    if !self.current_element_named(&name) {
                        self.error(Borrowed("Unexpected open elements at cell end"));
                    }
                    self.pop_stack_to_close(&[&*name]);
                    self.clear_formatting_elements_to_last_marker();
                    self.set_mode(InsertionMode::InRow);
                    true
                }
            },
            TagToken(ref tag)
                if tag.kind == StartTag
                    && matches!(
                        &*tag.name,
                        "caption"
                            | "col"
                            | "colgroup"
                            | "tbody"
                            | "td"
                            | "tfoot"
                            | "th"
                            | "thead"
                            | "tr"
                    ) =>
            {
                if !(self.in_table_scope("td") || self.in_table_scope("th")) {
                    self.error(Borrowed("Unexpected table tag with no cell open"));
                    false
                } else {
                    self.close_cell();
                    self.process(token)
                }
            },
            TagToken(ref tag)
                if tag.kind == EndTag
                    && matches!(&*tag.name, "body" | "caption" | "col" | "colgroup" | "html") =>
            {
                self.unexpected(&token)
            },
            TagToken(ref tag)
                if tag.kind == EndTag
                    && matches!(&*tag.name, "table" | "tbody" | "tfoot" | "thead" | "tr") =>
            {
                let name = tag.name.clone();
                if !self.in_table_scope(&name) {
                    self.error(Borrowed("Unexpected end tag with no matching element"));
                    false
                } else {
                    self.close_cell();
                    self.process(token)
                }
            },
            token => self.step(InsertionMode::InBody, token),
        }
    }

    fn close_cell(&mut self) {
        if self.in_table_scope("td") {
            self.process_end_tag("td");
        } else {
            self.process_end_tag("th");
        }
    }

    //§ parsing-main-inselect
    fn step_in_select(&mut self, token: Token) -> bool {
        match token {
            CharacterTokens(text) => {
                if is_null_run(&text) {
                    self.error(Borrowed("Null character in select"));
                    return false;
                }
                self.insert_characters(&text);
                true
            },
            CommentToken(text) => {
                self.insert_comment(text);
                true
            },
            DoctypeToken(_) => self.unexpected(&token),
            TagToken(tag) => match tag.kind {
                StartTag => match &*tag.name.clone() {
                    "html" => self.step(InsertionMode::InBody, TagToken(tag)),
                    "option" => {
                        if self.current_element_named("option") {
                            self.process_end_tag("option");
                        }
                        self.insert_element_for(&tag);
                        true
                    },
                    "optgroup" => {
                        if self.current_element_named("option") {
                            self.process_end_tag("option");
                        } else if self.current_element_named("optgroup") {
                            self.process_end_tag("optgroup");
                        }
                        self.insert_element_for(&tag);
                        true
                    },
                    "select" => {
                        self.error(Borrowed("Unexpected nested <select>"));
                        self.process_end_tag("select")
                    },
                    "input" | "keygen" | "textarea" => {
                        self.error(Borrowed("Unexpected input tag in select"));
                        if !self.in_select_scope("select") {
                            false
                        } else {
                            self.process_end_tag("select");
                            self.process(TagToken(tag))
                        }
                    },
                    "script" => self.step(InsertionMode::InHead, TagToken(tag)),
                    _ => {
                        self.error(Borrowed("Unexpected start tag in select"));
                        false
                    },
                },
                EndTag => match &*tag.name.clone() {
                    "option" => {
                        if self.current_element_named("option") {
                            self.pop();
                            true
                        } else {
                            self.error(Borrowed("Unexpected </option> in select"));
                            false
                        }
                    },
                    "optgroup" => {
                        if self.current_element_named("option") && self.second_on_stack_named("optgroup")
                        {
                            self.process_end_tag("option");
                        }
                        if self.current_element_named("optgroup") {
                            self.pop();
                            true
                        } else {
                            self.error(Borrowed("Unexpected </optgroup> in select"));
                            false
                        }
                    },
                    "select" => {
                        if !self.in_select_scope("select") {
                            self.error(Borrowed("Unexpected </select> with no select in scope"));
                            false
                        } else {
                            self.pop_stack_to_close(&["select"]);
                            self.reset_insertion_mode();
                            true
                        }
                    },
                    _ => {
                        self.error(Borrowed("Unexpected end tag in select"));
                        false
                    },
                },
            },
            EOFToken => {
                if !self.current_element_named("html") {
                    self.error(Borrowed("Unexpected EOF in select"));
                }
                true
            },
        }
    }

    //§ parsing-main-inselectintable
    fn step_in_select_in_table(&mut self, token: Token) -> bool {
        match token {
            TagToken(ref tag)
                if tag.kind == StartTag
                    && matches!(
                        &*tag.name,
                        "caption" | "table" | "tbody" | "tfoot" | "thead" | "tr" | "td" | "th"
                    ) =>
            {
                self.error(Borrowed("Unexpected table tag inside select"));
                self.process_end_tag("select");
                self.process(token)
            },
            TagToken(ref tag)
                if tag.kind == EndTag
                    && matches!(
                        &*tag.name,
                        "caption" | "table" | "tbody" | "tfoot" | "thead" | "tr" | "td" | "th"
                    ) =>
            {
                self.error(Borrowed("Unexpected table end tag inside select"));
                let name = tag.name.clone();
                if self.in_table_scope(&name) {
                    self.process_end_tag("select");
                    self.process(token)
                } else {
                    false
                }
            },
            token => self.step(InsertionMode::InSelect, token),
        }
    }

    //§ parsing-main-afterbody
    fn step_after_body(&mut self, token: Token) -> bool {
        match token {
            CharacterTokens(ref text) if is_all_whitespace(text) => {
                self.step(InsertionMode::InBody, token)
            },
            CommentToken(text) => {
                // Goes after the body, inside <html>.
                self.append_comment_to_root(text);
                true
            },
            DoctypeToken(_) => self.unexpected(&token),
            TagToken(ref tag) if tag.kind == StartTag && &*tag.name == "html" => {
                self.step(InsertionMode::InBody, token)
            },
            TagToken(ref tag) if tag.kind == EndTag && &*tag.name == "html" => {
                if self.is_fragment() {
                    self.unexpected(&token)
                } else {
                    self.set_mode(InsertionMode::AfterAfterBody);
                    true
                }
            },
            EOFToken => true,
            token => {
                self.error(Borrowed("Unexpected token after body"));
                self.set_mode(InsertionMode::InBody);
                self.step(InsertionMode::InBody, token)
            },
        }
    }

    //§ parsing-main-inframeset
    fn step_in_frameset(&mut self, token: Token) -> bool {
        match token {
            CharacterTokens(ref text) if is_all_whitespace(text) => {
                let text = text.clone();
                self.insert_characters(&text);
                true
            },
            CommentToken(text) => {
                self.insert_comment(text);
                true
            },
            DoctypeToken(_) => self.unexpected(&token),
            TagToken(tag) => match tag.kind {
                StartTag => match &*tag.name.clone() {
                    "html" => self.step(InsertionMode::InBody, TagToken(tag)),
                    "frameset" => {
                        self.insert_element_for(&tag);
                        true
                    },
                    "frame" => {
                        self.insert_empty(&tag);
                        true
                    },
                    "noframes" => self.step(InsertionMode::InHead, TagToken(tag)),
                    _ => self.unexpected(&TagToken(tag)),
                },
                EndTag => match &*tag.name.clone() {
                    "frameset" => {
                        if self.current_element_named("html") {
                            self.error(Borrowed("Unexpected </frameset> at root"));
                            false
                        } else {
                            self.pop();
                            if !self.is_fragment() && !self.current_element_named("frameset") {
                                self.set_mode(InsertionMode::AfterFrameset);
                            }
                            true
                        }
                    },
                    _ => self.unexpected(&TagToken(tag)),
                },
            },
            EOFToken => {
                if !self.current_element_named("html") {
                    self.error(Borrowed("Unexpected EOF in frameset"));
                }
                true
            },
            token => self.unexpected(&token),
        }
    }

    //§ parsing-main-afterframeset
    fn step_after_frameset(&mut self, token: Token) -> bool {
        match token {
            CharacterTokens(ref text) if is_all_whitespace(text) => {
                let text = text.clone();
                self.insert_characters(&text);
                true
            },
            CommentToken(text) => {
                self.insert_comment(text);
                true
            },
            DoctypeToken(_) => self.unexpected(&token),
            TagToken(ref tag) if tag.kind == StartTag && &*tag.name == "html" => {
                self.step(InsertionMode::InBody, token)
            },
            TagToken(ref tag) if tag.kind == EndTag && &*tag.name == "html" => {
                self.set_mode(InsertionMode::AfterAfterFrameset);
                true
            },
            TagToken(ref tag) if tag.kind == StartTag && &*tag.name == "noframes" => {
                self.step(InsertionMode::InHead, token)
            },
            EOFToken => true,
            token => self.unexpected(&token),
        }
    }

    //§ the-after-after-body-insertion-mode
    fn step_after_after_body(&mut self, token: Token) -> bool {
        match token {
            CommentToken(text) => {
                self.append_comment_to_doc(text);
                true
            },
            DoctypeToken(_) => self.step(InsertionMode::InBody, token),
            CharacterTokens(ref text) if is_all_whitespace(text) => {
                self.step(InsertionMode::InBody, token)
            },
            TagToken(ref tag) if tag.kind == StartTag && &*tag.name == "html" => {
                self.step(InsertionMode::InBody, token)
            },
            EOFToken => true,
            token => {
                self.error(Borrowed("Unexpected token after document end"));
                self.set_mode(InsertionMode::InBody);
                self.step(InsertionMode::InBody, token)
            },
        }
    }

    //§ the-after-after-frameset-insertion-mode
    fn step_after_after_frameset(&mut self, token: Token) -> bool {
        match token {
            CommentToken(text) => {
                self.append_comment_to_doc(text);
                true
            },
            DoctypeToken(_) => self.step(InsertionMode::InBody, token),
            CharacterTokens(ref text) if is_all_whitespace(text) => {
                self.step(InsertionMode::InBody, token)
            },
            TagToken(ref tag) if tag.kind == StartTag && &*tag.name == "html" => {
                self.step(InsertionMode::InBody, token)
            },
            TagToken(ref tag) if tag.kind == StartTag && &*tag.name == "noframes" => {
                self.step(InsertionMode::InHead, token)
            },
            EOFToken => true,
            token => self.unexpected(&token),
        }
    }

    //§ helpers used only by the rules

    fn close_p_if_in_button_scope(&mut self) {
        if self.in_button_scope("p") {
            self.process_end_tag("p");
        }
    }
}
