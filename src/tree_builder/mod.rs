// Copyright 2026 The tagsoup Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The HTML tree builder.
//!
//! Drives the tokenizer, dispatches each token to the current insertion
//! mode (see `rules`), and mutates the document tree. All of the parsing
//! process's mutable state lives here: the open-elements stack, the active
//! formatting list, the element pointers, the frameset-ok and foster flags.
//! Only the durable outputs (quirks mode, base URI, the tree itself) end up
//! on the document.

use std::borrow::Cow::{self, Borrowed};
use std::mem;

use log::debug;
use mac::unwrap_or_return;
use tendril::StrTendril;

use self::tag_sets::*;
use self::types::{FormatEntry, InsertionMode};
use crate::dom::{self, same_node, Handle, Node, NodeData};
use crate::interface::{Attribute, LocalName, ParseErrorList, QuirksMode};
use crate::tokenizer::states::{self, RawKind};
use crate::tokenizer::{Tag, Token, TokenizerOpts};
use crate::tokenizer::{TagToken, Tokenizer};

pub(crate) mod tag_sets;

mod data;
mod rules;
pub(crate) mod types;

/// Bound on the furthest-block scan inside the adoption agency, so
/// pathological stacks cannot turn one end tag into quadratic work.
const MAX_ADOPTION_SCAN: usize = 64;

/// The HTML tree builder.
pub struct TreeBuilder {
    /// The tokenizer this builder pulls tokens from.
    pub(crate) tokenizer: Tokenizer,

    /// The document node.
    doc: Handle,

    /// Insertion mode.
    mode: InsertionMode,

    /// Original insertion mode, saved across Text / InTableText excursions.
    original_mode: Option<InsertionMode>,

    /// Stack of open elements, most recently added at end.
    open_elems: Vec<Handle>,

    /// List of active formatting elements.
    active_formatting: Vec<FormatEntry>,

    //§ the-element-pointers
    /// Head element pointer.
    head_elem: Option<Handle>,

    /// Form element pointer.
    form_elem: Option<Handle>,
    //§ END

    /// Frameset-ok flag.
    frameset_ok: bool,

    /// Is foster parenting enabled?
    foster_inserts: bool,

    /// Ignore a following U+000A LINE FEED, after `<pre>` and friends.
    ignore_lf: bool,

    /// Character tokens buffered while deciding whether table text must be
    /// foster-parented.
    pending_table_text: Vec<StrTendril>,

    /// The context element for the fragment parsing algorithm.
    context_elem: Option<Handle>,

    /// Has a `<base href>` already claimed the document base URI?
    base_uri_set_from_doc: bool,

    quirks_mode: QuirksMode,
}

impl TreeBuilder {
    /// A tree builder for a full-document parse.
    pub fn new(input: &str, base_uri: &str, errors: ParseErrorList) -> TreeBuilder {
        let tokenizer = Tokenizer::new(input, errors, TokenizerOpts::default());
        TreeBuilder {
            tokenizer,
            doc: Node::new_document(base_uri),
            mode: InsertionMode::Initial,
            original_mode: None,
            open_elems: vec![],
            active_formatting: vec![],
            head_elem: None,
            form_elem: None,
            frameset_ok: true,
            foster_inserts: false,
            ignore_lf: false,
            pending_table_text: vec![],
            context_elem: None,
            base_uri_set_from_doc: false,
            quirks_mode: QuirksMode::NoQuirks,
        }
    }

    /// A tree builder for the fragment parsing algorithm. The context
    /// element name selects the initial tokenizer state and insertion mode;
    /// an invisible `<html>` wrapper roots the stack.
    pub fn new_for_fragment(
        input: &str,
        context: &str,
        base_uri: &str,
        errors: ParseErrorList,
    ) -> TreeBuilder {
        let context_name = context.to_ascii_lowercase();
        let opts = TokenizerOpts {
            initial_state: Some(tokenizer_state_for_context(&context_name)),
            last_start_tag_name: Some(context_name.clone()),
        };
        let tokenizer = Tokenizer::new(input, errors, opts);

        let context_elem = Node::new_element(LocalName::from(&*context_name), vec![]);
        let mut tb = TreeBuilder {
            tokenizer,
            doc: Node::new_document(base_uri),
            mode: InsertionMode::Initial,
            original_mode: None,
            open_elems: vec![],
            active_formatting: vec![],
            head_elem: None,
            form_elem: None,
            frameset_ok: true,
            foster_inserts: false,
            ignore_lf: false,
            pending_table_text: vec![],
            context_elem: Some(context_elem.clone()),
            base_uri_set_from_doc: false,
            quirks_mode: QuirksMode::NoQuirks,
        };

        let root = Node::new_element(LocalName::from("html"), vec![]);
        dom::append(&tb.doc, root.clone());
        tb.open_elems.push(root);
        if context_name == "form" {
            tb.form_elem = Some(context_elem);
        }
        tb.reset_insertion_mode();
        tb
    }

    /// Pull tokens until EOF and build the tree.
    pub fn run(&mut self) {
        loop {
            let token = self.tokenizer.read();
            let at_eof = matches!(token, Token::EOFToken);
            self.process(token);
            if at_eof {
                break;
            }
        }
        self.open_elems.clear();
        self.active_formatting.clear();
    }

    pub fn document(&self) -> Handle {
        self.doc.clone()
    }

    pub fn quirks_mode(&self) -> QuirksMode {
        self.quirks_mode
    }

    pub fn take_errors(&mut self) -> ParseErrorList {
        self.tokenizer.take_errors()
    }

    /// The children of the fragment root, detached.
    pub fn take_fragment_nodes(&mut self) -> Vec<Handle> {
        let root = self
            .doc
            .children
            .borrow()
            .first()
            .cloned()
            .expect("no fragment root");
        let nodes = mem::take(&mut *root.children.borrow_mut());
        for node in &nodes {
            node.parent.set(None);
        }
        nodes
    }

    /// Dispatch one token under the current insertion mode. Returns `false`
    /// when the token was ignored.
    pub fn process(&mut self, token: Token) -> bool {
        let ignore_lf = mem::replace(&mut self.ignore_lf, false);
        let token = match token {
            Token::CharacterTokens(mut text) => {
                if ignore_lf && text.starts_with('\n') {
                    text.pop_front(1);
                }
                if text.is_empty() {
                    return true;
                }
                Token::CharacterTokens(text)
            },
            t => t,
        };
        let mode = self.mode;
        self.step(mode, token)
    }

    //§ parse errors

    pub(crate) fn error(&mut self, msg: Cow<'static, str>) {
        self.tokenizer.parse_error(msg);
    }

    /// Record "token not allowed here" and report the token as ignored.
    pub(crate) fn unexpected(&mut self, _token: &Token) -> bool {
        self.error(Borrowed("Unexpected token"));
        false
    }

    //§ synthetic tokens

    pub(crate) fn process_start_tag(&mut self, name: &str) -> bool {
        self.process(TagToken(Tag::start(name)))
    }

    pub(crate) fn process_start_tag_attrs(&mut self, name: &str, attrs: Vec<Attribute>) -> bool {
        let mut tag = Tag::start(name);
        tag.attrs = attrs;
        self.process(TagToken(tag))
    }

    pub(crate) fn process_end_tag(&mut self, name: &str) -> bool {
        self.process(TagToken(Tag::end(name)))
    }

    //§ the stack of open elements

    pub(crate) fn current_element(&self) -> Handle {
        self.open_elems.last().expect("no current element").clone()
    }

    pub(crate) fn current_element_named(&self, name: &str) -> bool {
        !self.open_elems.is_empty() && self.current_element().is_element_named(name)
    }

    pub(crate) fn push(&mut self, el: &Handle) {
        self.open_elems.push(el.clone());
    }

    pub(crate) fn pop(&mut self) -> Handle {
        self.open_elems.pop().expect("no current element")
    }

    pub(crate) fn on_stack(&self, el: &Handle) -> bool {
        self.open_elems.iter().any(|n| same_node(n, el))
    }

    pub(crate) fn html_root(&self) -> Handle {
        self.open_elems[0].clone()
    }

    pub(crate) fn stack_len(&self) -> usize {
        self.open_elems.len()
    }

    pub(crate) fn stack_item(&self, index: usize) -> Handle {
        self.open_elems[index].clone()
    }

    pub(crate) fn truncate_stack_to_root(&mut self) {
        self.open_elems.truncate(1);
    }

    /// A top-to-bottom snapshot of the stack, so callers can mutate while
    /// walking.
    pub(crate) fn stack_top_down(&self) -> Vec<Handle> {
        self.open_elems.iter().rev().cloned().collect()
    }

    pub(crate) fn second_on_stack_named(&self, name: &str) -> bool {
        let len = self.open_elems.len();
        len >= 2 && self.open_elems[len - 2].is_element_named(name)
    }

    pub(crate) fn get_from_stack(&self, name: &str) -> Option<Handle> {
        self.open_elems
            .iter()
            .rev()
            .find(|n| n.is_element_named(name))
            .cloned()
    }

    pub(crate) fn remove_from_stack(&mut self, el: &Handle) {
        if let Some(pos) = self.open_elems.iter().rposition(|n| same_node(n, el)) {
            self.open_elems.remove(pos);
        }
    }

    /// Pop until (and including) the first element named in `names`.
    pub(crate) fn pop_stack_to_close(&mut self, names: &[&str]) {
        while let Some(el) = self.open_elems.pop() {
            if names.iter().any(|n| el.is_element_named(n)) {
                break;
            }
        }
    }

    /// Pop until, but excluding, the first element named `name`.
    pub(crate) fn pop_stack_to_before(&mut self, name: &str) {
        while let Some(el) = self.open_elems.last() {
            if el.is_element_named(name) {
                break;
            }
            self.open_elems.pop();
        }
    }

    /// Pop elements until the current one is in `context`.
    pub(crate) fn clear_stack_to_context(&mut self, context: fn(&str) -> bool) {
        while let Some(el) = self.open_elems.last() {
            if context(el.node_name()) {
                break;
            }
            self.open_elems.pop();
        }
    }

    pub(crate) fn clear_stack_to_table_context(&mut self) {
        self.clear_stack_to_context(table_context);
    }

    pub(crate) fn clear_stack_to_table_body_context(&mut self) {
        self.clear_stack_to_context(table_body_context);
    }

    pub(crate) fn clear_stack_to_table_row_context(&mut self) {
        self.clear_stack_to_context(table_row_context);
    }

    pub(crate) fn is_special(el: &Handle) -> bool {
        special_tag(el.node_name())
    }

    //§ has-an-element-in-scope
    fn in_specific_scope<P>(&self, barrier: fn(&str) -> bool, pred: P) -> bool
    where
        P: Fn(&Handle) -> bool,
    {
        for node in self.open_elems.iter().rev() {
            if pred(node) {
                return true;
            }
            if barrier(node.node_name()) {
                return false;
            }
        }
        false
    }

    pub(crate) fn in_scope_named(&self, name: &str) -> bool {
        self.in_specific_scope(default_scope, |el| el.is_element_named(name))
    }

    pub(crate) fn in_scope_any(&self, names: &[&str]) -> bool {
        self.in_specific_scope(default_scope, |el| {
            names.iter().any(|n| el.is_element_named(n))
        })
    }

    pub(crate) fn in_scope_el(&self, target: &Handle) -> bool {
        self.in_specific_scope(default_scope, |el| same_node(el, target))
    }

    pub(crate) fn in_button_scope(&self, name: &str) -> bool {
        self.in_specific_scope(button_scope, |el| el.is_element_named(name))
    }

    pub(crate) fn in_list_item_scope(&self, name: &str) -> bool {
        self.in_specific_scope(list_item_scope, |el| el.is_element_named(name))
    }

    pub(crate) fn in_table_scope(&self, name: &str) -> bool {
        self.in_specific_scope(table_scope, |el| el.is_element_named(name))
    }

    pub(crate) fn in_select_scope(&self, name: &str) -> bool {
        self.in_specific_scope(select_scope_barrier, |el| el.is_element_named(name))
    }

    //§ closing-elements-that-have-implied-end-tags
    pub(crate) fn generate_implied_end_tags(&mut self) {
        while cursory_implied_end(self.current_element().node_name()) {
            self.pop();
        }
    }

    pub(crate) fn generate_implied_end_except(&mut self, except: &str) {
        loop {
            let name = self.current_element().node_name().to_string();
            if name == except || !cursory_implied_end(&name) {
                break;
            }
            self.pop();
        }
    }

    //§ creating-and-inserting-nodes

    /// Insert a node at the appropriate place: under the target, or at the
    /// foster-parent location when foster inserts are enabled and the
    /// target is table-structural.
    fn insert_node(&mut self, node: Handle, override_target: Option<Handle>) {
        if self.open_elems.is_empty() {
            dom::append(&self.doc, node);
            return;
        }
        let target = override_target.unwrap_or_else(|| self.current_element());
        if self.foster_inserts && table_structural(target.node_name()) {
            self.insert_in_foster_parent(node);
        } else {
            dom::append(&target, node);
        }
    }

    //§ foster-parenting
    pub(crate) fn insert_in_foster_parent(&mut self, node: Handle) {
        let last_table = self.get_from_stack("table");
        match last_table {
            Some(table) => {
                if table.parent().is_some() {
                    dom::insert_before(&table, node);
                } else {
                    let index = self
                        .open_elems
                        .iter()
                        .rposition(|n| same_node(n, &table))
                        .expect("table not on stack");
                    dom::append(&self.open_elems[index - 1], node);
                }
            },
            None => {
                let root = self.open_elems[0].clone();
                dom::append(&root, node);
            },
        }
    }

    pub(crate) fn insert_element_for(&mut self, tag: &Tag) -> Handle {
        let el = Node::new_element(tag.name.clone(), tag.attrs.clone());
        self.insert_node(el.clone(), None);
        self.open_elems.push(el.clone());
        el
    }

    /// Insert a synthetic element with no attributes.
    pub(crate) fn insert_phantom(&mut self, name: &str) -> Handle {
        let el = Node::new_element(LocalName::from(name), vec![]);
        self.insert_node(el.clone(), None);
        self.open_elems.push(el.clone());
        el
    }

    /// Insert a void element: appended but never pushed. Acknowledges a
    /// self-closing flag.
    pub(crate) fn insert_empty(&mut self, tag: &Tag) -> Handle {
        let el = Node::new_element(tag.name.clone(), tag.attrs.clone());
        self.insert_node(el.clone(), None);
        if tag.self_closing {
            self.tokenizer.acknowledge_self_closing_flag();
        }
        el
    }

    /// Insert a `<form>`, tracking the form element pointer.
    pub(crate) fn insert_form(&mut self, tag: &Tag, on_stack: bool) -> Handle {
        let el = Node::new_element(tag.name.clone(), tag.attrs.clone());
        self.insert_node(el.clone(), None);
        self.form_elem = Some(el.clone());
        if on_stack {
            self.open_elems.push(el.clone());
        }
        el
    }

    pub(crate) fn insert_characters(&mut self, text: &str) {
        if self.open_elems.is_empty() {
            // Character data with nothing open is dropped.
            return;
        }
        let target = self.current_element();
        if self.foster_inserts && table_structural(target.node_name()) {
            // Foster-parented text becomes its own node; no coalescing.
            let node = Node::new_text(StrTendril::from(text));
            self.insert_in_foster_parent(node);
            return;
        }
        let appended = match target.children.borrow().last() {
            Some(prev) => dom::append_to_existing_text(prev, text),
            None => false,
        };
        if !appended {
            dom::append(&target, Node::new_text(StrTendril::from(text)));
        }
    }

    pub(crate) fn insert_comment(&mut self, text: StrTendril) {
        let node = Node::new_comment(text);
        self.insert_node(node, None);
    }

    pub(crate) fn append_comment_to_doc(&mut self, text: StrTendril) {
        let node = Node::new_comment(text);
        dom::append(&self.doc, node);
    }

    pub(crate) fn append_comment_to_root(&mut self, text: StrTendril) {
        let node = Node::new_comment(text);
        let root = self.open_elems[0].clone();
        dom::append(&root, node);
    }

    pub(crate) fn append_doctype_to_doc(&mut self, name: StrTendril, public: StrTendril, system: StrTendril) {
        let node = Node::new(NodeData::Doctype {
            name,
            public_id: public,
            system_id: system,
        });
        dom::append(&self.doc, node);
    }

    /// Create the root `<html>` element from a tag's attributes.
    pub(crate) fn create_root(&mut self, attrs: Vec<Attribute>) {
        let el = Node::new_element(LocalName::from("html"), attrs);
        dom::append(&self.doc, el.clone());
        self.open_elems.push(el);
    }

    /// The first `<base href>` wins the document base URI.
    pub(crate) fn maybe_set_base_uri(&mut self, el: &Handle) {
        if self.base_uri_set_from_doc {
            return;
        }
        let href = unwrap_or_return!(el.get_attr("href"), ());
        if let NodeData::Document { ref base_uri, .. } = self.doc.data {
            *base_uri.borrow_mut() = StrTendril::from(&*href);
        }
        self.base_uri_set_from_doc = true;
    }

    /// Merge attributes from a duplicate `<html>`/`<body>` tag; existing
    /// keys win.
    pub(crate) fn merge_attrs(&mut self, el: &Handle, attrs: &[Attribute]) {
        for attr in attrs {
            if !el.has_attr(&attr.name) {
                el.set_attr(&attr.name, attr.value.clone());
            }
        }
    }

    //§ document state

    pub(crate) fn set_quirks_mode(&mut self, mode: QuirksMode) {
        self.quirks_mode = mode;
        if let NodeData::Document {
            ref quirks_mode, ..
        } = self.doc.data
        {
            quirks_mode.set(mode);
        }
    }

    pub(crate) fn is_fragment(&self) -> bool {
        self.context_elem.is_some()
    }

    pub(crate) fn frameset_ok(&self) -> bool {
        self.frameset_ok
    }

    pub(crate) fn set_frameset_ok(&mut self, ok: bool) {
        self.frameset_ok = ok;
    }

    pub(crate) fn set_foster_inserts(&mut self, foster: bool) {
        self.foster_inserts = foster;
    }

    pub(crate) fn set_ignore_lf(&mut self) {
        self.ignore_lf = true;
    }

    pub(crate) fn head_elem(&self) -> Option<Handle> {
        self.head_elem.clone()
    }

    pub(crate) fn set_head_elem(&mut self, el: Handle) {
        self.head_elem = Some(el);
    }

    pub(crate) fn form_elem(&self) -> Option<Handle> {
        self.form_elem.clone()
    }

    pub(crate) fn set_form_elem(&mut self, el: Option<Handle>) {
        self.form_elem = el;
    }

    pub(crate) fn new_pending_table_characters(&mut self) {
        self.pending_table_text.clear();
    }

    pub(crate) fn push_pending_table_characters(&mut self, text: StrTendril) {
        self.pending_table_text.push(text);
    }

    pub(crate) fn take_pending_table_characters(&mut self) -> Vec<StrTendril> {
        mem::take(&mut self.pending_table_text)
    }

    //§ parsing-elements-that-contain-only-text
    pub(crate) fn parse_raw_data(&mut self, tag: &Tag, kind: RawKind) {
        self.insert_element_for(tag);
        self.tokenizer.transition(states::RawData(kind));
        self.mark_insertion_mode();
        self.mode = InsertionMode::Text;
    }

    pub(crate) fn mark_insertion_mode(&mut self) {
        self.original_mode = Some(self.mode);
    }

    pub(crate) fn original_state(&self) -> InsertionMode {
        self.original_mode.expect("no original insertion mode")
    }

    //§ resetting-the-insertion-mode-appropriately
    pub(crate) fn reset_insertion_mode(&mut self) {
        self.mode = self.appropriate_insertion_mode();
    }

    fn appropriate_insertion_mode(&self) -> InsertionMode {
        use self::types::InsertionMode::*;

        for (i, node) in self.open_elems.iter().enumerate().rev() {
            let last = i == 0;
            let node = if last {
                self.context_elem.as_ref().unwrap_or(node)
            } else {
                node
            };
            match node.node_name() {
                "select" => {
                    for ancestor in self.open_elems[..i].iter().rev() {
                        if ancestor.is_element_named("table") {
                            return InSelectInTable;
                        }
                    }
                    return InSelect;
                },
                "td" | "th" if !last => return InCell,
                "tr" => return InRow,
                "tbody" | "thead" | "tfoot" => return InTableBody,
                "caption" => return InCaption,
                "colgroup" => return InColumnGroup,
                "table" => return InTable,
                "head" if !last => return InHead,
                "body" => return InBody,
                "frameset" => return InFrameset,
                "html" => {
                    return match self.head_elem {
                        Some(_) => AfterHead,
                        None => BeforeHead,
                    };
                },
                _ => (),
            }
            if last {
                return InBody;
            }
        }
        InBody
    }

    //§ the-list-of-active-formatting-elements

    pub(crate) fn insert_marker_to_formatting_elements(&mut self) {
        self.active_formatting.push(FormatEntry::Marker);
    }

    /// Push with the Noah's-Ark clause: at most three entries with the same
    /// name and attribute list since the last marker; the oldest extra is
    /// dropped.
    pub(crate) fn push_active_formatting_elements(&mut self, el: Handle, tag: &Tag) {
        let mut matched = 0;
        let mut earliest = None;
        for (i, entry) in self.active_formatting.iter().enumerate().rev() {
            match entry {
                FormatEntry::Marker => break,
                FormatEntry::Element(_, t) => {
                    if t.name == tag.name && t.attrs == tag.attrs {
                        matched += 1;
                        earliest = Some(i);
                    }
                },
            }
        }
        if matched >= 3 {
            if let Some(i) = earliest {
                self.active_formatting.remove(i);
            }
        }
        self.active_formatting
            .push(FormatEntry::Element(el, tag.clone()));
    }

    pub(crate) fn clear_formatting_elements_to_last_marker(&mut self) {
        while let Some(entry) = self.active_formatting.pop() {
            if matches!(entry, FormatEntry::Marker) {
                break;
            }
        }
    }

    pub(crate) fn position_in_active_formatting(&self, el: &Handle) -> Option<usize> {
        self.active_formatting.iter().position(|entry| match entry {
            FormatEntry::Marker => false,
            FormatEntry::Element(h, _) => same_node(h, el),
        })
    }

    pub(crate) fn is_in_active_formatting_elements(&self, el: &Handle) -> bool {
        self.position_in_active_formatting(el).is_some()
    }

    pub(crate) fn remove_from_active_formatting_elements(&mut self, el: &Handle) {
        if let Some(pos) = self.position_in_active_formatting(el) {
            self.active_formatting.remove(pos);
        }
    }

    /// Swap the entry for `old` with a fresh element and its tag.
    pub(crate) fn replace_active_formatting_element(&mut self, old: &Handle, entry: FormatEntry) {
        let index = self
            .position_in_active_formatting(old)
            .expect("element not found in active formatting elements");
        self.active_formatting[index] = entry;
    }

    /// The most recent formatting element named `name`, back to the last
    /// marker.
    pub(crate) fn get_active_formatting_element(&self, name: &str) -> Option<Handle> {
        for entry in self.active_formatting.iter().rev() {
            match entry {
                FormatEntry::Marker => return None,
                FormatEntry::Element(h, t) => {
                    if &*t.name == name {
                        return Some(h.clone());
                    }
                },
            }
        }
        None
    }

    fn is_marker_or_open(&self, entry: &FormatEntry) -> bool {
        match entry {
            FormatEntry::Marker => true,
            FormatEntry::Element(node, _) => self.on_stack(node),
        }
    }

    /// <https://html.spec.whatwg.org/#reconstruct-the-active-formatting-elements>
    ///
    /// Idempotent: a second call right after finds the last entry open and
    /// returns immediately.
    pub(crate) fn reconstruct_formatting_elements(&mut self) {
        let last = match self.active_formatting.last() {
            Some(entry) => entry,
            None => return,
        };
        if self.is_marker_or_open(last) {
            return;
        }

        // Rewind to the most recent entry that is a marker or still open.
        let mut entry_index = self.active_formatting.len() - 1;
        while entry_index > 0 {
            entry_index -= 1;
            if self.is_marker_or_open(&self.active_formatting[entry_index]) {
                entry_index += 1;
                break;
            }
        }

        // Create: re-open every entry from there to the end.
        loop {
            let tag = match &self.active_formatting[entry_index] {
                FormatEntry::Element(_, t) => t.clone(),
                FormatEntry::Marker => {
                    unreachable!("marker during formatting element reconstruction")
                },
            };
            let new_element = self.insert_element_for(&tag);
            self.active_formatting[entry_index] = FormatEntry::Element(new_element, tag);
            if entry_index == self.active_formatting.len() - 1 {
                break;
            }
            entry_index += 1;
        }
    }

    //§ the-adoption-agency-algorithm

    pub(crate) fn adoption_agency(&mut self, subject: &str) {
        // Shortcut: the subject is the current node and not in the list.
        if self.current_element_named(subject)
            && !self.is_in_active_formatting_elements(&self.current_element())
        {
            self.pop();
            return;
        }

        for _ in 0..8 {
            let fmt_entry = self.active_formatting.iter().enumerate().rev().find_map(
                |(i, entry)| match entry {
                    FormatEntry::Marker => Some(None),
                    FormatEntry::Element(h, t) if &*t.name == subject => {
                        Some(Some((i, h.clone(), t.clone())))
                    },
                    _ => None,
                },
            );
            let (fmt_index, fmt_elem, fmt_tag) = match fmt_entry.flatten() {
                Some(found) => found,
                None => {
                    self.any_other_end_tag(subject);
                    return;
                },
            };

            let fmt_stack_index = match self
                .open_elems
                .iter()
                .rposition(|n| same_node(n, &fmt_elem))
            {
                Some(i) => i,
                None => {
                    self.error(Borrowed("Formatting element not open"));
                    self.active_formatting.remove(fmt_index);
                    return;
                },
            };

            if !self.in_scope_el(&fmt_elem) {
                self.error(Borrowed("Formatting element not in scope"));
                return;
            }

            if !same_node(&self.current_element(), &fmt_elem) {
                self.error(Borrowed("Formatting element not current node"));
            }

            // The furthest block: the lowest special element above the
            // formatting element, with a bounded scan.
            let maybe_furthest_block = self
                .open_elems
                .iter()
                .enumerate()
                .skip(fmt_stack_index)
                .take(MAX_ADOPTION_SCAN)
                .find(|(_, el)| Self::is_special(el))
                .map(|(i, el)| (i, el.clone()));

            let (furthest_block_index, furthest_block) = match maybe_furthest_block {
                Some(found) => found,
                None => {
                    self.open_elems.truncate(fmt_stack_index);
                    self.active_formatting.remove(fmt_index);
                    return;
                },
            };

            let common_ancestor = self.open_elems[fmt_stack_index - 1].clone();

            enum Bookmark {
                Replace(Handle),
                InsertAfter(Handle),
            }
            let mut bookmark = Bookmark::Replace(fmt_elem.clone());

            // Walk up from the furthest block towards the formatting
            // element, rebuilding the intervening formatting elements.
            let mut node_index = furthest_block_index;
            let mut last_node = furthest_block.clone();
            let mut inner_counter = 0;
            loop {
                inner_counter += 1;
                node_index -= 1;
                let mut node = self.open_elems[node_index].clone();

                if same_node(&node, &fmt_elem) {
                    break;
                }

                if inner_counter > 3 {
                    if let Some(pos) = self.position_in_active_formatting(&node) {
                        self.active_formatting.remove(pos);
                    }
                    self.open_elems.remove(node_index);
                    continue;
                }

                let node_fmt_index = match self.position_in_active_formatting(&node) {
                    Some(i) => i,
                    None => {
                        self.open_elems.remove(node_index);
                        continue;
                    },
                };

                let tag = match &self.active_formatting[node_fmt_index] {
                    FormatEntry::Element(_, t) => t.clone(),
                    FormatEntry::Marker => unreachable!("marker during adoption agency"),
                };
                let new_element = Node::new_element(tag.name.clone(), tag.attrs.clone());
                self.open_elems[node_index] = new_element.clone();
                self.active_formatting[node_fmt_index] =
                    FormatEntry::Element(new_element.clone(), tag);
                node = new_element;

                if same_node(&last_node, &furthest_block) {
                    bookmark = Bookmark::InsertAfter(node.clone());
                }

                dom::remove_from_parent(&last_node);
                dom::append(&node, last_node.clone());
                last_node = node;
            }

            // Place the assembled chain under the common ancestor, foster
            // parenting if the ancestor is table-structural.
            dom::remove_from_parent(&last_node);
            if table_structural(common_ancestor.node_name()) {
                self.insert_in_foster_parent(last_node);
            } else {
                dom::append(&common_ancestor, last_node);
            }

            // A fresh element adopts the furthest block's children.
            let new_element = Node::new_element(fmt_tag.name.clone(), fmt_tag.attrs.clone());
            dom::reparent_children(&furthest_block, &new_element);
            dom::append(&furthest_block, new_element.clone());

            match bookmark {
                Bookmark::Replace(to_replace) => {
                    self.replace_active_formatting_element(
                        &to_replace,
                        FormatEntry::Element(new_element.clone(), fmt_tag),
                    );
                },
                Bookmark::InsertAfter(previous) => {
                    let index = self
                        .position_in_active_formatting(&previous)
                        .expect("bookmark not found in active formatting elements")
                        + 1;
                    self.active_formatting
                        .insert(index, FormatEntry::Element(new_element.clone(), fmt_tag));
                    let old_index = self
                        .position_in_active_formatting(&fmt_elem)
                        .expect("formatting element not found");
                    self.active_formatting.remove(old_index);
                },
            }

            // Rewire the stack: the adopter sits right above the furthest
            // block.
            self.remove_from_stack(&fmt_elem);
            let fb_pos = self
                .open_elems
                .iter()
                .position(|n| same_node(n, &furthest_block))
                .expect("furthest block missing from open element stack");
            self.open_elems.insert(fb_pos + 1, new_element);
        }
    }

    /// Signal errors for elements left open when the body ends.
    pub(crate) fn check_body_end(&mut self) {
        for el in &self.open_elems {
            if !body_end_ok(el.node_name()) {
                self.tokenizer
                    .parse_error(Borrowed("Unexpected open tag at end of body"));
                return;
            }
        }
    }

    pub(crate) fn mode(&self) -> InsertionMode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: InsertionMode) {
        self.mode = mode;
    }

    pub(crate) fn debug_step(&self, mode: InsertionMode, token: &Token) {
        debug!("processing {:?} in insertion mode {:?}", token, mode);
    }
}

/// The tokenizer state a fragment-parse context element selects.
fn tokenizer_state_for_context(name: &str) -> states::State {
    match name {
        "title" | "textarea" => states::RawData(states::Rcdata),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
            states::RawData(states::Rawtext)
        },
        "script" => states::RawData(states::ScriptData),
        "plaintext" => states::Plaintext,
        _ => states::Data,
    }
}
