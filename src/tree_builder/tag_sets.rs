// Copyright 2026 The tagsoup Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Various sets of HTML tag names, and macros for declaring them.

macro_rules! declare_tag_set (
    ($(#[$attr:meta])* pub $name:ident = [$($tag:tt),+]) => {
        $(#[$attr])*
        pub fn $name(name: &str) -> bool {
            matches!(name, $($tag)|+)
        }
    };
);

declare_tag_set!(pub default_scope = [
    "applet", "caption", "html", "table", "td", "th", "marquee", "object"]);

declare_tag_set!(pub list_item_scope = [
    "applet", "caption", "html", "table", "td", "th", "marquee", "object",
    "ol", "ul"]);

declare_tag_set!(pub button_scope = [
    "applet", "caption", "html", "table", "td", "th", "marquee", "object",
    "button"]);

declare_tag_set!(pub table_scope = ["html", "table"]);

/// Select scope is inverted: every element except these is a barrier.
pub fn select_scope_barrier(name: &str) -> bool {
    !matches!(name, "optgroup" | "option")
}

declare_tag_set!(
    /// Elements closed by the "generate implied end tags" step.
    pub cursory_implied_end = [
    "dd", "dt", "li", "option", "optgroup", "p", "rp", "rt"]);

declare_tag_set!(pub table_context = ["table", "html"]);
declare_tag_set!(pub table_body_context = ["tbody", "tfoot", "thead", "html"]);
declare_tag_set!(pub table_row_context = ["tr", "html"]);

declare_tag_set!(pub heading_tag = ["h1", "h2", "h3", "h4", "h5", "h6"]);

declare_tag_set!(
    /// Formatting elements subject to the adoption agency algorithm.
    pub formatting_tag = [
    "a", "b", "big", "code", "em", "font", "i", "nobr", "s", "small",
    "strike", "strong", "tt", "u"]);

declare_tag_set!(
    /// Void elements; inserted without pushing on the stack.
    pub void_tag = [
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame",
    "hr", "img", "input", "keygen", "link", "meta", "param", "source",
    "track", "wbr"]);

declare_tag_set!(pub table_structural = ["table", "tbody", "tfoot", "thead", "tr"]);

declare_tag_set!(
    /// Elements whose text serializes raw, without escaping.
    pub raw_text_tag = [
    "iframe", "noembed", "noframes", "plaintext", "script", "style", "xmp"]);

declare_tag_set!(
    /// Elements allowed to be open when the body ends without an error.
    pub body_end_ok = [
    "dd", "dt", "li", "optgroup", "option", "p", "rp", "rt", "tbody", "td",
    "tfoot", "th", "thead", "tr", "body", "html"]);

declare_tag_set!(
    /// The HTML5 "special" category: block-like elements that interrupt
    /// the adoption-agency search and implicit closings.
    pub special_tag = [
    "address", "applet", "area", "article", "aside", "base", "basefont",
    "bgsound", "blockquote", "body", "br", "button", "caption", "center",
    "col", "colgroup", "dd", "details", "dir", "div", "dl", "dt", "embed",
    "fieldset", "figcaption", "figure", "footer", "form", "frame",
    "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header",
    "hgroup", "hr", "html", "iframe", "img", "input", "isindex", "li",
    "link", "listing", "main", "marquee", "menu", "meta", "nav", "noembed",
    "noframes", "noscript", "object", "ol", "p", "param", "plaintext",
    "pre", "script", "section", "select", "source", "style", "summary",
    "table", "tbody", "td", "textarea", "tfoot", "th", "thead", "title",
    "tr", "track", "ul", "wbr", "xmp"]);
