// Copyright 2026 The tagsoup Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tree construction tests: full-document parses checked against the
//! serialized output.

use tagsoup::{parse_document, parse_document_with_errors, serialize, serialize_children};
use tagsoup::QuirksMode;

/// The inner HTML of the parsed document's body.
fn body(input: &str) -> String {
    let dom = parse_document(input, "");
    let body = dom.body().expect("no body element");
    serialize_children(&body)
}

fn document(input: &str) -> String {
    serialize(&parse_document(input, "").document)
}

#[test]
fn empty_input_infers_skeleton() {
    let dom = parse_document_with_errors("", "", 16);
    assert_eq!(
        serialize(&dom.document),
        "<html><head></head><body></body></html>"
    );
    assert!(dom.errors.is_empty());
}

#[test]
fn whitespace_only_input_is_discarded() {
    assert_eq!(
        document("   \n\t  "),
        "<html><head></head><body></body></html>"
    );
}

#[test]
fn text_gets_a_body() {
    assert_eq!(document("hello"), "<html><head></head><body>hello</body></html>");
}

#[test]
fn adoption_agency_misnested_formatting() {
    assert_eq!(
        body("<p>One<b>Two<i>Three</b>Four</i>Five</p>"),
        "<p>One<b>Two<i>Three</i></b><i>Four</i>Five</p>"
    );
}

#[test]
fn implicit_tbody() {
    assert_eq!(
        body("<table><tr><td>hi</td></tr></table>"),
        "<table><tbody><tr><td>hi</td></tr></tbody></table>"
    );
}

#[test]
fn table_closes_open_paragraph() {
    assert_eq!(
        body("<p>foo<table><tr><td>bar</td></tr></table>"),
        "<p>foo</p><table><tbody><tr><td>bar</td></tr></tbody></table>"
    );
}

#[test]
fn quirks_mode_keeps_table_inside_paragraph() {
    let input = "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 3.2 Final//EN\"><p>foo<table></table>";
    let dom = parse_document(input, "");
    assert_eq!(dom.quirks_mode, QuirksMode::Quirks);
    let body_el = dom.body().expect("no body");
    assert_eq!(
        serialize_children(&body_el),
        "<p>foo<table></table></p>"
    );
}

#[test]
fn formatting_reconstruction() {
    assert_eq!(body("<b><p>hi</b>"), "<b></b><p><b>hi</b></p>");
}

#[test]
fn second_anchor_closes_first() {
    assert_eq!(
        body("<a href=\"x\">1<a href=\"y\">2</a>"),
        "<a href=\"x\">1</a><a href=\"y\">2</a>"
    );
}

#[test]
fn implicit_option_close() {
    assert_eq!(
        body("<select><option>A<option>B</select>"),
        "<select><option>A</option><option>B</option></select>"
    );
}

#[test]
fn nobr_reopens_after_nesting() {
    assert_eq!(body("<nobr>a<nobr>b"), "<nobr>a</nobr><nobr>b</nobr>");
}

#[test]
fn list_items_close_each_other() {
    assert_eq!(
        body("<ul><li>one<li>two</ul>"),
        "<ul><li>one</li><li>two</li></ul>"
    );
}

#[test]
fn definition_terms_close_each_other() {
    assert_eq!(
        body("<dl><dt>t<dd>d<dt>t2</dl>"),
        "<dl><dt>t</dt><dd>d</dd><dt>t2</dt></dl>"
    );
}

#[test]
fn heading_closes_paragraph_and_heading() {
    assert_eq!(body("<p>a<h1>b<h2>c"), "<p>a</p><h1>b</h1><h2>c</h2>");
}

#[test]
fn image_is_renamed_to_img() {
    assert_eq!(body("<image src=\"x\">"), "<img src=\"x\">");
}

#[test]
fn isindex_expands_to_a_form() {
    assert_eq!(
        body("<isindex action=\"A\" prompt=\"P\">"),
        "<form action=\"A\"><hr><label>P<input name=\"isindex\"></label><hr></form>"
    );
}

#[test]
fn end_br_acts_like_br() {
    assert_eq!(body("x</br>y"), "x<br>y");
}

#[test]
fn stray_end_tags_are_ignored() {
    assert_eq!(body("a</div></span>b"), "ab");
}

#[test]
fn button_closes_open_button() {
    assert_eq!(
        body("<button>a<button>b"),
        "<button>a</button><button>b</button>"
    );
}

#[test]
fn nested_form_is_ignored() {
    assert_eq!(
        body("<form><form><input name=\"a\"></form>"),
        "<form><input name=\"a\"></form>"
    );
}

#[test]
fn pre_swallows_leading_newline() {
    let dom = parse_document("<pre>\nfoo</pre>", "");
    let body_el = dom.body().expect("no body");
    let pre = body_el.children.borrow()[0].clone();
    assert_eq!(serialize_children(&pre), "foo");
}

#[test]
fn textarea_swallows_leading_newline_and_keeps_markup() {
    assert_eq!(
        body("<textarea>\n<b>raw</b></textarea>"),
        "<textarea>&lt;b&gt;raw&lt;/b&gt;</textarea>"
    );
}

#[test]
fn script_content_is_not_parsed() {
    assert_eq!(
        document("<script>if (a < b) { x = \"<div>\"; }</script>"),
        "<html><head><script>if (a < b) { x = \"<div>\"; }</script></head><body></body></html>"
    );
}

#[test]
fn title_is_rcdata() {
    assert_eq!(
        document("<title>a < b &amp; c</title>"),
        "<html><head><title>a &lt; b &amp; c</title></head><body></body></html>"
    );
}

#[test]
fn comment_before_html_is_on_the_document() {
    assert_eq!(
        document("<!--x--><p>hi</p>"),
        "<!--x--><html><head></head><body><p>hi</p></body></html>"
    );
}

#[test]
fn doctype_is_kept_and_serialized() {
    assert_eq!(
        document("<!DOCTYPE html><p>x</p>"),
        "<!DOCTYPE html><html><head></head><body><p>x</p></body></html>"
    );
}

#[test]
fn modern_doctype_is_no_quirks() {
    let dom = parse_document("<!DOCTYPE html><p>x", "");
    assert_eq!(dom.quirks_mode, QuirksMode::NoQuirks);
}

#[test]
fn missing_doctype_is_not_quirks() {
    let dom = parse_document("<p>x", "");
    assert_eq!(dom.quirks_mode, QuirksMode::NoQuirks);
}

#[test]
fn force_quirks_doctype_flips_the_document() {
    let dom = parse_document_with_errors("<!DOCTYPE><p>x", "", 8);
    assert_eq!(dom.quirks_mode, QuirksMode::Quirks);
    assert!(!dom.errors.is_empty());
}

#[test]
fn limited_quirks_doctype() {
    let dom = parse_document(
        "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\">",
        "",
    );
    assert_eq!(dom.quirks_mode, QuirksMode::LimitedQuirks);
}

#[test]
fn base_href_sets_document_base_uri() {
    let dom = parse_document(
        "<head><base href=\"https://example.com/a/\"><base href=\"https://other/\"></head>",
        "",
    );
    assert_eq!(dom.document.base_uri(), "https://example.com/a/");
}

#[test]
fn base_uri_parameter_is_kept_without_base_element() {
    let dom = parse_document("<p>x", "https://example.com/");
    assert_eq!(dom.document.base_uri(), "https://example.com/");
}

#[test]
fn duplicate_html_and_body_merge_attributes() {
    assert_eq!(
        document("<html lang=\"en\"><body class=\"a\"><html lang=\"fr\" dir=\"ltr\"><body class=\"b\" id=\"x\">hi"),
        "<html lang=\"en\" dir=\"ltr\"><head></head><body class=\"a\" id=\"x\">hi</body></html>"
    );
}

#[test]
fn frameset_document() {
    assert_eq!(
        document("<frameset cols=\"1,2\"><frame><frame></frameset>"),
        "<html><head></head><frameset cols=\"1,2\"><frame><frame></frameset></html>"
    );
}

#[test]
fn frameset_replaces_implied_body_when_frameset_ok() {
    assert_eq!(
        document("<div></div><frameset></frameset>"),
        "<html><head></head><frameset></frameset></html>"
    );
}

#[test]
fn frameset_after_content_is_ignored() {
    assert_eq!(
        document("<body>text<frameset></frameset>"),
        "<html><head></head><body>text</body></html>"
    );
}

#[test]
fn table_text_is_foster_parented() {
    assert_eq!(
        body("<table>foo<tr><td>bar</td></tr></table>"),
        "foo<table><tbody><tr><td>bar</td></tr></tbody></table>"
    );
}

#[test]
fn formatting_inside_table_is_foster_parented() {
    assert_eq!(
        body("<table><b>x<tr><td>y</td></tr></table>"),
        "<b>x</b><table><tbody><tr><td>y</td></tr></tbody></table>"
    );
}

#[test]
fn whitespace_in_table_stays_in_table() {
    assert_eq!(
        body("<table> <tr><td>x</td></tr></table>"),
        "<table> <tbody><tr><td>x</td></tr></tbody></table>"
    );
}

#[test]
fn caption_and_colgroup() {
    assert_eq!(
        body("<table><caption>c</caption><colgroup><col></colgroup><tr><td>x</td></tr></table>"),
        "<table><caption>c</caption><colgroup><col></colgroup><tbody><tr><td>x</td></tr></tbody></table>"
    );
}

#[test]
fn select_inside_table_closes_on_table_tags() {
    assert_eq!(
        body("<table><tr><td><select><option>a<tr><td>b"),
        "<table><tbody><tr><td><select><option>a</option></select></td></tr><tr><td>b</td></tr></tbody></table>"
    );
}

#[test]
fn math_and_svg_are_accepted_in_body() {
    assert_eq!(
        body("<p>a<svg/>b<math></math>c</p>"),
        "<p>a<svg></svg>b<math></math>c</p>"
    );
}

#[test]
fn marquee_is_a_formatting_boundary() {
    assert_eq!(
        body("<b>x<marquee>y</marquee>z"),
        "<b>x<marquee>y</marquee>z</b>"
    );
}

#[test]
fn error_collection_is_capped() {
    let dom = parse_document_with_errors("&foo;&foo;&foo;&foo;&foo;", "", 2);
    assert_eq!(dom.errors.len(), 2);
}

#[test]
fn error_collection_disabled_by_default() {
    let dom = parse_document("</div></div></div>", "");
    assert!(dom.errors.is_empty());
}

#[test]
fn parse_never_fails_on_garbage() {
    // A pile of misnesting, strays and truncation still yields a document.
    let dom = parse_document("<b><table><i></b><tr>x</i><!--<td>--></b></html text", "");
    assert!(dom.body().is_some());
}

#[test]
fn deeply_nested_formatting_terminates() {
    let mut input = String::new();
    for _ in 0..200 {
        input.push_str("<b><i>");
    }
    input.push_str("x");
    for _ in 0..200 {
        input.push_str("</b>");
    }
    let dom = parse_document(&input, "");
    assert!(dom.body().is_some());
}

#[test]
fn attribute_keys_are_unique_and_lowercase() {
    let dom = parse_document("<div ID=\"a\" id=\"b\" Data-X=\"1\">", "");
    let body_el = dom.body().expect("no body");
    let div = body_el.children.borrow()[0].clone();
    assert_eq!(div.get_attr("id").as_deref(), Some("a"));
    assert_eq!(div.get_attr("data-x").as_deref(), Some("1"));
    match &div.data {
        tagsoup::NodeData::Element { attrs, .. } => {
            let names: Vec<String> = attrs
                .borrow()
                .iter()
                .map(|a| a.name.to_string())
                .collect();
            assert_eq!(names, vec!["id", "data-x"]);
        },
        _ => panic!("expected element"),
    }
}
