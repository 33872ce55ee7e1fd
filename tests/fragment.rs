// Copyright 2026 The tagsoup Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Fragment parsing and the round-trip laws.

use quickcheck::{Arbitrary, Gen, QuickCheck};
use tagsoup::{parse_document, parse_fragment, serialize, Handle};

fn serialize_all(nodes: &[Handle]) -> String {
    nodes.iter().map(serialize).collect()
}

fn fragment_html(input: &str, context: &str) -> String {
    serialize_all(&parse_fragment(input, context, ""))
}

#[test]
fn fragment_in_div_context() {
    assert_eq!(
        fragment_html("<span>x</span> tail", "div"),
        "<span>x</span> tail"
    );
}

#[test]
fn fragment_keeps_sibling_structure() {
    assert_eq!(
        fragment_html("<b>x<i>y", "div"),
        "<b>x<i>y</i></b>"
    );
}

#[test]
fn fragment_nodes_are_detached() {
    let nodes = parse_fragment("<p>a</p><p>b</p>", "body", "");
    assert_eq!(nodes.len(), 2);
    for node in &nodes {
        assert!(node.parent().is_none());
    }
}

#[test]
fn fragment_in_tr_context_builds_cells() {
    let nodes = parse_fragment("<td>one<td>two", "tr", "");
    assert_eq!(serialize_all(&nodes), "<td>one</td><td>two</td>");
}

#[test]
fn fragment_in_tbody_context_builds_rows() {
    assert_eq!(
        fragment_html("<tr><td>x</td></tr>", "tbody"),
        "<tr><td>x</td></tr>"
    );
}

#[test]
fn fragment_in_title_context_is_rcdata() {
    let nodes = parse_fragment("foo<b>bar</title>tail", "title", "");
    // Everything up to the appropriate end tag is text; the stray end tag
    // is dropped and the tail keeps accumulating.
    assert_eq!(nodes.len(), 1);
    assert_eq!(serialize_all(&nodes), "foo&lt;b&gt;bartail");
}

#[test]
fn fragment_in_script_context_is_raw() {
    let nodes = parse_fragment("if (a < b) foo()", "script", "");
    assert_eq!(nodes.len(), 1);
    // Serialized under a script element this would be raw; standalone text
    // nodes escape.
    assert_eq!(serialize_all(&nodes), "if (a &lt; b) foo()");
}

#[test]
fn fragment_in_select_context() {
    assert_eq!(
        fragment_html("<option>A<option>B", "select"),
        "<option>A</option><option>B</option>"
    );
}

#[test]
fn fragment_li_context_list() {
    assert_eq!(
        fragment_html("<li>a<li>b", "ul"),
        "<li>a</li><li>b</li>"
    );
}

//§ round-trip laws

#[test]
fn document_round_trip() {
    let inputs = [
        "<p>One<b>Two<i>Three</b>Four</i>Five</p>",
        "<table><tr><td>hi</td></tr></table>",
        "<p>foo<table><tr><td>bar</td></tr></table>",
        "<b><p>hi</b>",
        "<a href=\"x\">1<a href=\"y\">2</a>",
        "<select><option>A<option>B</select>",
        "<!DOCTYPE html><html lang=\"en\"><head><title>t</title></head><body>x</body></html>",
        "<ul><li>a<li>b</ul><pre>\nkeep</pre>",
        "text &amp; <span class=\"c\">more</span><!--c-->",
        "<table>stray<tr><td>x</td></tr></table>",
    ];
    for input in inputs {
        let once = serialize(&parse_document(input, "").document);
        let twice = serialize(&parse_document(&once, "").document);
        assert_eq!(once, twice, "round trip diverged for {input:?}");
    }
}

#[test]
fn fragment_round_trip() {
    let cases = [
        ("<li>a<li>b", "ul"),
        ("<td>one<td>two", "tr"),
        ("<b>x<i>y", "div"),
        ("<option>A<option>B", "select"),
        ("plain text &amp; entities", "p"),
    ];
    for (input, context) in cases {
        let once = serialize_all(&parse_fragment(input, context, ""));
        let twice = serialize_all(&parse_fragment(&once, context, ""));
        assert_eq!(once, twice, "fragment round trip diverged for {input:?} in {context:?}");
    }
}

/// Markup assembled from a small vocabulary: enough to hit misnesting,
/// foster parenting and reconstruction, while staying clear of raw-text
/// constructs that are deliberately not round-trippable (`<plaintext>`).
#[derive(Clone, Debug)]
struct SoupHtml(String);

impl Arbitrary for SoupHtml {
    fn arbitrary(g: &mut Gen) -> SoupHtml {
        const PIECES: &[&str] = &[
            "<div>", "</div>", "<p>", "</p>", "<b>", "</b>", "<i>", "</i>",
            "<span class=\"a\">", "</span>", "<ul>", "<li>", "</ul>",
            "<table>", "</table>", "<tr>", "<td>", "</td>", "</tr>",
            "text", " ", "&amp;", "&#65;", "x<y",
        ];
        let len = usize::arbitrary(g) % 24;
        let mut out = String::new();
        for _ in 0..len {
            out.push_str(g.choose(PIECES).expect("non-empty vocabulary"));
        }
        SoupHtml(out)
    }
}

#[test]
fn serialization_is_a_fixed_point() {
    fn prop(input: SoupHtml) -> bool {
        let once = serialize(&parse_document(&input.0, "").document);
        let twice = serialize(&parse_document(&once, "").document);
        once == twice
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(SoupHtml) -> bool);
}
