// Copyright 2026 The tagsoup Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Serializing trees back to HTML fragments.
//!
//! Round-trip discipline: re-parsing the output of `serialize` yields an
//! equal tree. Void elements get no end tag, raw-text element content is
//! written verbatim, and the newline the parser dropped after `<pre>` is
//! reprinted.

use crate::dom::{Handle, NodeData};
use crate::interface::LocalName;
use crate::tree_builder::tag_sets::{raw_text_tag, void_tag};

//§ serializing-html-fragments

/// The outer HTML of a node.
pub fn serialize(node: &Handle) -> String {
    let mut ser = Serializer::new();
    ser.serialize_node(node, true);
    ser.out
}

/// The inner HTML of a node.
pub fn serialize_children(node: &Handle) -> String {
    let mut ser = Serializer::new();
    ser.serialize_node(node, false);
    ser.out
}

struct ElemInfo {
    html_name: Option<LocalName>,
    ignore_children: bool,
    processed_first_child: bool,
}

struct Serializer {
    out: String,
    stack: Vec<ElemInfo>,
}

impl Serializer {
    fn new() -> Serializer {
        Serializer {
            out: String::new(),
            stack: vec![ElemInfo {
                html_name: None,
                ignore_children: false,
                processed_first_child: false,
            }],
        }
    }

    fn parent(&mut self) -> &mut ElemInfo {
        self.stack.last_mut().expect("no parent ElemInfo")
    }

    fn write_escaped(&mut self, text: &str, attr_mode: bool) {
        for c in text.chars() {
            match c {
                '&' => self.out.push_str("&amp;"),
                '\u{00A0}' => self.out.push_str("&nbsp;"),
                '"' if attr_mode => self.out.push_str("&quot;"),
                '<' if !attr_mode => self.out.push_str("&lt;"),
                '>' if !attr_mode => self.out.push_str("&gt;"),
                c => self.out.push(c),
            }
        }
    }

    fn serialize_node(&mut self, node: &Handle, incl_self: bool) {
        match node.data {
            NodeData::Element { ref name, ref attrs } => {
                if incl_self {
                    self.start_elem(name, &attrs.borrow());
                }
                for child in node.children.borrow().iter() {
                    self.serialize_node(child, true);
                }
                if incl_self {
                    self.end_elem(name);
                }
            },
            NodeData::Document { .. } => {
                for child in node.children.borrow().iter() {
                    self.serialize_node(child, true);
                }
            },
            NodeData::Doctype { ref name, .. } => {
                self.out.push_str("<!DOCTYPE ");
                self.out.push_str(name);
                self.out.push('>');
            },
            NodeData::Text { ref contents } => self.write_text(&contents.borrow()),
            NodeData::Comment { ref contents } => {
                self.out.push_str("<!--");
                self.out.push_str(contents);
                self.out.push_str("-->");
            },
        }
    }

    fn start_elem(&mut self, name: &LocalName, attrs: &crate::dom::Attributes) {
        if self.parent().ignore_children {
            self.stack.push(ElemInfo {
                html_name: Some(name.clone()),
                ignore_children: true,
                processed_first_child: false,
            });
            return;
        }

        self.out.push('<');
        self.out.push_str(name);
        for attr in attrs.iter() {
            self.out.push(' ');
            self.out.push_str(&attr.name);
            self.out.push_str("=\"");
            self.write_escaped(&attr.value, true);
            self.out.push('"');
        }
        self.out.push('>');

        let ignore_children = void_tag(name);
        self.parent().processed_first_child = true;
        self.stack.push(ElemInfo {
            html_name: Some(name.clone()),
            ignore_children,
            processed_first_child: false,
        });
    }

    fn end_elem(&mut self, name: &LocalName) {
        let info = self.stack.pop().expect("no ElemInfo");
        if info.ignore_children {
            return;
        }
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
    }

    fn write_text(&mut self, text: &str) {
        let prepend_lf = text.starts_with('\n') && {
            let parent = self.parent();
            !parent.processed_first_child
                && matches!(
                    parent.html_name.as_deref(),
                    Some("pre" | "textarea" | "listing")
                )
        };
        if prepend_lf {
            self.out.push('\n');
        }

        let escape = match self.parent().html_name.as_deref() {
            Some(name) => !raw_text_tag(name),
            None => true,
        };
        self.parent().processed_first_child = true;

        if escape {
            self.write_escaped(text, false);
        } else {
            self.out.push_str(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{self, Node};
    use crate::interface::{Attribute, LocalName};
    use tendril::StrTendril;

    fn elem(name: &str) -> Handle {
        Node::new_element(LocalName::from(name), vec![])
    }

    #[test]
    fn escapes_text_and_attributes() {
        let div = Node::new_element(
            LocalName::from("div"),
            vec![Attribute {
                name: LocalName::from("title"),
                value: StrTendril::from("a\"b&c"),
            }],
        );
        dom::append(&div, Node::new_text(StrTendril::from("1 < 2 & 3 > 0\u{a0}")));
        assert_eq!(
            serialize(&div),
            "<div title=\"a&quot;b&amp;c\">1 &lt; 2 &amp; 3 &gt; 0&nbsp;</div>"
        );
    }

    #[test]
    fn void_elements_have_no_end_tag() {
        let p = elem("p");
        dom::append(&p, elem("br"));
        assert_eq!(serialize(&p), "<p><br></p>");
    }

    #[test]
    fn raw_text_is_not_escaped() {
        let script = elem("script");
        dom::append(&script, Node::new_text(StrTendril::from("1 < 2 && x")));
        assert_eq!(serialize(&script), "<script>1 < 2 && x</script>");
    }

    #[test]
    fn pre_newline_is_reprinted() {
        let pre = elem("pre");
        dom::append(&pre, Node::new_text(StrTendril::from("\nx")));
        assert_eq!(serialize(&pre), "<pre>\n\nx</pre>");
    }
}
