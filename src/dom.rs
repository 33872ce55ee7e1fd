// Copyright 2026 The tagsoup Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A simple reference-counted DOM.
//!
//! This is sufficient as a static parse tree, but don't build a web
//! browser using it. :)
//!
//! Nodes own their children; parents are weak back-references. The tree
//! builder's open-elements stack and formatting list hold extra strong
//! handles, which is fine: identity is pointer equality, not tree
//! membership, and an element may sit on the stack after the adoption
//! agency has already moved it elsewhere in the tree.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};

use tendril::StrTendril;

use crate::interface::{Attribute, LocalName, QuirksMode};

/// Reference to a DOM node.
pub type Handle = Rc<Node>;

/// Weak reference to a DOM node, used for parent pointers.
pub type WeakHandle = Weak<Node>;

/// An ordered, unique-keyed attribute list.
///
/// Keys are lowercase by the time they get here (the tokenizer folds them at
/// tag finalization); lookup is ASCII-case-insensitive anyway so callers can
/// ask for `HREF`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    attrs: Vec<Attribute>,
}

impl Attributes {
    pub fn new(attrs: Vec<Attribute>) -> Attributes {
        Attributes { attrs }
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attrs.iter()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_str_ignore_ascii_case(name))
            .map(|a| &*a.value)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set `name` to `value`, keeping the first-occurrence position if the
    /// key already exists.
    pub fn set(&mut self, name: &str, value: StrTendril) {
        let lower = name.to_ascii_lowercase();
        match self.attrs.iter_mut().find(|a| *a.name == *lower) {
            Some(attr) => attr.value = value,
            None => self.attrs.push(Attribute {
                name: LocalName::from(&*lower),
                value,
            }),
        }
    }
}

/// The different kinds of nodes in the DOM.
pub enum NodeData {
    /// The document itself; the root node.
    Document {
        quirks_mode: Cell<QuirksMode>,
        base_uri: RefCell<StrTendril>,
    },

    /// A `DOCTYPE` with name, public id, and system id.
    Doctype {
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    },

    /// A text node.
    Text { contents: RefCell<StrTendril> },

    /// A comment.
    Comment { contents: StrTendril },

    /// An element with attributes.
    Element {
        name: LocalName,
        attrs: RefCell<Attributes>,
    },
}

/// A DOM node.
pub struct Node {
    /// Parent node.
    pub parent: Cell<Option<WeakHandle>>,
    /// Child nodes of this node.
    pub children: RefCell<Vec<Handle>>,
    /// Represents this node's data.
    pub data: NodeData,
}

impl Node {
    pub fn new(data: NodeData) -> Handle {
        Rc::new(Node {
            parent: Cell::new(None),
            children: RefCell::new(Vec::new()),
            data,
        })
    }

    pub fn new_document(base_uri: &str) -> Handle {
        Node::new(NodeData::Document {
            quirks_mode: Cell::new(QuirksMode::NoQuirks),
            base_uri: RefCell::new(StrTendril::from(base_uri)),
        })
    }

    pub fn new_element(name: LocalName, attrs: Vec<Attribute>) -> Handle {
        Node::new(NodeData::Element {
            name,
            attrs: RefCell::new(Attributes::new(attrs)),
        })
    }

    pub fn new_text(contents: StrTendril) -> Handle {
        Node::new(NodeData::Text {
            contents: RefCell::new(contents),
        })
    }

    pub fn new_comment(contents: StrTendril) -> Handle {
        Node::new(NodeData::Comment { contents })
    }

    pub fn parent(&self) -> Option<Handle> {
        let parent = self.parent.take();
        self.parent.set(parent.clone());
        parent.and_then(|weak| weak.upgrade())
    }

    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    /// The element's name, if this is an element.
    pub fn elem_name(&self) -> Option<&LocalName> {
        match self.data {
            NodeData::Element { ref name, .. } => Some(name),
            _ => None,
        }
    }

    /// The node name: element name, `#text`, `#comment`, `#doctype` or
    /// `#document`.
    pub fn node_name(&self) -> &str {
        match self.data {
            NodeData::Document { .. } => "#document",
            NodeData::Doctype { .. } => "#doctype",
            NodeData::Text { .. } => "#text",
            NodeData::Comment { .. } => "#comment",
            NodeData::Element { ref name, .. } => name,
        }
    }

    pub fn is_element_named(&self, name: &str) -> bool {
        match self.data {
            NodeData::Element { name: ref n, .. } => &**n == name,
            _ => false,
        }
    }

    pub fn has_attr(&self, name: &str) -> bool {
        match self.data {
            NodeData::Element { ref attrs, .. } => attrs.borrow().has(name),
            _ => false,
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<String> {
        match self.data {
            NodeData::Element { ref attrs, .. } => {
                attrs.borrow().get(name).map(String::from)
            },
            _ => None,
        }
    }

    pub fn set_attr(&self, name: &str, value: StrTendril) {
        if let NodeData::Element { ref attrs, .. } = self.data {
            attrs.borrow_mut().set(name, value);
        }
    }

    pub fn quirks_mode(&self) -> QuirksMode {
        match self.data {
            NodeData::Document {
                ref quirks_mode, ..
            } => quirks_mode.get(),
            _ => QuirksMode::NoQuirks,
        }
    }

    pub fn base_uri(&self) -> String {
        match self.data {
            NodeData::Document { ref base_uri, .. } => String::from(&**base_uri.borrow()),
            _ => String::new(),
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        // Flatten iteratively so deep trees don't recurse the stack away.
        let mut nodes = mem::take(&mut *self.children.borrow_mut());
        while let Some(node) = nodes.pop() {
            let children = mem::take(&mut *node.children.borrow_mut());
            nodes.extend(children);
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Node")
            .field("name", &self.node_name())
            .field("children", &self.children)
            .finish()
    }
}

/// Node identity: two handles to the same allocation.
pub fn same_node(a: &Handle, b: &Handle) -> bool {
    Rc::ptr_eq(a, b)
}

/// Append a node to a parent, detaching it from any previous parent first.
pub fn append(new_parent: &Handle, child: Handle) {
    remove_from_parent(&child);
    child.parent.set(Some(Rc::downgrade(new_parent)));
    new_parent.children.borrow_mut().push(child);
}

/// If the node has a parent, get it and this node's position in its children.
fn get_parent_and_index(target: &Handle) -> Option<(Handle, usize)> {
    let parent = target.parent()?;
    let index = parent
        .children
        .borrow()
        .iter()
        .position(|child| Rc::ptr_eq(child, target))
        .expect("have parent but couldn't find in parent's children!");
    Some((parent, index))
}

/// Insert a node immediately before a sibling.
pub fn insert_before(sibling: &Handle, new_node: Handle) {
    remove_from_parent(&new_node);
    let (parent, index) =
        get_parent_and_index(sibling).expect("insert_before sibling has no parent");
    new_node.parent.set(Some(Rc::downgrade(&parent)));
    parent.children.borrow_mut().insert(index, new_node);
}

pub fn remove_from_parent(target: &Handle) {
    if let Some((parent, index)) = get_parent_and_index(target) {
        parent.children.borrow_mut().remove(index);
        target.parent.set(None);
    }
}

/// Move all children of `node` onto the end of `new_parent`.
pub fn reparent_children(node: &Handle, new_parent: &Handle) {
    let children = mem::take(&mut *node.children.borrow_mut());
    for child in children {
        child.parent.set(Some(Rc::downgrade(new_parent)));
        new_parent.children.borrow_mut().push(child);
    }
}

/// If `prev` is a text node, append `text` to it and return true.
pub fn append_to_existing_text(prev: &Handle, text: &str) -> bool {
    match prev.data {
        NodeData::Text { ref contents } => {
            contents.borrow_mut().push_slice(text);
            true
        },
        _ => false,
    }
}
