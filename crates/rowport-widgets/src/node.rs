#![forbid(unsafe_code)]

//! Host-agnostic output tree.
//!
//! Table adapters emit a [`Node`] tree: structural elements the engine owns
//! (wrappers, spacer rows) with caller content `N` at the leaves. Hosts walk
//! the tree and materialize it however they like.

use std::fmt::{self, Display, Write as _};

use rowport_core::px;

/// One node of the output tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<N> {
    /// A structural element owned by the engine.
    Element(Element<N>),
    /// Caller-supplied content (rows, slot nodes).
    Content(N),
}

/// A tagged element with classes, inline style, and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element<N> {
    /// Element tag, e.g. `"div"` or `"tr"`.
    pub tag: &'static str,
    /// CSS classes, in order.
    pub classes: Vec<String>,
    /// Inline style declarations, in order.
    pub style: Vec<(&'static str, String)>,
    /// Child nodes, in document order.
    pub children: Vec<Node<N>>,
}

impl<N> Element<N> {
    /// Create an empty element.
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            style: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A table row whose only job is to occupy `height` pixels.
    #[must_use]
    pub fn spacer(height: f64) -> Self {
        Self::new("tr").with_style("height", px(height))
    }

    /// Append a class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Append several classes.
    #[must_use]
    pub fn with_classes<I, C>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.classes.extend(classes.into_iter().map(Into::into));
        self
    }

    /// Append an inline style declaration.
    #[must_use]
    pub fn with_style(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.style.push((name, value.into()));
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node<N>>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several child nodes.
    #[must_use]
    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Node<N>>,
    {
        self.children.extend(children);
        self
    }

    /// Whether the element carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Value of the inline style declaration `name`.
    #[must_use]
    pub fn style(&self, name: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements, skipping content leaves.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element<N>> + '_ {
        self.children.iter().filter_map(Node::as_element)
    }
}

impl<N> From<Element<N>> for Node<N> {
    fn from(element: Element<N>) -> Self {
        Self::Element(element)
    }
}

impl<N> Node<N> {
    /// The element, if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element<N>> {
        match self {
            Self::Element(e) => Some(e),
            Self::Content(_) => None,
        }
    }

    /// The caller content, if this node is a leaf.
    #[must_use]
    pub fn as_content(&self) -> Option<&N> {
        match self {
            Self::Element(_) => None,
            Self::Content(c) => Some(c),
        }
    }

    /// First element carrying `class`, depth-first in document order.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Option<&Element<N>> {
        let element = self.as_element()?;
        if element.has_class(class) {
            return Some(element);
        }
        element
            .children
            .iter()
            .find_map(|child| child.find_by_class(class))
    }

    /// First element with tag `tag`, depth-first in document order.
    #[must_use]
    pub fn find_by_tag(&self, tag: &str) -> Option<&Element<N>> {
        let element = self.as_element()?;
        if element.tag == tag {
            return Some(element);
        }
        element
            .children
            .iter()
            .find_map(|child| child.find_by_tag(tag))
    }

    /// Every content leaf, in document order.
    #[must_use]
    pub fn contents(&self) -> Vec<&N> {
        let mut out = Vec::new();
        self.collect_contents(&mut out);
        out
    }

    fn collect_contents<'a>(&'a self, out: &mut Vec<&'a N>) {
        match self {
            Self::Content(c) => out.push(c),
            Self::Element(e) => {
                for child in &e.children {
                    child.collect_contents(out);
                }
            }
        }
    }
}

impl<N: Display> Node<N> {
    /// Render the tree as compact HTML-like markup.
    ///
    /// Content leaves are written with their `Display` impl, unescaped.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) -> fmt::Result {
        match self {
            Self::Content(c) => write!(out, "{c}"),
            Self::Element(e) => {
                write!(out, "<{}", e.tag)?;
                if !e.classes.is_empty() {
                    write!(out, " class=\"{}\"", e.classes.join(" "))?;
                }
                if !e.style.is_empty() {
                    out.push_str(" style=\"");
                    for (i, (name, value)) in e.style.iter().enumerate() {
                        if i > 0 {
                            out.push(' ');
                        }
                        write!(out, "{name}: {value};")?;
                    }
                    out.push('"');
                }
                out.push('>');
                for child in &e.children {
                    child.write_markup(out)?;
                }
                write!(out, "</{}>", e.tag)
            }
        }
    }
}
