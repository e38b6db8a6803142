use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fmt::{Display, Formatter};

pub const HIDDEN: &str = "hidden";

/// A node of the page tree. Visibility follows the `hidden` class convention.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self { tag: tag.to_string(), ..Default::default() }
    }

    pub fn with_text(tag: &str, text: &str) -> Self {
        Self { text: text.to_string(), ..Self::new(tag) }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.attribute(&format!("data-{}", key))
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn toggle_class(&mut self, class: &str, force: bool) {
        if force {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn is_hidden(&self) -> bool {
        self.has_class(HIDDEN)
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.toggle_class(HIDDEN, hidden)
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Removes direct children whose `data-{key}` equals `value`, returns how many.
    pub fn remove_children_by_data(&mut self, key: &str, value: &str) -> usize {
        let before = self.children.len();
        self.children.retain(|child| child.data(key) != Some(value));
        before - self.children.len()
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        if !self.classes.is_empty() {
            let classes = self.classes.iter().cloned().collect::<Vec<String>>().join(" ");
            write!(f, " class=\"{}\"", escape(&classes))?;
        }
        for (name, value) in &self.attributes {
            write!(f, " {}=\"{}\"", name, escape(value))?;
        }
        if is_void(&self.tag) {
            return write!(f, ">");
        }
        write!(f, ">{}", escape(&self.text))?;
        for child in &self.children {
            write!(f, "{}", child)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "img" | "input" | "br" | "hr")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
