//! Document mutations emitted by the component cores.
//!
//! Cores never touch the DOM. They return `Effect`s addressed to a `Node`,
//! and the browser adapter resolves each node to an element and applies it.
//! Tests assert on the effect lists directly.

#[cfg(test)]
#[path = "effect_test.rs"]
mod effect_test;

/// An element an effect is addressed to.
///
/// Indexed variants refer to the position of the element in the list the
/// component collected at install time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    /// `<html>`.
    Root,
    /// `<body>`.
    Body,
    /// The n-th spotlight candidate.
    Candidate(usize),
    /// The n-th deferred image.
    Image(usize),
    /// The theme toggle control.
    ThemeControl,
    /// The transition pulse element inside the theme control.
    ThemePulse,
}

/// A single attribute or class mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    AddClass { node: Node, class: String },
    RemoveClass { node: Node, class: String },
    SetAttribute { node: Node, name: String, value: String },
    RemoveAttribute { node: Node, name: String },
}

impl Effect {
    pub fn add_class(node: Node, class: &str) -> Self {
        Self::AddClass { node, class: class.to_owned() }
    }

    pub fn remove_class(node: Node, class: &str) -> Self {
        Self::RemoveClass { node, class: class.to_owned() }
    }

    pub fn set_attribute(node: Node, name: &str, value: &str) -> Self {
        Self::SetAttribute { node, name: name.to_owned(), value: value.to_owned() }
    }

    pub fn remove_attribute(node: Node, name: &str) -> Self {
        Self::RemoveAttribute { node, name: name.to_owned() }
    }

    /// The node this effect targets.
    #[must_use]
    pub fn node(&self) -> Node {
        match self {
            Self::AddClass { node, .. }
            | Self::RemoveClass { node, .. }
            | Self::SetAttribute { node, .. }
            | Self::RemoveAttribute { node, .. } => *node,
        }
    }
}
