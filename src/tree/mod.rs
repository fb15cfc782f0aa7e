//! Generic element tree: typed properties and named lookup.
//!
//! The external low-level reader splits a raw file into a tree of
//! [`Element`]s, each carrying tagged [`Property`] byte spans. This module
//! decodes those spans into typed values and provides the lookup helpers
//! the higher layers navigate the tree with.

mod accessor;
mod element;
mod property;

pub use accessor::*;
pub use element::Element;
pub use property::{Property, PropertyKind};
