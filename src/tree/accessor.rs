//! Named lookup inside the generic element tree.
//!
//! Absence is a normal control path here and is reported as `None` or an
//! empty slice, never as an error.

use super::{Element, Property, PropertyKind};

/// Ordered subsequence of `element`'s children starting at the FIRST child
/// whose tag matches, inclusive.
///
/// This is deliberately not a filtered list: callers get every child from
/// the first match onward, matching or not. Files group same-tag children
/// contiguously and some callers index past the first match relying on that.
/// Returns an empty slice when the tag is absent.
pub fn find_children<'a>(element: &'a Element, tag: &str) -> &'a [Element] {
    match element.children.iter().position(|c| c.tag == tag) {
        Some(idx) => &element.children[idx..],
        None => &[],
    }
}

/// First property of the first child whose tag matches.
///
/// `None` when no child matches or the matching child has no properties.
pub fn find_single_child_property<'a>(element: &'a Element, tag: &str) -> Option<&'a Property> {
    element
        .children
        .iter()
        .find(|c| c.tag == tag)
        .and_then(|c| c.first_property())
}

/// Full property list of the first child whose tag matches.
pub fn find_child_property<'a>(element: &'a Element, tag: &str) -> Option<&'a [Property]> {
    element
        .children
        .iter()
        .find(|c| c.tag == tag)
        .map(|c| c.properties.as_slice())
}

/// Locate a named entry in the object's `Properties70` block.
///
/// Scans the block's children linearly for one whose first property decodes
/// to `name`. Used to look up the format's named, user-defined object
/// attributes (`Lcl Translation`, `PreRotation`, ...).
pub fn resolve_named_property<'a>(object: &'a Element, name: &str) -> Option<&'a Element> {
    let block = find_children(object, "Properties70").first()?;
    block.children.iter().find(|entry| {
        entry
            .first_property()
            .and_then(|p| p.as_string().ok())
            .is_some_and(|s| s == name)
    })
}

/// True if the property is present and string-typed.
pub fn is_string(prop: Option<&Property>) -> bool {
    matches!(prop.map(Property::kind), Some(PropertyKind::String))
}

/// True if the property is present and a 64-bit integer.
pub fn is_long(prop: Option<&Property>) -> bool {
    matches!(prop.map(Property::kind), Some(PropertyKind::Int64))
}
