//! Generic element tree node.

use smallvec::SmallVec;

use super::Property;

/// One node of the parsed file tree: a tag, ordered child elements and an
/// ordered property list.
///
/// Elements are produced by the external low-level reader; this crate only
/// reads them. Most elements carry very few properties, hence the small
/// inline capacity.
#[derive(Clone, Debug, Default)]
pub struct Element {
    pub tag: String,
    pub children: Vec<Element>,
    pub properties: SmallVec<[Property; 2]>,
}

impl Element {
    /// Create an empty element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), children: Vec::new(), properties: SmallVec::new() }
    }

    /// Create an element with a tag and property list.
    pub fn with_properties(
        tag: impl Into<String>,
        properties: impl IntoIterator<Item = Property>,
    ) -> Self {
        Self {
            tag: tag.into(),
            children: Vec::new(),
            properties: properties.into_iter().collect(),
        }
    }

    /// Append a child element, returning self for chaining.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Property at `index`, if present.
    #[inline]
    pub fn property(&self, index: usize) -> Option<&Property> {
        self.properties.get(index)
    }

    /// First property, if any.
    #[inline]
    pub fn first_property(&self) -> Option<&Property> {
        self.properties.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_builders() {
        let e = Element::with_properties("Model", [Property::int64(42), Property::string("cube")])
            .child(Element::new("Properties70"));

        assert_eq!(e.tag, "Model");
        assert_eq!(e.children.len(), 1);
        assert_eq!(e.property(0).unwrap().as_i64().unwrap(), 42);
        assert_eq!(e.property(1).unwrap().as_string().unwrap(), "cube");
        assert!(e.property(2).is_none());
        assert!(Element::new("Empty").first_property().is_none());
    }
}
