//! Animation clip records.

/// Minimal record of an animation clip attached to a node.
///
/// Curve evaluation lives outside this crate; clips are carried on nodes so
/// that subtree copies duplicate rather than share them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Animation {
    pub name: String,
    /// Clip length in seconds.
    pub duration: f64,
}

impl Animation {
    /// Create a named clip.
    pub fn new(name: impl Into<String>, duration: f64) -> Self {
        Self { name: name.into(), duration }
    }
}
