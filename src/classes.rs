//! Client classification tags attached to a message.
//!
//! Classes are plain strings. Immediate classes are assigned while the
//! message is classified; deferred ones are evaluated later, once the
//! message has been matched to a subnet.

use std::collections::BTreeSet;

/// Prefix of the name given to a subclass spawned from a template class.
pub const SUBCLASS_PREFIX: &str = "SPAWN_";

/// Builds the conventional name of the subclass spawned from `class` for
/// the discriminator `value`, e.g. `SPAWN_voip_0a`.
pub fn subclass_name(class: &str, value: &str) -> String {
    format!("{}{}_{}", SUBCLASS_PREFIX, class, value)
}

/// Immediate and deferred class sets plus the template/subclass relations
/// that produced spawned classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientClasses {
    immediate: BTreeSet<String>,
    deferred: BTreeSet<String>,
    subclasses: Vec<(String, String)>,
}

impl ClientClasses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an immediate class. Adding an existing class is a no-op.
    pub fn insert(&mut self, class: impl Into<String>) {
        self.immediate.insert(class.into());
    }

    pub fn insert_deferred(&mut self, class: impl Into<String>) {
        self.deferred.insert(class.into());
    }

    /// Adds `subclass` as an immediate class and records that it was
    /// spawned from `class`.
    ///
    /// The name of `subclass` is taken as is; use [`subclass_name`] to
    /// build the conventional one.
    pub fn insert_subclass(&mut self, class: impl Into<String>, subclass: impl Into<String>) {
        let subclass = subclass.into();
        if self.immediate.insert(subclass.clone()) {
            self.subclasses.push((class.into(), subclass));
        }
    }

    pub fn contains(&self, class: &str) -> bool {
        self.immediate.contains(class)
    }

    pub fn contains_deferred(&self, class: &str) -> bool {
        self.deferred.contains(class)
    }

    /// Returns a snapshot of the immediate classes.
    pub fn all(&self) -> BTreeSet<String> {
        self.immediate.clone()
    }

    pub fn all_deferred(&self) -> BTreeSet<String> {
        self.deferred.clone()
    }

    /// Returns the `(template class, subclass)` relations in insertion order.
    pub fn subclasses(&self) -> &[(String, String)] {
        &self.subclasses
    }

    pub fn is_empty(&self) -> bool {
        self.immediate.is_empty() && self.deferred.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut classes = ClientClasses::new();
        assert!(classes.is_empty());

        classes.insert("foo");
        classes.insert("foo");
        classes.insert("bar");
        assert_eq!(classes.all().len(), 2);
        assert!(classes.contains("foo"));
        assert!(!classes.contains("baz"));
        assert!(!classes.is_empty());
    }

    #[test]
    fn test_deferred_is_separate() {
        let mut classes = ClientClasses::new();
        classes.insert_deferred("late");
        assert!(classes.contains_deferred("late"));
        assert!(!classes.contains("late"));
        assert!(classes.all().is_empty());
        assert_eq!(classes.all_deferred().len(), 1);
        assert!(!classes.is_empty());
    }

    #[test]
    fn test_snapshot_does_not_track_changes() {
        let mut classes = ClientClasses::new();
        classes.insert("a");
        let snapshot = classes.all();
        classes.insert("b");
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_subclasses() {
        assert_eq!(subclass_name("voip", "0a"), "SPAWN_voip_0a");

        let mut classes = ClientClasses::new();
        let name = subclass_name("template", "abc");
        classes.insert_subclass("template", name.clone());
        classes.insert_subclass("template", name.clone());

        assert!(classes.contains(&name));
        assert_eq!(
            classes.subclasses(),
            &[("template".to_string(), "SPAWN_template_abc".to_string())]
        );
    }
}
