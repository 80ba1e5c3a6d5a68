//! Ordered, id-keyed collection operations shared by every repeated entity.
//!
//! Insertion order is display order. Updates and removals that name an
//! unknown id leave the collection untouched.

use crate::models::Entity;

/// Appends to the end. Id uniqueness is the caller's responsibility.
pub fn append<T: Entity>(items: &mut Vec<T>, item: T) {
    items.push(item);
}

/// Merges `patch` into every entity with `id`, like [`remove_by_id`] drops
/// every one. Returns whether anything matched.
pub fn update_by_id<T: Entity>(items: &mut [T], id: &str, patch: T::Patch) -> bool {
    let mut matched = false;
    for item in items.iter_mut().filter(|item| item.id() == id) {
        item.merge(patch.clone());
        matched = true;
    }
    matched
}

/// Drops every entity with `id`. Returns whether anything was removed.
pub fn remove_by_id<T: Entity>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Project, ProjectPatch};

    fn project(id: &str, title: &str) -> Project {
        Project::create(
            id.to_string(),
            ProjectPatch {
                title: Some(title.to_string()),
                ..ProjectPatch::default()
            },
        )
    }

    #[test]
    fn test_append_preserves_call_order() {
        let mut items = Vec::new();
        for (id, title) in [("a", "one"), ("b", "two"), ("c", "three")] {
            append(&mut items, project(id, title));
        }
        let ids: Vec<_> = items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut items = vec![project("a", "one"), project("b", "two")];
        let before = items.clone();
        let matched = update_by_id(
            &mut items,
            "zzz",
            ProjectPatch {
                title: Some("changed".to_string()),
                ..ProjectPatch::default()
            },
        );
        assert!(!matched);
        assert_eq!(items, before);
    }

    #[test]
    fn test_update_touches_only_target() {
        let mut items = vec![project("a", "one"), project("b", "two")];
        update_by_id(
            &mut items,
            "b",
            ProjectPatch {
                link: Some("https://example.com".to_string()),
                ..ProjectPatch::default()
            },
        );
        assert_eq!(items[0], project("a", "one"));
        assert_eq!(items[1].title, "two");
        assert_eq!(items[1].link, "https://example.com");
    }

    #[test]
    fn test_update_reaches_every_entry_sharing_the_id() {
        let mut items = vec![project("a", "one"), project("b", "two"), project("a", "three")];
        let matched = update_by_id(
            &mut items,
            "a",
            ProjectPatch {
                technologies: Some("Rust".to_string()),
                ..ProjectPatch::default()
            },
        );
        assert!(matched);
        assert_eq!(items[0].technologies, "Rust");
        assert_eq!(items[0].title, "one");
        assert_eq!(items[1].technologies, "");
        assert_eq!(items[2].technologies, "Rust");
        assert_eq!(items[2].title, "three");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut items = vec![project("a", "one"), project("b", "two"), project("c", "x")];
        assert!(remove_by_id(&mut items, "b"));
        let once = items.clone();
        assert!(!remove_by_id(&mut items, "b"));
        assert_eq!(items, once);
        let ids: Vec<_> = items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
