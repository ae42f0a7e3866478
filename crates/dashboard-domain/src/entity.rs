//! Core Entity Trait
//!
//! Every backend record carries a string id (`_id` on the wire).

/// Core trait for all domain entities
pub trait Entity: Clone {
    /// Returns the entity's unique identifier
    fn id(&self) -> &str;
}

/// Find an entity in a list by id
pub fn find_by_id<'a, T: Entity>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

/// Replace the entity with the same id, returning the previous value.
/// Unknown ids leave the list untouched.
pub fn replace_by_id<T: Entity>(items: &mut [T], updated: T) -> Option<T> {
    items
        .iter_mut()
        .find(|item| item.id() == updated.id())
        .map(|item| std::mem::replace(item, updated))
}

/// Remove the entity with the given id
pub fn remove_by_id<T: Entity>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Branch;

    fn branch(id: &str, name: &str) -> Branch {
        Branch {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_replace_and_remove() {
        let mut branches = vec![branch("a", "North"), branch("b", "South")];

        let previous = replace_by_id(&mut branches, branch("b", "South East"));
        assert_eq!(previous.map(|b| b.name), Some("South".to_string()));
        assert_eq!(find_by_id(&branches, "b").unwrap().name, "South East");

        assert!(replace_by_id(&mut branches, branch("zz", "Nowhere")).is_none());
        assert_eq!(branches.len(), 2);

        assert!(remove_by_id(&mut branches, "a"));
        assert!(!remove_by_id(&mut branches, "a"));
        assert_eq!(branches.len(), 1);
    }
}
