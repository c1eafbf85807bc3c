use std::collections::{HashMap, HashSet};

use crate::data::{ActivityTypeRecord, Category, ROOT_ACTIVITY_TYPE_ID};

/// Activity-type table keyed by `typeId`, built once per export run.
#[derive(Debug, Default, Clone)]
pub struct ActivityTypeIndex {
    by_id: HashMap<i64, ActivityTypeRecord>,
}

impl ActivityTypeIndex {
    pub fn new(records: &[ActivityTypeRecord]) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        for record in records {
            // first record wins, matching a linear search over the list
            by_id.entry(record.type_id).or_insert_with(|| record.clone());
        }
        Self { by_id }
    }

    pub fn get(&self, type_id: i64) -> Option<&ActivityTypeRecord> {
        self.by_id.get(&type_id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Walks up from `leaf` until a type key names a known category.
///
/// The walk gives up with [`Category::Other`] when it reaches the root, when
/// a parent is missing from the table, or when the table loops back on
/// itself.
pub fn resolve_category(leaf: &ActivityTypeRecord, types: &ActivityTypeIndex) -> Category {
    let mut current = leaf;
    let mut visited = HashSet::new();

    loop {
        if let Some(category) = Category::from_tag(&current.type_key) {
            return category;
        }
        if !visited.insert(current.type_id) {
            tracing::debug!(type_id = current.type_id, "activity type hierarchy has a cycle");
            return Category::Other;
        }
        if current.parent_type_id == ROOT_ACTIVITY_TYPE_ID {
            tracing::debug!(type_key = %leaf.type_key, "no known category below the root type");
            return Category::Other;
        }
        match types.get(current.parent_type_id) {
            Some(parent) => current = parent,
            None => {
                tracing::debug!(
                    type_key = %leaf.type_key,
                    parent_type_id = current.parent_type_id,
                    "parent activity type not found"
                );
                return Category::Other;
            }
        }
    }
}
