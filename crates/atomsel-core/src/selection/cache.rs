use super::config::SelectionConfig;
use crate::core::models::group::{GroupKey, GroupTarget};
use crate::core::models::ids::{SelectionId, StructureId};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct CachedResult {
    generation: u64,
    members: Vec<usize>,
}

/// Ordered selection results, keyed by the selection and the group it was
/// applied to.
///
/// A cache is bound to one [`SelectionConfig`], the one every result it holds
/// was evaluated under. Each selection keeps at most one result per target; a
/// result from an older coordinate generation is replaced, not accumulated.
///
/// Kept outside the expression tree so that selections stay immutable and can
/// be shared freely.
#[derive(Debug, Default, Clone)]
pub struct SelectionCache {
    config: SelectionConfig,
    data: HashMap<SelectionId, HashMap<GroupTarget, CachedResult>>,
}

impl SelectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SelectionConfig) -> Self {
        Self {
            config,
            data: HashMap::new(),
        }
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn insert(&mut self, selection: SelectionId, group: GroupKey, members: Vec<usize>) {
        self.data.entry(selection).or_default().insert(
            group.target,
            CachedResult {
                generation: group.generation,
                members,
            },
        );
    }

    /// Returns the stored result, if it was computed at the key's generation.
    pub fn get(&self, selection: SelectionId, group: &GroupKey) -> Option<&[usize]> {
        self.data
            .get(&selection)
            .and_then(|inner_map| inner_map.get(&group.target))
            .filter(|cached| cached.generation == group.generation)
            .map(|cached| cached.members.as_slice())
    }

    pub fn len(&self) -> usize {
        self.data.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.data.values().all(HashMap::is_empty)
    }

    /// Drops every result but keeps the configuration.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Drops every result computed on the given structure.
    pub fn invalidate_structure(&mut self, structure: StructureId) {
        for inner_map in self.data.values_mut() {
            inner_map.retain(|target, _| target.structure != structure);
        }
        self.data.retain(|_, inner_map| !inner_map.is_empty());
    }

    pub fn invalidate_selection(&mut self, selection: SelectionId) {
        self.data.remove(&selection);
    }
}
