use std::collections::{HashMap, HashSet};

use crate::{CalculationCache, EngineError, ExpenseGroup, ResultEngine, validation::validate_group};

mod export;
mod groups;
mod suggestions;

/// In-memory store of expense groups.
///
/// Holds the groups a host works on, the currently selected one and a
/// [`CalculationCache`] per group. Persistence is left to a
/// [`GroupRepository`](crate::GroupRepository).
#[derive(Debug, Default)]
pub struct Engine {
    groups: Vec<ExpenseGroup>,
    caches: HashMap<String, CalculationCache>,
    selected: Option<String>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    fn position(&self, group_id: &str) -> ResultEngine<usize> {
        self.groups
            .iter()
            .position(|group| group.id == group_id)
            .ok_or_else(|| EngineError::KeyNotFound(group_id.to_string()))
    }
}

/// Reject a set of groups with repeated ids or invalid content.
fn ensure_loadable(groups: &[ExpenseGroup]) -> ResultEngine<()> {
    let mut ids = HashSet::new();
    for group in groups {
        validate_group(group)?;
        if !ids.insert(group.id.as_str()) {
            return Err(EngineError::ExistingKey(group.id.clone()));
        }
    }
    Ok(())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    groups: Vec<ExpenseGroup>,
    selected: Option<String>,
}

impl EngineBuilder {
    /// Pass the initial groups (e.g. loaded from a repository).
    pub fn groups(mut self, groups: Vec<ExpenseGroup>) -> EngineBuilder {
        self.groups = groups;
        self
    }

    /// Preselect a group by id.
    pub fn selected(mut self, group_id: impl Into<String>) -> EngineBuilder {
        self.selected = Some(group_id.into());
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> ResultEngine<Engine> {
        ensure_loadable(&self.groups)?;
        if let Some(id) = &self.selected
            && !self.groups.iter().any(|group| &group.id == id)
        {
            return Err(EngineError::KeyNotFound(id.clone()));
        }
        tracing::debug!(groups = self.groups.len(), "engine built");
        Ok(Engine {
            groups: self.groups,
            caches: HashMap::new(),
            selected: self.selected,
        })
    }
}
