use crate::{
    Calculations, EngineError, ExpenseGroup, PersonBreakdown, ResultEngine,
    breakdown::breakdown_from,
};

use super::Engine;

impl Engine {
    /// Creates a new empty group, selects it and returns its id.
    pub fn create_group(&mut self, name: &str) -> ResultEngine<String> {
        let group = ExpenseGroup::new(name)?;
        let id = group.id.clone();
        tracing::info!(group_id = %id, name = %group.name, "group created");
        self.groups.push(group);
        self.selected = Some(id.clone());
        Ok(id)
    }

    /// Deletes a group, clearing the selection if it pointed at it.
    pub fn delete_group(&mut self, group_id: &str) -> ResultEngine<ExpenseGroup> {
        let index = self.position(group_id)?;
        let group = self.groups.remove(index);
        self.caches.remove(group_id);
        if self.selected.as_deref() == Some(group_id) {
            self.selected = None;
        }
        tracing::info!(group_id = %group_id, "group deleted");
        Ok(group)
    }

    pub fn group(&self, group_id: &str) -> ResultEngine<&ExpenseGroup> {
        let index = self.position(group_id)?;
        Ok(&self.groups[index])
    }

    /// Mutable access for the group operations (people, items, tip, payment
    /// groups). Cached calculations notice the change on the next read.
    pub fn group_mut(&mut self, group_id: &str) -> ResultEngine<&mut ExpenseGroup> {
        let index = self.position(group_id)?;
        Ok(&mut self.groups[index])
    }

    pub fn groups(&self) -> &[ExpenseGroup] {
        &self.groups
    }

    /// Selects a group, or clears the selection with `None`.
    pub fn select_group(&mut self, group_id: Option<&str>) -> ResultEngine<()> {
        if let Some(id) = group_id {
            self.position(id)?;
        }
        self.selected = group_id.map(ToString::to_string);
        Ok(())
    }

    pub fn selected_group(&self) -> Option<&ExpenseGroup> {
        let id = self.selected.as_deref()?;
        self.groups.iter().find(|group| group.id == id)
    }

    /// Calculations of a group, memoized on its content.
    pub fn calculations(&mut self, group_id: &str) -> ResultEngine<&Calculations> {
        let index = self.position(group_id)?;
        let group = &self.groups[index];
        let cache = self.caches.entry(group.id.clone()).or_default();
        Ok(cache.get(group))
    }

    /// Detailed balance of one person of a group, built on the memoized
    /// calculations.
    pub fn breakdown(&mut self, group_id: &str, person_id: &str) -> ResultEngine<PersonBreakdown> {
        let index = self.position(group_id)?;
        let group = &self.groups[index];
        let calculations = self.caches.entry(group.id.clone()).or_default().get(group);
        breakdown_from(group, calculations, person_id)
            .ok_or_else(|| EngineError::KeyNotFound(person_id.to_string()))
    }
}
