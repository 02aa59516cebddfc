//! Memoized calculations.
//!
//! [`compute`] is cheap, but hosts read the calculations on every render.
//! [`CalculationCache`] keeps the last snapshot and its result and only
//! recomputes when the group differs structurally from that snapshot.
use crate::{Calculations, ExpenseGroup, compute};

#[derive(Clone, Debug, Default)]
pub struct CalculationCache {
    last: Option<(ExpenseGroup, Calculations)>,
}

impl CalculationCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the calculations of `group`, reusing the cached ones when the
    /// group has not changed.
    pub fn get(&mut self, group: &ExpenseGroup) -> &Calculations {
        if !self.is_fresh(group) {
            self.last = None;
        }
        let (_, calculations) = self.last.get_or_insert_with(|| {
            tracing::debug!(group_id = %group.id, "recomputing group calculations");
            (group.clone(), compute(group))
        });
        calculations
    }

    /// Drops the cached snapshot.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Returns `true` if a result is cached for exactly this group.
    pub fn is_fresh(&self, group: &ExpenseGroup) -> bool {
        self.last
            .as_ref()
            .is_some_and(|(snapshot, _)| snapshot == group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Item, ItemKind, Person};

    fn group() -> ExpenseGroup {
        let mut group = ExpenseGroup::with_id("g", "Picnic").unwrap();
        group.insert_person(Person::with_id("a", "Ana").unwrap()).unwrap();
        group
            .add_item(Item::everyone("Fruit", 2.0, 3.5, ItemKind::Expense).unwrap())
            .unwrap();
        group
    }

    #[test]
    fn reuses_result_until_group_changes() {
        let mut cache = CalculationCache::new();
        let mut group = group();
        assert!(!cache.is_fresh(&group));

        let first = cache.get(&group).clone();
        assert!(cache.is_fresh(&group));
        assert_eq!(cache.get(&group), &first);

        group.set_tip_percentage(Some(10.0));
        assert!(!cache.is_fresh(&group));
        let second = cache.get(&group).clone();
        assert!((second.total_tips - 0.7).abs() < 1e-9);
        assert_ne!(second, first);

        cache.invalidate();
        assert!(!cache.is_fresh(&group));
    }
}
