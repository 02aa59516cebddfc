//! The module contains the representation of an expense group.
//!
//! A group is mutated only through the operations below. Every operation keeps
//! the group internally consistent: removing a person also removes them from
//! item selections and payment groups, and payment groups never keep an empty
//! cluster around.
use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    EngineError, Item, Person, PersonId, ResultEngine,
    util::required_name,
    validation::{validate_group, validate_item, validate_payment_groups},
};

/// A named collection of people and the items they split.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExpenseGroup {
    pub id: String,
    pub name: String,
    pub people: Vec<Person>,
    pub items: Vec<Item>,
    /// Tip percentage applied to each person's positive base total.
    ///
    /// Only a finite value `> 0` enables the tip, see
    /// [`ExpenseGroup::active_tip_percentage`].
    pub tip_percentage: Option<f64>,
    /// Clusters of people settling as one unit.
    ///
    /// Callers must keep them disjoint: a person id may appear in at most one
    /// cluster. The engine does not repair overlapping clusters.
    pub payment_groups: Vec<Vec<PersonId>>,
}

impl ExpenseGroup {
    /// Creates an empty group with a fresh id.
    pub fn new(name: &str) -> ResultEngine<Self> {
        Self::with_id(Uuid::new_v4().to_string(), name)
    }

    /// Creates an empty group with a caller supplied id.
    pub fn with_id(id: impl Into<String>, name: &str) -> ResultEngine<Self> {
        Ok(Self {
            id: id.into(),
            name: required_name(name, "group")?,
            people: Vec::new(),
            items: Vec::new(),
            tip_percentage: None,
            payment_groups: Vec::new(),
        })
    }

    pub fn rename(&mut self, name: &str) -> ResultEngine<()> {
        self.name = required_name(name, "group")?;
        Ok(())
    }

    pub fn person(&self, person_id: &str) -> Option<&Person> {
        self.people.iter().find(|person| person.id == person_id)
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Adds a new person and returns their id.
    pub fn add_person(&mut self, name: &str) -> ResultEngine<PersonId> {
        let person = Person::new(name)?;
        let id = person.id.clone();
        self.insert_person(person)?;
        Ok(id)
    }

    /// Adds an existing person, rejecting a duplicate id.
    pub fn insert_person(&mut self, person: Person) -> ResultEngine<()> {
        if self.person(&person.id).is_some() {
            return Err(EngineError::ExistingKey(person.id));
        }
        self.people.push(person);
        Ok(())
    }

    /// Removes a person and every reference to them.
    ///
    /// The id is stripped from each item selection and from its payment
    /// group; a payment group left empty is dropped.
    pub fn remove_person(&mut self, person_id: &str) -> ResultEngine<Person> {
        let index = self
            .people
            .iter()
            .position(|person| person.id == person_id)
            .ok_or_else(|| EngineError::KeyNotFound(person_id.to_string()))?;
        let person = self.people.remove(index);

        for item in &mut self.items {
            item.selected_people.retain(|id| id != person_id);
        }
        for cluster in &mut self.payment_groups {
            cluster.retain(|id| id != person_id);
        }
        self.payment_groups.retain(|cluster| !cluster.is_empty());

        Ok(person)
    }

    /// Adds an item after validating it.
    pub fn add_item(&mut self, item: Item) -> ResultEngine<()> {
        validate_item(&item)?;
        if self.item(&item.id).is_some() {
            return Err(EngineError::ExistingKey(item.id));
        }
        self.items.push(item);
        Ok(())
    }

    pub fn remove_item(&mut self, item_id: &str) -> ResultEngine<Item> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| EngineError::KeyNotFound(item_id.to_string()))?;
        Ok(self.items.remove(index))
    }

    /// Sets the tip percentage. Anything that does not enable a tip (absent,
    /// zero, negative, NaN) is stored as `None`.
    pub fn set_tip_percentage(&mut self, tip_percentage: Option<f64>) {
        self.tip_percentage = normalize_tip(tip_percentage);
    }

    /// The tip percentage, if it enables a tip.
    #[must_use]
    pub fn active_tip_percentage(&self) -> Option<f64> {
        normalize_tip(self.tip_percentage)
    }

    /// Replaces the payment groups.
    ///
    /// Empty clusters are dropped; the rest must be disjoint and reference
    /// people of the group.
    pub fn set_payment_groups(&mut self, payment_groups: Vec<Vec<PersonId>>) -> ResultEngine<()> {
        let previous = std::mem::take(&mut self.payment_groups);
        self.payment_groups = payment_groups
            .into_iter()
            .filter(|cluster| !cluster.is_empty())
            .collect();
        if let Err(err) = validate_payment_groups(self) {
            self.payment_groups = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Index of the payment group containing `person_id`.
    pub fn payment_group_of(&self, person_id: &str) -> Option<usize> {
        self.payment_groups
            .iter()
            .position(|cluster| cluster.iter().any(|id| id == person_id))
    }

    /// Moves a person into the payment group at `index`, leaving their
    /// previous one. Emptied clusters are dropped.
    pub fn assign_to_payment_group(&mut self, person_id: &str, index: usize) -> ResultEngine<()> {
        self.require_person(person_id)?;
        if index >= self.payment_groups.len() {
            return Err(EngineError::KeyNotFound(format!("payment group {index}")));
        }
        if self.payment_group_of(person_id) == Some(index) {
            return Ok(());
        }

        self.detach(person_id);
        self.payment_groups[index].push(person_id.to_string());
        self.payment_groups.retain(|cluster| !cluster.is_empty());
        Ok(())
    }

    /// Starts a new payment group holding `person_id` and returns its index.
    pub fn new_payment_group(&mut self, person_id: &str) -> ResultEngine<usize> {
        self.require_person(person_id)?;
        self.detach(person_id);
        self.payment_groups.retain(|cluster| !cluster.is_empty());
        self.payment_groups.push(vec![person_id.to_string()]);
        Ok(self.payment_groups.len() - 1)
    }

    /// Removes a person from their payment group, if any.
    pub fn unassign_from_payment_group(&mut self, person_id: &str) -> ResultEngine<()> {
        self.require_person(person_id)?;
        self.detach(person_id);
        self.payment_groups.retain(|cluster| !cluster.is_empty());
        Ok(())
    }

    /// People settling individually.
    pub fn unassigned_people(&self) -> Vec<&Person> {
        self.people
            .iter()
            .filter(|person| self.payment_group_of(&person.id).is_none())
            .collect()
    }

    /// Map from person id to the full cluster it belongs to (itself included).
    pub(crate) fn payment_group_members(&self) -> HashMap<&str, &[PersonId]> {
        let mut members = HashMap::new();
        for cluster in &self.payment_groups {
            for person_id in cluster {
                members.insert(person_id.as_str(), cluster.as_slice());
            }
        }
        members
    }

    fn require_person(&self, person_id: &str) -> ResultEngine<()> {
        self.person(person_id)
            .map(|_| ())
            .ok_or_else(|| EngineError::KeyNotFound(person_id.to_string()))
    }

    fn detach(&mut self, person_id: &str) {
        for cluster in &mut self.payment_groups {
            cluster.retain(|id| id != person_id);
        }
    }
}

fn normalize_tip(tip_percentage: Option<f64>) -> Option<f64> {
    tip_percentage.filter(|pct| pct.is_finite() && *pct > 0.0)
}

impl TryFrom<api_types::group::ExpenseGroup> for ExpenseGroup {
    type Error = EngineError;

    fn try_from(value: api_types::group::ExpenseGroup) -> Result<Self, Self::Error> {
        let group = Self {
            id: value.id,
            name: value.name,
            people: value.people.into_iter().map(Person::from).collect(),
            items: value.items.into_iter().map(Item::from).collect(),
            tip_percentage: value.tip_percentage,
            payment_groups: value.payment_groups.unwrap_or_default(),
        };
        validate_group(&group)?;
        Ok(Self {
            tip_percentage: normalize_tip(group.tip_percentage),
            ..group
        })
    }
}

impl From<&ExpenseGroup> for api_types::group::ExpenseGroup {
    fn from(value: &ExpenseGroup) -> Self {
        Self {
            id: value.id.clone(),
            name: value.name.clone(),
            people: value.people.iter().map(Into::into).collect(),
            items: value.items.iter().map(Into::into).collect(),
            tip_percentage: value.active_tip_percentage(),
            payment_groups: (!value.payment_groups.is_empty())
                .then(|| value.payment_groups.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemKind;

    fn group() -> ExpenseGroup {
        let mut group = ExpenseGroup::with_id("g", "Dinner").unwrap();
        for (id, name) in [("a", "Ana"), ("b", "Bruno"), ("c", "Carla")] {
            group.insert_person(Person::with_id(id, name).unwrap()).unwrap();
        }
        group
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn remove_person_cleans_references() {
        let mut group = group();
        group
            .add_item(Item::shared_by("Wine", 1.0, 20.0, ItemKind::Expense, ["a", "b"]).unwrap())
            .unwrap();
        group
            .set_payment_groups(vec![ids(&["a", "b"]), ids(&["c"])])
            .unwrap();

        let removed = group.remove_person("c").unwrap();
        assert_eq!(removed.name, "Carla");
        assert_eq!(group.payment_groups, vec![ids(&["a", "b"])]);

        group.remove_person("a").unwrap();
        assert_eq!(group.items[0].selected_people, ids(&["b"]));
        assert_eq!(group.payment_groups, vec![ids(&["b"])]);

        assert_eq!(
            group.remove_person("a"),
            Err(EngineError::KeyNotFound("a".to_string()))
        );
    }

    #[test]
    fn insert_person_rejects_duplicate_id() {
        let mut group = group();
        let duplicate = Person::with_id("a", "Other").unwrap();
        assert_eq!(
            group.insert_person(duplicate),
            Err(EngineError::ExistingKey("a".to_string()))
        );
        let id = group.add_person("  Davi ").unwrap();
        assert_eq!(group.person(&id).unwrap().name, "Davi");
    }

    #[test]
    fn remove_item_reports_missing() {
        let mut group = group();
        let item = Item::everyone("Bread", 1.0, 4.0, ItemKind::Expense).unwrap();
        let id = item.id.clone();
        group.add_item(item).unwrap();
        assert_eq!(group.remove_item(&id).unwrap().name, "Bread");
        assert!(matches!(
            group.remove_item(&id),
            Err(EngineError::KeyNotFound(_))
        ));
    }

    #[test]
    fn tip_is_normalized() {
        let mut group = group();
        group.set_tip_percentage(Some(10.0));
        assert_eq!(group.active_tip_percentage(), Some(10.0));
        for disabled in [Some(0.0), Some(-5.0), Some(f64::NAN), None] {
            group.set_tip_percentage(disabled);
            assert_eq!(group.tip_percentage, None);
        }
    }

    #[test]
    fn set_payment_groups_drops_empty_and_keeps_previous_on_error() {
        let mut group = group();
        group
            .set_payment_groups(vec![ids(&["a"]), vec![], ids(&["b", "c"])])
            .unwrap();
        assert_eq!(group.payment_groups, vec![ids(&["a"]), ids(&["b", "c"])]);

        let err = group.set_payment_groups(vec![ids(&["a", "b"]), ids(&["b"])]);
        assert!(matches!(err, Err(EngineError::InvalidPaymentGroup(_))));
        assert_eq!(group.payment_groups, vec![ids(&["a"]), ids(&["b", "c"])]);
    }

    #[test]
    fn moving_between_payment_groups() {
        let mut group = group();
        let first = group.new_payment_group("a").unwrap();
        assert_eq!(first, 0);
        group.assign_to_payment_group("b", 0).unwrap();
        assert_eq!(group.payment_groups, vec![ids(&["a", "b"])]);

        let second = group.new_payment_group("c").unwrap();
        assert_eq!(second, 1);
        group.assign_to_payment_group("c", 0).unwrap();
        // The cluster left empty by `c` is gone.
        assert_eq!(group.payment_groups, vec![ids(&["a", "b", "c"])]);

        group.unassign_from_payment_group("b").unwrap();
        assert_eq!(group.payment_group_of("b"), None);
        assert_eq!(group.payment_group_of("c"), Some(0));
        let unassigned: Vec<&str> = group
            .unassigned_people()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(unassigned, vec!["b"]);

        assert!(group.assign_to_payment_group("b", 3).is_err());
        assert!(group.new_payment_group("ghost").is_err());
    }

    #[test]
    fn wire_round_trip_normalizes_tip() {
        let mut group = group();
        group.tip_percentage = Some(0.0);
        let wire = api_types::group::ExpenseGroup::from(&group);
        assert_eq!(wire.tip_percentage, None);
        assert_eq!(wire.payment_groups, None);

        let mut wire = wire;
        wire.tip_percentage = Some(0.0);
        let restored = ExpenseGroup::try_from(wire).unwrap();
        assert_eq!(restored.tip_percentage, None);
        assert_eq!(restored.people.len(), 3);
    }

    #[test]
    fn wire_conversion_validates() {
        let mut wire = api_types::group::ExpenseGroup::from(&group());
        wire.payment_groups = Some(vec![ids(&["a"]), ids(&["a", "b"])]);
        assert!(matches!(
            ExpenseGroup::try_from(wire),
            Err(EngineError::InvalidPaymentGroup(_))
        ));
    }
}
