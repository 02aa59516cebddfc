//! Validation boundary.
//!
//! Documents are checked here before they reach the engine, so the
//! computation can assume well-formed input. Items with an empty participant
//! set are accepted on purpose: they are reported through
//! [`Calculations::is_valid`](crate::Calculations::is_valid) instead.

use std::collections::HashSet;

use crate::{EngineError, ExpenseGroup, Item, ResultEngine, util::normalize_display};

/// Check a single item: non-blank name, finite and positive quantity and unit
/// price.
pub fn validate_item(item: &Item) -> ResultEngine<()> {
    if normalize_display(&item.name).is_none() {
        return Err(EngineError::InvalidName(format!(
            "item '{}' has an empty name",
            item.id
        )));
    }
    if !item.amount.is_finite() || item.amount <= 0.0 {
        return Err(EngineError::InvalidAmount(format!(
            "item '{}': amount must be > 0",
            item.name
        )));
    }
    if !item.price.is_finite() || item.price <= 0.0 {
        return Err(EngineError::InvalidAmount(format!(
            "item '{}': price must be > 0",
            item.name
        )));
    }
    Ok(())
}

/// Check a tip percentage. Absent or zero means "no tip".
pub fn validate_tip_percentage(tip_percentage: Option<f64>) -> ResultEngine<()> {
    match tip_percentage {
        Some(pct) if !pct.is_finite() => Err(EngineError::InvalidTip(
            "tip percentage must be a finite number".to_string(),
        )),
        Some(pct) if pct < 0.0 => Err(EngineError::InvalidTip(
            "tip percentage must be >= 0".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Check that payment groups are non-empty, disjoint clusters of known
/// people.
pub fn validate_payment_groups(group: &ExpenseGroup) -> ResultEngine<()> {
    let known: HashSet<&str> = group.people.iter().map(|p| p.id.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    for (index, cluster) in group.payment_groups.iter().enumerate() {
        if cluster.is_empty() {
            return Err(EngineError::InvalidPaymentGroup(format!(
                "payment group {index} is empty"
            )));
        }
        for person_id in cluster {
            if !known.contains(person_id.as_str()) {
                return Err(EngineError::InvalidPaymentGroup(format!(
                    "payment group {index} references unknown person '{person_id}'"
                )));
            }
            if !seen.insert(person_id.as_str()) {
                return Err(EngineError::InvalidPaymentGroup(format!(
                    "person '{person_id}' appears in more than one payment group"
                )));
            }
        }
    }
    Ok(())
}

/// Check a whole group before handing it to the engine.
pub fn validate_group(group: &ExpenseGroup) -> ResultEngine<()> {
    if normalize_display(&group.name).is_none() {
        return Err(EngineError::InvalidName(format!(
            "group '{}' has an empty name",
            group.id
        )));
    }

    let mut ids = HashSet::new();
    for person in &group.people {
        if normalize_display(&person.name).is_none() {
            return Err(EngineError::InvalidName(format!(
                "person '{}' has an empty name",
                person.id
            )));
        }
        if !ids.insert(person.id.as_str()) {
            return Err(EngineError::ExistingKey(person.id.clone()));
        }
    }

    let mut item_ids = HashSet::new();
    for item in &group.items {
        validate_item(item)?;
        if !item_ids.insert(item.id.as_str()) {
            return Err(EngineError::ExistingKey(item.id.clone()));
        }
    }

    validate_tip_percentage(group.tip_percentage)?;
    validate_payment_groups(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItemKind, Person};

    fn group() -> ExpenseGroup {
        let mut group = ExpenseGroup::with_id("g", "Trip").unwrap();
        group.people = vec![
            Person::with_id("a", "Ana").unwrap(),
            Person::with_id("b", "Bruno").unwrap(),
        ];
        group
    }

    #[test]
    fn accepts_empty_participant_item() {
        let mut group = group();
        let nobody = Vec::<String>::new();
        group
            .items
            .push(Item::shared_by("Ghost", 1.0, 5.0, ItemKind::Expense, nobody).unwrap());
        assert!(validate_group(&group).is_ok());
    }

    #[test]
    fn rejects_negative_price() {
        let mut group = group();
        let mut item = Item::everyone("Beer", 1.0, 5.0, ItemKind::Expense).unwrap();
        item.price = -5.0;
        group.items.push(item);
        assert_eq!(
            validate_group(&group),
            Err(EngineError::InvalidAmount(
                "item 'Beer': price must be > 0".to_string()
            ))
        );
    }

    #[test]
    fn rejects_nan_tip() {
        let mut group = group();
        group.tip_percentage = Some(f64::NAN);
        assert!(matches!(
            validate_group(&group),
            Err(EngineError::InvalidTip(_))
        ));
        group.tip_percentage = Some(0.0);
        assert!(validate_group(&group).is_ok());
    }

    #[test]
    fn rejects_overlapping_payment_groups() {
        let mut group = group();
        group.payment_groups = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["b".to_string()],
        ];
        assert_eq!(
            validate_group(&group),
            Err(EngineError::InvalidPaymentGroup(
                "person 'b' appears in more than one payment group".to_string()
            ))
        );
    }

    #[test]
    fn rejects_unknown_payment_group_member() {
        let mut group = group();
        group.payment_groups = vec![vec!["a".to_string(), "zed".to_string()]];
        assert!(matches!(
            validate_payment_groups(&group),
            Err(EngineError::InvalidPaymentGroup(_))
        ));
    }

    #[test]
    fn rejects_duplicate_person_ids() {
        let mut group = group();
        group.people.push(Person::with_id("a", "Another Ana").unwrap());
        assert_eq!(
            validate_group(&group),
            Err(EngineError::ExistingKey("a".to_string()))
        );
    }
}
