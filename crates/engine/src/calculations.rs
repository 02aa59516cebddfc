//! Allocation and settlement engine.
//!
//! [`compute`] turns an [`ExpenseGroup`] snapshot into [`Calculations`]. It is
//! a pure function: no I/O, no hidden state, and equal input always produces
//! equal output. The stages run in dependency order:
//!
//! 1. item allocation: each item's signed value is split equally among the
//!    people it applies to;
//! 2. per-person base totals and the aggregate expense/discount totals;
//! 3. tips, computed per person on their own positive base total;
//! 4. payment-group aggregation, giving every member of a cluster the combined
//!    figure of the whole cluster;
//!
//! followed by the validity check that cross-foots the per-person totals
//! against the net total.
//!
//! # Examples
//!
//! ```rust
//! use engine::{ExpenseGroup, Item, ItemKind, Person, compute};
//!
//! let mut group = ExpenseGroup::with_id("g", "Lunch").unwrap();
//! group.insert_person(Person::with_id("a", "Ana").unwrap()).unwrap();
//! group.insert_person(Person::with_id("b", "Bruno").unwrap()).unwrap();
//! group
//!     .add_item(Item::everyone("Pizza", 1.0, 40.0, ItemKind::Expense).unwrap())
//!     .unwrap();
//! group.set_tip_percentage(Some(10.0));
//!
//! let calc = compute(&group);
//! assert_eq!(calc.totals["a"], 20.0);
//! assert_eq!(calc.tips["a"], 2.0);
//! assert_eq!(calc.totals_with_tips["b"], 22.0);
//! assert!(calc.is_valid);
//! ```
use std::collections::BTreeMap;

use serde::Serialize;

use crate::{ExpenseGroup, ItemKind, PersonId};

/// Tolerance of the validity check, absorbing floating point drift.
pub const VALIDITY_TOLERANCE: f64 = 0.01;

/// Per-person amounts, keyed by person id.
pub type PersonAmounts = BTreeMap<PersonId, f64>;

/// Derived figures of a group. Recomputed on every read, never persisted.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Calculations {
    /// Base total of each person: their share of all items before tip.
    pub totals: PersonAmounts,
    pub tips: PersonAmounts,
    pub totals_with_tips: PersonAmounts,
    /// Base totals summed over each person's payment group.
    pub grouped_totals: PersonAmounts,
    pub grouped_tips: PersonAmounts,
    /// What each person's payment group owes as a unit, tip included.
    pub grouped_totals_with_tips: PersonAmounts,
    /// The other members of each person's payment group (empty when none).
    pub person_group_members: BTreeMap<PersonId, Vec<PersonId>>,
    pub total_expenses: f64,
    pub total_discounts: f64,
    /// Expenses minus discounts, independent of the allocation.
    pub net_total: f64,
    pub sum_of_shares: f64,
    pub total_tips: f64,
    pub sum_of_shares_with_tips: f64,
    /// `false` when the per-person totals do not add up to the net total,
    /// e.g. because an item applies to nobody.
    pub is_valid: bool,
}

/// Computes the calculations of `group`.
///
/// Precondition: payment groups are disjoint. With a person listed in two
/// clusters the grouped figures are undefined.
#[must_use]
pub fn compute(group: &ExpenseGroup) -> Calculations {
    let totals = base_totals(group);
    let (total_expenses, total_discounts) = aggregate_totals(group);
    let net_total = total_expenses - total_discounts;
    let sum_of_shares: f64 = totals.values().sum();

    let tips = person_tips(&totals, group.active_tip_percentage());
    let totals_with_tips: PersonAmounts = totals
        .iter()
        .map(|(id, total)| (id.clone(), total + tips[id]))
        .collect();
    let total_tips: f64 = tips.values().sum();
    let sum_of_shares_with_tips: f64 = totals_with_tips.values().sum();

    let grouped_totals = grouped(group, &totals);
    let grouped_tips = grouped(group, &tips);
    let grouped_totals_with_tips = grouped(group, &totals_with_tips);
    let person_group_members = person_group_members(group);

    let is_valid = (net_total - sum_of_shares).abs() < VALIDITY_TOLERANCE;
    if !is_valid {
        tracing::debug!(
            group_id = %group.id,
            net_total,
            sum_of_shares,
            "allocation does not match net total"
        );
    }

    Calculations {
        totals,
        tips,
        totals_with_tips,
        grouped_totals,
        grouped_tips,
        grouped_totals_with_tips,
        person_group_members,
        total_expenses,
        total_discounts,
        net_total,
        sum_of_shares,
        total_tips,
        sum_of_shares_with_tips,
        is_valid,
    }
}

/// Stages 1 and 2: split every item and accumulate the shares per person.
fn base_totals(group: &ExpenseGroup) -> PersonAmounts {
    let mut totals: PersonAmounts = group
        .people
        .iter()
        .map(|person| (person.id.clone(), 0.0))
        .collect();

    for item in &group.items {
        let applicable = item.applicable_people(&group.people);
        // Nobody to charge: the item only shows up in the aggregates.
        if applicable.is_empty() {
            continue;
        }
        let share = item.signed_value() / applicable.len() as f64;
        for person in applicable {
            if let Some(total) = totals.get_mut(&person.id) {
                *total += share;
            }
        }
    }
    totals
}

fn aggregate_totals(group: &ExpenseGroup) -> (f64, f64) {
    group
        .items
        .iter()
        .fold((0.0, 0.0), |(expenses, discounts), item| match item.kind {
            ItemKind::Expense => (expenses + item.value(), discounts),
            ItemKind::Discount => (expenses, discounts + item.value()),
        })
}

/// Stage 3: only a positive base total pays tip.
fn person_tips(totals: &PersonAmounts, tip_percentage: Option<f64>) -> PersonAmounts {
    totals
        .iter()
        .map(|(id, total)| (id.clone(), tip_for(*total, tip_percentage)))
        .collect()
}

pub(crate) fn tip_for(base_total: f64, tip_percentage: Option<f64>) -> f64 {
    match tip_percentage {
        Some(pct) if base_total > 0.0 => base_total * (pct / 100.0),
        _ => 0.0,
    }
}

/// Stage 4: every member of a cluster gets the cluster sum, taken once in
/// cluster order so all members report the very same figure.
fn grouped(group: &ExpenseGroup, amounts: &PersonAmounts) -> PersonAmounts {
    let mut grouped = amounts.clone();
    for cluster in &group.payment_groups {
        let cluster_total: f64 = cluster
            .iter()
            .map(|member| amounts.get(member).copied().unwrap_or(0.0))
            .sum();
        for member in cluster {
            if let Some(amount) = grouped.get_mut(member) {
                *amount = cluster_total;
            }
        }
    }
    grouped
}

fn person_group_members(group: &ExpenseGroup) -> BTreeMap<PersonId, Vec<PersonId>> {
    let members = group.payment_group_members();
    group
        .people
        .iter()
        .map(|person| {
            let others: Vec<PersonId> = members
                .get(person.id.as_str())
                .map(|cluster| {
                    cluster
                        .iter()
                        .filter(|member| **member != person.id)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            (person.id.clone(), others)
        })
        .collect()
}
