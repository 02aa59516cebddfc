//! Detailed view of a single person's balance.
//!
//! Lists every item the person shares with the split it produced, the tip on
//! top of it and, when the person settles with others, the figure of their
//! payment group. The figures are read from [`Calculations`], so they are
//! exactly the ones [`compute`] reports.
use serde::Serialize;

use crate::{Calculations, ExpenseGroup, Item, ItemKind, PersonAmounts, PersonId, compute};

/// One item as seen by one participant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemShare {
    pub item_id: String,
    pub name: String,
    pub kind: ItemKind,
    pub applies_to_everyone: bool,
    /// Unsigned `amount * price`.
    pub total_value: f64,
    /// Everyone splitting the item, in group order.
    pub participants: Vec<PersonId>,
    /// Signed share of this person.
    pub per_person: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaymentGroupShare {
    /// Position of the cluster in the group's payment groups.
    pub index: usize,
    /// People of the cluster, in group order.
    pub members: Vec<PersonId>,
    /// What the cluster owes together, tips included.
    pub total: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PersonBreakdown {
    pub person_id: PersonId,
    pub items: Vec<ItemShare>,
    pub base_total: f64,
    pub tip: f64,
    pub total_with_tip: f64,
    /// `true` when the group has a tip enabled, even if this person pays none.
    pub has_tip: bool,
    pub tip_percentage: Option<f64>,
    pub payment_group: Option<PaymentGroupShare>,
}

/// Builds the breakdown of `person_id`, or `None` if the person is not part
/// of the group.
pub fn person_breakdown(group: &ExpenseGroup, person_id: &str) -> Option<PersonBreakdown> {
    breakdown_from(group, &compute(group), person_id)
}

/// Same as [`person_breakdown`], reusing calculations already computed for
/// `group`.
pub(crate) fn breakdown_from(
    group: &ExpenseGroup,
    calculations: &Calculations,
    person_id: &str,
) -> Option<PersonBreakdown> {
    let person = group.person(person_id)?;
    let tip_percentage = group.active_tip_percentage();
    let figure = |amounts: &PersonAmounts| amounts.get(&person.id).copied().unwrap_or(0.0);

    let items = group
        .items
        .iter()
        .filter_map(|item| item_share(group, item, &person.id))
        .collect();

    let payment_group = group.payment_group_of(&person.id).map(|index| PaymentGroupShare {
        index,
        members: group
            .people
            .iter()
            .filter(|p| group.payment_groups[index].contains(&p.id))
            .map(|p| p.id.clone())
            .collect(),
        total: figure(&calculations.grouped_totals_with_tips),
    });

    Some(PersonBreakdown {
        person_id: person.id.clone(),
        items,
        base_total: figure(&calculations.totals),
        tip: figure(&calculations.tips),
        total_with_tip: figure(&calculations.totals_with_tips),
        has_tip: tip_percentage.is_some(),
        tip_percentage,
        payment_group,
    })
}

fn item_share(group: &ExpenseGroup, item: &Item, person_id: &str) -> Option<ItemShare> {
    let applicable = item.applicable_people(&group.people);
    if !applicable.iter().any(|p| p.id == person_id) {
        return None;
    }
    Some(ItemShare {
        item_id: item.id.clone(),
        name: item.name.clone(),
        kind: item.kind,
        applies_to_everyone: item.applies_to_everyone,
        total_value: item.value(),
        per_person: item.signed_value() / applicable.len() as f64,
        participants: applicable.iter().map(|p| p.id.clone()).collect(),
    })
}
