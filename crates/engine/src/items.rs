//! Items shared inside a group.
//!
//! An [`Item`] is a single expense or discount entry with a quantity and a
//! unit price. Its value is split in equal parts among the people it applies
//! to: every person of the group when `applies_to_everyone` is set, otherwise
//! the people listed in `selected_people`.
//!
//! Amounts are plain `f64` values in major units. No rounding happens here:
//! rounding to cents is a presentation concern.
use serde::Serialize;
use uuid::Uuid;

use crate::{Person, PersonId, ResultEngine, util::required_name, validation::validate_item};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Expense,
    Discount,
}

impl ItemKind {
    /// Sign applied to the item value: `+1` for expenses, `-1` for discounts.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Expense => 1.0,
            Self::Discount => -1.0,
        }
    }
}

impl From<api_types::group::ItemType> for ItemKind {
    fn from(value: api_types::group::ItemType) -> Self {
        match value {
            api_types::group::ItemType::Expense => Self::Expense,
            api_types::group::ItemType::Discount => Self::Discount,
        }
    }
}

impl From<ItemKind> for api_types::group::ItemType {
    fn from(value: ItemKind) -> Self {
        match value {
            ItemKind::Expense => Self::Expense,
            ItemKind::Discount => Self::Discount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Quantity.
    pub amount: f64,
    /// Unit price.
    pub price: f64,
    pub kind: ItemKind,
    pub applies_to_everyone: bool,
    pub selected_people: Vec<PersonId>,
}

impl Item {
    /// Creates an item shared by every person of the group.
    pub fn everyone(name: &str, amount: f64, price: f64, kind: ItemKind) -> ResultEngine<Self> {
        Self::build(name, amount, price, kind, true, Vec::new())
    }

    /// Creates an item shared only by `people`.
    pub fn shared_by<I, S>(
        name: &str,
        amount: f64,
        price: f64,
        kind: ItemKind,
        people: I,
    ) -> ResultEngine<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<PersonId>,
    {
        let selected = people.into_iter().map(Into::into).collect();
        Self::build(name, amount, price, kind, false, selected)
    }

    fn build(
        name: &str,
        amount: f64,
        price: f64,
        kind: ItemKind,
        applies_to_everyone: bool,
        selected_people: Vec<PersonId>,
    ) -> ResultEngine<Self> {
        let item = Self {
            id: Uuid::new_v4().to_string(),
            name: required_name(name, "item")?,
            amount,
            price,
            kind,
            applies_to_everyone,
            selected_people,
        };
        validate_item(&item)?;
        Ok(item)
    }

    /// Total value of the item (`amount * price`), unsigned.
    ///
    /// Non-finite or negative factors count as zero so malformed input can
    /// never leak `NaN` into the totals.
    #[must_use]
    pub fn value(&self) -> f64 {
        clamp_non_negative(self.amount) * clamp_non_negative(self.price)
    }

    /// Value with the sign of the item kind.
    #[must_use]
    pub fn signed_value(&self) -> f64 {
        self.kind.sign() * self.value()
    }

    /// People of `people` the item is split among, in group order.
    ///
    /// Ids in `selected_people` that name nobody in `people` are ignored.
    pub fn applicable_people<'a>(&self, people: &'a [Person]) -> Vec<&'a Person> {
        if self.applies_to_everyone {
            return people.iter().collect();
        }
        people
            .iter()
            .filter(|person| self.selected_people.contains(&person.id))
            .collect()
    }
}

fn clamp_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

impl From<api_types::group::Item> for Item {
    fn from(value: api_types::group::Item) -> Self {
        Self {
            id: value.id,
            name: value.name,
            amount: value.amount,
            price: value.price,
            kind: value.item_type.into(),
            applies_to_everyone: value.applies_to_everyone,
            selected_people: value.selected_people,
        }
    }
}

impl From<&Item> for api_types::group::Item {
    fn from(value: &Item) -> Self {
        Self {
            id: value.id.clone(),
            name: value.name.clone(),
            amount: value.amount,
            price: value.price,
            item_type: value.kind.into(),
            applies_to_everyone: value.applies_to_everyone,
            selected_people: value.selected_people.clone(),
        }
    }
}
