//! Wire schema shared by the engine and its hosts.
//!
//! These types mirror the JSON documents produced by the splitting app
//! (camelCase keys, optional fields omitted). They carry no invariants: the
//! engine converts them into its own model and validates them there.
use serde::{Deserialize, Serialize};

pub mod group {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ItemType {
        Expense,
        Discount,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Person {
        pub id: String,
        pub name: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Item {
        pub id: String,
        pub name: String,
        /// Quantity.
        pub amount: f64,
        /// Unit price.
        pub price: f64,
        #[serde(rename = "type")]
        pub item_type: ItemType,
        pub applies_to_everyone: bool,
        /// Person ids sharing the item when `applies_to_everyone` is false.
        #[serde(default)]
        pub selected_people: Vec<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseGroup {
        pub id: String,
        pub name: String,
        #[serde(default)]
        pub people: Vec<Person>,
        #[serde(default)]
        pub items: Vec<Item>,
        /// Older documents store `null` or `0` for "no tip".
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub tip_percentage: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub payment_groups: Option<Vec<Vec<String>>>,
    }
}

pub mod export {
    use super::*;
    use crate::group::ExpenseGroup;

    /// Version tag of the export document. Only `1.0.0` exists today.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub enum ExportVersion {
        #[default]
        #[serde(rename = "1.0.0")]
        V1,
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Theme {
        #[default]
        System,
        Dark,
        Light,
    }

    /// Presentation settings travelling with an export.
    ///
    /// The engine never reads them; hosts carry them through unchanged.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExportSettings {
        pub currency: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub language: Option<String>,
        #[serde(default)]
        pub theme: Theme,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExportData {
        pub groups: Vec<ExpenseGroup>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub settings: Option<ExportSettings>,
        pub version: ExportVersion,
    }
}
