//! People taking part in a group.
use serde::Serialize;
use uuid::Uuid;

use crate::{ResultEngine, util::required_name};

/// Identifier of a [`Person`] inside a group.
pub type PersonId = String;

/// A participant of an expense group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
}

impl Person {
    /// Creates a person with a fresh id. The name is trimmed and must not be
    /// blank.
    pub fn new(name: &str) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: required_name(name, "person")?,
        })
    }

    /// Creates a person with a caller supplied id (e.g. restored from a
    /// document).
    pub fn with_id(id: impl Into<PersonId>, name: &str) -> ResultEngine<Self> {
        Ok(Self {
            id: id.into(),
            name: required_name(name, "person")?,
        })
    }
}

impl From<api_types::group::Person> for Person {
    fn from(value: api_types::group::Person) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<&Person> for api_types::group::Person {
    fn from(value: &Person) -> Self {
        Self {
            id: value.id.clone(),
            name: value.name.clone(),
        }
    }
}
