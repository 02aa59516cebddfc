use std::collections::{BTreeMap, HashSet};

use crate::{ResultEngine, util::normalize_key};

use super::Engine;

impl Engine {
    /// Names of people from the other groups that are not yet part of
    /// `group_id`, sorted and deduplicated.
    ///
    /// Names are compared ignoring case, accents and punctuation, so `José`
    /// is not suggested to a group that already has a `jose`.
    pub fn name_suggestions(&self, group_id: &str) -> ResultEngine<Vec<String>> {
        let group = self.group(group_id)?;
        let present: HashSet<String> = group
            .people
            .iter()
            .filter_map(|person| normalize_key(&person.name))
            .collect();

        // First spelling seen wins for each normalized name.
        let mut candidates: BTreeMap<String, String> = BTreeMap::new();
        for other in self.groups.iter().filter(|other| other.id != group.id) {
            for person in &other.people {
                let Some(key) = normalize_key(&person.name) else {
                    continue;
                };
                if present.contains(&key) {
                    continue;
                }
                candidates.entry(key).or_insert_with(|| person.name.clone());
            }
        }

        let mut names: Vec<String> = candidates.into_values().collect();
        names.sort_by_key(|name| name.to_lowercase());
        Ok(names)
    }
}
