use engine::{Calculations, Engine, EngineError, PersonBreakdown};
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Serialize)]
pub struct GroupReport {
    pub group_id: String,
    pub name: String,
    pub calculations: Calculations,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<PersonBreakdown>,
}

/// Find a group by id first, then by case-insensitive name.
pub fn resolve_group(engine: &Engine, wanted: &str) -> Result<String> {
    if let Ok(group) = engine.group(wanted) {
        return Ok(group.id.clone());
    }
    let wanted_lower = wanted.trim().to_lowercase();
    engine
        .groups()
        .iter()
        .find(|group| group.name.to_lowercase() == wanted_lower)
        .map(|group| group.id.clone())
        .ok_or_else(|| EngineError::KeyNotFound(wanted.to_string()).into())
}

pub fn build(engine: &mut Engine, group_id: &str, person: Option<&str>) -> Result<GroupReport> {
    let breakdown = person
        .map(|person_id| engine.breakdown(group_id, person_id))
        .transpose()?;
    let calculations = engine.calculations(group_id)?.clone();
    if !calculations.is_valid {
        tracing::warn!(
            group_id,
            "per-person totals do not add up to the net total; some items may apply to nobody"
        );
    }
    let group = engine.group(group_id)?;
    Ok(GroupReport {
        group_id: group.id.clone(),
        name: group.name.clone(),
        calculations,
        breakdown,
    })
}
