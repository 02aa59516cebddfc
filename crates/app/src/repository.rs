//! On-disk snapshot of the groups.
//!
//! The groups are kept as a pretty-printed export document. A missing file
//! reads as "no groups", and saving keeps the presentation settings already
//! present in the file.
use std::{
    fs,
    path::{Path, PathBuf},
};

use api_types::export::{ExportData, ExportVersion};
use engine::{ExpenseGroup, GroupRepository, ResultEngine};

#[derive(Clone, Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the raw document, `None` when the file does not exist.
    pub fn read_document(&self) -> ResultEngine<Option<ExportData>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }
}

impl GroupRepository for JsonFileRepository {
    fn load(&self) -> ResultEngine<Vec<ExpenseGroup>> {
        let Some(document) = self.read_document()? else {
            tracing::debug!(path = %self.path.display(), "no snapshot found");
            return Ok(Vec::new());
        };
        document
            .groups
            .into_iter()
            .map(ExpenseGroup::try_from)
            .collect()
    }

    fn save(&self, groups: &[ExpenseGroup]) -> ResultEngine<()> {
        let settings = self.read_document()?.and_then(|document| document.settings);
        let document = ExportData {
            groups: groups.iter().map(Into::into).collect(),
            settings,
            version: ExportVersion::V1,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(&document)?;
        fs::write(&self.path, payload)?;
        tracing::debug!(path = %self.path.display(), groups = groups.len(), "snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use api_types::export::{ExportSettings, Theme};
    use engine::{Engine, Item, ItemKind};
    use uuid::Uuid;

    use super::*;

    fn scratch_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../target/test_snapshots")
            .join(format!("groups_{}.json", Uuid::new_v4()))
    }

    #[test]
    fn missing_file_loads_empty() {
        let repo = JsonFileRepository::new(scratch_path());
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_keeps_groups_and_settings() {
        let path = scratch_path();
        let repo = JsonFileRepository::new(&path);

        let mut group = ExpenseGroup::new("Market").unwrap();
        group.add_person("Ana").unwrap();
        group
            .add_item(Item::everyone("Cheese", 0.5, 42.0, ItemKind::Expense).unwrap())
            .unwrap();
        repo.save(std::slice::from_ref(&group)).unwrap();

        // Settings written by another host survive a save.
        let mut document = repo.read_document().unwrap().unwrap();
        document.settings = Some(ExportSettings {
            currency: "EUR".to_string(),
            language: None,
            theme: Theme::Light,
        });
        fs::write(&path, serde_json::to_string(&document).unwrap()).unwrap();
        repo.save(std::slice::from_ref(&group)).unwrap();

        let document = repo.read_document().unwrap().unwrap();
        assert_eq!(document.settings.unwrap().theme, Theme::Light);
        assert_eq!(repo.load().unwrap(), vec![group]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn store_round_trips_through_file() {
        let path = scratch_path();
        let repo = JsonFileRepository::new(&path);

        let mut engine = Engine::builder().groups(repo.load().unwrap()).build().unwrap();
        let id = engine.create_group("Camping").unwrap();
        {
            let group = engine.group_mut(&id).unwrap();
            let ana = group.add_person("Ana").unwrap();
            let bia = group.add_person("Bia").unwrap();
            group
                .add_item(Item::everyone("Tent", 1.0, 80.0, ItemKind::Expense).unwrap())
                .unwrap();
            group.new_payment_group(&ana).unwrap();
            group.assign_to_payment_group(&bia, 0).unwrap();
        }
        repo.save(engine.groups()).unwrap();

        let mut reloaded = Engine::builder()
            .groups(repo.load().unwrap())
            .selected(id.clone())
            .build()
            .unwrap();
        let calc = reloaded.calculations(&id).unwrap();
        assert!(calc.grouped_totals_with_tips.values().all(|total| *total == 80.0));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn malformed_document_is_rejected() {
        let path = scratch_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"groups": 3, "version": "1.0.0"}"#).unwrap();
        let repo = JsonFileRepository::new(&path);
        assert!(repo.load().is_err());
        fs::remove_file(&path).unwrap();
    }
}
