use api_types::export::{ExportData, ExportSettings, ExportVersion};

use crate::{ExpenseGroup, ResultEngine};

use super::{Engine, ensure_loadable};

impl Engine {
    /// Snapshot of every group as an export document.
    ///
    /// `settings` are presentation settings owned by the host; they travel
    /// with the document untouched.
    pub fn export_document(&self, settings: Option<ExportSettings>) -> ExportData {
        ExportData {
            groups: self.groups.iter().map(Into::into).collect(),
            settings,
            version: ExportVersion::V1,
        }
    }

    /// Replaces all groups with those of `document`.
    ///
    /// The import is all-or-nothing: if any group fails validation the store
    /// is left unchanged. The selection is kept when the selected group still
    /// exists, otherwise it moves to the first imported group.
    pub fn import_document(
        &mut self,
        document: ExportData,
    ) -> ResultEngine<Option<ExportSettings>> {
        let groups = document
            .groups
            .into_iter()
            .map(ExpenseGroup::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;
        ensure_loadable(&groups)?;

        let keep_selection = self
            .selected
            .as_deref()
            .is_some_and(|id| groups.iter().any(|group| group.id == id));
        if !keep_selection {
            self.selected = groups.first().map(|group| group.id.clone());
        }

        tracing::info!(groups = groups.len(), "groups imported");
        self.groups = groups;
        self.caches.clear();
        Ok(document.settings)
    }
}

#[cfg(test)]
mod tests {
    use api_types::export::{ExportData, ExportSettings, Theme};

    use crate::{Engine, EngineError, Item, ItemKind};

    fn engine() -> (Engine, String) {
        let mut engine = Engine::default();
        let id = engine.create_group("Dinner").unwrap();
        let group = engine.group_mut(&id).unwrap();
        let ana = group.add_person("Ana").unwrap();
        group.add_person("Bruno").unwrap();
        group
            .add_item(Item::shared_by("Wine", 1.0, 30.0, ItemKind::Expense, [ana]).unwrap())
            .unwrap();
        group.set_tip_percentage(Some(12.5));
        (engine, id)
    }

    #[test]
    fn export_then_import_restores_groups() {
        let (engine, id) = engine();
        let settings = ExportSettings {
            currency: "BRL".to_string(),
            language: Some("pt-BR".to_string()),
            theme: Theme::System,
        };
        let document = engine.export_document(Some(settings.clone()));
        let json = serde_json::to_string(&document).unwrap();
        assert!(json.contains("\"version\":\"1.0.0\""));

        let mut restored = Engine::default();
        let parsed: ExportData = serde_json::from_str(&json).unwrap();
        let carried = restored.import_document(parsed).unwrap();
        assert_eq!(carried, Some(settings));
        assert_eq!(restored.groups(), engine.groups());
        assert_eq!(restored.selected_group().unwrap().id, id);
    }

    #[test]
    fn invalid_import_leaves_store_untouched() {
        let (mut engine, id) = engine();
        let mut document = engine.export_document(None);
        document.groups[0].items[0].price = -1.0;
        let before = engine.groups().to_vec();

        assert!(matches!(
            engine.import_document(document),
            Err(EngineError::InvalidAmount(_))
        ));
        assert_eq!(engine.groups(), before.as_slice());
        assert_eq!(engine.selected_group().unwrap().id, id);
    }

    #[test]
    fn duplicate_group_ids_are_rejected() {
        let (mut engine, id) = engine();
        let mut document = engine.export_document(None);
        document.groups.push(document.groups[0].clone());
        assert_eq!(
            engine.import_document(document),
            Err(EngineError::ExistingKey(id))
        );
    }
}
