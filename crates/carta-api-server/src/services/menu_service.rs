//! Menu write and read flows over the store port.

use std::sync::Arc;

use tracing::{debug, info};

use crate::database::MenuStore;
use crate::models::{CartaDocument, MenuUpload};
use crate::utils::error::ApiError;

pub struct MenuService<S: MenuStore> {
    store: Arc<S>,
}

impl<S: MenuStore> MenuService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Canonicalize a validated upload and append it as a new record.
    /// Returns the store-assigned id.
    pub async fn save(&self, bar_id: i32, menu: MenuUpload) -> Result<i64, ApiError> {
        let document = CartaDocument::from_upload(bar_id, menu);

        let menu_json = serde_json::to_string(&document)
            .map_err(|e| ApiError::Internal(format!("serializing menu document: {e}")))?;

        let id = self
            .store
            .insert(bar_id, &menu_json)
            .await
            .map_err(|e| ApiError::Database(e.to_string()))?;

        info!("Saved menu {} for bar {}", id, bar_id);
        Ok(id)
    }

    /// Resolve the most recent document for a bar. `None` means the bar has
    /// no stored menu; a record that no longer deserializes is an internal
    /// error, not an absence.
    pub async fn latest(&self, bar_id: i32) -> Result<Option<CartaDocument>, ApiError> {
        let record = self
            .store
            .find_latest(bar_id)
            .await
            .map_err(|e| ApiError::Database(e.to_string()))?;

        let Some(record) = record else {
            debug!("No menu stored for bar {}", bar_id);
            return Ok(None);
        };

        let document: CartaDocument = serde_json::from_str(&record.menu_json)
            .map_err(|e| ApiError::Internal(format!("corrupt menu record {}: {e}", record.id)))?;

        Ok(Some(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::store::MockMenuStore;
    use crate::database::MenuRecord;
    use chrono::Utc;
    use serde_json::json;

    fn upload() -> MenuUpload {
        serde_json::from_value(json!({
            "categorias": [
                {"nombre": "Bebidas", "productos": [{"nombre": "Cerveza", "precio": 2.5}]}
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_inserts_canonical_document() {
        let mut store = MockMenuStore::new();
        store
            .expect_insert()
            .withf(|bar_id, menu_json| {
                let value: serde_json::Value = serde_json::from_str(menu_json).unwrap();
                *bar_id == 3
                    && value["barId"] == 3
                    && value["categorias"][0]["productos"][0]["descripcion"] == ""
            })
            .returning(|_, _| Ok(42));

        let service = MenuService::new(Arc::new(store));
        let id = service.save(3, upload()).await.unwrap();
        assert_eq!(id, 42);
    }

    #[tokio::test]
    async fn test_save_propagates_store_failure() {
        let mut store = MockMenuStore::new();
        store
            .expect_insert()
            .returning(|_, _| Err(anyhow::anyhow!("connection refused")));

        let service = MenuService::new(Arc::new(store));
        let err = service.save(1, upload()).await.unwrap_err();
        assert!(matches!(err, ApiError::Database(_)));
    }

    #[tokio::test]
    async fn test_latest_returns_none_for_unknown_bar() {
        let mut store = MockMenuStore::new();
        store.expect_find_latest().returning(|_| Ok(None));

        let service = MenuService::new(Arc::new(store));
        assert!(service.latest(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_latest_deserializes_stored_document() {
        let mut store = MockMenuStore::new();
        store.expect_find_latest().returning(|bar_id| {
            Ok(Some(MenuRecord {
                id: 1,
                bar_id,
                menu_json: r#"{"barId":5,"categorias":[]}"#.to_string(),
                created_at: Utc::now(),
            }))
        });

        let service = MenuService::new(Arc::new(store));
        let document = service.latest(5).await.unwrap().unwrap();
        assert_eq!(document.bar_id, 5);
        assert!(document.categorias.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_record_is_internal_error_not_absence() {
        let mut store = MockMenuStore::new();
        store.expect_find_latest().returning(|bar_id| {
            Ok(Some(MenuRecord {
                id: 9,
                bar_id,
                menu_json: "not json at all".to_string(),
                created_at: Utc::now(),
            }))
        });

        let service = MenuService::new(Arc::new(store));
        let err = service.latest(1).await.unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
