//! Endpoint tests driven through the real router against an in-memory
//! store implementation.


use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

use crate::database::{MenuRecord, MenuStore};

/// Append-only store backed by a Vec; latest resolution mirrors the
/// Postgres ordering (created_at, then id).
#[derive(Default)]
pub struct InMemoryMenuStore {
    records: Mutex<Vec<MenuRecord>>,
}

impl InMemoryMenuStore {
    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl MenuStore for InMemoryMenuStore {
    async fn insert(&self, bar_id: i32, menu_json: &str) -> Result<i64> {
        let mut records = self.records.lock().unwrap();
        let id = records.len() as i64 + 1;
        records.push(MenuRecord {
            id,
            bar_id,
            menu_json: menu_json.to_string(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn find_latest(&self, bar_id: i32) -> Result<Option<MenuRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|record| record.bar_id == bar_id)
            .max_by_key(|record| (record.created_at, record.id))
            .cloned())
    }
}
