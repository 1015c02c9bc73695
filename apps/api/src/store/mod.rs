//! Resume store — keyed by upload id, injected into handlers as `Arc<dyn ResumeStore>`.
//!
//! Entries are replaced wholesale on edit; nothing is merged.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::resume::StoredResume;
use crate::parsing::SectionMap;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Option<StoredResume>;

    async fn put(&self, resume: StoredResume);

    /// Replaces the parsed text and sections of an existing entry.
    /// Returns the updated entry, or `None` when the id is unknown.
    async fn update_content(
        &self,
        id: Uuid,
        text: String,
        sections: SectionMap,
    ) -> Option<StoredResume>;
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryResumeStore {
    entries: RwLock<HashMap<Uuid, StoredResume>>,
}

impl InMemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeStore for InMemoryResumeStore {
    async fn get(&self, id: Uuid) -> Option<StoredResume> {
        self.entries.read().await.get(&id).cloned()
    }

    async fn put(&self, resume: StoredResume) {
        self.entries.write().await.insert(resume.id, resume);
    }

    async fn update_content(
        &self,
        id: Uuid,
        text: String,
        sections: SectionMap,
    ) -> Option<StoredResume> {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(&id)?;
        entry.parsed.text = text;
        entry.parsed.sections = sections;
        entry.updated_at = Utc::now();
        Some(entry.clone())
    }
}
