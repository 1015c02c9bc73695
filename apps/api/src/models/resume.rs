use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::parsing::{DocumentFormat, ParsedDocument};

/// An uploaded resume as held by the store: the original file plus its parsed content.
#[derive(Debug, Clone, Serialize)]
pub struct StoredResume {
    pub id: Uuid,
    pub filename: String,
    pub format: DocumentFormat,
    #[serde(skip)]
    pub original: Bytes,
    pub parsed: ParsedDocument,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredResume {
    pub fn new(filename: String, format: DocumentFormat, original: Bytes, parsed: ParsedDocument) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            filename,
            format,
            original,
            parsed,
            uploaded_at: now,
            updated_at: now,
        }
    }
}
