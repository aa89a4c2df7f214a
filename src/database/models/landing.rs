use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public projection of a tenant's landing page, as served by the landing
/// route. Unpublished pages behave like missing ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Landing {
    pub id: Uuid,
    pub slug: String,
    pub display_name: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}
