use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProviderRequest {
    pub user: Uuid,
    #[validate(length(min = 1, message = "service is required"))]
    pub service: String,
    pub experience: Option<String>,
    pub hourly_rate: Option<String>,
    pub skills: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub profile_image: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[validate(range(min = 0))]
    pub total_jobs: Option<i64>,
    #[validate(range(min = 0))]
    pub completed_jobs: Option<i64>,
    #[validate(range(min = 0))]
    pub earnings: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum MediaKind {
    IdProof,
    Certificates,
    WorkPhotos,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AttachMediaRequest {
    pub user: Uuid,
    pub kind: MediaKind,
    #[validate(length(min = 1, message = "No files uploaded"))]
    pub files: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProviderMedia {
    pub kind: MediaKind,
    pub files: Vec<String>,
}
