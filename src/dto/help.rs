use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Both fields default to empty so a missing one is reported by the service.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct HelpQueryRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HelpQueryAccepted {
    pub success: bool,
    pub message: String,
}
