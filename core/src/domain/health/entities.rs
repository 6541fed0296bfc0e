use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthReport {
    pub provider: String,
    pub cloud_name_configured: bool,
    pub credentials_configured: bool,
}
