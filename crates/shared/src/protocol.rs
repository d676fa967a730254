use serde::{Deserialize, Serialize};

use crate::domain::{ConnectionId, RegionHierarchy, RegionIndex};

pub const CONNECTIONS_PATH: &str = "api/v1/connections";
pub const FIND_REGION_PATH: &str = "api/v1/find_region";

/// Response wrapper used by every API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindRegionRequest {
    pub connection: ConnectionId,
    pub query: String,
}

/// Region index and hierarchy list of one search. The hierarchies reference
/// ids of the index, so the two are only ever handled together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindRegionResult {
    pub regions: RegionIndex,
    pub hierarchies: Vec<RegionHierarchy>,
}
