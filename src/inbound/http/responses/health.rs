use crate::core::config::Storage;
use crate::inbound::http::responses::shared::ResponseType;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    data: HealthData,
    #[serde(rename = "type")]
    object_type: ResponseType,
}

#[derive(Serialize)]
pub struct HealthData {
    status: HealthStatus,
    storage: Storage,
}

#[derive(Serialize)]
pub enum HealthStatus {
    #[serde(rename = "OK")]
    Ok,
}

impl HealthResponse {
    pub fn ok(storage: Storage) -> Self {
        Self {
            data: HealthData {
                status: HealthStatus::Ok,
                storage,
            },
            object_type: ResponseType::Health,
        }
    }
}
