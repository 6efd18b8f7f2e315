use serde::Serialize;

#[derive(Serialize)]
pub enum ResponseType {
    #[serde(rename = "health")]
    Health,
}

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

/// Body returned by every delete route.
#[derive(Serialize)]
pub struct SuccessResponse {
    success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
