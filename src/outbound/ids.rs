use uuid::Uuid;

pub const TEAM: &str = "team";
pub const TEAM_MEMBER: &str = "tmem";
pub const INTEGRATION: &str = "intg";
pub const INSIGHT: &str = "inst";
pub const EVENT: &str = "evnt";
pub const PULSE_DIGEST: &str = "plse";
pub const TEAM_METRIC: &str = "tmet";

/// Prefixed, time-ordered opaque identifier, e.g. `team_0190f0c4…`.
pub fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::now_v7().simple())
}
