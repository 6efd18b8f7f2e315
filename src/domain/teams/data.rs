use time::OffsetDateTime;

text_enum! {
    pub enum TeamRole: "team role" {
        Admin => "admin",
        Member => "member",
    }
}

impl Default for TeamRole {
    fn default() -> Self {
        TeamRole::Member
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamMember {
    pub id: String,
    pub team_id: String,
    pub user_id: String,
    pub role: TeamRole,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
