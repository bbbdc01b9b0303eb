use serde::Serialize;

/// An officer account allowed to operate the attendance system.
#[derive(Debug, Clone, Serialize)]
pub struct Officer {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    #[serde(skip)]
    pub password_hash: String,
    #[serde(skip)]
    pub salt: String,
    #[serde(skip)]
    pub iterations: u32,
    pub created_at: String,
}
