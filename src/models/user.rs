use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_salt: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_salt: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn into_user(self, id: String, created_at: NaiveDateTime) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password_salt: self.password_salt,
            password_hash: self.password_hash,
            created_at,
        }
    }
}
