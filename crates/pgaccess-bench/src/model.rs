//! User records shared by both access paths.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::users;

/// A stored user row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A user about to be created through the ORM.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Create a record stamped with the current time.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }
}
