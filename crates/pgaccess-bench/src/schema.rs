//! The `users` table, as seen by the ORM and as created in the database.

diesel::table! {
    users (id) {
        id -> Int8,
        name -> Text,
        email -> Text,
        created_at -> Timestamptz,
    }
}

/// DDL applied by the ORM handle during setup.
///
/// Email uniqueness lives in the database, not in the benchmark code.
pub const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users (email);
"#;

/// Wipe all rows and restart the identifier sequence at 1.
pub const TRUNCATE_USERS: &str = "TRUNCATE TABLE users RESTART IDENTITY CASCADE";
