//! Direct-driver access path.
//!
//! Plain SQL through a `sqlx` connection pool, plus the PostgreSQL COPY
//! protocol for bulk loads.

use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolCopyExt, PgPoolOptions};
use sqlx::{PgPool, Row};
use tokio::runtime::Runtime;

use crate::error::Result;
use crate::model::User;

const INSERT_USER: &str = "INSERT INTO users (name, email, created_at) VALUES ($1, $2, NOW())";
const SELECT_USER: &str = "SELECT name, email, created_at FROM users WHERE id = $1";
const COUNT_USERS: &str = "SELECT COUNT(*) FROM users";
const COPY_USERS: &str = "COPY users (name, email) FROM STDIN";

/// Direct-driver backend for benchmarks.
pub struct DriverBackend {
    pool: PgPool,
    rt: Runtime,
}

impl DriverBackend {
    /// Open a connection pool with at most `max_connections` connections.
    pub fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let rt = Runtime::new()?;
        let pool = rt.block_on(
            PgPoolOptions::new()
                .max_connections(max_connections)
                .connect(database_url),
        )?;
        Ok(Self { pool, rt })
    }

    /// Insert one user with a parameterized statement.
    pub fn insert_user(&self, name: &str, email: &str) -> Result<()> {
        self.rt.block_on(
            sqlx::query(INSERT_USER)
                .bind(name)
                .bind(email)
                .execute(&self.pool),
        )?;
        Ok(())
    }

    /// Bulk-load `(name, email)` rows with `COPY ... FROM STDIN`.
    ///
    /// Returns the row count reported by the server.
    pub fn copy_users(&self, rows: &[(String, String)]) -> Result<u64> {
        let mut payload = Vec::with_capacity(rows.len() * 64);
        for (name, email) in rows {
            encode_copy_row(&mut payload, &[name.as_str(), email.as_str()]);
        }

        let written = self.rt.block_on(async {
            let mut copy = self.pool.copy_in_raw(COPY_USERS).await?;
            let sent = copy.send(payload).await.map(|_| ());
            if let Err(e) = sent {
                copy.abort(e.to_string()).await.ok();
                return Err(e);
            }
            copy.finish().await
        })?;
        Ok(written)
    }

    /// Fetch the user with the given identifier, scanning columns by hand.
    pub fn find_user(&self, id: i64) -> Result<User> {
        let row = self
            .rt
            .block_on(sqlx::query(SELECT_USER).bind(id).fetch_one(&self.pool))?;

        let name: String = row.try_get("name")?;
        let email: String = row.try_get("email")?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;

        Ok(User {
            id,
            name,
            email,
            created_at,
        })
    }

    /// Number of rows in `users`.
    pub fn count_users(&self) -> Result<i64> {
        let count = self
            .rt
            .block_on(sqlx::query_scalar::<_, i64>(COUNT_USERS).fetch_one(&self.pool))?;
        Ok(count)
    }

    /// Close every pooled connection.
    pub fn close(self) {
        self.rt.block_on(self.pool.close());
        tracing::debug!("driver pool closed");
    }
}

/// Append one line of COPY text format to `buf`.
///
/// Fields are tab-separated; backslash, tab, newline and carriage return inside
/// a field are backslash-escaped.
pub fn encode_copy_row(buf: &mut Vec<u8>, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            buf.push(b'\t');
        }
        for byte in field.bytes() {
            match byte {
                b'\\' => buf.extend_from_slice(b"\\\\"),
                b'\t' => buf.extend_from_slice(b"\\t"),
                b'\n' => buf.extend_from_slice(b"\\n"),
                b'\r' => buf.extend_from_slice(b"\\r"),
                other => buf.push(other),
            }
        }
    }
    buf.push(b'\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(fields: &[&str]) -> String {
        let mut buf = Vec::new();
        encode_copy_row(&mut buf, fields);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_plain_row() {
        assert_eq!(
            encode(&["Copy User 7", "copy_user_7@example.com"]),
            "Copy User 7\tcopy_user_7@example.com\n"
        );
    }

    #[test]
    fn test_special_characters_escaped() {
        assert_eq!(encode(&["a\tb", "c\nd"]), "a\\tb\tc\\nd\n");
        assert_eq!(encode(&["back\\slash", "cr\r"]), "back\\\\slash\tcr\\r\n");
    }

    #[test]
    fn test_rows_append() {
        let mut buf = Vec::new();
        encode_copy_row(&mut buf, &["x", "y"]);
        encode_copy_row(&mut buf, &["z", "w"]);
        assert_eq!(buf, b"x\ty\nz\tw\n");
    }

    #[test]
    fn test_multibyte_text_passes_through() {
        assert_eq!(encode(&["Zoë", "zoë@example.com"]), "Zoë\tzoë@example.com\n");
    }
}
