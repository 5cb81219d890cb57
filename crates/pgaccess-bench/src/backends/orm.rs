//! ORM access path.
//!
//! Statements are built with the diesel query DSL and executed over a single
//! `diesel-async` connection, which caches prepared statements per query shape.

use diesel::prelude::*;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl, SimpleAsyncConnection};
use tokio::runtime::Runtime;

use crate::error::Result;
use crate::model::{NewUser, User};
use crate::schema::{users, CREATE_USERS, TRUNCATE_USERS};

/// Rows per multi-row INSERT when bulk-creating through the ORM.
///
/// Three bind parameters per row keeps each statement under PostgreSQL's
/// limit of 65535 parameters.
pub const CREATE_CHUNK_SIZE: usize = 10_000;

/// ORM backend for benchmarks.
pub struct OrmBackend {
    conn: AsyncPgConnection,
    rt: Runtime,
}

impl OrmBackend {
    /// Open the ORM connection.
    pub fn connect(database_url: &str) -> Result<Self> {
        let rt = Runtime::new()?;
        let conn = rt.block_on(AsyncPgConnection::establish(database_url))?;
        Ok(Self { conn, rt })
    }

    /// Create the `users` table and its unique email index if absent.
    pub fn migrate(&mut self) -> Result<()> {
        self.rt.block_on(self.conn.batch_execute(CREATE_USERS))?;
        Ok(())
    }

    /// Remove every row and restart identifiers at 1.
    pub fn reset(&mut self) -> Result<()> {
        self.rt.block_on(self.conn.batch_execute(TRUNCATE_USERS))?;
        Ok(())
    }

    /// Create one user and return the stored row.
    pub fn create_user(&mut self, user: &NewUser) -> Result<User> {
        let created = self.rt.block_on(
            diesel::insert_into(users::table)
                .values(user)
                .returning(User::as_returning())
                .get_result(&mut self.conn),
        )?;
        Ok(created)
    }

    /// Create many users with multi-row INSERTs. Returns the number of rows written.
    pub fn create_users(&mut self, records: &[NewUser]) -> Result<usize> {
        let mut written = 0;
        for chunk in records.chunks(CREATE_CHUNK_SIZE) {
            written += self.rt.block_on(
                diesel::insert_into(users::table)
                    .values(chunk)
                    .execute(&mut self.conn),
            )?;
        }
        Ok(written)
    }

    /// Fetch the user with the given primary key.
    pub fn find_user(&mut self, id: i64) -> Result<User> {
        let user = self.rt.block_on(
            users::table
                .find(id)
                .select(User::as_select())
                .first(&mut self.conn),
        )?;
        Ok(user)
    }

    /// Number of rows in `users`.
    pub fn count_users(&mut self) -> Result<i64> {
        let count = self
            .rt
            .block_on(users::table.count().get_result::<i64>(&mut self.conn))?;
        Ok(count)
    }

    /// Close the connection.
    pub fn close(self) {
        let Self { conn, rt } = self;
        drop(conn);
        drop(rt);
        tracing::debug!("orm connection closed");
    }
}
