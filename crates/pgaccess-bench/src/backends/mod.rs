//! The two compared access paths.
//!
//! Both backends talk to the same `users` table and expose a blocking API, so
//! benchmark routines stay synchronous inside criterion's timing loop.

pub mod driver;
pub mod orm;

pub use driver::{encode_copy_row, DriverBackend};
pub use orm::OrmBackend;
