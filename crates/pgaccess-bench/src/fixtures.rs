//! Synthetic data for benchmarks.
//!
//! Every row is derived from a loop index, so a row's identity can be checked
//! after the fact: seeding `n` rows of a cohort after a truncate yields
//! identifier `i + 1` for the row named with index `i`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::NewUser;

/// A family of synthetic users sharing one naming scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cohort {
    /// Rows created by the ORM insert benchmark.
    Orm,
    /// Rows created by the driver insert benchmark.
    Driver,
    /// Rows created by the COPY benchmark.
    Copy,
    /// Rows seeded before the query benchmarks.
    Query,
}

impl Cohort {
    /// Capitalised label used in names.
    pub fn label(&self) -> &'static str {
        match self {
            Cohort::Orm => "Orm",
            Cohort::Driver => "Driver",
            Cohort::Copy => "Copy",
            Cohort::Query => "Query",
        }
    }

    /// Lowercase prefix used in email local parts.
    pub fn email_prefix(&self) -> &'static str {
        match self {
            Cohort::Orm => "orm",
            Cohort::Driver => "driver",
            Cohort::Copy => "copy",
            Cohort::Query => "query",
        }
    }

    /// Name for the row at `index`, e.g. `"Query User 499"`.
    pub fn name(&self, index: usize) -> String {
        format!("{} User {}", self.label(), index)
    }

    /// Email for the row at `index`, e.g. `"query_user_499@example.com"`.
    pub fn email(&self, index: usize) -> String {
        format!("{}_user_{}@example.com", self.email_prefix(), index)
    }

    /// Build an insertable record for the row at `index`.
    pub fn new_user(&self, index: usize) -> NewUser {
        NewUser::new(self.name(index), self.email(index))
    }

    /// The `(name, email)` pair for the row at `index`.
    pub fn fields(&self, index: usize) -> (String, String) {
        (self.name(index), self.email(index))
    }
}

/// Generate `count` records of a cohort, starting at index `offset`.
pub fn generate_batch(cohort: Cohort, offset: usize, count: usize) -> Vec<NewUser> {
    (offset..offset + count).map(|i| cohort.new_user(i)).collect()
}

/// Generate `count` `(name, email)` pairs of a cohort, starting at `offset`.
pub fn generate_fields(cohort: Cohort, offset: usize, count: usize) -> Vec<(String, String)> {
    (offset..offset + count).map(|i| cohort.fields(i)).collect()
}

/// Picks identifiers uniformly from `[1, population]`.
pub struct IdPicker {
    rng: StdRng,
    population: i64,
}

impl IdPicker {
    /// Create a picker. With `seed == None` the sequence differs per run.
    pub fn new(population: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            population: population.max(1) as i64,
        }
    }

    /// Upper bound of the identifier range.
    pub fn population(&self) -> i64 {
        self.population
    }

    /// Next random identifier.
    pub fn next_id(&mut self) -> i64 {
        self.rng.gen_range(1..=self.population)
    }
}
