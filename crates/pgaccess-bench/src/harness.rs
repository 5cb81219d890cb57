//! Benchmark harness helpers.
//!
//! Owns the two long-lived client handles and the setup, seeding and teardown
//! steps around the timed loops.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::backends::{DriverBackend, OrmBackend};
use crate::config::BenchConfig;
use crate::error::{Error, Result};
use crate::fixtures::{generate_batch, Cohort, IdPicker};

/// Shared state for one benchmark process.
pub struct BenchContext {
    pub orm: OrmBackend,
    pub driver: DriverBackend,
    pub config: BenchConfig,
}

impl BenchContext {
    /// Connect both handles, apply the schema and empty the table.
    pub fn setup(config: BenchConfig) -> Result<Self> {
        config.validate()?;
        tracing::info!(
            url = %config.redacted_url(),
            max_connections = config.max_connections,
            "connecting to database"
        );

        let mut orm = OrmBackend::connect(&config.database_url)?;
        let driver = DriverBackend::connect(&config.database_url, config.max_connections)?;

        orm.migrate()?;
        orm.reset()?;
        tracing::info!("database setup complete");

        Ok(Self {
            orm,
            driver,
            config,
        })
    }

    /// Load configuration from the environment and run [`setup`](Self::setup).
    ///
    /// Any failure is logged and terminates the process with exit code 1.
    pub fn setup_or_exit() -> Self {
        init_tracing();

        let config = match BenchConfig::from_env() {
            Ok(config) => config,
            Err(e) => fatal("invalid benchmark configuration", &e),
        };

        match Self::setup(config) {
            Ok(ctx) => ctx,
            Err(e) => fatal("database setup failed", &e),
        }
    }

    /// Empty the table and seed `count` rows of the query cohort.
    ///
    /// Row `i` is named `"Query User {i}"` and receives identifier `i + 1`.
    pub fn prepare_query_data(&mut self, count: usize) -> Result<()> {
        self.orm.reset()?;
        let written = self.orm.create_users(&generate_batch(Cohort::Query, 0, count))?;
        tracing::debug!(rows = written, "seeded query data");
        Ok(())
    }

    /// Identifier picker over the configured query population.
    pub fn id_picker(&self) -> IdPicker {
        IdPicker::new(self.config.query_population, self.config.seed)
    }

    /// Close both handles.
    pub fn teardown(self) {
        self.orm.close();
        self.driver.close();
        tracing::info!("connections closed");
    }
}

/// Install the global tracing subscriber. Later calls are no-ops.
///
/// Logs go to stderr so they do not interleave with criterion's report.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pgaccess_bench=info,pgaccess_setup=info,orm_vs_driver=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Log a fatal error and exit the process.
pub fn fatal(context: &str, err: &Error) -> ! {
    tracing::error!(error = %err, "{context}");
    std::process::exit(1)
}
