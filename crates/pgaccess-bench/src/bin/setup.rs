//! Prepare the benchmark database: create the `users` table and empty it.
//!
//! Reads the same environment as the benchmarks. Exits with code 1 if the
//! configuration is invalid or the database cannot be set up.

use pgaccess_bench::BenchContext;

fn main() {
    let ctx = BenchContext::setup_or_exit();
    tracing::info!(url = %ctx.config.redacted_url(), "database ready");
    ctx.teardown();
}
