//! CLI configuration

use std::path::PathBuf;

use clap::Args;
use dispensary::{
    catalog::Catalog,
    fixtures::{Fixture, FixtureError},
};
use tracing_subscriber::EnvFilter;

/// Settings shared by every subcommand, read from flags, the environment or `.env`
#[derive(Debug, Args)]
pub(crate) struct Config {
    /// Directory holding fixture files
    #[arg(long, env = "DISPENSARY_FIXTURES", default_value = "./fixtures", global = true)]
    pub fixtures: PathBuf,

    /// Product fixture to load as the catalog
    #[arg(long, env = "DISPENSARY_CATALOG", default_value = "pharmacy", global = true)]
    pub catalog: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,
}

impl Config {
    /// Install the global tracing subscriber
    pub(crate) fn init_tracing(&self) {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_err| EnvFilter::new(&self.log_level)),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    /// Load the configured catalog fixture
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture cannot be loaded.
    pub(crate) fn load_catalog(&self) -> Result<Catalog, FixtureError> {
        Fixture::with_base_path(&self.fixtures).load_catalog(&self.catalog)
    }
}
