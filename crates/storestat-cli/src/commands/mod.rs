//! CLI command definitions and dispatch.

pub mod categories;
pub mod category;
pub mod config;
pub mod course;
pub mod system;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;

use storestat_core::config::{AppConfig, LoggingConfig};
use storestat_core::error::AppError;
use storestat_core::types::{CategoryId, UserId};
use storestat_database::repositories::{CategoryRepository, UsageRepository};
use storestat_database::DatabasePool;
use storestat_service::{LinkBuilder, RequestContext, UsageAggregator, UsageReportService};

use crate::output::OutputFormat;

/// StoreStat: storage usage reports for a learning platform
#[derive(Debug, Parser)]
#[command(name = "storestat", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Report as a non-admin allowed to view these categories (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub restrict_to: Vec<CategoryId>,

    /// Platform user id recorded in report events
    #[arg(long, default_value_t = UserId::new(0))]
    pub user_id: UserId,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Site-wide totals and the course versus user chart
    System,
    /// Course subtotals of a category, or of every course
    Category(category::CategoryArgs),
    /// Files of a single course
    Course(course::CourseArgs),
    /// Categories available for reporting
    Categories,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        if let Commands::Config(args) = &self.command {
            return config::execute(args, &self.config, self.format).await;
        }

        let config = load_config(&self.config)?;
        let app = ReportApp::connect(&config).await?;
        let ctx = self.request_context();
        debug!(
            config = %self.config,
            user_id = %ctx.user_id,
            admin = ctx.is_admin(),
            "Running report command"
        );

        let result = match &self.command {
            Commands::System => system::execute(&app.reports, &ctx, self.format).await,
            Commands::Category(args) => {
                category::execute(args, &app.reports, &ctx, self.format).await
            }
            Commands::Course(args) => course::execute(args, &app.reports, &ctx, self.format).await,
            Commands::Categories => categories::execute(&app.reports, &ctx, self.format).await,
            Commands::Config(_) => Ok(()),
        };

        app.pool.close().await;
        result
    }

    /// Authorization result the reports run under.
    fn request_context(&self) -> RequestContext {
        let username = std::env::var("USER").unwrap_or_else(|_| "cli".to_string());
        if self.restrict_to.is_empty() {
            RequestContext::site_admin(self.user_id, username)
        } else {
            RequestContext::restricted(self.user_id, username, self.restrict_to.clone())
        }
    }
}

/// Report service wired to PostgreSQL.
pub struct ReportApp {
    /// Connection pool, closed when the command finishes.
    pub pool: DatabasePool,
    /// Report service.
    pub reports: UsageReportService,
}

impl ReportApp {
    /// Connect to the platform database and build the services.
    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        let pool = DatabasePool::connect(&config.database).await?;
        let prefix = &config.database.table_prefix;

        let usage = Arc::new(UsageRepository::new(pool.pool().clone(), prefix));
        let tree = Arc::new(CategoryRepository::new(pool.pool().clone(), prefix));
        let aggregator = Arc::new(UsageAggregator::new(
            usage,
            tree.clone(),
            config.report.user_component.clone(),
        ));
        let reports = UsageReportService::new(
            aggregator,
            tree,
            LinkBuilder::new(config.site.base_url()),
            config.report.clone(),
        );

        Ok(Self { pool, reports })
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Logging settings from the configuration file, or defaults when it
/// cannot be loaded yet.
pub fn logging_config(config_path: &str) -> LoggingConfig {
    load_config(config_path)
        .map(|config| config.logging)
        .unwrap_or_default()
}
