//! Core application

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::ApiServer;
use crate::core::cli::{self, CliConfig, Commands, SystemCommands, UserCommands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::core::storage::AppStorage;
use crate::data::SqliteService;
use crate::data::sqlite::repositories as repos;
use crate::domain::{CatalogService, import};

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub storage: AppStorage,
    pub database: Arc<SqliteService>,
    pub catalog: Arc<CatalogService>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        match command {
            Some(Commands::System {
                command: system_cmd,
            }) => {
                return Self::handle_system_command(system_cmd);
            }
            Some(Commands::Import { ingredients, tags }) => {
                let app = Self::init(&cli_config).await?;
                let result = app.import_csv(ingredients, tags).await;
                app.shutdown.shutdown().await;
                return result;
            }
            Some(Commands::User {
                command: user_cmd,
            }) => {
                let app = Self::init(&cli_config).await?;
                let result = app.handle_user_command(user_cmd).await;
                app.shutdown.shutdown().await;
                return result;
            }
            Some(Commands::Start) | None => {}
        }

        let app = Self::init(&cli_config).await?;
        Self::start_server(app).await
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        let storage = AppStorage::init().await?;
        let database = Arc::new(SqliteService::init(&storage, config.debug).await?);
        let catalog = Arc::new(CatalogService::new(database.clone()));
        let shutdown = ShutdownService::new(database.clone());

        Ok(Self {
            shutdown,
            config,
            storage,
            database,
            catalog,
        })
    }

    /// Load ingredient and tag dictionaries from CSV files
    async fn import_csv(
        &self,
        ingredients: Option<PathBuf>,
        tags: Option<PathBuf>,
    ) -> Result<()> {
        if ingredients.is_none() && tags.is_none() {
            anyhow::bail!("Nothing to import: pass --ingredients and/or --tags");
        }

        if let Some(path) = ingredients {
            let report = import::import_ingredients(self.database.pool(), &path).await?;
            println!(
                "Ingredients: {} created, {} already present ({} rows read)",
                report.created,
                report.existing,
                report.total()
            );
        }

        if let Some(path) = tags {
            let report = import::import_tags(self.database.pool(), &path).await?;
            println!(
                "Tags: {} created, {} already present ({} rows read)",
                report.created,
                report.existing,
                report.total()
            );
        }

        Ok(())
    }

    async fn handle_user_command(&self, cmd: UserCommands) -> Result<()> {
        match cmd {
            UserCommands::Remove { username, yes } => self.remove_user(&username, yes).await,
        }
    }

    async fn remove_user(&self, username: &str, skip_confirm: bool) -> Result<()> {
        let pool = self.database.pool();

        let user = repos::get_by_username(pool, username)
            .await?
            .with_context(|| format!("No user named '{}'", username))?;
        let recipe_count = repos::count_recipes_by_author(pool, user.id).await?;

        println!(
            "This will permanently delete '{}' <{}> and {} authored recipe(s),",
            user.username, user.email, recipe_count
        );
        println!("along with their favorites, shopping list entries, and subscriptions.");

        if !skip_confirm {
            print!("\nContinue? [y/N] ");
            std::io::Write::flush(&mut std::io::stdout())?;

            let mut input = String::new();
            std::io::stdin().read_line(&mut input)?;

            if !matches!(input.trim().to_lowercase().as_str(), "y" | "yes") {
                println!("Aborted.");
                return Ok(());
            }
        }

        repos::delete_user(pool, user.id).await?;
        println!("Removed user '{}'", user.username);
        Ok(())
    }

    fn handle_system_command(cmd: SystemCommands) -> Result<()> {
        match cmd {
            SystemCommands::Prune { yes } => Self::prune_data(yes),
        }
    }

    fn prune_data(skip_confirm: bool) -> Result<()> {
        let data_dir = AppStorage::resolve_data_dir();

        if !data_dir.exists() {
            println!(
                "Nothing to prune. Data directory does not exist: {}",
                data_dir.display()
            );
            return Ok(());
        }

        let data_dir = data_dir.canonicalize().unwrap_or(data_dir);

        println!("This will permanently delete the local data directory:");
        println!("  {}", data_dir.display());
        println!();
        println!(
            "Make sure the server is not running. \
             Deleting data while the server is running will cause data corruption."
        );

        if !skip_confirm {
            print!("\nContinue? [y/N] ");
            std::io::Write::flush(&mut std::io::stdout())?;

            let mut input = String::new();
            std::io::stdin().read_line(&mut input)?;

            if !matches!(input.trim().to_lowercase().as_str(), "y" | "yes") {
                println!("Aborted.");
                return Ok(());
            }
        }

        std::fs::remove_dir_all(&data_dir)
            .with_context(|| format!("Failed to delete data directory: {}", data_dir.display()))?;
        println!("Pruned: {}", data_dir.display());
        Ok(())
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(app: Self) -> Result<()> {
        // Install signal handlers FIRST (before any blocking calls)
        app.shutdown.install_signal_handlers();

        app.start_background_tasks().await;

        tracing::info!(
            host = %app.config.server.host,
            port = app.config.server.port,
            docs = %format!("{}/api/docs", app.config.server.public_base_url()),
            data_dir = %app.storage.data_dir().display(),
            "Server starting"
        );

        let server = ApiServer::new(app);
        let app = server.start().await?;
        app.shutdown.shutdown().await;

        Ok(())
    }

    async fn start_background_tasks(&self) {
        self.shutdown
            .register(
                self.database
                    .start_checkpoint_task(self.shutdown.subscribe()),
            )
            .await;

        tracing::debug!("Background tasks started");
    }
}
