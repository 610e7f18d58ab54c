use anyhow::Context;
use clap::Parser;
use sorting_robot::adapters::http;
use sorting_robot::config::cli::{ClientCommand, Command};
use sorting_robot::config::LogFormat;
use sorting_robot::utils::{logger, validation::Validate};
use sorting_robot::{
    CliConfig, ConfiguredRandom, Item, RemoteRobot, ServiceSettings, SortingError, SortingRobot,
    SortingService, TomlConfig,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match cli.command.clone() {
        Command::Serve {
            config,
            listen,
            capacity,
            seed,
        } => {
            let file_config = match &config {
                Some(path) => TomlConfig::from_file(path)
                    .with_context(|| format!("failed to load config file {}", path.display()))?,
                None => TomlConfig::default(),
            };

            let verbose = cli.verbose || file_config.verbose();
            match cli
                .log_format
                .or(file_config.logging.format)
                .unwrap_or_default()
            {
                LogFormat::Compact => logger::init_cli_logger(verbose),
                LogFormat::Json => logger::init_json_logger(verbose),
            }

            let settings = match ServiceSettings::from_toml(&file_config)
                .map(|s| s.with_overrides(listen, capacity, seed))
                .and_then(|s| s.validate().map(|_| s))
            {
                Ok(settings) => settings,
                Err(e) => exit_with(e),
            };
            tracing::debug!("Service settings: {:?}", settings);

            let random = ConfiguredRandom::from_seed(settings.seed);
            let service = match SortingService::from_config(&settings, random) {
                Ok(service) => service,
                Err(e) => exit_with(e),
            };

            http::run_server(settings.listen, Arc::new(service))
                .await
                .context("server terminated with error")?;
        }
        Command::Client(command) => {
            match cli.log_format.unwrap_or_default() {
                LogFormat::Compact => logger::init_cli_logger(cli.verbose),
                LogFormat::Json => logger::init_json_logger(cli.verbose),
            }
            if let Err(e) = run_client(command).await {
                exit_with(e);
            }
        }
    }

    Ok(())
}

async fn run_client(command: ClientCommand) -> Result<(), SortingError> {
    match command {
        ClientCommand::Load { server, codes } => {
            let robot = RemoteRobot::new(&server)?;
            let count = codes.len();
            robot
                .load_items(codes.into_iter().map(Item::new).collect())
                .await?;
            println!("✅ Loaded {} items", count);
        }
        ClientCommand::Select { server } => {
            let item = RemoteRobot::new(&server)?.select_item().await?;
            println!("🎯 Selected {}", item);
        }
        ClientCommand::Move { server, cubby } => {
            RemoteRobot::new(&server)?.move_item(&cubby).await?;
            println!("📦 Moved selected item into cubby {}", cubby);
        }
        ClientCommand::Cubby {
            server,
            id,
            capacity,
        } => {
            RemoteRobot::new(&server)?.create_cubby(&id, capacity).await?;
            println!("✅ Created cubby {} (capacity {})", id, capacity);
        }
        ClientCommand::State { server } => {
            let snapshot = RemoteRobot::new(&server)?.snapshot().await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }
    Ok(())
}

fn exit_with(e: SortingError) -> ! {
    tracing::error!("❌ {} [{}]", e, e.code());
    eprintln!("❌ {}", e);
    eprintln!("💡 {}", e.recovery_suggestion());

    // 1: configuration, 2: rejected request, 3: transport or internal failure
    let exit_code = match &e {
        SortingError::ConfigError { .. }
        | SortingError::InvalidConfigValue { .. }
        | SortingError::IoError(_) => 1,
        e if e.is_rejection() => 2,
        _ => 3,
    };
    std::process::exit(exit_code);
}
