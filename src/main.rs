mod demo;

use anyhow::Context;
use clap::Parser;
use cloud_core::commands::{self, CommandRegistry, CommandSender, ConsoleAudience};
use cloud_core::config::CloudConfig;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path of the config file, created with defaults if missing.
    #[arg(long, default_value = "Cloud.toml")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = CloudConfig::load(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;

    // Setup logging
    let logfile = tracing_appender::rolling::daily(&config.log_directory, "cloud.log");
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("CLOUD_LOG")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(logfile.and(std::io::stdout))
        .with_env_filter(env_filter)
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(config))
}

async fn run(config: CloudConfig) -> anyhow::Result<()> {
    let mut registry = CommandRegistry::with_config(&config);
    demo::register_commands(&mut registry)?;
    commands::register_help(&mut registry);

    let bad_aliases = registry.validate_custom_aliases().await;
    info!(
        "Registered {} commands, {} custom aliases ({} invalid)",
        registry.get_root().children().len(),
        registry.get_custom_aliases().len(),
        bad_aliases
    );
    info!("Type a command, or prefix a line with '?' to list completions");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut audience = ConsoleAudience;

    loop {
        stdout.write_all(config.prompt.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        if let Some(partial) = line.strip_prefix('?') {
            let completions = commands::suggestions(&registry, &CommandSender::Console, partial).await;
            println!("{}", completions.join(" "));
            continue;
        }

        if let Err(err) = registry
            .execute(&mut audience, CommandSender::Console, &line)
            .await
        {
            error!("Command '{}' failed: {}", line.trim(), err);
        }
    }

    info!("Input closed, shutting down");
    Ok(())
}
