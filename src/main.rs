use achnews::config::AppConfig;
use achnews::game_id::parse_game_id;
use achnews::news::NewsGenerator;
use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use std::env;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "achnews",
    version,
    about = "Generate an achievement-news post template for the given game ID"
)]
struct Cli {
    /// Game ID, or a https://retroachievements.org/game/<id> URL
    #[arg(value_parser = parse_game_id)]
    game_id: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Parse the specified (or default) .env file
    let dotenv_path = env::var("ACHNEWS_DOTENV_PATH").unwrap_or_else(|_| ".env".to_string());
    let dotenv_result = dotenvy::from_path(&dotenv_path);

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    match dotenv_result {
        Ok(()) => log::info!("Loaded env from {}", dotenv_path),
        Err(err) => log::debug!("No .env loaded from {}: {}", dotenv_path, err),
    }

    let config = AppConfig::from_env().context("Reading configuration")?;
    let generator = NewsGenerator::new(config).context("Building news generator")?;

    match generator.generate(cli.game_id).await {
        Ok(post) => {
            println!("here's your achievement-news post template:\n{}", post);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}
