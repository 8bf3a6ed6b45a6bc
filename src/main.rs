use anyhow::Context;
use clap::Parser;
use pantry_pal::{app, cli, config, gemini};
use cli::{Cli, Commands};
use config::Config;
use gemini::GeminiClient;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load().context("failed to load config")?;

    match cli.command {
        Commands::Recipe(args) => {
            println!("🍳 pantry-pal - Recipe Generator\n");
            let client = GeminiClient::from_config(&config)
                .context("set GEMINI_API_KEY or run `pantry-pal config --set-api-key <KEY>`")?;
            tracing::info!(model = client.model(), "recipe generation start");

            let wizard = app::run_recipe(&args, &client, config.max_image_size).await?;
            if wizard.results().recipes().is_empty() {
                println!("\nNo recipes generated.");
            } else {
                println!("\n✅ Done");
            }
        }

        Commands::Feast(args) => {
            println!("🎉 pantry-pal - Feast Planner\n");
            let client = GeminiClient::from_config(&config)
                .context("set GEMINI_API_KEY or run `pantry-pal config --set-api-key <KEY>`")?;
            tracing::info!(model = client.model(), "feast planning start");

            app::run_feast(&args, &client, config.max_image_size).await?;
            println!("\n✅ Done");
        }

        Commands::Config { set_api_key, model, show } => {
            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ API key saved");
            }

            if let Some(model) = model {
                config.model = model;
                config.save()?;
                println!("✔ Model saved: {}", config.model);
            }

            if show {
                println!("Config: {}", Config::config_path()?.display());
                println!("  model:            {}", config.model);
                println!("  max_image_size:   {}", config.max_image_size);
                println!("  timeout_seconds:  {}", config.timeout_seconds);
                match config.temperature {
                    Some(t) => println!("  temperature:      {}", t),
                    None => println!("  temperature:      (model default)"),
                }
                match config.get_api_key() {
                    Ok(_) => println!("  api_key:          set"),
                    Err(e) => println!("  api_key:          not set ({})", e),
                }
            }
        }
    }

    Ok(())
}
