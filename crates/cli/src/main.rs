use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use events::EventBus;
use orchestrator::{Crew, CrewConfig};
use provider::{GroqClient, ProviderSettings};
use server::{create_router, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 3001;

#[derive(Parser)]
#[command(name = "draftcrew")]
#[command(about = "Multi-role AI article generator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server with the browser form
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Run the crew once for a topic and print the article
    Generate {
        /// Topic to write about
        topic: String,

        /// Print the captured run log after the article
        #[arg(long)]
        show_logs: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Secrets come from the environment; .env is a local convenience.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { port }) => serve(port).await,
        Some(Commands::Generate { topic, show_logs }) => generate(&topic, show_logs).await,
        None => serve(cli.port).await,
    }
}

/// Fail fast on missing credentials, before any run is attempted.
fn build_crew(event_bus: EventBus) -> Result<Crew> {
    let settings =
        ProviderSettings::from_env().context("Provider configuration is incomplete")?;
    tracing::info!(model = %settings.model, "Provider configured");

    let generator = Arc::new(GroqClient::new(settings));
    Crew::new(CrewConfig::builtin(), generator, event_bus)
        .context("Failed to build the article crew")
}

async fn serve(port: u16) -> Result<()> {
    init_tracing();

    let event_bus = EventBus::new();
    let crew = build_crew(event_bus.clone())?;
    let state = AppState::new(Arc::new(crew), event_bus);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    println!();
    println!("Draftcrew");
    println!("════════════════════════════════════════");
    println!();
    println!("  Web form:    http://localhost:{}", port);
    println!("  Swagger UI:  http://localhost:{}/swagger-ui", port);
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    axum::serve(listener, app).await?;

    Ok(())
}

async fn generate(topic: &str, show_logs: bool) -> Result<()> {
    init_tracing();

    let topic = topic.trim();
    if topic.is_empty() {
        anyhow::bail!("Topic cannot be empty");
    }

    let crew = build_crew(EventBus::new())?;

    println!("Generating an article about \"{}\"...", topic);
    println!();

    let run = crew.run(topic).await?;

    for (name, result) in &run.results {
        let icon = match result.status {
            draftcrew_core::RoleStatus::Succeeded => "●",
            draftcrew_core::RoleStatus::Failed => "✗",
            _ => "?",
        };
        println!("  {} [{}] {}", icon, result.status.as_str(), name);
    }

    println!();
    println!("Final article");
    println!("─────────────");
    println!("{}", run.final_output);

    if show_logs {
        println!();
        println!("Process logs");
        println!("────────────");
        print!("{}", run.logs);
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "draftcrew=info,server=info,orchestrator=info,tower_http=info".into()),
        )
        .init();
}
