use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use travel_chat::api::{self, AppState};
use travel_chat::assistant::{detector, TravelAssistant};
use travel_chat::config::{self, Config};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let args = cli::Cli::parse();

    if !args.needs_config() {
        if let Some(cli::Commands::Detect { message, .. }) = &args.command {
            let intent = detector::detect_fallback(message);
            println!("{}", serde_json::to_string_pretty(&intent)?);
            return Ok(());
        }
    }

    let cfg = config::load()?;

    match args.command {
        None => run_server(cfg, None).await,
        Some(cli::Commands::Serve { port }) => run_server(cfg, port).await,
        Some(cli::Commands::Chat { message }) => {
            let assistant = TravelAssistant::from_config(&cfg)?;
            let resp = assistant.process_message(message.trim()).await?;
            println!("{}", serde_json::to_string_pretty(&resp)?);
            Ok(())
        }
        Some(cli::Commands::Detect { message, .. }) => {
            let intent = TravelAssistant::from_config(&cfg)?.detect(&message).await;
            println!("{}", serde_json::to_string_pretty(&intent)?);
            Ok(())
        }
    }
}

/// `RUST_LOG` filter, text or JSON output (`LOG_FORMAT=json`), plus an OTLP
/// exporter when `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
fn init_tracing() -> anyhow::Result<()> {
    use opentelemetry::KeyValue;
    use opentelemetry_sdk::{trace as sdktrace, Resource};

    let telemetry_layer = if std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").is_ok() {
        let tracer = opentelemetry_otlp::new_pipeline()
            .tracing()
            .with_exporter(opentelemetry_otlp::new_exporter().tonic())
            .with_trace_config(sdktrace::config().with_resource(Resource::new(vec![
                KeyValue::new("service.name", "travel-chat"),
            ])))
            .install_batch(opentelemetry_sdk::runtime::Tokio)
            .context("failed to install OpenTelemetry tracer")?;
        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let (json_layer, text_layer) = if json_logs {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "travel_chat=debug,tower_http=debug".into()),
        ))
        .with(json_layer)
        .with(text_layer)
        .with(telemetry_layer)
        .init();

    Ok(())
}

async fn run_server(cfg: Config, port: Option<u16>) -> anyhow::Result<()> {
    let port = port.unwrap_or(cfg.port);
    let host: std::net::IpAddr = cfg
        .host
        .parse()
        .with_context(|| format!("invalid TRAVEL_HOST '{}'", cfg.host))?;

    let assistant = TravelAssistant::from_config(&cfg)?;
    let state = Arc::new(AppState {
        assistant,
        config: cfg,
    });
    let app = api::router(state);

    let addr = SocketAddr::new(host, port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("travel-chat listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    opentelemetry::global::shutdown_tracer_provider();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
