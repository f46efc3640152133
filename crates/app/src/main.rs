//! Relay - Command-line entry point
//!
//! Loads configuration, initializes logging and drives the playground
//! against the configured REST backend.

use std::str::FromStr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use relay_application::Playground;
use relay_domain::{HttpMethod, RequestDraft, Workspace};
use relay_infrastructure::{RelayConfig, RestBackend, TracingNotifier, to_json_stable};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type CliPlayground = Playground<RestBackend, RestBackend, TracingNotifier>;

#[derive(Parser)]
#[command(name = "relay", version)]
#[command(about = "Save and run requests against a Relay backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the collections of a workspace.
    Collections {
        /// Workspace id.
        workspace: String,
    },
    /// List the requests of a collection.
    Requests {
        /// Workspace id.
        workspace: String,
        /// Collection id.
        collection: String,
    },
    /// Create a request inside a collection.
    Add {
        /// Workspace id.
        workspace: String,
        /// Collection id.
        collection: String,
        /// Request name.
        name: String,
        /// Target URL.
        url: String,
        /// HTTP method.
        #[arg(short = 'X', long, value_parser = HttpMethod::from_str, default_value = "GET")]
        method: HttpMethod,
    },
    /// Run a saved request and print the response.
    Run {
        /// Workspace id.
        workspace: String,
        /// Request id.
        request: String,
    },
}

impl Command {
    fn workspace(&self) -> &str {
        match self {
            Self::Collections { workspace }
            | Self::Requests { workspace, .. }
            | Self::Add { workspace, .. }
            | Self::Run { workspace, .. } => workspace,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = RelayConfig::load()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(
        backend = %config.backend.base_url,
        "Starting Relay v{}",
        env!("CARGO_PKG_VERSION")
    );

    let backend = Arc::new(RestBackend::new(&config.backend)?);
    let playground: CliPlayground =
        Playground::new(Arc::clone(&backend), backend, Arc::new(TracingNotifier::new()));
    let workspace = cli.command.workspace();
    playground
        .store()
        .select_workspace(Workspace::new(workspace, workspace));

    let gateway = playground.gateway();
    let output = match &cli.command {
        Command::Collections { .. } => to_json_stable(&gateway.collections().await?)?,
        Command::Requests { collection, .. } => {
            to_json_stable(&gateway.requests_for_collection(collection).await?)?
        }
        Command::Add {
            collection,
            name,
            url,
            method,
            ..
        } => {
            let draft = RequestDraft::new(name.as_str(), *method, url.as_str());
            to_json_stable(&gateway.add_to_collection(collection, &draft, None).await?)?
        }
        Command::Run { request, .. } => {
            playground.pipeline().run(request, None).await?;
            to_json_stable(&playground.store().response_viewer())?
        }
    };

    print!("{output}");
    Ok(())
}
