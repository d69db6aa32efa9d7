//! nsview - a read-only Kubernetes namespace dashboard client
//!
//! Lists pod health, images and events for a namespace and opens the debug
//! panel on a resource to show its relationship graph.

use anyhow::Result;
use clap::{Parser, Subcommand};
use nsview::cli::dashboard::{self, Session, parse_kind};
use nsview::cli::{ConfigSubcommand, GraphFormat, handle_config_command, init_logging};
use nsview::config::ConfigLoader;
use nsview::models::{ResourceKind, ResourceTarget};
use std::path::PathBuf;

/// nsview - a read-only Kubernetes namespace dashboard client
#[derive(Parser, Debug)]
#[command(name = "nsview", version)]
#[command(about = "A read-only Kubernetes namespace dashboard client", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd')]
    debug: bool,

    /// Dashboard backend URL (overrides config)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Namespace (defaults to the configured defaultNamespace)
    #[arg(long, short = 'n', global = true)]
    namespace: Option<String>,

    #[command(subcommand)]
    command: Command,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Open the debug panel on a resource
    Debug {
        /// Resource type (pod, service, ingress, configmap, secret)
        #[arg(value_parser = parse_kind)]
        kind: ResourceKind,
        /// Resource name
        name: String,
        /// Graph output format
        #[arg(long, value_enum, default_value_t = GraphFormat::Tree)]
        format: GraphFormat,
        /// Read the payload from a JSON file or directory instead of the backend
        #[arg(long)]
        payload: Option<PathBuf>,
    },
    /// Resolve a graph node id to the resource it came from
    Resolve {
        #[arg(value_parser = parse_kind)]
        kind: ResourceKind,
        name: String,
        /// Node id as shown in the graph
        node_id: String,
        /// Open the debug panel on the resolved resource
        #[arg(long)]
        follow: bool,
        #[arg(long, value_enum, default_value_t = GraphFormat::Tree)]
        format: GraphFormat,
        #[arg(long)]
        payload: Option<PathBuf>,
    },
    /// List namespaces
    Namespaces,
    /// Pod health in the namespace
    Health,
    /// Container images in the namespace
    Images {
        /// Across every namespace
        #[arg(long)]
        all: bool,
    },
    /// Events in the namespace
    Events,
    /// Details of one pod
    Pod { name: String },
    /// Raw resource list (pods, services, ingresses, configmaps, secrets)
    List {
        #[arg(value_parser = parse_kind)]
        kind: ResourceKind,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let command = match args.command {
        Command::Config { subcommand } => return handle_config_command(subcommand),
        command => command,
    };

    let log_file = init_logging(args.debug);

    // Print log file location to stderr so stdout stays clean
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    let mut config = ConfigLoader::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration: {:#}, using defaults", e);
        ConfigLoader::load_defaults()
    });
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }

    tracing::debug!(
        "Configuration loaded: endpoint={}, defaultNamespace={}",
        config.endpoint,
        config.default_namespace
    );

    let session = Session::new(config, args.namespace);

    match command {
        Command::Debug {
            kind,
            name,
            format,
            payload,
        } => dashboard::debug(&session, ResourceTarget::new(kind, name), format, payload).await,
        Command::Resolve {
            kind,
            name,
            node_id,
            follow,
            format,
            payload,
        } => {
            dashboard::resolve(
                &session,
                ResourceTarget::new(kind, name),
                &node_id,
                follow,
                format,
                payload,
            )
            .await
        }
        Command::Namespaces => dashboard::namespaces(&session).await,
        Command::Health => dashboard::health(&session).await,
        Command::Images { all } => dashboard::images(&session, all).await,
        Command::Events => dashboard::events(&session).await,
        Command::Pod { name } => dashboard::pod(&session, &name).await,
        Command::List { kind } => dashboard::list(&session, kind).await,
        // handled before logging is set up
        Command::Config { .. } => Ok(()),
    }
}
