use std::sync::Arc;

use clap::Parser;
use docwatch::ChangeType;
use docwatch::DocumentPath;
use docwatch::Error;
use docwatch::GrpcListenTransport;
use docwatch::ListenerRegistration;
use docwatch::Result;
use docwatch::Watch;
use docwatch::WatchConfig;
use docwatch::WatchEvent;
use tokio::runtime::Handle;
use tokio::signal::unix::signal;
use tokio::signal::unix::SignalKind;
use tokio::sync::mpsc;
use tracing::error;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;

/// Watches documents and logs every snapshot until interrupted
#[derive(Parser, Debug)]
#[command(name = "docwatch", version, about)]
struct Args {
    /// Configuration file applied on top of `CONFIG_PATH`
    #[arg(long)]
    config: Option<String>,

    /// Overrides `network.endpoint`
    #[arg(long)]
    endpoint: Option<String>,

    /// Overrides `listen.database`, e.g. `projects/p/databases/(default)`
    #[arg(long)]
    database: Option<String>,

    /// Document to watch, relative to the database (`rooms/lobby`)
    #[arg(long = "document", required = true)]
    documents: Vec<String>,
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    // Initializing Logs
    let _guard = init_observability();

    let transport = Arc::new(GrpcListenTransport::new(&config.listen.database, &config.network)?);

    // Every watch reports here once it has closed with an error
    let (closed_tx, mut closed_rx) = mpsc::unbounded_channel::<DocumentPath>();
    let mut registrations: Vec<ListenerRegistration> = Vec::with_capacity(args.documents.len());

    for relative in &args.documents {
        let path = DocumentPath::resolve(&config.listen.database, relative);
        let watch = Watch::for_document(transport.clone(), path.clone(), config.clone());
        let closed_tx = closed_tx.clone();
        let watched = path.clone();

        let registration = watch.start(&Handle::current(), move |event: WatchEvent| {
            log_event(&watched, event, &closed_tx)
        })?;
        info!(document = %path, "watching");
        registrations.push(registration);
    }
    drop(closed_tx);

    let mut open = registrations.len();
    tokio::select! {
        result = wait_for_shutdown_signal() => {
            if let Err(e) = result {
                error!("Failed to listen for shutdown signals: {:?}", e);
            }
        }
        _ = async {
            while open > 0 {
                match closed_rx.recv().await {
                    Some(path) => {
                        open -= 1;
                        info!(document = %path, remaining = open, "watch closed");
                    }
                    None => break,
                }
            }
        } => {
            info!("all watches closed");
        }
    }

    for registration in &registrations {
        registration.remove();
    }

    println!("Exiting program.");
    Ok(())
}

fn load_config(args: &Args) -> Result<WatchConfig> {
    let mut config = WatchConfig::new()?;
    if let Some(path) = &args.config {
        config = config.with_override_config(path)?;
    }
    if let Some(endpoint) = &args.endpoint {
        config.network.endpoint = endpoint.clone();
    }
    if let Some(database) = &args.database {
        config.listen.database = database.clone();
    }
    config.validate()
}

fn log_event(
    path: &DocumentPath,
    event: WatchEvent,
    closed_tx: &mpsc::UnboundedSender<DocumentPath>,
) {
    match event {
        Ok(snapshot) => {
            let exists = !snapshot.is_empty();
            info!(
                document = %path,
                read_time = ?snapshot.read_time(),
                exists,
                "snapshot"
            );
            for change in snapshot.changes() {
                let kind = match change.change_type() {
                    ChangeType::Added => "added",
                    ChangeType::Modified => "modified",
                    ChangeType::Removed => "removed",
                };
                info!(
                    document = %change.document().path(),
                    update_time = ?change.document().update_time(),
                    kind,
                    "change"
                );
            }
        }
        Err(e) => {
            error!(document = %path, code = ?e.code(), "watch failed: {}", e);
            let _ = closed_tx.send(path.clone());
        }
    }
}

async fn wait_for_shutdown_signal() -> Result<()> {
    let mut sigint = signal(SignalKind::interrupt()).map_err(|e| Error::Fatal(format!("SIGINT handler: {e}")))?;
    let mut sigterm = signal(SignalKind::terminate()).map_err(|e| Error::Fatal(format!("SIGTERM handler: {e}")))?;
    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT detected.");
        },
        _ = sigterm.recv() => {
            info!("SIGTERM detected.");
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl+C detected.");
        },
    }
    Ok(())
}

pub fn init_observability() -> WorkerGuard {
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());
    let base_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::from_default_env());
    tracing_subscriber::registry().with(base_subscriber).init();

    guard
}
