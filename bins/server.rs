use std::path::PathBuf;

use clap::Parser;
use common::types::RecordFormat;
use configs::{AppConfig, Overrides};
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "daily-strength")]
#[command(about = "Serve and update the daily strength record")]
struct Args {
    /// Authentication key required by the update endpoint
    #[arg(long)]
    auth_key: Option<String>,

    /// Host interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Record representation: text, html or json
    #[arg(long)]
    format: Option<RecordFormat>,

    /// Backing file (defaults to strength.json next to the executable)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// TOML config file (defaults to $CONFIG_PATH or ./config.toml when present)
    #[arg(long)]
    config: Option<String>,

    /// Emit JSON-formatted logs
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            auth_key: self.auth_key.clone(),
            host: self.host.clone(),
            port: self.port,
            debug: self.debug,
            format: self.format,
            data_file: self.data_file.clone(),
        }
    }
}

fn init_logging(args: &Args) {
    // JSON for log shippers, compact for terminals
    if args.json_logs {
        common::utils::logging::init_logging_json(args.debug);
    } else {
        common::utils::logging::init_logging(args.debug);
    }
    info!(service = "server", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG and DAILY_STRENGTH_* take effect
    dotenv().ok();
    let args = Args::parse();
    init_logging(&args);

    // basic service context (no secrets)
    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    // panics end up in the structured log instead of bare stderr
    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "server",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    // file < env < CLI; a missing secret stops startup here
    let cfg = match AppConfig::load_with(args.config.as_deref(), args.overrides()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "server", event = "config_invalid", error = %e, "refusing to start");
            return std::process::ExitCode::FAILURE;
        }
    };

    // runtime sized from config (worker_threads defaults to 4)
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "server",
        event = "start",
        %service_id,
        pid,
        version,
        format = %cfg.storage.format,
        data_file = %cfg.data_file().display(),
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "server service starting"
    );

    // run returns once a shutdown signal drains the server
    match rt.block_on(server::run(cfg)) {
        Ok(()) => {
            info!(service = "server", event = "stop", %service_id, pid, "server stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "server", event = "run_failed", error = %e, "server::run returned error");
            std::process::ExitCode::FAILURE
        }
    }
}
