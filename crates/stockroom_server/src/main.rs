//! HTTP front end for the Stockroom inventory service.
//!
//! # Responsibility
//! - Map verbs and paths onto `stockroom_core` domain operations.
//! - Own process configuration: database path, port, logging.

mod handlers;
mod models;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use log::info;
use tokio::sync::Mutex;

use stockroom_core::db::open_db;
use stockroom_core::{core_version, default_log_level, init_logging};

use crate::handlers::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    #[arg(default_value = "stockroom.db")]
    db_file: PathBuf,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long)]
    log_level: Option<String>,

    /// Directory for rolling log files
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_dir = if args.log_dir.is_absolute() {
        args.log_dir.clone()
    } else {
        std::env::current_dir()?.join(&args.log_dir)
    };
    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    if let Err(err) = init_logging(&level, &log_dir.to_string_lossy()) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let conn = open_db(&args.db_file)?;
    let state = Arc::new(AppState {
        conn: Mutex::new(conn),
    });

    let app = Router::new()
        .route(
            "/stocks",
            post(handlers::add_stock)
                .get(handlers::stock_all)
                .delete(handlers::reset),
        )
        .route("/stocks/:name", get(handlers::stock_one))
        .route("/sales", post(handlers::sell).get(handlers::sales_total))
        .route("/export/:kind", get(handlers::export))
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    info!(
        "event=server_start module=server status=ok addr={addr} db={} core_version={}",
        args.db_file.display(),
        core_version()
    );
    println!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
