//! HTTP JSON API over the same chart, category and question data as the CLI
//!
//! Every request fetches a fresh batch from the question source. Query
//! parameters mirror the chart page's URL parameters (`sort-type`,
//! `sort-order`), so links built for the web chart work here unchanged.

use crate::prelude::{eprintln, *};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use triviaviz_core::opentdb::DEFAULT_AMOUNT;

mod handlers;

#[derive(Debug, clap::Args)]
pub struct ServeOptions {
    /// Port to listen on
    #[arg(short, long, env = "TRIVIAVIZ_PORT", default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "TRIVIAVIZ_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Questions fetched per request when the query has no `amount`
    #[arg(short, long, env = "TRIVIA_AMOUNT", default_value_t = DEFAULT_AMOUNT)]
    pub amount: u32,
}

/// Shared by every request handler
#[derive(Debug)]
pub struct ServeState {
    pub global: crate::Global,
    pub default_amount: u32,
}

pub fn router(state: ServeState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chart", get(handlers::chart))
        .route("/api/categories", get(handlers::categories))
        .route("/api/questions", get(handlers::questions))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    let addr = format!("{}:{}", options.host, options.port);
    let verbose = global.verbose;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    let app = router(ServeState {
        global,
        default_amount: options.amount,
    });

    log::info!("Serving trivia charts on http://{addr}");
    if verbose {
        eprintln!("Chart endpoint: http://{}/api/chart", addr);
        eprintln!("Categories endpoint: http://{}/api/categories", addr);
        eprintln!("Questions endpoint: http://{}/api/questions", addr);
    }

    axum::serve(listener, app)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}
