// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use lms_node::config::NodeConfig;
use lms_node::server::{build_context, build_router};
use lms_node::telemetry::init_telemetry;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_telemetry();

    let cfg = NodeConfig::from_env()?;
    tracing::info!("Initializing LMS Node with config: {:?}", cfg);

    let ctx = build_context(&cfg)?;
    let app = build_router(ctx, cfg.auth_token.clone());

    let addr = cfg.bind_addr;
    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
