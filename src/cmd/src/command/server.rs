use std::sync::Arc;

use axum::Router;
use common::config::Config;
use metadata::projects::Projects;
use platform::http::attach_routes;
use platform::PlatformProvider;
use tokio::net::TcpListener;
use tokio::select;
use tokio::signal::unix::signal;
use tokio::signal::unix::SignalKind;
use tracing::debug;
use tracing::info;

use crate::error::Error;
use crate::error::Result;

pub async fn start(cfg: Config) -> Result<()> {
    debug!("data path: {:?}", cfg.data.path);
    if !cfg.data.ui_path.exists() {
        return Err(Error::FileNotFound(format!(
            "ui path {:?} doesn't exist",
            cfg.data.ui_path
        )));
    }
    debug!("ui path: {:?}", cfg.data.ui_path);

    info!("loading projects...");
    let md = Arc::new(Projects::open(&cfg.data.path)?);
    info!("{} projects loaded from {:?}", md.list()?.len(), md.path());

    let platform = Arc::new(PlatformProvider::new(md));
    let router = attach_routes(Router::new(), &platform, &cfg);

    let mut sig_int = signal(SignalKind::interrupt())?;
    let mut sig_term = signal(SignalKind::terminate())?;
    let signal = async move {
        select! {
            _=sig_int.recv()=>info!("SIGINT received"),
            _=sig_term.recv()=>info!("SIGTERM received"),
        }
    };

    let listener = TcpListener::bind(cfg.server.host).await?;
    info!("Server running at http://{}", listener.local_addr()?);
    info!(
        "Open your browser to http://{} to view the project directory",
        listener.local_addr()?
    );

    Ok(axum::serve(listener, router)
        .with_graceful_shutdown(signal)
        .await?)
}
