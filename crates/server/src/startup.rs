use std::future::Future;
use std::io;

use axum::Router;
use configs::AppConfig;
use service::errors::ServiceError;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::ServerState;
use service::runtime;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot open document store: {0:#}")]
    Store(anyhow::Error),
    #[error("cannot open collections: {0}")]
    Collections(#[source] ServiceError),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] io::Error),
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the store once and build the router around it.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let store = runtime::open_store(&cfg.database).await.map_err(StartupError::Store)?;
    let state = ServerState::open(store.as_ref())
        .await
        .map_err(StartupError::Collections)?;
    Ok(routes::build_router(state, build_cors()))
}

/// Serve on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, shutting down");
    }
}

/// Public entry: build the app and run the HTTP server until Ctrl+C
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let app = build_app(&cfg).await?;

    let addr = cfg.server.bind_addr();
    let bind_err = |source| StartupError::Bind { addr: addr.clone(), source };
    let listener = TcpListener::bind(&addr).await.map_err(bind_err)?;
    let local = listener.local_addr().map_err(bind_err)?;
    info!(addr = %local, "listening");
    serve(listener, app, ctrl_c()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_store_scheme_fails_before_serving() {
        let mut cfg = AppConfig::default();
        cfg.database.url = "redis://localhost".into();
        let err = build_app(&cfg).await.unwrap_err();
        assert!(matches!(err, StartupError::Store(_)));
        assert!(err.to_string().contains("unsupported database url scheme: redis"));
    }

    #[tokio::test]
    async fn occupied_port_is_a_bind_error() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut cfg = AppConfig::default();
        cfg.database.url = "memory://".into();
        cfg.server.host = "127.0.0.1".into();
        cfg.server.port = taken.local_addr().unwrap().port();

        match run(cfg).await {
            Err(StartupError::Bind { addr, source }) => {
                assert_eq!(source.kind(), io::ErrorKind::AddrInUse);
                assert!(addr.starts_with("127.0.0.1:"));
            }
            other => panic!("expected bind error, got {other:?}"),
        }
    }
}
