use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};

use std::sync::Arc;

use crate::{dashboard, items};
use engine::Engine;

/// Single-user HTTP Basic credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    /// `None` disables authentication.
    pub auth: Option<Arc<Credentials>>,
}

impl ServerState {
    pub fn new(engine: Engine, auth: Option<Credentials>) -> Self {
        Self {
            engine: Arc::new(engine),
            auth: auth.map(Arc::new),
        }
    }
}

async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(expected) = state.auth.as_deref() else {
        return Ok(next.run(request).await);
    };

    let Some(TypedHeader(header)) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    if header.username() != expected.username || header.password() != expected.password {
        tracing::warn!("rejected credentials for user '{}'", header.username());
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/items", get(items::list).post(items::create))
        .route(
            "/items/{id}",
            get(items::get).patch(items::update).delete(items::delete),
        )
        .route("/items/{id}/sell", post(items::sell))
        .route("/dashboard", get(dashboard::get))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    auth: Option<Credentials>,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    if auth.is_none() {
        tracing::warn!("authentication disabled");
    }
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ServerState::new(engine, auth))).await
}

pub fn spawn_with_listener(
    engine: Engine,
    auth: Option<Credentials>,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, auth, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
