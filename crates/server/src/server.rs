use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use engine::{Engine, EngineError};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use std::sync::Arc;

use crate::{budgets, transactions, user};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Resolve Basic credentials (email and password) to a user and attach it
/// to the request. Handlers read the caller from the `Extension`.
async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(TypedHeader(credentials)) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    if credentials.username().is_empty() || credentials.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user = match state
        .engine
        .authenticate(credentials.username(), credentials.password())
        .await
    {
        Ok(user) => user,
        Err(EngineError::InvalidCredentials) => {
            tracing::debug!("rejected credentials");
            return Err(StatusCode::UNAUTHORIZED);
        }
        Err(err) => {
            tracing::error!("authentication failed: {err}");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

async fn health() -> &'static str {
    "ok"
}

fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Build the application router.
///
/// `cors_origin` is the frontend allowed to call the API from a browser.
pub fn router(state: ServerState, cors_origin: Option<HeaderValue>) -> Router {
    let api = Router::new()
        .route("/transaction", post(transactions::create))
        .route("/get/transaction", get(transactions::list))
        .route("/date/transaction", get(transactions::list_in_range))
        .route(
            "/{id}",
            put(transactions::update).delete(transactions::delete),
        )
        .route("/set-budget", post(budgets::set))
        .route("/check-budget", post(budgets::check))
        .route("/profile", get(user::profile))
        .route("/edit", put(user::edit))
        .route("/update", put(user::update_picture))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state);

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/user", api)
        .layer(TraceLayer::new_for_http());

    match cors_origin {
        Some(origin) => app.layer(cors_layer(origin)),
        None => app,
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
    cors_origin: Option<HeaderValue>,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state, cors_origin)).await
}
