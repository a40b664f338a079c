use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::auth::TokenCodec;
use crate::config::AppConfig;
use crate::database::{
    CalendarRepository, EventRepository, PgCalendarRepository, PgEventRepository, PgProjectRepository,
    PgTaskRepository, PgUserRepository, ProjectRepository, TaskRepository, UserRepository,
};
use crate::error::ApiError;
use crate::events::EventSink;
use crate::handlers::{protected, public};
use crate::middleware::require_auth;
use crate::services::{AuthService, CalendarService, EventService, ProjectService, TaskService};

/// Datastore handles the services are built from.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub calendars: Arc<dyn CalendarRepository>,
    pub events: Arc<dyn EventRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub tasks: Arc<dyn TaskRepository>,
}

impl Repositories {
    /// All repositories share the one pool built in `main`.
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            calendars: Arc::new(PgCalendarRepository::new(pool.clone())),
            events: Arc::new(PgEventRepository::new(pool.clone())),
            projects: Arc::new(PgProjectRepository::new(pool.clone())),
            tasks: Arc::new(PgTaskRepository::new(pool.clone())),
        }
    }
}

/// Immutable state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<TokenCodec>,
    pub auth: Arc<AuthService>,
    pub calendars: Arc<CalendarService>,
    pub events: Arc<EventService>,
    pub projects: Arc<ProjectService>,
    pub tasks: Arc<TaskService>,
    /// Only used by `/health`.
    pub db: Option<PgPool>,
}

impl AppState {
    pub fn new(codec: TokenCodec, repos: Repositories, sink: Arc<dyn EventSink>, db: Option<PgPool>) -> Self {
        let codec = Arc::new(codec);
        Self {
            auth: Arc::new(AuthService::new(repos.users, codec.clone(), sink)),
            calendars: Arc::new(CalendarService::new(repos.calendars.clone())),
            events: Arc::new(EventService::new(repos.events, repos.calendars)),
            projects: Arc::new(ProjectService::new(repos.projects.clone())),
            tasks: Arc::new(TaskService::new(repos.tasks, repos.projects)),
            codec,
            db,
        }
    }
}

pub fn router(state: AppState, config: &AppConfig) -> Router {
    let gate = middleware::from_fn_with_state(state.codec.clone(), require_auth);

    let mut app = Router::new()
        .merge(public_routes())
        .merge(protected_routes().route_layer(gate))
        .fallback(|| async { ApiError::not_found("Route not found") })
        .layer(cors_layer(&config.security.cors_origins))
        .layer(TimeoutLayer::new(Duration::from_secs(config.api.request_timeout_secs)));

    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app.with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/auth/register", post(public::register_post))
        .route("/auth/login", post(public::login_post))
}

fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/me", get(protected::auth::me_get))
        .merge(calendar_routes())
        .merge(event_routes())
        .merge(project_routes())
        .merge(task_routes())
}

fn calendar_routes() -> Router<AppState> {
    use protected::calendars;

    Router::new()
        .route("/api/calendars", get(calendars::list).post(calendars::create))
        .route(
            "/api/calendars/:id",
            get(calendars::show).put(calendars::update).delete(calendars::delete),
        )
}

fn event_routes() -> Router<AppState> {
    use protected::events;

    Router::new()
        .route("/api/events", get(events::list).post(events::create))
        .route(
            "/api/events/:id",
            get(events::show).put(events::update).delete(events::delete),
        )
}

fn project_routes() -> Router<AppState> {
    use protected::projects;

    Router::new()
        .route("/api/projects", get(projects::list).post(projects::create))
        .route(
            "/api/projects/:id",
            get(projects::show).put(projects::update).delete(projects::delete),
        )
}

fn task_routes() -> Router<AppState> {
    use protected::tasks;

    // `:id` here is the project id; the router requires one parameter name per segment.
    Router::new()
        .route("/api/projects/:id/tasks", get(tasks::list).post(tasks::create))
        .route("/api/projects/:id/tasks/:task_id", put(tasks::update))
        .route("/api/tasks/:id", get(tasks::show).delete(tasks::delete))
        .route("/api/tasks/:id/status", patch(tasks::update_status))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}
