mod error;
mod handlers;
mod middlewares;
mod models;
mod routes;
mod services;

use axum::Router;
use axum::middleware::from_fn_with_state;
use food_habit::Classifier;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::middlewares::attach_user;
use crate::services::token::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: TokenService,
    pub classifier: Classifier,
}

async fn db_connect() -> sqlx::Result<PgPool> {
    let database_url = dotenvy::var("DATABASE_URL").expect("DATABASE_URL env var must be set");

    let db = PgPoolOptions::new()
        .max_connections(20)
        .connect(&database_url)
        .await
        .expect("failed to connect to DATABASE_URL");

    sqlx::migrate!().run(&db).await?;

    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = dotenvy::var("PORT").expect("PORT env var must be set");
    let jwt_secret = dotenvy::var("JWT_SECRET").expect("JWT_SECRET env var must be set");

    let db = db_connect().await?;

    let state = AppState {
        db,
        tokens: TokenService::new(jwt_secret.as_bytes()),
        classifier: Classifier::default(),
    };

    let auth_routes = routes::auth::auth_routes();
    let board_routes =
        routes::boards::board_routes().layer(from_fn_with_state(state.clone(), attach_user));

    let app = Router::<AppState>::new()
        .nest("/auth", auth_routes)
        .nest("/boards", board_routes)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await?;

    Ok(())
}
