//! Backend entry-point: runs migrations, wires adapters, and serves HTTP.

use std::env;

use actix_web::{web, App, HttpServer};
use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::inbound::http::{self, health::HealthState};
use backend::outbound::persistence::build_pool;
use backend::server::{build_http_state, AppSettings};
use backend::Trace;
use ortho_config::OrthoConfig;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

fn run_migrations(database_url: &str) -> Result<(), std::io::Error> {
    let mut conn = diesel::PgConnection::establish(database_url)
        .map_err(|err| std::io::Error::other(format!("database connection failed: {err}")))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map(|applied| info!(count = applied.len(), "migrations applied"))
        .map_err(|err| std::io::Error::other(format!("migrations failed: {err}")))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(env::args_os())
        .map_err(|err| std::io::Error::other(format!("configuration failed: {err}")))?;
    let database_url = settings
        .database_url
        .clone()
        .ok_or_else(|| std::io::Error::other("MARKETPLACE_DATABASE_URL must be set"))?;

    let migration_url = database_url.clone();
    tokio::task::spawn_blocking(move || run_migrations(&migration_url))
        .await
        .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))??;

    let pool = build_pool(&database_url, settings.max_connections())
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let state = web::Data::new(build_http_state(pool));
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();

    let bind_addr = settings.bind_addr().to_owned();
    info!(%bind_addr, "starting HTTP server");

    let server_health_state = health_state.clone();
    HttpServer::new(move || {
        let app = App::new()
            .wrap(Trace)
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .service(http::health::live)
            .service(http::health::ready)
            .configure(http::configure);
        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
        app
    })
    .bind(bind_addr)?
    .run()
    .await
}
