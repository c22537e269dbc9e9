//! Health endpoints: liveness and readiness probes for orchestration.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{get, http::header, web, HttpResponse};

/// Shared probe state: readiness flips once dependencies are wired, liveness
/// flips off when the process starts draining.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a state that is live but not yet ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready to take traffic.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as draining so liveness probes fail fast.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Current readiness.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Current liveness.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe(ok: bool) -> HttpResponse {
        let mut response = if ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe: 200 once dependencies are initialised.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Ready to handle traffic"),
        (status = 503, description = "Not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe(state.is_ready())
}

/// Liveness probe: 200 while the process is healthy.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Alive"),
        (status = 503, description = "Draining")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe(state.is_alive())
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[actix_web::test]
    async fn ready_flips_with_state() {
        let state = web::Data::new(HealthState::new());
        let app = test::init_service(
            App::new().app_data(state.clone()).service(ready).service(live),
        )
        .await;

        let before = test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request()).await;
        assert_eq!(before.status(), 503);

        state.mark_ready();
        let after = test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request()).await;
        assert_eq!(after.status(), 200);
    }

    #[rstest]
    #[actix_web::test]
    async fn live_fails_once_draining() {
        let state = web::Data::new(HealthState::new());
        let app = test::init_service(
            App::new().app_data(state.clone()).service(live),
        )
        .await;

        let before = test::call_service(&app, test::TestRequest::get().uri("/health/live").to_request()).await;
        assert_eq!(before.status(), 200);

        state.mark_unhealthy();
        let after = test::call_service(&app, test::TestRequest::get().uri("/health/live").to_request()).await;
        assert_eq!(after.status(), 503);
    }
}
