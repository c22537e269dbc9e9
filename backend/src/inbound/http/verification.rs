//! Provider verification HTTP handlers.
//!
//! ```text
//! GET /api/v1/providers/{provider_id}/verification-status
//! PUT /api/v1/admin/providers/{provider_id}/verify
//! GET /api/v1/admin/verification/counts
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{VerificationCounts, VerificationStatus};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_verification_status, require, FieldName};
use crate::inbound::http::ApiResult;

/// Verification state of one provider.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VerificationStatusBody {
    /// Provider identifier.
    pub provider_id: Uuid,
    /// Current verification state.
    pub verification_status: VerificationStatus,
}

/// Request payload for an admin verification decision.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct VerifyProviderRequestBody {
    /// `approved` or `rejected`.
    pub status: Option<String>,
}

/// Read a provider's verification state.
#[utoipa::path(
    get,
    path = "/api/v1/providers/{provider_id}/verification-status",
    params(("provider_id" = Uuid, Path, description = "Provider identifier")),
    responses(
        (status = 200, description = "Verification state", body = VerificationStatusBody),
        (status = 404, description = "Unknown provider")
    ),
    tags = ["verification"],
    operation_id = "getVerificationStatus"
)]
#[get("/providers/{provider_id}/verification-status")]
pub async fn verification_status(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<VerificationStatusBody>> {
    let provider_id = path.into_inner();
    let status = state.verification.verification_status(provider_id).await?;
    Ok(web::Json(VerificationStatusBody {
        provider_id,
        verification_status: status,
    }))
}

/// Record an admin verification decision.
#[utoipa::path(
    put,
    path = "/api/v1/admin/providers/{provider_id}/verify",
    params(("provider_id" = Uuid, Path, description = "Provider identifier")),
    request_body = VerifyProviderRequestBody,
    responses(
        (status = 200, description = "Decision recorded", body = VerificationStatusBody),
        (status = 400, description = "Status missing or not a decision"),
        (status = 404, description = "Unknown provider")
    ),
    tags = ["verification"],
    operation_id = "verifyProvider"
)]
#[put("/admin/providers/{provider_id}/verify")]
pub async fn verify_provider(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<VerifyProviderRequestBody>,
) -> ApiResult<web::Json<VerificationStatusBody>> {
    let provider_id = path.into_inner();
    let raw = require(payload.into_inner().status, FieldName::new("status"))?;
    let decision = parse_verification_status(&raw, FieldName::new("status"))?;

    state
        .verification
        .verify_provider(provider_id, decision)
        .await?;

    Ok(web::Json(VerificationStatusBody {
        provider_id,
        verification_status: decision,
    }))
}

/// Count providers per verification state.
#[utoipa::path(
    get,
    path = "/api/v1/admin/verification/counts",
    responses((status = 200, description = "Counts", body = VerificationCounts)),
    tags = ["verification"],
    operation_id = "getVerificationCounts"
)]
#[get("/admin/verification/counts")]
pub async fn verification_counts(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<VerificationCounts>> {
    let counts = state.verification.verification_counts().await?;
    Ok(web::Json(counts))
}
