//! Request context extraction from identity headers.

use std::str::FromStr;

use axum::http::HeaderMap;

use rulehub_domain::access::RequestContext;
use rulehub_domain::id::{TenantId, UserId};

use crate::error::ApiError;

/// Header carrying the acting user's id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the tenant the request acts within.
pub const TENANT_ID_HEADER: &str = "x-tenant-id";

fn header_value<'h>(headers: &'h HeaderMap, name: &'static str) -> Result<&'h str, ApiError> {
    headers
        .get(name)
        .ok_or(ApiError::Unauthorized("missing identity header"))?
        .to_str()
        .map_err(|_| ApiError::BadRequest(format!("invalid {name} header")))
}

/// Build the [`RequestContext`] from the identity headers.
///
/// # Errors
///
/// Returns `401` when a header is missing and `400` when one does not
/// parse as a UUID.
pub fn from_headers(headers: &HeaderMap) -> Result<RequestContext, ApiError> {
    let user_id = UserId::from_str(header_value(headers, USER_ID_HEADER)?)
        .map_err(|_| ApiError::BadRequest(format!("invalid {USER_ID_HEADER} header")))?;
    let tenant_id = TenantId::from_str(header_value(headers, TENANT_ID_HEADER)?)
        .map_err(|_| ApiError::BadRequest(format!("invalid {TENANT_ID_HEADER} header")))?;
    Ok(RequestContext { user_id, tenant_id })
}
