//! # rulehub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON API: rule CRUD under `/api/rules`, change-event
//!   intake at `/api/events`, and access resolution at `/api/access`
//! - Extract the caller identity from the `x-user-id` / `x-tenant-id`
//!   headers into an explicit [`RequestContext`] — no ambient session
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `rulehub-app` (for port traits and services) and
//! `rulehub-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.
//!
//! [`RequestContext`]: rulehub_domain::access::RequestContext

pub mod api;
pub mod context;
pub mod error;
pub mod router;
pub mod state;
