//! # rulehub-domain
//!
//! Pure domain model for the rulehub automation service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Entities** (the CRM/ATS/HR/Finance record kinds rules act on)
//!   and their table mapping
//! - Define **Rules** (trigger → condition → action definitions)
//! - Define **Change events** (record-changed notifications fed to the engine)
//! - Define **Access** (per-tenant permissions, roles, field-level access)
//! - Contain all invariant enforcement and pure evaluation logic
//!   (condition matching, template interpolation)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod access;
pub mod entity;
pub mod event;
pub mod record;
pub mod rule;
