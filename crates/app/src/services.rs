//! Application services — use-case orchestration over the ports.

pub mod rule_service;

pub use rule_service::RuleService;
