mod guard_config;
mod stampede_guard_service;

pub use guard_config::GuardConfig;
pub use stampede_guard_service::StampedeGuard;
