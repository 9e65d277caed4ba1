// crates/cache-guard/src/lib.rs

//! Cache read-through devant une origine coûteuse, adossé à un store clé/valeur externe.
//!
//! - [`application::tiered_cache::TieredCache`] : cache-aside simple, sans protection.
//! - [`application::stampede_guard::StampedeGuard`] : refresh élu via un verrou distribué,
//!   repli sur un tier lent pour les appelants non élus.
//!
//! Toute la coordination passe par le `SET NX` du store : la garantie "au plus un refresh
//! en vol par clé" tient entre process, pas seulement dans un process.

pub mod application;
pub mod domain;
pub mod errors;
pub mod infrastructure;
