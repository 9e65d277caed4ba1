pub mod stampede_guard;
pub mod tiered_cache;
