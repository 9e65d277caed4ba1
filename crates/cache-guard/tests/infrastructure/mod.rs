// crates/cache-guard/tests/infrastructure/mod.rs

mod redis_store_it;
mod stampede_guard_it;
