mod cache;

pub use cache::{connect_stampede_guard, stampede_guard_from_env};
