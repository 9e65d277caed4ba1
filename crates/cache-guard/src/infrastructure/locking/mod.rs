mod store_lock;

pub use store_lock::StoreLock;
