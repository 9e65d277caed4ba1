mod distributed_lock;
mod distributed_lock_stub;
mod key_value_store;
mod key_value_store_stub;

pub use distributed_lock::{DistributedLock, LockAcquisition, LockLease};
pub use distributed_lock_stub::DistributedLockStub;
pub use key_value_store::KeyValueStore;
pub use key_value_store_stub::KeyValueStoreStub;
