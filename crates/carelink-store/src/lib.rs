//! # carelink-store
//!
//! Session store adapters for CareLink. The session authority talks to a
//! shared key-value store with per-key TTL; this crate provides the Redis
//! adapter used in deployment and an in-memory adapter with real per-entry
//! expiry for tests and single-node development, both behind the
//! [`carelink_core::traits::SessionStore`] trait.

pub mod keys;
pub mod memory;
pub mod provider;
pub mod redis;

pub use memory::MemoryStoreProvider;
pub use provider::StoreManager;
