//! Redis session store backend.

pub mod client;
pub mod operations;

pub use client::RedisClient;
pub use operations::RedisStoreProvider;
