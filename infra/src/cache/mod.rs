//! Redis-backed storage for verification codes.

mod code_store;

pub use code_store::RedisCodeStore;
