//! Session tokens: HS256 access JWTs plus hashed refresh tokens.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenConfig;
pub use service::{Claims, TokenService};
