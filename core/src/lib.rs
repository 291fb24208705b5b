//! # SlushStore Core
//!
//! Domain layer of the SlushStore backend: entities, repository traits and
//! the services that implement catalog browsing, cart and wishlist
//! management, store accounts and payment methods, checkout against the
//! external bank gateway, and account/authentication flows.
//!
//! This crate performs no I/O of its own. Persistence and external services
//! are reached through the traits in [`repositories`] and
//! [`services::verification`] / [`services::payment`], which the `ss_infra`
//! crate implements.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
