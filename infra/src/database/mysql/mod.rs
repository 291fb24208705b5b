//! MySQL implementations of the core repository traits.
//!
//! Conventions shared by every repository here:
//! - entity ids are stored as CHAR(36) UUID strings
//! - money columns are DECIMAL(18, 2)
//! - rows map to entities through a `row_to_*` helper per repository

mod cart_repository_impl;
mod order_repository_impl;
mod payment_method_repository_impl;
mod product_repository_impl;
mod store_account_repository_impl;
mod token_repository_impl;
mod user_repository_impl;
mod wishlist_repository_impl;

pub use cart_repository_impl::MySqlCartRepository;
pub use order_repository_impl::MySqlOrderRepository;
pub use payment_method_repository_impl::MySqlPaymentMethodRepository;
pub use product_repository_impl::MySqlProductRepository;
pub use store_account_repository_impl::MySqlStoreAccountRepository;
pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;
pub use wishlist_repository_impl::MySqlWishlistRepository;

use ss_core::errors::DomainError;

/// Map a SQLx error onto the domain, recognizing unique-key violations
pub(crate) fn map_sqlx_err(context: &str, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return DomainError::Duplicate {
                resource: context.to_string(),
            };
        }
    }
    DomainError::Internal {
        message: format!("{}: {}", context, err),
    }
}

/// Parse a CHAR(36) column back into a Uuid
pub(crate) fn parse_uuid(value: &str, column: &str) -> Result<uuid::Uuid, DomainError> {
    uuid::Uuid::parse_str(value).map_err(|e| DomainError::Internal {
        message: format!("invalid UUID in column {}: {}", column, e),
    })
}
