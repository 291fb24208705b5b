//! Domain entities.

pub mod cart;
pub mod code;
pub mod order;
pub mod payment_method;
pub mod product;
pub mod store_account;
pub mod token;
pub mod user;
pub mod wishlist;

pub use cart::{CartItem, ShoppingCart};
pub use code::{CodePurpose, VerificationCode};
pub use order::{Order, OrderItem, OrderStatus};
pub use payment_method::PaymentMethod;
pub use product::Product;
pub use store_account::{AccountType, StoreAccount};
pub use token::RefreshToken;
pub use user::User;
pub use wishlist::{Wishlist, WishlistItem};
