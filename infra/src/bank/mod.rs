//! SlushBank gateway client.

mod client;

pub use client::SlushBankClient;
