//! # snailpay - SnailPay API client
//!
//! A Rust binding for the SnailPay payment-processing HTTP API. One
//! [`SnailPayClient`] wraps an API key and exposes one async method per
//! remote endpoint: payment verification, checkout link creation, listings,
//! payouts and refunds.
//!
//! ```no_run
//! use rust_decimal::Decimal;
//! use snailpay::{LinkRequest, SnailPayClient};
//!
//! # async fn run() -> snailpay::Result<()> {
//! let client = SnailPayClient::new("sk_live_...")?;
//!
//! let url = client
//!     .create_payment_link(&LinkRequest::new("Widget", Decimal::new(500, 2)))
//!     .await?;
//! println!("checkout at {url}");
//!
//! match client.verify_payment("AB12CD34EF").await? {
//!     Some(payment) => println!("paid: {payment}"),
//!     None => println!("not verified yet"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Validation of link requests happens before anything is sent: a request
//! missing `name` or `price` fails with [`SnailPayError::Validation`] and no
//! network call is made.

pub mod client;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use client::SnailPayClient;
pub use error::{Result, SnailPayError};
pub use types::*;

/// Current version of the snailpay library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
