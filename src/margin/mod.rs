//! Cross margin account endpoints (`/sapi/v1/margin/*`).
//!
//! **Feature flag:** `margin` (enabled by default)
//!
//! Transfers, loans and repayments, their histories, and the account, asset, pair and price
//! index lookups are exposed on [`Client`], which wraps a shared [`crate::Client`].
//!
//! ```rust,no_run
//! use binance_client_sdk::auth::Credentials;
//! use binance_client_sdk::margin::Client;
//! use binance_client_sdk::margin::types::{TransferRequest, TransferType};
//! use binance_client_sdk::types::dec;
//! use binance_client_sdk::{Config, DEFAULT_HOST};
//!
//! # async fn run() -> binance_client_sdk::Result<()> {
//! let credentials = Credentials::new("api-key".to_owned(), "secret-key".to_owned());
//! let client = Client::new(DEFAULT_HOST, Config::default(), credentials)?;
//!
//! let request = TransferRequest::builder()
//!     .asset("BTC")
//!     .amount(dec!(1.000))
//!     .transfer_type(TransferType::ToMargin)
//!     .build();
//! let response = client.transfer(&request).await?;
//! println!("transaction {}", response.tran_id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod types;

pub use client::Client;
