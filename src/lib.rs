//! Trade Execution Safety Gate
//!
//! Decides whether a trade-producing workflow node may touch a live brokerage
//! account, must be downgraded to a paper/sandbox account, or must be fully
//! simulated — then records every attempted trade (real or simulated) to an
//! external audit ledger without ever letting that write fail the trade.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod context;
pub mod credentials;
pub mod decision;
pub mod mock;
pub mod order;
pub mod tracking;
pub mod utils;

// Re-export commonly used types
pub use config::GateConfig;
pub use context::{resolve_execution_context, ExecutionContext, RunMode, RunSignals};
pub use credentials::{
    force_paper_trading_credentials, is_paper_trading, BrokerCredentials, CredentialEnvironment,
};
pub use decision::{decide, ExecutionDecision, NodeCapability, TradeOperation, TradingMode};
pub use order::{OrderSide, OrderSnapshot, OrderType};
pub use tracking::{client::TradingApiClient, LedgerTransport, OrderTracker, TrackingRecord};

/// Result type used throughout the application
pub type Result<T> = anyhow::Result<T>;

/// Common error types for the safety gate
#[derive(thiserror::Error, Debug)]
pub enum GateError {
    /// Configuration error (fails closed: the current work item must abort)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Audit/ledger tracking error
    #[error("Tracking error: {0}")]
    Tracking(String),

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    DataParsing(String),
}

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
