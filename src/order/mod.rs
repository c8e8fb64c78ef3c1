//! Shared order types
//!
//! Broker-agnostic order data used by the mock generator, the tracker, and
//! the ledger client. Numeric fields are optional because the gate must
//! tolerate partially-populated order data from the host.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Asset class / broker category of an order.
///
/// Selects both the mock response shape and the ledger endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    /// Equities
    Stock,
    /// Cryptocurrencies
    Crypto,
    /// Prediction-market outcome shares
    PredictionMarket,
    /// Sports-betting selections
    SportsBetting,
}

impl OrderType {
    /// Ledger endpoint slug for this order category
    pub fn endpoint_slug(&self) -> &'static str {
        match self {
            OrderType::Stock => "stock",
            OrderType::Crypto => "crypto",
            OrderType::PredictionMarket => "prediction-market",
            OrderType::SportsBetting => "sports-betting",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.endpoint_slug())
    }
}

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "buy"),
            OrderSide::Sell => write!(f, "sell"),
        }
    }
}

/// Broker-agnostic snapshot of one order attempt.
///
/// This is the shape the host hands to the gate: loosely populated, with
/// broker-specific extras preserved as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    /// Instrument symbol / market identifier
    #[serde(default)]
    pub symbol: String,
    /// Order side, if known
    #[serde(default)]
    pub side: Option<OrderSide>,
    /// Quantity (shares, contracts, or stake units)
    #[serde(default)]
    pub quantity: Option<f64>,
    /// Limit price, if any (market-style orders leave this unset)
    #[serde(default)]
    pub price: Option<f64>,
    /// Broker-assigned order identifier, once known
    #[serde(default)]
    pub broker_order_id: Option<String>,
    /// Broker-reported status string, once known
    #[serde(default)]
    pub status: Option<String>,
    /// Broker-specific fields passed through to the ledger untouched
    #[serde(flatten)]
    pub extras: HashMap<String, serde_json::Value>,
}

impl OrderSnapshot {
    /// Whether this is a market-style order (no limit price)
    pub fn is_market_style(&self) -> bool {
        self.price.is_none()
    }
}
