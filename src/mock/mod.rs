//! Mock brokerage response fabrication
//!
//! When a decision calls for simulation, these constructors build a
//! structurally valid "as-if-executed" brokerage response: synthetic
//! identifiers, timestamps, an immediate simulated fill for market-style
//! orders (pending otherwise), and an explicit `source: "mock"` marker so
//! downstream consumers can distinguish simulated from real fills.
//!
//! No network I/O happens here, and partially-populated order data is safe:
//! missing numeric fields default instead of erroring.

use crate::order::{OrderSide, OrderSnapshot, OrderType};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marker value carried by every fabricated response
pub const MOCK_SOURCE: &str = "mock";

/// Fill state of a fabricated order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MockFillStatus {
    /// Immediately filled (market-style orders)
    Filled,
    /// Accepted but resting (limit-style orders)
    Pending,
}

/// Fabricated equities-broker order response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockStockResponse {
    /// Synthetic broker order id
    pub id: String,
    /// Instrument symbol
    pub symbol: String,
    /// Order side
    pub side: OrderSide,
    /// Requested quantity
    pub qty: f64,
    /// Simulated filled quantity
    pub filled_qty: f64,
    /// Simulated average fill price, when filled
    pub filled_avg_price: Option<f64>,
    /// Fill state
    pub status: MockFillStatus,
    /// Submission timestamp
    pub created_at: DateTime<Utc>,
    /// Fill timestamp, when filled
    pub filled_at: Option<DateTime<Utc>>,
    /// Always [`MOCK_SOURCE`]
    pub source: String,
}

/// Fabricated crypto-exchange order response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockCryptoResponse {
    /// Synthetic exchange order id
    pub order_id: String,
    /// Trading pair
    pub symbol: String,
    /// Order side
    pub side: OrderSide,
    /// Requested quantity
    pub quantity: f64,
    /// Simulated executed quantity
    pub executed_quantity: f64,
    /// Simulated average execution price, when filled
    pub average_price: Option<f64>,
    /// Fill state
    pub status: MockFillStatus,
    /// Submission timestamp
    pub transact_time: DateTime<Utc>,
    /// Always [`MOCK_SOURCE`]
    pub source: String,
}

/// Fabricated prediction-market order response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockPredictionMarketResponse {
    /// Synthetic order id
    pub order_id: String,
    /// Market identifier
    pub market: String,
    /// Outcome side being bought or sold
    pub side: OrderSide,
    /// Number of outcome shares
    pub shares: f64,
    /// Simulated share price (probability, 0..1)
    pub share_price: f64,
    /// Fill state
    pub status: MockFillStatus,
    /// Submission timestamp
    pub created_at: DateTime<Utc>,
    /// Always [`MOCK_SOURCE`]
    pub source: String,
}

/// Fabricated sportsbook bet response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockSportsBettingResponse {
    /// Synthetic bet id
    pub bet_id: String,
    /// Event / selection identifier
    pub selection: String,
    /// Stake amount
    pub stake: f64,
    /// Decimal odds at placement
    pub odds: f64,
    /// Fill state (sportsbook bets settle immediately on placement)
    pub status: MockFillStatus,
    /// Placement timestamp
    pub placed_at: DateTime<Utc>,
    /// Always [`MOCK_SOURCE`]
    pub source: String,
}

/// Fabricate a mock brokerage response for the given order category.
///
/// Dispatches to the per-broker constructor and returns the serialized
/// response, which stands in for whatever the real broker would return.
pub fn mock_response(order_type: OrderType, order: &OrderSnapshot) -> serde_json::Value {
    match order_type {
        OrderType::Stock => serde_json::to_value(mock_stock_response(order)),
        OrderType::Crypto => serde_json::to_value(mock_crypto_response(order)),
        OrderType::PredictionMarket => serde_json::to_value(mock_prediction_market_response(order)),
        OrderType::SportsBetting => serde_json::to_value(mock_sports_betting_response(order)),
    }
    .unwrap_or_else(|_| serde_json::json!({ "source": MOCK_SOURCE }))
}

/// Fabricate an equities-broker response
pub fn mock_stock_response(order: &OrderSnapshot) -> MockStockResponse {
    let now = Utc::now();
    let quantity = order.quantity.unwrap_or(1.0);
    let filled = order.is_market_style();

    MockStockResponse {
        id: Uuid::new_v4().to_string(),
        symbol: order.symbol.clone(),
        side: order.side.unwrap_or(OrderSide::Buy),
        qty: quantity,
        filled_qty: if filled { quantity } else { 0.0 },
        filled_avg_price: filled.then(|| simulated_fill_price(order.price)),
        status: if filled {
            MockFillStatus::Filled
        } else {
            MockFillStatus::Pending
        },
        created_at: now,
        filled_at: filled.then_some(now),
        source: MOCK_SOURCE.to_string(),
    }
}

/// Fabricate a crypto-exchange response
pub fn mock_crypto_response(order: &OrderSnapshot) -> MockCryptoResponse {
    let quantity = order.quantity.unwrap_or(1.0);
    let filled = order.is_market_style();

    MockCryptoResponse {
        order_id: Uuid::new_v4().to_string(),
        symbol: order.symbol.clone(),
        side: order.side.unwrap_or(OrderSide::Buy),
        quantity,
        executed_quantity: if filled { quantity } else { 0.0 },
        average_price: filled.then(|| simulated_fill_price(order.price)),
        status: if filled {
            MockFillStatus::Filled
        } else {
            MockFillStatus::Pending
        },
        transact_time: Utc::now(),
        source: MOCK_SOURCE.to_string(),
    }
}

/// Fabricate a prediction-market response
pub fn mock_prediction_market_response(order: &OrderSnapshot) -> MockPredictionMarketResponse {
    let filled = order.is_market_style();
    // Share prices are probabilities; default to even odds and clamp.
    let share_price = order.price.unwrap_or(0.5).clamp(0.01, 0.99);

    MockPredictionMarketResponse {
        order_id: Uuid::new_v4().to_string(),
        market: order.symbol.clone(),
        side: order.side.unwrap_or(OrderSide::Buy),
        shares: order.quantity.unwrap_or(1.0),
        share_price,
        status: if filled {
            MockFillStatus::Filled
        } else {
            MockFillStatus::Pending
        },
        created_at: Utc::now(),
        source: MOCK_SOURCE.to_string(),
    }
}

/// Fabricate a sportsbook response
pub fn mock_sports_betting_response(order: &OrderSnapshot) -> MockSportsBettingResponse {
    MockSportsBettingResponse {
        bet_id: Uuid::new_v4().to_string(),
        selection: order.symbol.clone(),
        stake: order.quantity.unwrap_or(1.0),
        // Decimal odds; price doubles as odds for bet orders
        odds: order.price.filter(|p| *p > 1.0).unwrap_or(2.0),
        status: MockFillStatus::Filled,
        placed_at: Utc::now(),
        source: MOCK_SOURCE.to_string(),
    }
}

/// Simulated execution price: slight jitter around the requested price,
/// mirroring real slippage. Missing prices default to zero rather than
/// erroring.
fn simulated_fill_price(price: Option<f64>) -> f64 {
    match price {
        Some(p) if p > 0.0 => {
            let jitter = rand::thread_rng().gen_range(-0.0005..0.0005);
            p * (1.0 + jitter)
        }
        _ => 0.0,
    }
}
