//! Decoding of factory events out of transaction receipts.

use crate::connection::Receipt;
use crate::contracts::{List, Trade};
use alloy::{
    primitives::{Address, Log, U256},
    sol_types::SolEvent,
};
use serde_json::{json, Value};

/// Event layouts the factory can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventShape {
    Trade,
    List,
}

pub const FACTORY_EVENTS: &[EventShape] = &[EventShape::Trade, EventShape::List];

impl EventShape {
    /// Decode `log` as this shape. Any mismatch yields `None`.
    pub fn try_decode(&self, log: &Log) -> Option<DecodedEvent> {
        match self {
            EventShape::Trade => Trade::decode_log_data(&log.data, true)
                .ok()
                .map(|e| {
                    DecodedEvent::Trade(TradeEvent {
                        trader: e.trader,
                        token_address: e.tokenAddress,
                        is_buy: e.isBuy,
                        base_amount: e.baseAmount,
                        token_amount: e.tokenAmount,
                    })
                }),
            EventShape::List => List::decode_log_data(&log.data, true).ok().map(|e| {
                DecodedEvent::List(ListEvent {
                    creator: e.creator,
                    token_address: e.tokenAddress,
                    base_token_address: e.baseTokenAddress,
                    name: e.name,
                    symbol: e.symbol,
                    metadata_hash: e.metadataHash,
                })
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeEvent {
    pub trader: Address,
    pub token_address: Address,
    pub is_buy: bool,
    pub base_amount: U256,
    pub token_amount: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEvent {
    pub creator: Address,
    pub token_address: Address,
    pub base_token_address: Address,
    pub name: String,
    pub symbol: String,
    pub metadata_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedEvent {
    Trade(TradeEvent),
    List(ListEvent),
}

impl DecodedEvent {
    pub fn shape(&self) -> EventShape {
        match self {
            DecodedEvent::Trade(_) => EventShape::Trade,
            DecodedEvent::List(_) => EventShape::List,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            DecodedEvent::Trade(e) => json!({
                "event": "Trade",
                "trader": e.trader.to_string(),
                "token_address": e.token_address.to_string(),
                "is_buy": e.is_buy,
                "base_amount": e.base_amount.to_string(),
                "token_amount": e.token_amount.to_string()
            }),
            DecodedEvent::List(e) => json!({
                "event": "List",
                "creator": e.creator.to_string(),
                "token_address": e.token_address.to_string(),
                "base_token_address": e.base_token_address.to_string(),
                "name": e.name,
                "symbol": e.symbol,
                "metadata_hash": e.metadata_hash
            }),
        }
    }
}

/// Return the first log in `receipt` emitted by `emitter` that decodes
/// against one of `shapes` and whose event is `target`.
pub fn find_event(
    receipt: Option<&Receipt>,
    emitter: Address,
    shapes: &[EventShape],
    target: EventShape,
) -> Option<DecodedEvent> {
    receipt?
        .logs
        .iter()
        .filter(|log| log.address == emitter)
        .filter_map(|log| shapes.iter().find_map(|shape| shape.try_decode(log)))
        .find(|decoded| decoded.shape() == target)
}
