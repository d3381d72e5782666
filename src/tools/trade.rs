use super::{parse_address, parse_amount, parse_args, receipt_json, Tool};
use crate::client::{BuyParams, SellParams, TradeOutcome, TradingClient};
use crate::error::ClientError;
use crate::events::DecodedEvent;
use alloy::primitives::U256;
use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
pub struct BuyTokenRequest {
    pub token_address: String,
    pub amount: String,
    pub min_token_amount: Option<String>,
}

impl BuyTokenRequest {
    pub fn validate(self) -> Result<BuyParams, ClientError> {
        let params = BuyParams {
            token_address: parse_address("token_address", &self.token_address)?,
            amount: parse_amount("amount", &self.amount)?,
            min_token_amount: match self.min_token_amount.as_deref() {
                Some(v) => parse_amount("min_token_amount", v)?,
                None => U256::ZERO,
            },
        };
        params.check()?;
        Ok(params)
    }
}

#[derive(Deserialize)]
pub struct SellTokenRequest {
    pub token_address: String,
    pub amount: String,
    pub min_base_amount: Option<String>,
    pub is_output_kaia: Option<bool>,
}

impl SellTokenRequest {
    pub fn validate(self) -> Result<SellParams, ClientError> {
        let params = SellParams {
            token_address: parse_address("token_address", &self.token_address)?,
            amount: parse_amount("amount", &self.amount)?,
            min_base_amount: match self.min_base_amount.as_deref() {
                Some(v) => parse_amount("min_base_amount", v)?,
                None => U256::ZERO,
            },
            is_output_kaia: self.is_output_kaia.unwrap_or(true),
        };
        params.check()?;
        Ok(params)
    }
}

fn outcome_json(client: &TradingClient, outcome: &TradeOutcome) -> Value {
    let mut result = json!({ "receipt": receipt_json(client, &outcome.receipt) });
    match &outcome.event {
        Some(event) => {
            result["event"] = DecodedEvent::Trade(event.clone()).to_json();
            result["token_url"] = json!(client.token_url(&event.token_address));
        }
        None => {
            result["event"] = Value::Null;
            result["note"] =
                json!("Transaction confirmed but no Trade event was found in the receipt");
        }
    }
    result
}

pub struct BuyTokenTool;

#[async_trait::async_trait]
impl Tool for BuyTokenTool {
    fn name(&self) -> &'static str {
        "buy-token"
    }

    fn description(&self) -> &'static str {
        "Buy a launchpad token with KAIA. Sends a transaction and waits for confirmation."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "token_address": {
                    "type": "string",
                    "description": "Address of the token to buy"
                },
                "amount": {
                    "type": "string",
                    "description": "Amount of KAIA to spend, in smallest units (use convert-to-smallest-unit)"
                },
                "min_token_amount": {
                    "type": "string",
                    "description": "Minimum tokens to receive, in smallest units. Default 0."
                }
            },
            "required": ["token_address", "amount"]
        })
    }

    async fn call(&self, client: &TradingClient, args: Value) -> Result<Value> {
        let params = parse_args::<BuyTokenRequest>(args)?.validate()?;
        let outcome = client.buy(&params).await?;
        Ok(outcome_json(client, &outcome))
    }
}

pub struct SellTokenTool;

#[async_trait::async_trait]
impl Tool for SellTokenTool {
    fn name(&self) -> &'static str {
        "sell-token"
    }

    fn description(&self) -> &'static str {
        "Sell a launchpad token. Sends a transaction and waits for confirmation."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "token_address": {
                    "type": "string",
                    "description": "Address of the token to sell"
                },
                "amount": {
                    "type": "string",
                    "description": "Amount of tokens to sell, in smallest units (use convert-to-smallest-unit)"
                },
                "min_base_amount": {
                    "type": "string",
                    "description": "Minimum base currency to receive, in smallest units. Default 0."
                },
                "is_output_kaia": {
                    "type": "boolean",
                    "description": "Receive native KAIA rather than the wrapped base token. Default true."
                }
            },
            "required": ["token_address", "amount"]
        })
    }

    async fn call(&self, client: &TradingClient, args: Value) -> Result<Value> {
        let params = parse_args::<SellTokenRequest>(args)?.validate()?;
        let outcome = client.sell(&params).await?;
        Ok(outcome_json(client, &outcome))
    }
}
