use super::{parse_amount, parse_args, Tool};
use crate::client::TradingClient;
use crate::units::{from_smallest_unit, to_smallest_unit, MAX_DECIMALS};
use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};

const DEFAULT_DECIMALS: u8 = 18;

#[derive(Deserialize)]
pub struct ConvertRequest {
    pub amount: String,
    pub decimals: Option<u8>,
}

fn decimals_schema() -> Value {
    json!({
        "type": "integer",
        "minimum": 0,
        "maximum": MAX_DECIMALS,
        "description": "Token decimals. Default 18 (KAIA and launchpad tokens)."
    })
}

pub struct ConvertToSmallestUnitTool;

#[async_trait::async_trait]
impl Tool for ConvertToSmallestUnitTool {
    fn name(&self) -> &'static str {
        "convert-to-smallest-unit"
    }

    fn description(&self) -> &'static str {
        "Convert a human-readable amount (e.g. 1.5) to its integer smallest-unit representation"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "amount": {
                    "type": "string",
                    "description": "Decimal amount, e.g. \"1.5\""
                },
                "decimals": decimals_schema()
            },
            "required": ["amount"]
        })
    }

    async fn call(&self, _client: &TradingClient, args: Value) -> Result<Value> {
        let request = parse_args::<ConvertRequest>(args)?;
        let decimals = request.decimals.unwrap_or(DEFAULT_DECIMALS);
        let value = to_smallest_unit(&request.amount, decimals)?;
        Ok(json!({
            "amount": request.amount.trim(),
            "smallest_unit": value.to_string(),
            "decimals": decimals
        }))
    }
}

pub struct ConvertFromSmallestUnitTool;

#[async_trait::async_trait]
impl Tool for ConvertFromSmallestUnitTool {
    fn name(&self) -> &'static str {
        "convert-from-smallest-unit"
    }

    fn description(&self) -> &'static str {
        "Convert an integer smallest-unit amount to a human-readable decimal amount"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "amount": {
                    "type": "string",
                    "description": "Integer amount in smallest units, e.g. \"1500000000000000000\""
                },
                "decimals": decimals_schema()
            },
            "required": ["amount"]
        })
    }

    async fn call(&self, _client: &TradingClient, args: Value) -> Result<Value> {
        let request = parse_args::<ConvertRequest>(args)?;
        let decimals = request.decimals.unwrap_or(DEFAULT_DECIMALS);
        let value = parse_amount("amount", &request.amount)?;
        Ok(json!({
            "smallest_unit": value.to_string(),
            "amount": from_smallest_unit(value, decimals)?,
            "decimals": decimals
        }))
    }
}
