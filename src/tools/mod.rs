pub mod balance;
pub mod list;
pub mod trade;
pub mod units;
pub mod upload;

use crate::client::TradingClient;
use crate::connection::Receipt;
use crate::error::ClientError;
use alloy::primitives::{Address, U256};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::str::FromStr;

#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn schema(&self) -> Value;
    async fn call(&self, client: &TradingClient, args: Value) -> anyhow::Result<Value>;
}

pub type ToolRegistry = HashMap<String, Box<dyn Tool>>;

/// All tools served by this process, keyed by name.
pub fn registry() -> ToolRegistry {
    let tools: Vec<Box<dyn Tool>> = vec![
        Box::new(list::ListTokenTool),
        Box::new(trade::BuyTokenTool),
        Box::new(trade::SellTokenTool),
        Box::new(balance::GetTokenBalanceTool),
        Box::new(balance::GetWalletBalanceTool),
        Box::new(balance::GetWalletAddressTool),
        Box::new(upload::UploadImageTool),
        Box::new(units::ConvertToSmallestUnitTool),
        Box::new(units::ConvertFromSmallestUnitTool),
        Box::new(list::GetTokenUrlTool),
    ];
    tools
        .into_iter()
        .map(|t| (t.name().to_string(), t))
        .collect()
}

pub(crate) fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ClientError> {
    serde_json::from_value(args).map_err(|e| ClientError::InvalidInput(e.to_string()))
}

pub(crate) fn parse_address(field: &str, value: &str) -> Result<Address, ClientError> {
    Address::from_str(value.trim())
        .map_err(|_| ClientError::InvalidInput(format!("{} is not a valid address: {}", field, value)))
}

/// Integer amount in smallest units.
pub(crate) fn parse_amount(field: &str, value: &str) -> Result<U256, ClientError> {
    let value = value.trim();
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ClientError::InvalidInput(format!(
            "{} must be a non-negative integer in smallest units, got {:?}",
            field, value
        )));
    }
    U256::from_str_radix(value, 10)
        .map_err(|_| ClientError::InvalidInput(format!("{} does not fit in 256 bits", field)))
}

pub(crate) fn receipt_json(client: &TradingClient, receipt: &Receipt) -> Value {
    json!({
        "transaction_hash": receipt.transaction_hash.to_string(),
        "block_number": receipt.block_number,
        "status": if receipt.success { "success" } else { "reverted" },
        "explorer_url": client.chain().transaction_url(&receipt.transaction_hash)
    })
}
