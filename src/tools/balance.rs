use super::{parse_address, parse_args, Tool};
use crate::client::TradingClient;
use crate::error::ClientError;
use crate::units::from_smallest_unit;
use alloy::primitives::Address;
use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
pub struct WalletBalanceRequest {
    pub address: Option<String>,
}

impl WalletBalanceRequest {
    pub fn validate(self) -> Result<Option<Address>, ClientError> {
        self.address
            .as_deref()
            .map(|a| parse_address("address", a))
            .transpose()
    }
}

#[derive(Deserialize)]
pub struct TokenBalanceRequest {
    pub token_address: String,
    pub address: Option<String>,
}

impl TokenBalanceRequest {
    pub fn validate(self) -> Result<(Address, Option<Address>), ClientError> {
        let token = parse_address("token_address", &self.token_address)?;
        let owner = self
            .address
            .as_deref()
            .map(|a| parse_address("address", a))
            .transpose()?;
        Ok((token, owner))
    }
}

pub struct GetWalletAddressTool;

#[async_trait::async_trait]
impl Tool for GetWalletAddressTool {
    fn name(&self) -> &'static str {
        "get-wallet-address"
    }

    fn description(&self) -> &'static str {
        "Get the address of the wallet this server signs transactions with"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn call(&self, client: &TradingClient, _args: Value) -> Result<Value> {
        let address = client.address();
        Ok(json!({
            "address": address.to_string(),
            "explorer_url": client.chain().address_url(&address)
        }))
    }
}

pub struct GetWalletBalanceTool;

#[async_trait::async_trait]
impl Tool for GetWalletBalanceTool {
    fn name(&self) -> &'static str {
        "get-wallet-balance"
    }

    fn description(&self) -> &'static str {
        "Get the native KAIA balance of a wallet. Defaults to this server's wallet."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "address": {
                    "type": "string",
                    "description": "Optional wallet address. If omitted, the server's wallet is used."
                }
            }
        })
    }

    async fn call(&self, client: &TradingClient, args: Value) -> Result<Value> {
        let address = parse_args::<WalletBalanceRequest>(args)?.validate()?;
        let balance = client.native_balance(address).await?;
        let currency = client.chain().native_currency;

        Ok(json!({
            "address": address.unwrap_or(client.address()).to_string(),
            "balance": from_smallest_unit(balance, currency.decimals)?,
            "raw_balance": balance.to_string(),
            "symbol": currency.symbol,
            "decimals": currency.decimals
        }))
    }
}

pub struct GetTokenBalanceTool;

#[async_trait::async_trait]
impl Tool for GetTokenBalanceTool {
    fn name(&self) -> &'static str {
        "get-token-balance"
    }

    fn description(&self) -> &'static str {
        "Get the balance of a token for a wallet. Defaults to this server's wallet."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "token_address": {
                    "type": "string",
                    "description": "Token contract address"
                },
                "address": {
                    "type": "string",
                    "description": "Optional wallet address. If omitted, the server's wallet is used."
                }
            },
            "required": ["token_address"]
        })
    }

    async fn call(&self, client: &TradingClient, args: Value) -> Result<Value> {
        let (token, owner) = parse_args::<TokenBalanceRequest>(args)?.validate()?;
        let balance = client.token_balance(token, owner).await?;

        Ok(json!({
            "token_address": balance.token_address.to_string(),
            "address": balance.owner.to_string(),
            "balance": from_smallest_unit(balance.balance, balance.decimals)?,
            "raw_balance": balance.balance.to_string(),
            "symbol": balance.symbol,
            "decimals": balance.decimals
        }))
    }
}
