use super::{parse_address, parse_args, receipt_json, Tool};
use crate::client::{TokenMetadata, TradingClient};
use crate::error::ClientError;
use crate::events::DecodedEvent;
use crate::units::from_smallest_unit;
use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
pub struct ListTokenRequest {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image_url: String,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub telegram: Option<String>,
}

impl ListTokenRequest {
    pub fn validate(self) -> Result<TokenMetadata, ClientError> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let metadata = TokenMetadata {
            name: self.name.trim().to_string(),
            symbol: self.symbol.trim().to_string(),
            description: self.description,
            image_url: self.image_url.trim().to_string(),
            website: non_empty(self.website),
            twitter: non_empty(self.twitter),
            telegram: non_empty(self.telegram),
        };
        metadata.check()?;
        Ok(metadata)
    }
}

#[derive(Deserialize)]
pub struct TokenUrlRequest {
    pub token_address: String,
}

pub struct ListTokenTool;

#[async_trait::async_trait]
impl Tool for ListTokenTool {
    fn name(&self) -> &'static str {
        "list-token"
    }

    fn description(&self) -> &'static str {
        "Create and list a new token on the launchpad. Costs a fixed listing fee of 10 KAIA."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "Token name" },
                "symbol": { "type": "string", "description": "Token symbol" },
                "description": { "type": "string", "description": "Token description" },
                "image_url": {
                    "type": "string",
                    "description": "URL of the token image (use upload-image to obtain one)"
                },
                "website": { "type": "string", "description": "Optional project website" },
                "twitter": { "type": "string", "description": "Optional Twitter/X link" },
                "telegram": { "type": "string", "description": "Optional Telegram link" }
            },
            "required": ["name", "symbol", "description", "image_url"]
        })
    }

    async fn call(&self, client: &TradingClient, args: Value) -> Result<Value> {
        let metadata = parse_args::<ListTokenRequest>(args)?.validate()?;
        let outcome = client.list(&metadata).await?;
        let currency = client.chain().native_currency;

        let mut result = json!({
            "receipt": receipt_json(client, &outcome.receipt),
            "metadata_hash": outcome.metadata_hash,
            "fee": format!(
                "{} {}",
                from_smallest_unit(client.chain().listing_fee(), currency.decimals)?,
                currency.symbol
            )
        });
        match outcome.event {
            Some(event) => {
                result["token_address"] = json!(event.token_address.to_string());
                result["token_url"] = json!(client.token_url(&event.token_address));
                result["event"] = DecodedEvent::List(event).to_json();
            }
            None => {
                result["token_address"] = Value::Null;
                result["event"] = Value::Null;
                result["note"] =
                    json!("Transaction confirmed but no List event was found in the receipt");
            }
        }
        Ok(result)
    }
}

pub struct GetTokenUrlTool;

#[async_trait::async_trait]
impl Tool for GetTokenUrlTool {
    fn name(&self) -> &'static str {
        "get-token-url"
    }

    fn description(&self) -> &'static str {
        "Get the launchpad web page URL for a token"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "token_address": {
                    "type": "string",
                    "description": "Token contract address"
                }
            },
            "required": ["token_address"]
        })
    }

    async fn call(&self, client: &TradingClient, args: Value) -> Result<Value> {
        let request = parse_args::<TokenUrlRequest>(args)?;
        let token = parse_address("token_address", &request.token_address)?;
        Ok(json!({
            "token_address": token.to_string(),
            "url": client.token_url(&token),
            "explorer_url": client.chain().address_url(&token)
        }))
    }
}
