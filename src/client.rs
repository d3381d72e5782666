use crate::chain::ChainDescriptor;
use crate::connection::{ChainConnection, ContractCall, Receipt};
use crate::contracts::{balanceOfCall, buyCall, decimalsCall, listCall, sellCall, symbolCall};
use crate::error::ClientError;
use crate::events::{find_event, DecodedEvent, EventShape, ListEvent, TradeEvent, FACTORY_EVENTS};
use crate::upload::UploadClient;
use alloy::{
    primitives::{Address, U256},
    sol_types::SolCall,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Descriptive data stored off-chain for a listed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub description: String,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
}

impl TokenMetadata {
    pub fn check(&self) -> Result<(), ClientError> {
        if self.name.trim().is_empty() {
            return Err(ClientError::InvalidInput("token name must not be empty".into()));
        }
        if self.symbol.trim().is_empty() {
            return Err(ClientError::InvalidInput("token symbol must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetadataPayload<'a> {
    #[serde(flatten)]
    metadata: &'a TokenMetadata,
    creator: String,
    timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyParams {
    pub token_address: Address,
    /// Native currency to spend, in smallest units.
    pub amount: U256,
    pub min_token_amount: U256,
}

impl BuyParams {
    pub fn check(&self) -> Result<(), ClientError> {
        check_token(&self.token_address)?;
        check_amount(&self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellParams {
    pub token_address: Address,
    /// Tokens to sell, in smallest units.
    pub amount: U256,
    pub min_base_amount: U256,
    pub is_output_kaia: bool,
}

impl SellParams {
    pub fn check(&self) -> Result<(), ClientError> {
        check_token(&self.token_address)?;
        check_amount(&self.amount)
    }
}

fn check_token(token_address: &Address) -> Result<(), ClientError> {
    if token_address.is_zero() {
        return Err(ClientError::InvalidInput(
            "token address must not be the zero address".into(),
        ));
    }
    Ok(())
}

fn check_amount(amount: &U256) -> Result<(), ClientError> {
    if amount.is_zero() {
        return Err(ClientError::InvalidInput("amount must be greater than zero".into()));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct TradeOutcome {
    pub receipt: Receipt,
    /// `None` when the transaction succeeded but emitted no recognizable `Trade`.
    pub event: Option<TradeEvent>,
}

#[derive(Debug, Clone)]
pub struct ListOutcome {
    pub receipt: Receipt,
    pub metadata_hash: String,
    pub event: Option<ListEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBalance {
    pub token_address: Address,
    pub owner: Address,
    pub balance: U256,
    pub decimals: u8,
    pub symbol: String,
}

/// Executes launchpad actions for one signer on one chain.
pub struct TradingClient {
    connection: Arc<dyn ChainConnection>,
    address: Address,
    chain: ChainDescriptor,
    uploader: UploadClient,
    web_url: Option<String>,
}

impl TradingClient {
    pub fn new(
        connection: Arc<dyn ChainConnection>,
        address: Address,
        chain: ChainDescriptor,
        uploader: UploadClient,
        web_url: Option<&str>,
    ) -> Self {
        Self {
            connection,
            address,
            chain,
            uploader,
            web_url: web_url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn chain(&self) -> &ChainDescriptor {
        &self.chain
    }

    /// Launchpad page of a token, or its explorer page when no front-end is configured.
    pub fn token_url(&self, token_address: &Address) -> String {
        match &self.web_url {
            Some(web_url) => format!("{}/token/{}", web_url, token_address),
            None => self.chain.address_url(token_address),
        }
    }

    fn factory(&self) -> Result<Address, ClientError> {
        self.chain.factory_address.ok_or(ClientError::MissingFactory)
    }

    fn ensure_chain(&self) -> Result<(), ClientError> {
        let actual = self.connection.chain_id();
        if actual != self.chain.id {
            return Err(ClientError::UnsupportedChain {
                expected: self.chain.id,
                actual,
            });
        }
        Ok(())
    }

    async fn submit(&self, call: ContractCall) -> Result<Receipt, ClientError> {
        let receipt = self.connection.send(call).await?;
        if !receipt.success {
            warn!("Transaction {} reverted", receipt.transaction_hash);
            return Err(ClientError::Reverted(receipt.transaction_hash));
        }
        info!(
            block = ?receipt.block_number,
            "Transaction {} confirmed",
            receipt.transaction_hash
        );
        Ok(receipt)
    }

    pub async fn buy(&self, params: &BuyParams) -> Result<TradeOutcome, ClientError> {
        self.ensure_chain()?;
        let factory = self.factory()?;
        params.check()?;
        info!(token = %params.token_address, amount = %params.amount, "Buying token");

        let data = buyCall {
            tokenAddress: params.token_address,
            minTokenAmount: params.min_token_amount,
        }
        .abi_encode();
        let call = ContractCall::new(factory, data).with_value(params.amount);

        let receipt = self.submit(call).await?;
        let event = trade_event(&receipt, factory);
        Ok(TradeOutcome { receipt, event })
    }

    pub async fn sell(&self, params: &SellParams) -> Result<TradeOutcome, ClientError> {
        self.ensure_chain()?;
        let factory = self.factory()?;
        params.check()?;
        info!(token = %params.token_address, amount = %params.amount, "Selling token");

        let data = sellCall {
            tokenAddress: params.token_address,
            amount: params.amount,
            minBaseAmount: params.min_base_amount,
            isOutputKAIA: params.is_output_kaia,
        }
        .abi_encode();
        let call = ContractCall::new(factory, data);

        let receipt = self.submit(call).await?;
        let event = trade_event(&receipt, factory);
        Ok(TradeOutcome { receipt, event })
    }

    pub async fn list(&self, metadata: &TokenMetadata) -> Result<ListOutcome, ClientError> {
        self.ensure_chain()?;
        let factory = self.factory()?;
        metadata.check()?;

        let fee = self.chain.listing_fee();
        let available = self.connection.balance(self.address).await?;
        if available < fee {
            return Err(ClientError::InsufficientBalance {
                required: fee,
                available,
            });
        }

        let payload = serde_json::to_string(&MetadataPayload {
            metadata,
            creator: self.address.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        })
        .map_err(|e| ClientError::InvalidInput(format!("unserializable metadata: {}", e)))?;
        let metadata_hash = self.uploader.upload_metadata(&payload).await?;
        info!(symbol = %metadata.symbol, %metadata_hash, "Listing token");

        let data = listCall {
            baseTokenAddress: self.chain.base_token_address,
            name: metadata.name.clone(),
            symbol: metadata.symbol.clone(),
            metadataHash: metadata_hash.clone(),
        }
        .abi_encode();
        let call = ContractCall::new(factory, data).with_value(fee);

        let receipt = self.submit(call).await?;
        let event = match find_event(Some(&receipt), factory, FACTORY_EVENTS, EventShape::List) {
            Some(DecodedEvent::List(e)) => Some(e),
            _ => None,
        };
        Ok(ListOutcome {
            receipt,
            metadata_hash,
            event,
        })
    }

    /// Upload an asset, yielding its URL or `None` if the endpoint rejected it.
    pub async fn upload_image(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> Result<Option<String>, ClientError> {
        if bytes.is_empty() {
            return Err(ClientError::InvalidInput("image content is empty".into()));
        }
        match self.uploader.upload_file(bytes, filename, mime_type).await {
            Ok(url) => Ok(Some(url)),
            Err(e) => {
                warn!("Image upload failed: {}", e);
                Ok(None)
            }
        }
    }

    pub async fn native_balance(&self, address: Option<Address>) -> Result<U256, ClientError> {
        self.connection
            .balance(address.unwrap_or(self.address))
            .await
    }

    pub async fn token_balance(
        &self,
        token_address: Address,
        owner: Option<Address>,
    ) -> Result<TokenBalance, ClientError> {
        let owner = owner.unwrap_or(self.address);

        let call_data = balanceOfCall { account: owner }.abi_encode();
        let result = self
            .connection
            .call(ContractCall::new(token_address, call_data))
            .await?;
        let balance: U256 = balanceOfCall::abi_decode_returns(&result, true)?._0;

        let decimals_data = decimalsCall {}.abi_encode();
        let decimals_res = self
            .connection
            .call(ContractCall::new(token_address, decimals_data))
            .await?;
        let decimals: u8 = decimalsCall::abi_decode_returns(&decimals_res, true)?._0;

        let symbol_data = symbolCall {}.abi_encode();
        let symbol_res = self
            .connection
            .call(ContractCall::new(token_address, symbol_data))
            .await?;
        let symbol: String = symbolCall::abi_decode_returns(&symbol_res, true)?._0;

        Ok(TokenBalance {
            token_address,
            owner,
            balance,
            decimals,
            symbol,
        })
    }
}

fn trade_event(receipt: &Receipt, factory: Address) -> Option<TradeEvent> {
    match find_event(Some(receipt), factory, FACTORY_EVENTS, EventShape::Trade) {
        Some(DecodedEvent::Trade(e)) => Some(e),
        _ => None,
    }
}
