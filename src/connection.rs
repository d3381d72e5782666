use crate::error::ClientError;
use alloy::{
    network::EthereumWallet,
    primitives::{Address, Bytes, Log, TxHash, U256},
    providers::{Provider, ProviderBuilder},
    rpc::types::eth::TransactionRequest,
    signers::local::PrivateKeySigner,
    transports::http::{Client, Http},
};
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// A single contract invocation: target, ABI-encoded calldata and attached value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

impl ContractCall {
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            data: data.into(),
            value: U256::ZERO,
        }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }
}

/// Confirmation record of an included transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    pub success: bool,
    pub logs: Vec<Log>,
}

/// Access to one chain under one signing identity.
///
/// `send` submits the call signed by the connection's wallet and resolves once
/// the transaction is included. Timeouts and cancellation are whatever the
/// underlying transport provides.
#[async_trait::async_trait]
pub trait ChainConnection: Send + Sync {
    /// Chain id this connection is bound to.
    fn chain_id(&self) -> u64;
    async fn balance(&self, address: Address) -> Result<U256, ClientError>;
    async fn call(&self, call: ContractCall) -> Result<Bytes, ClientError>;
    async fn send(&self, call: ContractCall) -> Result<Receipt, ClientError>;
}

/// Connect to an HTTP JSON-RPC endpoint with a local signer attached.
///
/// The chain id is read once here and never refreshed.
pub async fn connect(
    rpc_url: &str,
    signer: PrivateKeySigner,
) -> anyhow::Result<Arc<dyn ChainConnection>> {
    let signer_address = signer.address();
    let wallet = EthereumWallet::from(signer);

    let url = Url::parse(rpc_url)?;
    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(wallet)
        .on_http(url);

    let chain_id = provider.get_chain_id().await?;
    info!(chain_id, %signer_address, "Connected to {}", rpc_url);

    Ok(Arc::new(AlloyConnection {
        provider,
        chain_id,
        signer_address,
    }))
}

struct AlloyConnection<P> {
    provider: P,
    chain_id: u64,
    signer_address: Address,
}

impl<P> AlloyConnection<P> {
    fn request(&self, call: ContractCall) -> TransactionRequest {
        TransactionRequest::default()
            .from(self.signer_address)
            .to(call.to)
            .value(call.value)
            .input(call.data.into())
    }
}

#[async_trait::async_trait]
impl<P> ChainConnection for AlloyConnection<P>
where
    P: Provider<Http<Client>> + Send + Sync + 'static,
{
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn balance(&self, address: Address) -> Result<U256, ClientError> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| ClientError::Rpc(e.to_string()))
    }

    async fn call(&self, call: ContractCall) -> Result<Bytes, ClientError> {
        let tx_req = self.request(call);
        self.provider
            .call(&tx_req)
            .await
            .map_err(|e| ClientError::Rpc(e.to_string()))
    }

    async fn send(&self, call: ContractCall) -> Result<Receipt, ClientError> {
        let tx_req = self.request(call);
        let pending = self
            .provider
            .send_transaction(tx_req)
            .await
            .map_err(|e| ClientError::Transaction(e.to_string()))?;
        debug!("Submitted transaction {}", pending.tx_hash());

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| ClientError::Transaction(e.to_string()))?;

        Ok(Receipt {
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            success: receipt.status(),
            logs: receipt
                .inner
                .logs()
                .iter()
                .map(|log| log.inner.clone())
                .collect(),
        })
    }
}
