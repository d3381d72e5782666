use alloy::primitives::{TxHash, U256};

/// Failures surfaced by the trading client. None of them is retried.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("unsupported chain: expected chain id {expected}, connected to {actual}")]
    UnsupportedChain { expected: u64, actual: u64 },

    #[error("no factory contract address is configured")]
    MissingFactory,

    #[error("insufficient balance: {required} required, {available} available")]
    InsufficientBalance { required: U256, available: U256 },

    #[error("remote endpoint failure: {0}")]
    RemoteEndpoint(String),

    #[error("transaction failed: {0}")]
    Transaction(String),

    #[error("transaction {0} reverted")]
    Reverted(TxHash),

    #[error("rpc error: {0}")]
    Rpc(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<alloy::sol_types::Error> for ClientError {
    fn from(value: alloy::sol_types::Error) -> Self {
        Self::Rpc(format!("abi decode: {}", value))
    }
}
