#![allow(dead_code)]

use alloy::{
    primitives::{address, b256, Address, Bytes, Log, TxHash, U256},
    sol_types::{SolCall, SolEvent, SolValue},
};
use kaia_trading_mcp::{
    chain::KAIA_MAINNET,
    client::TradingClient,
    connection::{ChainConnection, ContractCall, Receipt},
    contracts::{balanceOfCall, decimalsCall, symbolCall, List, Trade},
    error::ClientError,
    upload::UploadClient,
};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use url::Url;

pub const SIGNER: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
pub const TOKEN: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
pub const TX_HASH: TxHash =
    b256!("0202020202020202020202020202020202020202020202020202020202020202");
pub const WEB_URL: &str = "https://launchpad.test";
pub const FACTORY: Address = address!("5fbdb2315678afecb367f032d93f642f64180aa3");

pub fn kaia(n: u64) -> U256 {
    U256::from(n) * U256::from_str("1000000000000000000").unwrap()
}

/// Recording stand-in for a chain connection.
pub struct MockConnection {
    pub chain_id: u64,
    pub balance: U256,
    pub success: bool,
    pub logs: Vec<Log>,
    pub sent: Mutex<Vec<ContractCall>>,
    pub balance_reads: Mutex<Vec<Address>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self {
            chain_id: KAIA_MAINNET.id,
            balance: kaia(100),
            success: true,
            logs: vec![],
            sent: Mutex::new(vec![]),
            balance_reads: Mutex::new(vec![]),
        }
    }

    pub fn on_chain(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn with_balance(mut self, balance: U256) -> Self {
        self.balance = balance;
        self
    }

    pub fn with_logs(mut self, logs: Vec<Log>) -> Self {
        self.logs = logs;
        self
    }

    pub fn reverting(mut self) -> Self {
        self.success = false;
        self
    }

    pub fn sent(&self) -> Vec<ContractCall> {
        self.sent.lock().unwrap().clone()
    }

    pub fn balance_reads(&self) -> usize {
        self.balance_reads.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ChainConnection for MockConnection {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn balance(&self, address: Address) -> Result<U256, ClientError> {
        self.balance_reads.lock().unwrap().push(address);
        Ok(self.balance)
    }

    async fn call(&self, call: ContractCall) -> Result<Bytes, ClientError> {
        let selector: [u8; 4] = call.data[..4].try_into().unwrap();
        let encoded = if selector == balanceOfCall::SELECTOR {
            U256::from(2_500_000u64).abi_encode()
        } else if selector == decimalsCall::SELECTOR {
            U256::from(6u8).abi_encode()
        } else if selector == symbolCall::SELECTOR {
            "FOO".to_string().abi_encode()
        } else {
            return Err(ClientError::Rpc("execution reverted".into()));
        };
        Ok(encoded.into())
    }

    async fn send(&self, call: ContractCall) -> Result<Receipt, ClientError> {
        self.sent.lock().unwrap().push(call);
        Ok(Receipt {
            transaction_hash: TX_HASH,
            block_number: Some(1234),
            success: self.success,
            logs: self.logs.clone(),
        })
    }
}

pub fn client_with(connection: Arc<MockConnection>, api_url: &str) -> TradingClient {
    TradingClient::new(
        connection,
        SIGNER,
        KAIA_MAINNET.with_factory(FACTORY),
        UploadClient::new(Url::parse(api_url).unwrap()),
        Some(WEB_URL),
    )
}

/// A client whose chain descriptor carries no factory address.
pub fn client_without_factory(connection: Arc<MockConnection>, api_url: &str) -> TradingClient {
    TradingClient::new(
        connection,
        SIGNER,
        KAIA_MAINNET,
        UploadClient::new(Url::parse(api_url).unwrap()),
        None,
    )
}

pub fn trade_log(token: Address, is_buy: bool) -> Log {
    let event = Trade {
        trader: SIGNER,
        tokenAddress: token,
        isBuy: is_buy,
        baseAmount: kaia(1),
        tokenAmount: U256::from(1_000_000u64),
    };
    Log {
        address: FACTORY,
        data: event.encode_log_data(),
    }
}

pub fn list_log(token: Address, metadata_hash: &str) -> Log {
    let event = List {
        creator: SIGNER,
        tokenAddress: token,
        baseTokenAddress: Address::ZERO,
        name: "Foo".into(),
        symbol: "FOO".into(),
        metadataHash: metadata_hash.into(),
    };
    Log {
        address: FACTORY,
        data: event.encode_log_data(),
    }
}
