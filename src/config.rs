use crate::chain::{ChainDescriptor, KAIA_MAINNET};
use alloy::primitives::Address;
use anyhow::Context;
use std::env;
use std::str::FromStr;
use url::Url;

#[derive(Clone)]
pub struct Config {
    pub private_key: String,
    pub rpc_url: String,
    pub api_url: Url,
    /// Launchpad web front-end; token links fall back to the explorer without it.
    pub web_url: Option<String>,
    pub chain: ChainDescriptor,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key/value source. `PRIVATE_KEY`,
    /// `FACTORY_ADDRESS` and `API_URL` are required.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let private_key = lookup("PRIVATE_KEY").context("PRIVATE_KEY must be set")?;

        let factory = lookup("FACTORY_ADDRESS").context("FACTORY_ADDRESS must be set")?;
        let factory = Address::from_str(factory.trim())
            .context("FACTORY_ADDRESS is not an address")?;
        anyhow::ensure!(!factory.is_zero(), "FACTORY_ADDRESS must not be the zero address");
        let chain = KAIA_MAINNET.with_factory(factory);

        let api_url = lookup("API_URL").context("API_URL must be set")?;
        let api_url = Url::parse(&api_url).context("API_URL is not a valid URL")?;

        let rpc_url = lookup("KAIA_RPC_URL").unwrap_or_else(|| chain.default_rpc_url().to_string());
        let web_url = lookup("WEB_URL").filter(|u| !u.trim().is_empty());

        Ok(Self {
            private_key,
            rpc_url,
            api_url,
            web_url,
            chain,
        })
    }
}
