use alloy::primitives::{Address, U256};

/// Native currency of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeCurrency {
    pub symbol: &'static str,
    pub decimals: u8,
}

/// Static description of the network the trading client targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainDescriptor {
    pub id: u64,
    pub native_currency: NativeCurrency,
    pub rpc_urls: &'static [&'static str],
    pub explorer_url: &'static str,
    /// Launchpad factory that accepts `buy`, `sell` and `list`. Deployment
    /// specific, so it has no built-in value.
    pub factory_address: Option<Address>,
    /// Base token new listings are paired against. Zero means native KAIA.
    pub base_token_address: Address,
}

pub const KAIA_MAINNET: ChainDescriptor = ChainDescriptor {
    id: 8217,
    native_currency: NativeCurrency {
        symbol: "KAIA",
        decimals: 18,
    },
    rpc_urls: &["https://public-en.node.kaia.io"],
    explorer_url: "https://kaiascan.io",
    factory_address: None,
    base_token_address: Address::ZERO,
};

/// Fee charged by the factory for registering a new token, in KAIA.
pub const LISTING_FEE_KAIA: u64 = 10;

impl ChainDescriptor {
    pub fn default_rpc_url(&self) -> &'static str {
        self.rpc_urls[0]
    }

    /// Listing fee expressed in the smallest native unit.
    pub fn listing_fee(&self) -> U256 {
        U256::from(LISTING_FEE_KAIA)
            * U256::from(10u64).pow(U256::from(self.native_currency.decimals))
    }

    pub fn with_factory(mut self, factory_address: Address) -> Self {
        self.factory_address = Some(factory_address);
        self
    }

    pub fn transaction_url(&self, tx_hash: &impl std::fmt::Display) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }

    pub fn address_url(&self, address: &Address) -> String {
        format!("{}/address/{}", self.explorer_url, address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn listing_fee_is_ten_kaia() {
        let fee = KAIA_MAINNET.listing_fee();
        assert_eq!(fee, U256::from_str("10000000000000000000").unwrap());
    }

    #[test]
    fn explorer_links() {
        let url = KAIA_MAINNET.address_url(&Address::ZERO);
        assert!(url.starts_with("https://kaiascan.io/address/0x"));
    }
}
