//! ABI definitions for the launchpad factory and the ERC-20 reads.

use alloy::sol;

// Launchpad factory entry points
sol! {
    #[allow(missing_docs)]
    function buy(address tokenAddress, uint256 minTokenAmount) external payable;
    #[allow(missing_docs)]
    function sell(address tokenAddress, uint256 amount, uint256 minBaseAmount, bool isOutputKAIA) external;
    #[allow(missing_docs)]
    function list(address baseTokenAddress, string name, string symbol, string metadataHash) external payable;
}

// Launchpad factory events
sol! {
    #[allow(missing_docs)]
    event Trade(
        address indexed trader,
        address indexed tokenAddress,
        bool isBuy,
        uint256 baseAmount,
        uint256 tokenAmount
    );
    #[allow(missing_docs)]
    event List(
        address indexed creator,
        address indexed tokenAddress,
        address baseTokenAddress,
        string name,
        string symbol,
        string metadataHash
    );
}

// ERC-20 reads
sol! {
    #[allow(missing_docs)]
    function balanceOf(address account) external view returns (uint256);
    #[allow(missing_docs)]
    function decimals() external view returns (uint8);
    #[allow(missing_docs)]
    function symbol() external view returns (string);
}
