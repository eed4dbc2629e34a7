use alloy::primitives::{Address, address};

/// Uniswap V3 factory.
pub const UNISWAP_V3_FACTORY: Address = address!("1f98431c8ad98523631ae4a59f267346ea31f984");

/// Uniswap V3 nonfungible position manager.
pub const NONFUNGIBLE_POSITION_MANAGER: Address =
    address!("c36442b4a4522e871399cd717abdd847ab11fe88");

/// Woox ERC-20 token.
pub const WOOX_TOKEN: Address = address!("1d63c1b4c9b8ba0767c2341f68ae1e74f7a49eea");

/// Woox token sale.
pub const WOOX_SALE: Address = address!("cf114e18b06a31c8ceacea8c1a8a70219c5dd4df");

/// Liquidity ledger recording provisioned positions.
pub const LIQUIDITY_LEDGER: Address = address!("bd5ae07d648a62359a74eaed95c039644c2495ef");

/// Addresses of every contract the flow talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    pub factory: Address,
    pub position_manager: Address,
    pub ledger: Address,
    pub sale: Address,
    pub token: Address,
}

impl Default for ContractAddresses {
    fn default() -> Self {
        Self {
            factory: UNISWAP_V3_FACTORY,
            position_manager: NONFUNGIBLE_POSITION_MANAGER,
            ledger: LIQUIDITY_LEDGER,
            sale: WOOX_SALE,
            token: WOOX_TOKEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_addresses() {
        let addresses = ContractAddresses::default();
        assert_eq!(
            addresses.factory.to_checksum(None),
            "0x1F98431c8aD98523631AE4a59f267346ea31F984"
        );
        assert_eq!(
            addresses.position_manager.to_checksum(None),
            "0xC36442b4a4522E871399CD717aBDD847Ab11FE88"
        );
        assert!(!addresses.ledger.is_zero());
    }
}
