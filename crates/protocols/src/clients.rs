//! Client traits for the contracts the provisioning flow depends on.

use alloy::primitives::{Address, TxHash, U256};
use alloy::rpc::types::TransactionReceipt;
use async_trait::async_trait;
use lpdapp_domain::entities::{LiquidityRecord, MintParams};
use lpdapp_domain::enums::FeeTier;
use anyhow::Result;
use std::fmt;
use std::sync::Arc;

/// A transaction that was mined with a success status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedTx {
    /// Transaction hash.
    pub hash: TxHash,
    /// Block in which the transaction was included.
    pub block_number: Option<u64>,
    /// Gas consumed by the transaction.
    pub gas_used: u64,
}

impl ConfirmedTx {
    /// Hex form of the hash with `0x` prefix.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        format!("{:#x}", self.hash)
    }
}

impl From<&TransactionReceipt> for ConfirmedTx {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
        }
    }
}

impl fmt::Display for ConfirmedTx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.block_number {
            Some(block) => write!(f, "{:#x} (block {block})", self.hash),
            None => write!(f, "{:#x}", self.hash),
        }
    }
}

/// Current price and tick of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot0 {
    pub sqrt_price_x96: U256,
    pub tick: i32,
}

/// Position data decoded from the mint receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintedPosition {
    /// NFT id of the new position.
    pub token_id: U256,
    pub liquidity: u128,
    pub amount0: U256,
    pub amount1: U256,
}

/// Outcome of a confirmed mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintReceipt {
    pub tx: ConfirmedTx,
    /// `None` when the receipt carried no `IncreaseLiquidity` event.
    pub position: Option<MintedPosition>,
}

/// Arguments of a ledger `addLiquidity` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Display name of token A.
    pub token_a: String,
    /// Display name of token B.
    pub token_b: String,
    pub token_a_address: Address,
    pub token_b_address: Address,
    pub pool_address: Address,
    /// Network identifier, recorded as the decimal chain id.
    pub network: String,
    /// Hash of the mint transaction.
    pub transaction_hash: String,
}

/// The wallet signing every write.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Address of the signing account.
    fn address(&self) -> Address;

    /// Chain id of the connected network.
    async fn chain_id(&self) -> Result<u64>;

    /// Native currency balance of the signing account.
    async fn native_balance(&self) -> Result<U256>;
}

/// Uniswap V3 factory lookups.
#[async_trait]
pub trait FactoryClient: Send + Sync {
    /// Returns the pool for the pair and fee, or the zero address if none exists.
    async fn get_pool(&self, token0: Address, token1: Address, fee: FeeTier) -> Result<Address>;
}

/// Reads of a pool's live state.
#[async_trait]
pub trait PoolClient: Send + Sync {
    async fn tick_spacing(&self, pool: Address) -> Result<i32>;
    async fn fee(&self, pool: Address) -> Result<u32>;
    async fn liquidity(&self, pool: Address) -> Result<u128>;
    async fn slot0(&self, pool: Address) -> Result<Slot0>;
}

/// ERC-20 metadata, balances and allowances.
#[async_trait]
pub trait Erc20Client: Send + Sync {
    async fn name(&self, token: Address) -> Result<String>;
    async fn symbol(&self, token: Address) -> Result<String>;
    async fn decimals(&self, token: Address) -> Result<u8>;
    async fn total_supply(&self, token: Address) -> Result<U256>;
    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256>;
    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256>;

    /// Submits `approve(spender, amount)` and waits for a successful receipt.
    async fn approve(&self, token: Address, spender: Address, amount: U256)
    -> Result<ConfirmedTx>;
}

/// Tokens that expose their holder list.
#[async_trait]
pub trait TokenHoldersClient: Send + Sync {
    async fn holders(&self, token: Address) -> Result<Vec<Address>>;
}

/// Nonfungible position manager.
#[async_trait]
pub trait PositionManagerClient: Send + Sync {
    /// Address approvals must be granted to.
    fn address(&self) -> Address;

    /// Broadcasts `mint(params)` with an explicit gas ceiling.
    async fn submit_mint(&self, params: &MintParams, gas_limit: u64) -> Result<TxHash>;

    /// Waits for a broadcast mint and decodes the position it created.
    /// A reverted receipt is an error.
    async fn confirm_mint(&self, tx: TxHash) -> Result<MintReceipt>;
}

/// Contract recording provisioned positions per owner.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn add_liquidity(&self, entry: &LedgerEntry) -> Result<ConfirmedTx>;
    async fn get_all_liquidity(&self, owner: Address) -> Result<Vec<LiquidityRecord>>;
}

/// Fixed-price token sale.
#[async_trait]
pub trait SaleClient: Send + Sync {
    /// Price of one whole token in wei.
    async fn token_price(&self) -> Result<U256>;
    async fn tokens_sold(&self) -> Result<U256>;

    /// Buys `amount` whole tokens paying `value` wei.
    async fn buy_tokens(&self, amount: U256, value: U256) -> Result<ConfirmedTx>;
}

/// Every client the orchestrator needs, shared behind `Arc`s.
#[derive(Clone)]
pub struct ContractClients {
    pub wallet: Arc<dyn WalletSigner>,
    pub factory: Arc<dyn FactoryClient>,
    pub pools: Arc<dyn PoolClient>,
    pub erc20: Arc<dyn Erc20Client>,
    pub holders: Arc<dyn TokenHoldersClient>,
    pub position_manager: Arc<dyn PositionManagerClient>,
    pub ledger: Arc<dyn LedgerClient>,
    pub sale: Arc<dyn SaleClient>,
}
