//! In-memory contract clients for driving the orchestrator.
#![allow(dead_code)]

use alloy_primitives::{Address, B256, U256};
use anyhow::{Result, bail};
use async_trait::async_trait;
use lpdapp_data::{DiscoveryLog, MemoryDiscoveryLog, StoreError};
use lpdapp_domain::entities::{LiquidityRecord, MintParams, PoolRecord, TokenDescriptor};
use lpdapp_domain::enums::FeeTier;
use lpdapp_domain::math::sqrt_ratio_at_tick;
use lpdapp_execution::prelude::*;
use lpdapp_protocols::clients::{
    ConfirmedTx, ContractClients, Erc20Client, FactoryClient, LedgerClient, LedgerEntry,
    MintReceipt, MintedPosition, PoolClient, PositionManagerClient, SaleClient, Slot0,
    TokenHoldersClient, WalletSigner,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

pub const CHAIN_ID: u64 = 11_155_111;

pub fn owner() -> Address {
    Address::repeat_byte(0xee)
}

pub fn pool_address() -> Address {
    Address::repeat_byte(0x99)
}

pub fn position_manager_address() -> Address {
    Address::repeat_byte(0x77)
}

pub fn mint_hash() -> B256 {
    B256::repeat_byte(0xab)
}

pub fn ledger_hash() -> B256 {
    B256::repeat_byte(0xcd)
}

/// Token A sorts after token B, so caller order differs from canonical order.
pub fn token_a() -> TokenDescriptor {
    TokenDescriptor::new(Address::repeat_byte(0x22), CHAIN_ID, 18, "WOOX", "Woox")
}

pub fn token_b() -> TokenDescriptor {
    TokenDescriptor::new(
        Address::repeat_byte(0x11),
        CHAIN_ID,
        18,
        "WETH",
        "Wrapped Ether",
    )
}

pub fn request(liquidity: &str) -> ProvisionRequest {
    ProvisionRequest {
        token_a: token_a(),
        token_b: token_b(),
        fee: FeeTier::Medium,
        liquidity: liquidity.to_string(),
    }
}

fn confirmed(hash: B256) -> ConfirmedTx {
    ConfirmedTx {
        hash,
        block_number: Some(100),
        gas_used: 150_000,
    }
}

pub struct FakeWallet {
    pub address: Address,
    pub chain_id: u64,
    pub native_balance: U256,
}

impl Default for FakeWallet {
    fn default() -> Self {
        Self {
            address: owner(),
            chain_id: CHAIN_ID,
            native_balance: U256::from(1_000_000_000_000_000_000u64),
        }
    }
}

#[async_trait]
impl WalletSigner for FakeWallet {
    fn address(&self) -> Address {
        self.address
    }

    async fn chain_id(&self) -> Result<u64> {
        Ok(self.chain_id)
    }

    async fn native_balance(&self) -> Result<U256> {
        Ok(self.native_balance)
    }
}

pub struct FakeFactory {
    pub pool: Mutex<Address>,
    pub fail: Mutex<bool>,
    pub calls: Mutex<Vec<(Address, Address, FeeTier)>>,
}

impl Default for FakeFactory {
    fn default() -> Self {
        Self {
            pool: Mutex::new(pool_address()),
            fail: Mutex::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl FactoryClient for FakeFactory {
    async fn get_pool(&self, token0: Address, token1: Address, fee: FeeTier) -> Result<Address> {
        self.calls.lock().unwrap().push((token0, token1, fee));
        if *self.fail.lock().unwrap() {
            bail!("connection refused");
        }
        Ok(*self.pool.lock().unwrap())
    }
}

pub struct FakePools {
    pub tick: i32,
    pub tick_spacing: Mutex<i32>,
    pub fee: Mutex<u32>,
    pub fail_slot0: Mutex<bool>,
    pub hang: Mutex<bool>,
    /// Every read waits here until all parties have arrived.
    pub gate: Mutex<Option<Arc<Barrier>>>,
    pub reads: AtomicUsize,
}

impl Default for FakePools {
    fn default() -> Self {
        Self {
            tick: 1000,
            tick_spacing: Mutex::new(60),
            fee: Mutex::new(3000),
            fail_slot0: Mutex::new(false),
            hang: Mutex::new(false),
            gate: Mutex::new(None),
            reads: AtomicUsize::new(0),
        }
    }
}

impl FakePools {
    async fn maybe_hang(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.wait().await;
        }
        let hang = *self.hang.lock().unwrap();
        if hang {
            std::future::pending::<()>().await;
        }
    }
}

#[async_trait]
impl PoolClient for FakePools {
    async fn tick_spacing(&self, _pool: Address) -> Result<i32> {
        self.maybe_hang().await;
        Ok(*self.tick_spacing.lock().unwrap())
    }

    async fn fee(&self, _pool: Address) -> Result<u32> {
        self.maybe_hang().await;
        Ok(*self.fee.lock().unwrap())
    }

    async fn liquidity(&self, _pool: Address) -> Result<u128> {
        self.maybe_hang().await;
        Ok(10u128.pow(24))
    }

    async fn slot0(&self, _pool: Address) -> Result<Slot0> {
        self.maybe_hang().await;
        if *self.fail_slot0.lock().unwrap() {
            bail!("slot0 reverted");
        }
        Ok(Slot0 {
            sqrt_price_x96: sqrt_ratio_at_tick(self.tick)?,
            tick: self.tick,
        })
    }
}

#[derive(Default)]
pub struct FakeErc20 {
    pub allowances: Mutex<HashMap<Address, U256>>,
    pub approvals: Mutex<Vec<(Address, Address, U256)>>,
    pub fail_approve_for: Mutex<Option<Address>>,
}

impl FakeErc20 {
    pub fn set_allowance(&self, token: Address, amount: U256) {
        self.allowances.lock().unwrap().insert(token, amount);
    }

    pub fn approval_count(&self) -> usize {
        self.approvals.lock().unwrap().len()
    }
}

#[async_trait]
impl Erc20Client for FakeErc20 {
    async fn name(&self, token: Address) -> Result<String> {
        Ok(if token == token_a().address {
            token_a().name
        } else {
            token_b().name
        })
    }

    async fn symbol(&self, token: Address) -> Result<String> {
        Ok(if token == token_a().address {
            token_a().symbol
        } else {
            token_b().symbol
        })
    }

    async fn decimals(&self, _token: Address) -> Result<u8> {
        Ok(18)
    }

    async fn total_supply(&self, _token: Address) -> Result<U256> {
        Ok(U256::from(1_000_000u64))
    }

    async fn balance_of(&self, _token: Address, _owner: Address) -> Result<U256> {
        Ok(U256::from(500u64))
    }

    async fn allowance(&self, token: Address, _owner: Address, _spender: Address) -> Result<U256> {
        Ok(self
            .allowances
            .lock()
            .unwrap()
            .get(&token)
            .copied()
            .unwrap_or(U256::ZERO))
    }

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<ConfirmedTx> {
        self.approvals.lock().unwrap().push((token, spender, amount));
        if *self.fail_approve_for.lock().unwrap() == Some(token) {
            bail!("approve reverted");
        }
        self.set_allowance(token, amount);
        Ok(confirmed(B256::repeat_byte(0x01)))
    }
}

#[async_trait]
impl TokenHoldersClient for FakeErc20 {
    async fn holders(&self, _token: Address) -> Result<Vec<Address>> {
        Ok(vec![owner(), Address::repeat_byte(0x55)])
    }
}

#[derive(Default)]
pub struct FakePositionManager {
    /// The broadcast mint reverts.
    pub fail: Mutex<bool>,
    pub hang_submit: Mutex<bool>,
    /// Broadcast succeeds but the receipt never arrives.
    pub hang_confirm: Mutex<bool>,
    /// Fired once the mint is confirmed.
    pub cancel_after_mint: Mutex<Option<CancelHandle>>,
    pub mints: Mutex<Vec<(MintParams, u64)>>,
}

impl FakePositionManager {
    pub fn mint_count(&self) -> usize {
        self.mints.lock().unwrap().len()
    }
}

#[async_trait]
impl PositionManagerClient for FakePositionManager {
    fn address(&self) -> Address {
        position_manager_address()
    }

    async fn submit_mint(&self, params: &MintParams, gas_limit: u64) -> Result<B256> {
        let hang = *self.hang_submit.lock().unwrap();
        if hang {
            std::future::pending::<()>().await;
        }
        self.mints.lock().unwrap().push((params.clone(), gas_limit));
        Ok(mint_hash())
    }

    async fn confirm_mint(&self, tx: B256) -> Result<MintReceipt> {
        let hang = *self.hang_confirm.lock().unwrap();
        if hang {
            std::future::pending::<()>().await;
        }
        if *self.fail.lock().unwrap() {
            bail!("mint transaction {tx} reverted");
        }
        if let Some(handle) = self.cancel_after_mint.lock().unwrap().take() {
            handle.cancel();
        }
        let (params, _) = self
            .mints
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("confirm without submit");
        Ok(MintReceipt {
            tx: confirmed(tx),
            position: Some(MintedPosition {
                token_id: U256::from(4242u64),
                liquidity: 10u128.pow(18),
                amount0: params.amount0_desired,
                amount1: params.amount1_desired,
            }),
        })
    }
}

#[derive(Default)]
pub struct FakeLedger {
    pub fail: Mutex<bool>,
    pub entries: Mutex<Vec<LedgerEntry>>,
    pub records: Mutex<Vec<LiquidityRecord>>,
}

impl FakeLedger {
    pub fn attempts(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl LedgerClient for FakeLedger {
    async fn add_liquidity(&self, entry: &LedgerEntry) -> Result<ConfirmedTx> {
        self.entries.lock().unwrap().push(entry.clone());
        if *self.fail.lock().unwrap() {
            bail!("ledger RPC unavailable");
        }
        Ok(confirmed(ledger_hash()))
    }

    async fn get_all_liquidity(&self, owner: Address) -> Result<Vec<LiquidityRecord>> {
        if *self.fail.lock().unwrap() {
            bail!("ledger RPC unavailable");
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.owner == owner)
            .cloned()
            .collect())
    }
}

pub struct FakeSale {
    pub price: U256,
    pub sold: U256,
    pub buys: Mutex<Vec<(U256, U256)>>,
}

impl Default for FakeSale {
    fn default() -> Self {
        Self {
            // 0.0001 ether
            price: U256::from(100_000_000_000_000u64),
            sold: U256::from(250u64),
            buys: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SaleClient for FakeSale {
    async fn token_price(&self) -> Result<U256> {
        Ok(self.price)
    }

    async fn tokens_sold(&self) -> Result<U256> {
        Ok(self.sold)
    }

    async fn buy_tokens(&self, amount: U256, value: U256) -> Result<ConfirmedTx> {
        self.buys.lock().unwrap().push((amount, value));
        Ok(confirmed(B256::repeat_byte(0x0b)))
    }
}

/// Discovery log whose appends always fail.
pub struct BrokenLog;

#[async_trait]
impl DiscoveryLog for BrokenLog {
    async fn append(&self, _record: &PoolRecord) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("disk full")))
    }

    async fn entries(&self) -> Result<Vec<PoolRecord>, StoreError> {
        Ok(Vec::new())
    }
}

/// All fakes wired together.
#[derive(Default)]
pub struct Harness {
    pub wallet: Arc<FakeWallet>,
    pub factory: Arc<FakeFactory>,
    pub pools: Arc<FakePools>,
    pub erc20: Arc<FakeErc20>,
    pub position_manager: Arc<FakePositionManager>,
    pub ledger: Arc<FakeLedger>,
    pub sale: Arc<FakeSale>,
    pub log: Arc<MemoryDiscoveryLog>,
}

impl Harness {
    pub fn clients(&self) -> ContractClients {
        ContractClients {
            wallet: self.wallet.clone(),
            factory: self.factory.clone(),
            pools: self.pools.clone(),
            erc20: self.erc20.clone(),
            holders: self.erc20.clone(),
            position_manager: self.position_manager.clone(),
            ledger: self.ledger.clone(),
            sale: self.sale.clone(),
        }
    }

    pub fn provisioner(&self) -> LiquidityProvisioner {
        self.provisioner_with(ProvisionConfig::default())
    }

    pub fn provisioner_with(&self, config: ProvisionConfig) -> LiquidityProvisioner {
        LiquidityProvisioner::new(&self.clients(), self.log.clone(), config)
    }

    pub async fn provision(&self, liquidity: &str) -> Result<ProvisionReceipt, ProvisionError> {
        self.provisioner()
            .provision(self.wallet.as_ref(), &request(liquidity), &CancelToken::never())
            .await
    }
}
