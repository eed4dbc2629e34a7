//! Terminal formatting.

use alloy_primitives::U256;
use chrono::DateTime;
use lpdapp_domain::entities::{LiquidityRecord, PoolRecord};
use lpdapp_domain::value_objects::Amount;
use prettytable::{Table, row};

/// Formats wei as ether.
#[must_use]
pub fn ether(wei: U256) -> String {
    format!("{} ETH", Amount::new(wei, 18))
}

/// Formats Unix seconds as UTC, falling back to the raw number.
#[must_use]
pub fn timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|time| time.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| secs.to_string())
}

#[must_use]
pub fn history_table(records: &[LiquidityRecord]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["ID", "Pair", "Pool", "Network", "Created", "Transaction"]);
    for record in records {
        table.add_row(row![
            record.id,
            record.pair_label(),
            record.pool_address,
            record.network,
            timestamp(record.time_created),
            record.transaction_hash
        ]);
    }
    table
}

#[must_use]
pub fn discoveries_table(records: &[PoolRecord]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["#", "Pair", "Fee", "Chain", "Pool"]);
    for (index, record) in records.iter().enumerate() {
        table.add_row(row![
            index + 1,
            format!("{}/{}", record.token_a.symbol, record.token_b.symbol),
            record.fee,
            record.chain_id,
            record.pool_address
        ]);
    }
    table
}
