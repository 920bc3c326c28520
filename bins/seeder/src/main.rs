//! Demo books seeder for Bahi development and testing.
//!
//! Replaces the configured JSON snapshot with a business profile, a small
//! chart of accounts, the Acme Traders vouchers and two stock items.
//!
//! Usage: cargo run --bin seeder [-- <snapshot path>]

use std::path::PathBuf;

use bahi_core::chart::AccountGroup;
use bahi_core::engine::{Books, BusinessProfile};
use bahi_core::inventory::InventoryItem;
use bahi_core::ledger::{Ledger, PortalCredentials};
use bahi_core::voucher::{Voucher, VoucherLine, VoucherType};
use bahi_shared::AppConfig;
use bahi_shared::config::StoreConfig;
use bahi_shared::types::{BalanceSide, GodownId};
use bahi_store::{DocumentStore, JsonFileStore};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Snapshot path used when neither an argument nor config names one.
const DEFAULT_SNAPSHOT: &str = "data/books.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or(config.store.snapshot_path)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT));

    println!("Seeding demo books into {}...", path.display());
    let store = JsonFileStore::open(&StoreConfig {
        snapshot_path: Some(path),
        persist_on_write: false,
    })
    .await?;

    let existing = store.snapshot().await?;
    if !existing.ledgers.is_empty() || !existing.vouchers.is_empty() {
        println!(
            "Replacing {} ledgers and {} vouchers already in the snapshot",
            existing.ledgers.len(),
            existing.vouchers.len()
        );
    }

    let books = demo_books()?;
    println!(
        "  {} ledgers, {} vouchers, {} items",
        books.ledgers.len(),
        books.vouchers.len(),
        books.items.len()
    );
    store.replace(books).await?;
    store.flush().await?;

    println!("Seeding complete!");
    Ok(())
}

fn date(month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(2025, month, day)
        .ok_or_else(|| anyhow::anyhow!("invalid demo date 2025-{month:02}-{day:02}"))
}

fn rupees(amount: i64) -> Decimal {
    Decimal::from(amount)
}

fn demo_books() -> anyhow::Result<Books> {
    let capital = Ledger::new("CP001", "Proprietor's Capital", AccountGroup::CapitalAccount)
        .with_opening(rupees(200_000), BalanceSide::Cr);
    let cash = Ledger::new("CA001", "Cash", AccountGroup::CashInHand)
        .with_opening(rupees(50_000), BalanceSide::Dr);
    let bank = Ledger::new("BK001", "State Bank Current A/c", AccountGroup::BankAccounts)
        .with_opening(rupees(150_000), BalanceSide::Dr);
    let sales = Ledger::new("IN001", "Sales", AccountGroup::SalesAccounts);
    let purchases = Ledger::new("EX001", "Purchases", AccountGroup::PurchaseAccounts);
    let rent = Ledger::new("EX002", "Shop Rent", AccountGroup::IndirectExpenses);

    let mut acme = Ledger::new("DR001", "Acme Traders", AccountGroup::SundryDebtors);
    acme.gstin = Some("27AAACA1234A1Z5".into());
    acme.portal_credentials = Some(PortalCredentials {
        username: "acme".into(),
        access_code: "ACME-2025".into(),
    });
    let globex = Ledger::new("CR001", "Globex Supplies", AccountGroup::SundryCreditors);

    let godown = GodownId::new();
    let widget = InventoryItem::new("Widget", "pcs", rupees(120)).with_stock(godown, rupees(80));
    let gadget = InventoryItem::new("Gadget", "pcs", rupees(450)).with_stock(godown, rupees(15));

    let vouchers = vec![
        Voucher::new(
            VoucherType::Purchase,
            date(4, 3)?,
            globex.id,
            vec![VoucherLine::inventory(widget.id, rupees(100), rupees(120))],
        )
        .with_reference("PUR-001"),
        Voucher::new(
            VoucherType::Sales,
            date(4, 5)?,
            acme.id,
            vec![VoucherLine::ledger(sales.id, rupees(5_000))],
        )
        .with_reference("INV-001")
        .with_narration("Consulting services"),
        Voucher::new(
            VoucherType::Receipt,
            date(4, 15)?,
            acme.id,
            vec![VoucherLine::ledger(cash.id, rupees(3_000))],
        )
        .with_reference("RCT-001"),
        Voucher::new(
            VoucherType::Sales,
            date(4, 20)?,
            acme.id,
            vec![VoucherLine::inventory(widget.id, rupees(20), rupees(180))],
        )
        .with_reference("INV-002"),
        Voucher::new(
            VoucherType::Payment,
            date(5, 1)?,
            rent.id,
            vec![VoucherLine::ledger(bank.id, rupees(15_000))],
        )
        .with_reference("PAY-001")
        .with_narration("April rent"),
        Voucher::new(
            VoucherType::Contra,
            date(5, 2)?,
            cash.id,
            vec![VoucherLine::ledger(bank.id, rupees(20_000))],
        )
        .with_narration("Cash deposited"),
        Voucher::new(
            VoucherType::Purchase,
            date(5, 10)?,
            globex.id,
            vec![VoucherLine::ledger(purchases.id, rupees(9_000))],
        )
        .with_reference("PUR-002"),
    ];

    Ok(Books {
        profile: BusinessProfile {
            company_name: "Bahi Demo Traders".into(),
            address: "12 Market Road, Pune".into(),
            state: "Maharashtra".into(),
            gstin: "27AAAFB1234C1Z9".into(),
            phone: "+91 20 5555 0100".into(),
            email: "accounts@bahi.example".into(),
        },
        ledgers: vec![capital, cash, bank, sales, purchases, rent, acme, globex],
        vouchers,
        items: vec![widget, gadget],
    })
}
