use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;
use stockroom_core::db::open_db_in_memory;
use stockroom_core::{InventoryService, SqliteStockRepository, StockRepository};

fn service(conn: &Connection) -> InventoryService<SqliteStockRepository<'_>> {
    InventoryService::new(SqliteStockRepository::new(conn))
}

fn dec(text: &str) -> Decimal {
    Decimal::from_str(text).unwrap()
}

#[test]
fn fresh_database_reports_zero_sales() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(service(&conn).sales_total().unwrap(), Decimal::ZERO);
}

#[test]
fn sub_cent_totals_round_up_never_down() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStockRepository::new(&conn);

    repo.add_to_sales_total(dec("2.344")).unwrap();
    assert_eq!(service(&conn).sales_total().unwrap(), dec("2.35"));
}

#[test]
fn exact_cent_totals_are_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStockRepository::new(&conn);

    repo.add_to_sales_total(dec("7.5")).unwrap();
    assert_eq!(service(&conn).sales_total().unwrap(), dec("7.50"));
}

#[test]
fn accumulation_stays_exact_across_sells() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    // 0.1 + 0.2 must read back as 0.30, not a float-drifted 0.31.
    service.add_stock("gum", Some(2)).unwrap();
    service.sell("gum", Some(1), Some(0.1)).unwrap();
    service.sell("gum", Some(1), Some(0.2)).unwrap();

    assert_eq!(service.sales_total().unwrap(), dec("0.30"));
}

#[test]
fn revenue_is_price_times_amount() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.add_stock("tea", Some(10)).unwrap();
    service.sell("tea", Some(3), Some(2.5)).unwrap();
    assert_eq!(service.sales_total().unwrap(), dec("7.5"));

    service.sell("tea", Some(2), Some(0.333)).unwrap();
    // 7.5 + 0.666 = 8.166, ceiling to cents is 8.17.
    assert_eq!(service.sales_total().unwrap(), dec("8.17"));
}

#[test]
fn stored_total_keeps_full_precision_under_the_rounded_view() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStockRepository::new(&conn);

    repo.add_to_sales_total(dec("0.001")).unwrap();
    repo.add_to_sales_total(dec("0.001")).unwrap();

    // The raw accumulator is exact; only the read-side view rounds up.
    assert_eq!(repo.get_sales_total().unwrap(), dec("0.002"));
    assert_eq!(service(&conn).sales_total().unwrap(), dec("0.01"));
}
