use rusqlite::Connection;
use stockroom_core::db::open_db_in_memory;
use stockroom_core::{export, ExportKind, InventoryService, SqliteStockRepository};

fn service(conn: &Connection) -> InventoryService<SqliteStockRepository<'_>> {
    InventoryService::new(SqliteStockRepository::new(conn))
}

#[test]
fn export_kind_parses_known_segments_and_rejects_others() {
    assert_eq!(ExportKind::parse("stocks"), Some(ExportKind::Stocks));
    assert_eq!(ExportKind::parse("sales"), Some(ExportKind::Sales));
    assert_eq!(ExportKind::parse("logs"), Some(ExportKind::Logs));
    assert_eq!(ExportKind::parse("prices"), None);
    assert_eq!(ExportKind::parse("Stocks"), None);
}

#[test]
fn stocks_csv_lists_sorted_levels() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.add_stock("bbb", Some(2)).unwrap();
    service.add_stock("aaa", Some(5)).unwrap();

    let csv = export::stocks_csv(&service.stock_levels().unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines, vec!["name,amount", "aaa,5", "bbb,2"]);
}

#[test]
fn stocks_csv_of_empty_inventory_is_header_only() {
    let conn = open_db_in_memory().unwrap();
    let csv = export::stocks_csv(&service(&conn).stock_levels().unwrap()).unwrap();
    assert_eq!(csv.lines().collect::<Vec<_>>(), vec!["name,amount"]);
}

#[test]
fn sales_csv_renders_two_decimal_places() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.add_stock("mug", Some(4)).unwrap();
    service.sell("mug", Some(3), Some(2.5)).unwrap();

    let csv = export::sales_csv(service.sales_total().unwrap()).unwrap();
    assert_eq!(csv.lines().collect::<Vec<_>>(), vec!["sales", "7.50"]);
}

#[test]
fn logs_csv_is_most_recent_first() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.add_stock("jar", Some(4)).unwrap();
    service.sell("jar", Some(1), None).unwrap();

    let csv = export::logs_csv(&service.logs().unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "id,name,action,amount,created_at_ms");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("2,jar,sale,1,"));
    assert!(lines[2].starts_with("1,jar,add,4,"));
}

#[test]
fn export_file_names_match_kinds() {
    assert_eq!(ExportKind::Stocks.file_name(), "stocks.csv");
    assert_eq!(ExportKind::Sales.file_name(), "sales.csv");
    assert_eq!(ExportKind::Logs.file_name(), "logs.csv");
}
