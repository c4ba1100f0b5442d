use rusqlite::Connection;
use stockroom_core::db::migrations::latest_version;
use stockroom_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "stocks");
    assert_table_exists(&conn, "sales_total");
    assert_table_exists(&conn, "event_log");
}

#[test]
fn initialization_creates_exactly_one_zero_sales_row() {
    let conn = open_db_in_memory().unwrap();

    let (count, total): (i64, String) = conn
        .query_row(
            "SELECT COUNT(*), MAX(total) FROM sales_total;",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();

    assert_eq!(count, 1);
    assert_eq!(total, "0");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stockroom.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "stocks");

    // Reopening must not duplicate the singleton sales row.
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM sales_total;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn schema_enforces_non_negative_amounts() {
    let conn = open_db_in_memory().unwrap();

    let result = conn.execute(
        "INSERT INTO stocks (name, amount) VALUES ('aaa', -1);",
        [],
    );
    assert!(result.is_err(), "negative stock must violate the CHECK");

    let result = conn.execute("UPDATE sales_total SET total = '-1' WHERE id = 1;", []);
    assert!(result.is_err(), "negative total must violate the CHECK");
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
