use std::fs;

use datasight_ingest::{CellValue, read_csv_reader, read_csv_table, table_from_dataframe};

#[test]
fn reads_table_from_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("sales.csv");
    fs::write(&path, "region,revenue,notes\nnorth,10,\nsouth,NA,late\n").expect("write file");

    let table = read_csv_table(&path).expect("read csv");
    assert_eq!(table.column_names(), vec!["region", "revenue", "notes"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.source_id.as_deref(), Some(path.display().to_string().as_str()));

    let revenue = table.column("revenue").expect("revenue");
    assert_eq!(revenue.cells[0], CellValue::Text("10".to_string()));
    assert_eq!(revenue.cells[1], CellValue::Missing);
    assert_eq!(table.column("notes").expect("notes").missing_count(), 1);
}

#[test]
fn skips_preamble_and_blank_lines() {
    let contents = "Monthly report\n\nmonth,units\n2024-01,5\n2024-02,7\n";
    let table = read_csv_reader(contents.as_bytes()).expect("read csv");
    assert_eq!(table.column_names(), vec!["month", "units"]);
    assert_eq!(table.row_count(), 2);
}

#[test]
fn ragged_records_are_padded() {
    let contents = "a,b,c\n1,2\n3,4,5,6\n";
    let table = read_csv_reader(contents.as_bytes()).expect("read csv");
    assert_eq!(table.column_count(), 3);
    assert_eq!(table.column("c").expect("c").cells[0], CellValue::Missing);
    assert_eq!(
        table.column("c").expect("c").cells[1],
        CellValue::Text("5".to_string())
    );
}

#[test]
fn repeated_headers_never_collide_with_existing_names() {
    let contents = "a,a,a_2\n1,2,3\n4,5,6\n";
    let table = read_csv_reader(contents.as_bytes()).expect("read csv");
    assert_eq!(table.column_names(), vec!["a", "a_2", "a_2_2"]);
    assert_eq!(
        table.column("a_2_2").expect("a_2_2").cells[1],
        CellValue::Text("6".to_string())
    );
}

#[test]
fn empty_input_yields_empty_table() {
    let table = read_csv_reader("".as_bytes()).expect("read csv");
    assert_eq!(table.column_count(), 0);
    assert!(table.ensure_analyzable().is_err());
}

#[test]
fn missing_file_is_reported_with_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = read_csv_table(&dir.path().join("absent.csv")).expect_err("missing file");
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn converts_dataframe_columns() {
    let frame = polars::df!(
        "price" => [Some(1.5), None, Some(3.0)],
        "label" => ["a", "b", "c"],
        "flag" => [true, false, true]
    )
    .expect("frame");
    let table = table_from_dataframe(&frame).expect("table");
    assert_eq!(table.column_names(), vec!["price", "label", "flag"]);
    let price = table.column("price").expect("price");
    assert_eq!(price.cells[0], CellValue::Text("1.5".to_string()));
    assert_eq!(price.cells[1], CellValue::Missing);
    assert_eq!(price.cells[2], CellValue::Text("3".to_string()));
    assert_eq!(
        table.column("flag").expect("flag").cells[1],
        CellValue::Text("false".to_string())
    );
}
