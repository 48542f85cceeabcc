use snowbdd_core::{
    AssertionError, ColumnSpec, ColumnType, Error, QualifiedTableName, Table, TableError, Value,
    assert_table_eq, parse_table, stub_sql_functions,
};

const PEOPLE: &str = "| id: INTEGER | name: STRING | active: BOOLEAN |\n\
                      | 1 | \"tilak\" | true |\n\
                      | 2 | \"t\" | {null} |";

fn people_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("id", ColumnType::Integer),
        ColumnSpec::new("name", ColumnType::String),
        ColumnSpec::new("active", ColumnType::Boolean),
    ]
}

#[test]
fn typed_header_and_rows_decode_to_native_values() {
    let table = parse_table(PEOPLE).expect("parse people");

    assert_eq!(table.columns(), people_columns().as_slice());
    assert_eq!(
        table.rows()[0],
        vec![Value::Integer(1), Value::from("tilak"), Value::Boolean(true)]
    );
}

#[test]
fn null_sentinel_decodes_to_null() {
    let table = parse_table(PEOPLE).expect("parse people");

    assert_eq!(
        table.rows()[1],
        vec![Value::Integer(2), Value::from("t"), Value::Null]
    );
}

#[test]
fn parsing_is_deterministic() {
    let first = parse_table(PEOPLE).expect("first parse");
    let second = parse_table(PEOPLE).expect("second parse");

    assert_eq!(first, second);
}

#[test]
fn permuted_result_set_matches_by_key_column() {
    let actual = Table::new(
        people_columns(),
        vec![
            vec![Value::Integer(2), Value::from("t"), Value::Null],
            vec![Value::Integer(1), Value::from("tilak"), Value::Boolean(true)],
        ],
    )
    .expect("actual table");
    let expected = parse_table(PEOPLE).expect("expected table");

    assert_table_eq(&actual, &expected, &["id"], true).expect("row order is ignored");
}

#[test]
fn two_part_table_name_is_rejected() {
    let error = QualifiedTableName::parse("my_schema.my_table").expect_err("two parts");

    assert!(matches!(
        &error,
        Error::Table(TableError::UnqualifiedTableName { name }) if name == "my_schema.my_table"
    ));
    assert!(error.to_string().contains("fully qualified"));
}

#[test]
fn header_fragment_without_type_is_malformed() {
    let error = parse_table("| id: INTEGER | badcolumn |\n| 1 | 2 |").expect_err("no colon");

    assert!(matches!(
        &error,
        Error::Table(TableError::MalformedHeader { fragment }) if fragment == "badcolumn"
    ));
    assert!(error.to_string().contains("badcolumn"));
}

#[test]
fn stubbed_script_compares_against_fixed_timestamp() {
    let sql = stub_sql_functions("select current_timestamp() a", Some("2022-01-05 04:12:17"), None);
    assert_eq!(sql, "select CAST ('2022-01-05 04:12:17' AS TIMESTAMP) a");

    assert_eq!(stub_sql_functions(PEOPLE, None, None), PEOPLE);
}

#[test]
fn value_difference_reports_first_sorted_row() {
    let actual = parse_table(
        "| id: INTEGER | name: STRING |\n\
         | 2 | \"b\" |\n\
         | 1 | \"a\" |",
    )
    .expect("actual");
    let expected = parse_table(
        "| id: INTEGER | name: STRING |\n\
         | 1 | \"a\" |\n\
         | 2 | \"x\" |",
    )
    .expect("expected");

    let error = assert_table_eq(&actual, &expected, &["id"], true).expect_err("differs");

    assert!(matches!(
        error,
        Error::Assertion(AssertionError::ValueMismatch { row: 1, ref column, .. }) if column == "name"
    ));
}
