#[path = "support/recording_adapter.rs"]
mod recording_adapter;

use recording_adapter::RecordingAdapter;
use snowbdd_core::{
    ColumnSpec, ColumnType, Error, ExecutionError, QualifiedTableName, WarehouseAdapter,
    parse_table,
};

#[test]
fn default_methods_render_use_create_and_insert() {
    let mut adapter = RecordingAdapter::new();
    let name = QualifiedTableName::parse("my_db.my_schema.people").expect("qualified name");
    let table = parse_table(
        "| id: INTEGER | name: STRING | active: BOOLEAN |\n\
         | 1 | \"tilak\" | true |\n\
         | 2 | \"o'brien\" | {null} |",
    )
    .expect("parse table");

    adapter.use_database(&name.database).expect("use database");
    adapter
        .create_table(&name, table.columns(), false)
        .expect("create table");
    adapter
        .insert_rows(&name, &table, false)
        .expect("insert rows");

    assert_eq!(
        adapter.executed_sql(),
        &[
            r#"USE DATABASE "my_db""#.to_string(),
            r#"CREATE TABLE "my_schema"."people" ("id" INTEGER, "name" VARCHAR, "active" BOOLEAN)"#
                .to_string(),
            r#"INSERT INTO "my_schema"."people" ("id", "name", "active") VALUES (1, 'tilak', TRUE), (2, 'o''brien', NULL)"#
                .to_string(),
        ]
    );
}

#[test]
fn temporary_create_uses_temporary_keyword() {
    let mut adapter = RecordingAdapter::new();
    let name = QualifiedTableName::parse("db.s.t").expect("qualified name");

    adapter
        .create_table(&name, &[ColumnSpec::new("d", ColumnType::Date)], true)
        .expect("create table");

    assert_eq!(
        adapter.executed_sql(),
        &[r#"CREATE TEMPORARY TABLE "s"."t" ("d" DATE)"#.to_string()]
    );
}

#[test]
fn empty_table_issues_no_insert() {
    let mut adapter = RecordingAdapter::new();
    let name = QualifiedTableName::parse("db.s.t").expect("qualified name");
    let table = parse_table("| id: INTEGER |").expect("header only");

    adapter
        .insert_rows(&name, &table, false)
        .expect("nothing to insert");

    assert!(adapter.executed_sql().is_empty());
}

#[test]
fn execution_failure_carries_the_statement() {
    let mut adapter = RecordingAdapter::new().failing_on("USE DATABASE");

    let error = adapter.use_database("db").expect_err("injected failure");

    match error {
        Error::Execute(ExecutionError::StatementFailed { sql, source }) => {
            assert_eq!(sql, r#"USE DATABASE "db""#);
            assert_eq!(source.to_string(), "injected failure");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
