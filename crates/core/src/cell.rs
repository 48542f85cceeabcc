use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::{ColumnSpec, ColumnType, DecodeError, Result, Value};

pub const NULL_SENTINEL: &str = "{null}";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Decodes one raw table cell for `column`.
///
/// `{null}` is the only spelling of null. A `"..."` cell loses one layer of
/// quotes and is decoded as literal text, so `"{null}"` in a string column is
/// the string `{null}`. Both `""` and a lone `"` are the empty string.
pub fn decode_cell(raw: &str, column: &ColumnSpec) -> Result<Value> {
    let trimmed = raw.trim();
    if trimmed == NULL_SENTINEL {
        return Ok(Value::Null);
    }

    parse_literal(strip_quotes(trimmed).unwrap_or(trimmed), column)
}

/// Applies the column type's native constructor to already unquoted text.
pub fn parse_literal(text: &str, column: &ColumnSpec) -> Result<Value> {
    decode_literal(text, column.column_type).map_err(|reason| {
        DecodeError::Cell {
            column: column.name.clone(),
            raw: text.to_string(),
            column_type: column.column_type,
            reason,
        }
        .into()
    })
}

// A lone `"` both opens and closes the quote, leaving the empty string.
fn strip_quotes(cell: &str) -> Option<&str> {
    if cell == "\"" {
        return Some("");
    }
    cell.strip_prefix('"')?.strip_suffix('"')
}

fn decode_literal(text: &str, column_type: ColumnType) -> std::result::Result<Value, String> {
    match column_type {
        ColumnType::Integer => text
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|error| error.to_string()),
        ColumnType::BigInt => text
            .parse::<i128>()
            .map(Value::BigInt)
            .map_err(|error| error.to_string()),
        ColumnType::Decimal => text
            .parse::<Decimal>()
            .map(Value::Decimal)
            .map_err(|error| error.to_string()),
        ColumnType::Float | ColumnType::Double => text
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|error| error.to_string()),
        ColumnType::Boolean => parse_bool(text).map(Value::Boolean),
        ColumnType::String | ColumnType::Char => Ok(Value::String(text.to_string())),
        ColumnType::Binary => Ok(Value::Binary(text.as_bytes().to_vec())),
        ColumnType::Date => parse_date(text).map(Value::Date),
        ColumnType::Time => parse_time(text).map(Value::Time),
        ColumnType::DateTime | ColumnType::Timestamp => parse_datetime(text).map(Value::DateTime),
    }
}

// `1`/`0` are rejected on purpose; only the words are boolean literals.
fn parse_bool(text: &str) -> std::result::Result<bool, String> {
    if text.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if text.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err("expected `true` or `false`".to_string())
    }
}

fn parse_date(text: &str) -> std::result::Result<NaiveDate, String> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .ok_or_else(|| "expected a date like YYYY-MM-DD".to_string())
}

fn parse_time(text: &str) -> std::result::Result<NaiveTime, String> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
        .ok_or_else(|| "expected a time like HH:MM:SS".to_string())
}

/// Accepts the spellings scenario authors reach for: space or `T` separated,
/// optional seconds and fractions, slash dates, RFC 3339 offsets (folded to
/// UTC) and a bare date meaning midnight.
pub fn parse_datetime(text: &str) -> std::result::Result<NaiveDateTime, String> {
    if let Some(datetime) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Ok(datetime);
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Ok(datetime.naive_utc());
    }

    parse_date(text)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| "expected a timestamp like YYYY-MM-DD HH:MM:SS".to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::{decode_cell, parse_datetime};
    use crate::{ColumnSpec, ColumnType, DecodeError, Error, Value};

    fn column(column_type: ColumnType) -> ColumnSpec {
        ColumnSpec::new("col", column_type)
    }

    #[test]
    fn null_sentinel_wins_for_every_type_and_ignores_padding() {
        for column_type in [
            ColumnType::Integer,
            ColumnType::Boolean,
            ColumnType::String,
            ColumnType::Binary,
            ColumnType::Timestamp,
        ] {
            assert_eq!(
                decode_cell("   {null} ", &column(column_type)).expect("null decodes"),
                Value::Null,
                "{column_type}"
            );
        }
    }

    #[test]
    fn quoted_cells_are_literal_text() {
        let string = column(ColumnType::String);
        assert_eq!(
            decode_cell("\"tilak\"", &string).expect("quoted"),
            Value::from("tilak")
        );
        assert_eq!(decode_cell("\"\"", &string).expect("empty"), Value::from(""));
        assert_eq!(
            decode_cell("\"{null}\"", &string).expect("quoted sentinel"),
            Value::from("{null}")
        );
        assert_eq!(
            decode_cell("\" padded \"", &string).expect("inner spaces"),
            Value::from(" padded ")
        );
        assert_eq!(
            decode_cell("\"", &string).expect("lone quote"),
            Value::from("")
        );
    }

    #[test]
    fn bare_empty_string_is_not_null() {
        assert_eq!(
            decode_cell("   ", &column(ColumnType::Char)).expect("empty"),
            Value::from("")
        );
    }

    #[test]
    fn booleans_accept_words_only() {
        let boolean = column(ColumnType::Boolean);
        assert_eq!(decode_cell("TRUE", &boolean).expect("upper"), Value::Boolean(true));
        assert_eq!(decode_cell("false", &boolean).expect("lower"), Value::Boolean(false));
        assert_eq!(
            decode_cell("\"True\"", &boolean).expect("quoted"),
            Value::Boolean(true)
        );

        for rejected in ["1", "0", "yes", ""] {
            assert!(decode_cell(rejected, &boolean).is_err(), "{rejected:?}");
        }
    }

    #[test]
    fn numeric_cells_use_native_parsers() {
        assert_eq!(
            decode_cell(" 42 ", &column(ColumnType::Integer)).expect("int"),
            Value::Integer(42)
        );
        assert_eq!(
            decode_cell("170141183460469231731687303715884105727", &column(ColumnType::BigInt))
                .expect("bigint"),
            Value::BigInt(i128::MAX)
        );
        assert_eq!(
            decode_cell("2.5", &column(ColumnType::Double)).expect("double"),
            Value::Float(2.5)
        );
        assert_eq!(
            decode_cell("10.20", &column(ColumnType::Decimal)).expect("decimal"),
            Value::Decimal("10.20".parse().expect("decimal literal"))
        );
    }

    #[test]
    fn binary_cells_keep_utf8_bytes() {
        assert_eq!(
            decode_cell("abc", &column(ColumnType::Binary)).expect("binary"),
            Value::Binary(b"abc".to_vec())
        );
    }

    #[test]
    fn temporal_cells_decode_to_their_own_kinds() {
        let date = NaiveDate::from_ymd_opt(2022, 1, 5).expect("date");
        assert_eq!(
            decode_cell("2022-01-05", &column(ColumnType::Date)).expect("date"),
            Value::Date(date)
        );
        assert_eq!(
            decode_cell("04:12:17", &column(ColumnType::Time)).expect("time"),
            Value::Time(NaiveTime::from_hms_opt(4, 12, 17).expect("time"))
        );
        assert_eq!(
            decode_cell("2022-01-05 04:12:17", &column(ColumnType::Timestamp)).expect("ts"),
            Value::DateTime(date.and_hms_opt(4, 12, 17).expect("datetime"))
        );
    }

    #[test]
    fn datetime_parser_is_permissive() {
        let expected = NaiveDate::from_ymd_opt(2022, 1, 5)
            .and_then(|date| date.and_hms_opt(4, 12, 0))
            .expect("datetime");

        for text in [
            "2022-01-05 04:12",
            "2022-01-05T04:12:00",
            "2022/01/05 04:12:00",
            "2022-01-05T06:12:00+02:00",
        ] {
            assert_eq!(parse_datetime(text), Ok(expected), "{text}");
        }

        assert_eq!(
            parse_datetime("2022-01-05"),
            Ok(expected.date().and_hms_opt(0, 0, 0).expect("midnight"))
        );
    }

    #[test]
    fn decode_failure_reports_column_raw_text_and_type() {
        let error = decode_cell(" abc ", &ColumnSpec::new("id", ColumnType::Integer))
            .expect_err("non-numeric integer");

        match error {
            Error::Decode(DecodeError::Cell {
                column,
                raw,
                column_type,
                ..
            }) => {
                assert_eq!(column, "id");
                assert_eq!(raw, "abc");
                assert_eq!(column_type, ColumnType::Integer);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
