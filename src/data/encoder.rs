// ============================================================
// Layer 4 — Categorical Encoder
// ============================================================
// Replaces the raw values of each table-covered field with
// the table's code. A cell is looked up by the text it was
// read from, so numeric-looking categories ("1", "01") can be
// encoded too, and errors quote the file's own spelling.
//
// Missing cells pass through untouched; drop_incomplete is
// the only place that deals with them.

use std::collections::HashMap;

use crate::domain::dataset::Dataset;
use crate::domain::encoding::{Code, EncodingTable, EncodingTables};
use crate::domain::error::{PrepareError, PrepareResult};
use crate::domain::value::{Record, Value};

/// Encode every field named in `tables`.
pub fn encode_categorical(dataset: &Dataset, tables: &EncodingTables) -> PrepareResult<Dataset> {
    let columns = resolve_columns(dataset, tables)?;

    let records = dataset
        .records()
        .iter()
        .map(|record| -> PrepareResult<Record> {
            let mut values = record.values().to_vec();
            for (col, field, table) in &columns {
                values[*col] = encode_cell(&values[*col], field, table)?;
            }
            Ok(record.with_values(values))
        })
        .collect::<PrepareResult<Vec<_>>>()?;

    tracing::debug!("Encoded {} categorical fields", columns.len());
    Ok(Dataset::new(dataset.fields().to_vec(), records))
}

/// Map codes back to raw strings. Every table must be injective.
pub fn decode_categorical(dataset: &Dataset, tables: &EncodingTables) -> PrepareResult<Dataset> {
    let columns = resolve_columns(dataset, tables)?;

    let inverses: Vec<HashMap<Code, String>> = columns
        .iter()
        .map(|(_, field, table)| {
            table.inverse().ok_or_else(|| PrepareError::NonInjectiveTable {
                field: field.to_string(),
            })
        })
        .collect::<PrepareResult<_>>()?;

    let records = dataset
        .records()
        .iter()
        .map(|record| -> PrepareResult<Record> {
            let mut values = record.values().to_vec();
            for ((col, field, _), inverse) in columns.iter().zip(&inverses) {
                values[*col] = decode_cell(&values[*col], field, inverse)?;
            }
            Ok(record.with_values(values))
        })
        .collect::<PrepareResult<Vec<_>>>()?;

    Ok(Dataset::new(dataset.fields().to_vec(), records))
}

/// (column index, field name, table) for every table, schema checked up front.
fn resolve_columns<'a>(
    dataset: &Dataset,
    tables:  &'a EncodingTables,
) -> PrepareResult<Vec<(usize, &'a str, &'a EncodingTable)>> {
    tables
        .iter()
        .map(|(field, table)| {
            dataset
                .field_index(field)
                .map(|col| (col, field.as_str(), table))
        })
        .collect()
}

fn encode_cell(value: &Value, field: &str, table: &EncodingTable) -> PrepareResult<Value> {
    if value.is_missing() {
        return Ok(Value::Missing);
    }
    let raw = value.to_string();
    table
        .encode(&raw)
        .map(Value::from)
        .ok_or_else(|| PrepareError::UnmappedValue { field: field.to_string(), value: raw })
}

fn decode_cell(value: &Value, field: &str, inverse: &HashMap<Code, String>) -> PrepareResult<Value> {
    let code = match value {
        Value::Missing => return Ok(Value::Missing),
        Value::Bool(b) => Code::Bool(*b),
        Value::Int(i)  => Code::Int(*i),
        other => {
            return Err(PrepareError::UnmappedValue {
                field: field.to_string(),
                value: other.to_string(),
            })
        }
    };
    inverse
        .get(&code)
        .map(|raw| Value::parse(raw))
        .ok_or_else(|| PrepareError::UnmappedValue {
            field: field.to_string(),
            value: value.to_string(),
        })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn sex_column(raw: &[&str]) -> Dataset {
        Dataset::new(
            vec!["sex".into(), "age".into()],
            raw.iter()
                .map(|s| Record::new(vec![Value::parse(s), Value::number(16.0)]))
                .collect(),
        )
    }

    fn sex_tables() -> EncodingTables {
        let mut tables = EncodingTables::new();
        tables.insert("sex".into(), EncodingTable::boolean("F", "M"));
        tables
    }

    #[test]
    fn test_f_encodes_to_false() {
        let out = encode_categorical(&sex_column(&["F"]), &sex_tables()).unwrap();
        assert_eq!(out.value(0, "sex"), Some(&Value::Bool(false)));
        assert_eq!(out.value(0, "age"), Some(&Value::number(16.0)));
    }

    #[test]
    fn test_unmapped_value_names_field_and_value() {
        let err = encode_categorical(&sex_column(&["F", "X"]), &sex_tables()).unwrap_err();
        match err {
            PrepareError::UnmappedValue { field, value } => {
                assert_eq!(field, "sex");
                assert_eq!(value, "X");
            }
            other => panic!("expected UnmappedValue, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_passes_through() {
        let out = encode_categorical(&sex_column(&["M", ""]), &sex_tables()).unwrap();
        assert_eq!(out.value(0, "sex"), Some(&Value::Bool(true)));
        assert_eq!(out.value(1, "sex"), Some(&Value::Missing));
    }

    #[test]
    fn test_table_for_unknown_field() {
        let mut tables = sex_tables();
        tables.insert("romantic".into(), EncodingTable::yes_no());
        let err = encode_categorical(&sex_column(&["F"]), &tables).unwrap_err();
        assert!(matches!(err, PrepareError::UnknownField { ref field, .. } if field == "romantic"));
    }

    #[test]
    fn test_integer_codes() {
        let ds = Dataset::new(
            vec!["school".into()],
            vec![
                Record::new(vec![Value::Text("MS".into())]),
                Record::new(vec![Value::Text("GP".into())]),
            ],
        );
        let mut tables = EncodingTables::new();
        tables.insert(
            "school".into(),
            EncodingTable::from_pairs([("GP", Code::Int(0)), ("MS", Code::Int(1))]),
        );
        let out = encode_categorical(&ds, &tables).unwrap();
        assert_eq!(out.value(0, "school"), Some(&Value::Int(1)));
        assert_eq!(out.value(1, "school"), Some(&Value::Int(0)));
    }

    #[test]
    fn test_zero_padded_codes_use_file_text() {
        use crate::data::loader::parse_delimited;

        let ds = parse_delimited(b"level,G3\n01,10\n02,12\n", b',').unwrap();
        let mut tables = EncodingTables::new();
        tables.insert(
            "level".into(),
            EncodingTable::from_pairs([("01", Code::Int(1)), ("02", Code::Int(2))]),
        );
        let out = encode_categorical(&ds, &tables).unwrap();
        assert_eq!(out.value(0, "level"), Some(&Value::Int(1)));
        assert_eq!(out.value(1, "level"), Some(&Value::Int(2)));

        // "1" is not "01": the error names the cell as written
        let mut strict = EncodingTables::new();
        strict.insert("level".into(), EncodingTable::from_pairs([("1", Code::Int(1))]));
        let err = encode_categorical(&ds, &strict).unwrap_err();
        assert!(matches!(err, PrepareError::UnmappedValue { ref value, .. } if value == "01"));
    }

    #[test]
    fn test_round_trip_through_inverse() {
        let original = sex_column(&["F", "M", "M", "F"]);
        let encoded  = encode_categorical(&original, &sex_tables()).unwrap();
        let decoded  = decode_categorical(&encoded, &sex_tables()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_rejects_non_injective_table() {
        let mut tables = EncodingTables::new();
        tables.insert(
            "sex".into(),
            EncodingTable::from_pairs([("F", Code::Bool(false)), ("f", Code::Bool(false))]),
        );
        let encoded = encode_categorical(&sex_column(&["F"]), &tables).unwrap();
        let err = decode_categorical(&encoded, &tables).unwrap_err();
        assert!(matches!(err, PrepareError::NonInjectiveTable { ref field } if field == "sex"));
    }

    #[test]
    fn test_double_encoding_is_an_error() {
        let once = encode_categorical(&sex_column(&["F"]), &sex_tables()).unwrap();
        let err  = encode_categorical(&once, &sex_tables()).unwrap_err();
        assert!(matches!(err, PrepareError::UnmappedValue { ref value, .. } if value == "false"));
    }
}
