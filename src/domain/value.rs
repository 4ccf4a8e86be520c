// ============================================================
// Layer 3 — Value and Record
// ============================================================
// A Value is one cell of the student table. Raw CSV cells
// are classified once at load time:
//
//   "", "NA", "NaN", "NULL", "N/A", ...  → Value::Missing
//   "16", "4.5", "01"                    → Value::Number
//   "GP", "yes"                          → Value::Text
//
// The missing-value tokens are the ones pandas' read_csv
// treats as NA by default, plus "na" in any letter case.
//
// Numbers keep the trimmed text they were parsed from, so a
// zero-padded category such as "01" is still encoded and
// reported as "01". Encoding turns cells into Bool or Int
// codes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::encoding::Code;

/// Cell texts read as missing, matched after trimming.
pub const MISSING_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single scalar cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Missing,
    Text(String),
    /// `raw` is the trimmed CSV text the number was read from
    Number { value: f64, raw: String },
    Bool(bool),
    Int(i64),
}

impl Value {
    /// Classify a raw CSV cell.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if MISSING_TOKENS.contains(&trimmed) || trimmed.eq_ignore_ascii_case("na") {
            return Value::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Value::Number { value, raw: trimmed.to_string() },
            _ => Value::Text(trimmed.to_string()),
        }
    }

    /// A number with its shortest text form, for values that were
    /// not read from a file.
    pub fn number(value: f64) -> Self {
        Value::Number { value, raw: value.to_string() }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric view used when building the feature matrix.
    /// Booleans become 0/1; text and missing cells have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number { value, .. } => Some(*value),
            Value::Int(i)    => Some(*i as f64),
            Value::Bool(b)   => Some(if *b { 1.0 } else { 0.0 }),
            Value::Missing | Value::Text(_) => None,
        }
    }
}

impl From<Code> for Value {
    fn from(code: Code) -> Self {
        match code {
            Code::Bool(b) => Value::Bool(b),
            Code::Int(i)  => Value::Int(i),
        }
    }
}

/// Renders the cell the way it would appear in a CSV file.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing               => Ok(()),
            Value::Text(s)               => f.write_str(s),
            Value::Number { raw, .. }    => f.write_str(raw),
            Value::Bool(b)               => write!(f, "{b}"),
            Value::Int(i)                => write!(f, "{i}"),
        }
    }
}

/// One student's observation. Values are positional and line
/// up with the owning Dataset's field list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    values: Vec<Value>,
    /// 1-based line in the source file, when read from one
    line:   Option<u64>,
}

impl Record {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values, line: None }
    }

    /// A record read from `line` of a delimited file.
    pub fn at_line(values: Vec<Value>, line: u64) -> Self {
        Self { values, line: Some(line) }
    }

    /// Same source line, new values. Every stage that rebuilds a
    /// record goes through here so errors can still point at
    /// the input file.
    pub fn with_values(&self, values: Vec<Value>) -> Self {
        Self { values, line: self.line }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn line(&self) -> Option<u64> {
        self.line
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True if any cell is Value::Missing
    pub fn has_missing(&self) -> bool {
        self.values.iter().any(Value::is_missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classifies_cells() {
        assert_eq!(Value::parse(""), Value::Missing);
        assert_eq!(Value::parse("  NA "), Value::Missing);
        assert_eq!(Value::parse("na"), Value::Missing);
        assert_eq!(Value::parse("16"), Value::number(16.0));
        assert_eq!(Value::parse(" 4.5"), Value::number(4.5));
        assert_eq!(Value::parse("GP"), Value::Text("GP".to_string()));
    }

    #[test]
    fn test_pandas_missing_tokens() {
        for token in ["NaN", "nan", "-NaN", "N/A", "n/a", "NULL", "null", "#N/A", "None", "<NA>", " NaN "] {
            assert_eq!(Value::parse(token), Value::Missing, "token {token:?}");
        }
        // "none" in lower case is not an NA token
        assert_eq!(Value::parse("none"), Value::Text("none".to_string()));
    }

    #[test]
    fn test_infinite_numbers_stay_text() {
        assert_eq!(Value::parse("inf"), Value::Text("inf".to_string()));
    }

    #[test]
    fn test_number_keeps_source_text() {
        let v = Value::parse(" 01 ");
        assert_eq!(v.as_f64(), Some(1.0));
        assert_eq!(v.to_string(), "01");
        assert_ne!(v, Value::number(1.0));
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Value::Bool(true).as_f64(), Some(1.0));
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
        assert_eq!(Value::Text("M".into()).as_f64(), None);
        assert_eq!(Value::Missing.as_f64(), None);
    }

    #[test]
    fn test_display_matches_csv_form() {
        assert_eq!(Value::number(16.0).to_string(), "16");
        assert_eq!(Value::parse("16.0").to_string(), "16.0");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Missing.to_string(), "");
    }

    #[test]
    fn test_record_has_missing() {
        let r = Record::new(vec![Value::number(1.0), Value::Missing]);
        assert!(r.has_missing());
        let r = Record::new(vec![Value::number(1.0)]);
        assert!(!r.has_missing());
    }

    #[test]
    fn test_with_values_keeps_line() {
        let r = Record::at_line(vec![Value::Text("F".into())], 7);
        let encoded = r.with_values(vec![Value::Bool(false)]);
        assert_eq!(encoded.line(), Some(7));
        assert_eq!(encoded.values(), &[Value::Bool(false)]);
    }
}
