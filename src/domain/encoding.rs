// ============================================================
// Layer 3 — Encoding Tables
// ============================================================
// An EncodingTable maps the raw strings of one categorical
// column to a canonical code:
//
//   sex:    { "F": false, "M": true }
//   school: { "GP": 0,    "MS": 1 }
//
// The table is the complete list of accepted raw values.
// Anything not listed is an error at encode time, never a
// silent pass-through.
//
// Serialised as a flat JSON object so tables can be written
// by hand in a pipeline config file.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Canonical encoded value for a categorical cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Code {
    Bool(bool),
    Int(i64),
}

/// Raw value → Code for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodingTable {
    entries: BTreeMap<String, Code>,
}

/// Field name → table. Ordered so encoding and logging are stable.
pub type EncodingTables = BTreeMap<String, EncodingTable>;

impl EncodingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from (raw, code) pairs. Later pairs win.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Code)>,
        S: Into<String>,
    {
        Self {
            entries: pairs.into_iter().map(|(raw, code)| (raw.into(), code)).collect(),
        }
    }

    /// Two-valued boolean table: `when_false` → false, `when_true` → true.
    pub fn boolean(when_false: &str, when_true: &str) -> Self {
        Self::from_pairs([(when_false, Code::Bool(false)), (when_true, Code::Bool(true))])
    }

    /// The common `{"no": false, "yes": true}` table.
    pub fn yes_no() -> Self {
        Self::boolean("no", "yes")
    }

    pub fn insert(&mut self, raw: impl Into<String>, code: Code) {
        self.entries.insert(raw.into(), code);
    }

    pub fn encode(&self, raw: &str) -> Option<Code> {
        self.entries.get(raw).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// No two raw values share a code.
    pub fn is_injective(&self) -> bool {
        self.inverse().is_some()
    }

    /// Code → raw mapping, or None if the table is not injective.
    pub fn inverse(&self) -> Option<HashMap<Code, String>> {
        let mut inverse = HashMap::with_capacity(self.entries.len());
        for (raw, code) in &self.entries {
            if inverse.insert(*code, raw.clone()).is_some() {
                return None;
            }
        }
        Some(inverse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_table() {
        let t = EncodingTable::boolean("F", "M");
        assert_eq!(t.encode("F"), Some(Code::Bool(false)));
        assert_eq!(t.encode("M"), Some(Code::Bool(true)));
        assert_eq!(t.encode("X"), None);
    }

    #[test]
    fn test_inverse_of_injective_table() {
        let t = EncodingTable::from_pairs([("GP", Code::Int(0)), ("MS", Code::Int(1))]);
        let inv = t.inverse().expect("injective");
        assert_eq!(inv[&Code::Int(0)], "GP");
        assert_eq!(inv[&Code::Int(1)], "MS");
    }

    #[test]
    fn test_non_injective_table_has_no_inverse() {
        let t = EncodingTable::from_pairs([
            ("yes", Code::Bool(true)),
            ("y",   Code::Bool(true)),
            ("no",  Code::Bool(false)),
        ]);
        assert!(!t.is_injective());
    }

    #[test]
    fn test_json_shape() {
        let t = EncodingTable::from_pairs([("GP", Code::Int(0)), ("MS", Code::Int(1))]);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"GP":0,"MS":1}"#);

        let back: EncodingTable = serde_json::from_str(r#"{"no":false,"yes":true}"#).unwrap();
        assert_eq!(back, EncodingTable::yes_no());
    }
}
