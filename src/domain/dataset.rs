use serde::{Deserialize, Serialize};

use crate::domain::error::{PrepareError, PrepareResult};
use crate::domain::value::{Record, Value};

/// An ordered sequence of records sharing one schema.
/// Each record's values line up with `fields` by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    fields:  Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Callers guarantee every record has `fields.len()` values.
    pub fn new(fields: Vec<String>, records: Vec<Record>) -> Self {
        debug_assert!(records.iter().all(|r| r.len() == fields.len()));
        Self { fields, records }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }

    /// Column position of `name`, or UnknownField.
    pub fn field_index(&self, name: &str) -> PrepareResult<usize> {
        self.fields
            .iter()
            .position(|f| f == name)
            .ok_or_else(|| PrepareError::UnknownField {
                field:     name.to_string(),
                available: self.fields.clone(),
            })
    }

    /// Cell lookup by row and field name.
    pub fn value(&self, row: usize, field: &str) -> Option<&Value> {
        let col = self.fields.iter().position(|f| f == field)?;
        self.records.get(row)?.get(col)
    }

    /// All values of one column, in row order.
    pub fn column(&self, field: &str) -> PrepareResult<Vec<&Value>> {
        let col = self.field_index(field)?;
        Ok(self.records.iter().filter_map(|r| r.get(col)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(
            vec!["age".into(), "sex".into()],
            vec![
                Record::new(vec![Value::number(16.0), Value::Text("F".into())]),
                Record::new(vec![Value::number(17.0), Value::Text("M".into())]),
            ],
        )
    }

    #[test]
    fn test_value_lookup() {
        let ds = sample();
        assert_eq!(ds.value(1, "sex"), Some(&Value::Text("M".into())));
        assert_eq!(ds.value(0, "age"), Some(&Value::number(16.0)));
        assert_eq!(ds.value(2, "age"), None);
        assert_eq!(ds.value(0, "G3"), None);
    }

    #[test]
    fn test_field_index_unknown() {
        let err = sample().field_index("G3").unwrap_err();
        assert!(matches!(err, PrepareError::UnknownField { ref field, .. } if field == "G3"));
    }

    #[test]
    fn test_column() {
        let ds = sample();
        let ages = ds.column("age").unwrap();
        assert_eq!(ages, vec![&Value::number(16.0), &Value::number(17.0)]);
    }
}
