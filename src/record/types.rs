//! Record and customer types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fixed column order of the backing table
pub const COLUMNS: [&str; COLUMN_COUNT] = [
    "id",
    "name",
    "email",
    "phone",
    "address",
    "transactionAmount",
];

/// Number of columns written for every record
pub const COLUMN_COUNT: usize = 6;

/// A header-keyed record as read from the table.
///
/// Field names come from the live header row, so a record may carry
/// columns beyond the six customer fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String rendering of a field, empty when absent
    pub fn text(&self, key: &str) -> String {
        self.0.get(key).map(cell_text).unwrap_or_default()
    }

    /// String rendering of the id field
    pub fn id_text(&self) -> String {
        self.text("id")
    }

    /// Transaction amount as a number, if the cell is numeric
    pub fn amount(&self) -> Option<f64> {
        self.0.get("transactionAmount").and_then(parse_amount)
    }
}

/// A validated customer, ready to be written to the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Value,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub transaction_amount: Value,
}

impl Customer {
    /// Header-keyed view of this customer
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("id", self.id.clone());
        record.insert("name", Value::String(self.name.clone()));
        record.insert("email", Value::String(self.email.clone()));
        record.insert("phone", Value::String(self.phone.clone()));
        record.insert("address", Value::String(self.address.clone()));
        record.insert("transactionAmount", self.transaction_amount.clone());
        record
    }
}

/// Render a cell the way a JavaScript `String(value)` would.
///
/// Integral floats drop their fraction so `7.0` and `7` both render as
/// `"7"`. Null renders as an empty cell.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                return n.to_string();
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
                    format!("{:.0}", f)
                }
                _ => n.to_string(),
            }
        }
        other => other.to_string(),
    }
}

/// Interpret a cell as a number.
///
/// Accepts JSON numbers and numeric strings (surrounding whitespace allowed).
pub fn parse_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_text_numbers() {
        assert_eq!(cell_text(&json!(7)), "7");
        assert_eq!(cell_text(&json!(7.0)), "7");
        assert_eq!(cell_text(&json!(7.5)), "7.5");
        assert_eq!(cell_text(&json!(-3)), "-3");
    }

    #[test]
    fn test_cell_text_scalars() {
        assert_eq!(cell_text(&json!("7")), "7");
        assert_eq!(cell_text(&json!(true)), "true");
        assert_eq!(cell_text(&Value::Null), "");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(&json!(250)), Some(250.0));
        assert_eq!(parse_amount(&json!(" 99.5 ")), Some(99.5));
        assert_eq!(parse_amount(&json!("")), None);
        assert_eq!(parse_amount(&json!("abc")), None);
        assert_eq!(parse_amount(&json!(null)), None);
    }

    #[test]
    fn test_customer_to_record() {
        let customer = Customer {
            id: json!(1),
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-123-4567".to_string(),
            address: "12 Main St".to_string(),
            transaction_amount: json!(0),
        };

        let record = customer.to_record();
        let fields = serde_json::to_value(&record).unwrap();
        assert_eq!(fields.as_object().unwrap().len(), COLUMN_COUNT);
        assert_eq!(record.id_text(), "1");
        assert_eq!(record.amount(), Some(0.0));
        assert_eq!(record.text("email"), "jane@example.com");
    }

    #[test]
    fn test_record_serializes_as_object() {
        let mut record = Record::new();
        record.insert("id", json!("4"));
        record.insert("name", json!("Bob"));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, json!({"id": "4", "name": "Bob"}));
    }
}
