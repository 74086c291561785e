//! # Row Codec
//!
//! Converts between header-keyed records and positional rows.
//!
//! - `encode` emits the six customer columns in fixed order
//! - `decode` pairs header cells with row cells by position and
//!   normalizes each header name to camelCase
//!
//! No type checking happens here; cells are carried as received.

use serde_json::Value;

use super::types::{cell_text, Record, COLUMNS};

/// Encode a record into a positional row.
///
/// Missing fields become empty strings.
pub fn encode(record: &Record) -> Vec<Value> {
    COLUMNS
        .iter()
        .map(|column| {
            record
                .get(column)
                .cloned()
                .unwrap_or_else(|| Value::String(String::new()))
        })
        .collect()
}

/// Decode a data row against the header row.
///
/// Cells missing at the end of a short row decode as empty strings.
/// Empty header cells are skipped. When two headers normalize to the same
/// name, the rightmost column wins.
pub fn decode(header: &[Value], row: &[Value]) -> Record {
    let mut record = Record::new();

    for (i, header_cell) in header.iter().enumerate() {
        let name = cell_text(header_cell);
        if name.is_empty() {
            continue;
        }

        let value = match row.get(i) {
            Some(Value::Null) | None => Value::String(String::new()),
            Some(v) => v.clone(),
        };

        record.insert(to_camel_case(&name), value);
    }

    record
}

/// Decode every data row of a table (header first).
///
/// An absent or header-only table decodes to no records.
pub fn decode_rows(rows: &[Vec<Value>]) -> Vec<Record> {
    match rows.split_first() {
        Some((header, data)) => data.iter().map(|row| decode(header, row)).collect(),
        None => Vec::new(),
    }
}

/// Normalize a header name to camelCase.
///
/// `transaction_amount` and `transaction-amount` both become
/// `transactionAmount`. Names without separators only get their first
/// letter lowercased.
///
/// Every `_` and `-` is dropped. A run of separators uppercases the next
/// letter once (`a__b` becomes `aB`) and a trailing separator is removed
/// (`a-` becomes `a`), where a single-pass regex replace would keep one.
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;

    for c in name.chars() {
        if c == '_' || c == '-' {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    let mut chars = out.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Customer;
    use serde_json::json;

    fn header() -> Vec<Value> {
        COLUMNS.iter().map(|c| json!(c)).collect()
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("transaction_amount"), "transactionAmount");
        assert_eq!(to_camel_case("transaction-amount"), "transactionAmount");
        assert_eq!(to_camel_case("Email"), "email");
        assert_eq!(to_camel_case("transactionAmount"), "transactionAmount");
        assert_eq!(to_camel_case("_id"), "id");
        assert_eq!(to_camel_case("customer_phone_number"), "customerPhoneNumber");
    }

    #[test]
    fn test_to_camel_case_separator_runs() {
        assert_eq!(to_camel_case("a__b"), "aB");
        assert_eq!(to_camel_case("a-_b"), "aB");
        assert_eq!(to_camel_case("amount-"), "amount");
        assert_eq!(to_camel_case("--"), "");
    }

    #[test]
    fn test_to_camel_case_passthrough() {
        assert_eq!(to_camel_case("address"), "address");
        assert_eq!(to_camel_case("Home Address"), "home Address");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_encode_fixed_order() {
        let customer = Customer {
            id: json!(3),
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            phone: "555-000-1111".to_string(),
            address: "1 Elm St".to_string(),
            transaction_amount: json!(120),
        };

        let row = encode(&customer.to_record());
        assert_eq!(
            row,
            vec![
                json!(3),
                json!("Ann"),
                json!("ann@example.com"),
                json!("555-000-1111"),
                json!("1 Elm St"),
                json!(120),
            ]
        );
    }

    #[test]
    fn test_encode_missing_fields_empty() {
        let mut record = Record::new();
        record.insert("id", json!("9"));
        record.insert("email", json!("x@example.com"));

        let row = encode(&record);
        assert_eq!(row.len(), COLUMNS.len());
        assert_eq!(row[0], json!("9"));
        assert_eq!(row[1], json!(""));
        assert_eq!(row[2], json!("x@example.com"));
        assert_eq!(row[5], json!(""));
    }

    #[test]
    fn test_decode_round_trip() {
        let customer = Customer {
            id: json!("42"),
            name: "Li Wei".to_string(),
            email: "li@example.com".to_string(),
            phone: "555-222-3333".to_string(),
            address: "88 Oak St".to_string(),
            transaction_amount: json!(0),
        };
        let record = customer.to_record();

        assert_eq!(decode(&header(), &encode(&record)), record);
    }

    #[test]
    fn test_decode_short_row() {
        let row = vec![json!("1"), json!("Sam")];
        let record = decode(&header(), &row);

        for column in COLUMNS {
            assert!(record.get(column).is_some(), "missing {}", column);
        }
        assert_eq!(record.text("name"), "Sam");
        assert_eq!(record.get("address"), Some(&json!("")));
        assert_eq!(record.get("transactionAmount"), Some(&json!("")));
    }

    #[test]
    fn test_decode_normalizes_header() {
        let header = vec![json!("ID"), json!("full_name"), json!("transaction-amount")];
        let row = vec![json!("5"), json!("Kim"), json!("300")];
        let record = decode(&header, &row);

        assert_eq!(record.text("iD"), "5");
        assert_eq!(record.text("fullName"), "Kim");
        assert_eq!(record.amount(), Some(300.0));
    }

    #[test]
    fn test_decode_rows_header_only() {
        assert!(decode_rows(&[]).is_empty());
        assert!(decode_rows(&[header()]).is_empty());
    }
}
