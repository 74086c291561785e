//! Customer request payloads and their validation
//!
//! Text fields and the id are rejected when falsy: absent, null, empty
//! string, `0` or `false`. The transaction amount is rejected only when
//! absent or null, so `0` is a valid amount, and it must be numeric.

use serde::Deserialize;
use serde_json::Value;

use crate::record::{cell_text, parse_amount, Customer};

use super::errors::{StoreError, StoreResult};

/// Customer fields as received from a client
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub address: Option<Value>,
    #[serde(default, alias = "transaction_amount")]
    pub transaction_amount: Option<Value>,
}

impl CustomerPayload {
    /// Validate a full payload, id included
    pub fn into_customer(self) -> StoreResult<Customer> {
        let mut missing = Vec::new();
        if is_falsy(&self.id) {
            missing.push("id");
        }
        let id = self.id.clone().unwrap_or(Value::Null);
        self.build(id, missing)
    }

    /// Validate the non-id fields; the id comes from the caller
    pub fn into_customer_with_id(self, id: &str) -> StoreResult<Customer> {
        self.build(Value::String(id.to_string()), Vec::new())
    }

    fn build(self, id: Value, mut missing: Vec<&'static str>) -> StoreResult<Customer> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
        ] {
            if is_falsy(value) {
                missing.push(field);
            }
        }
        if matches!(self.transaction_amount, None | Some(Value::Null)) {
            missing.push("transactionAmount");
        }

        if !missing.is_empty() {
            return Err(StoreError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        if !is_scalar(&id) {
            return Err(StoreError::validation("id must be a string or number"));
        }

        let transaction_amount = self.transaction_amount.unwrap_or(Value::Null);
        if parse_amount(&transaction_amount).is_none() {
            return Err(StoreError::validation("transactionAmount must be numeric"));
        }

        Ok(Customer {
            id,
            name: text_field("name", self.name)?,
            email: text_field("email", self.email)?,
            phone: text_field("phone", self.phone)?,
            address: text_field("address", self.address)?,
            transaction_amount,
        })
    }
}

fn is_falsy(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn text_field(field: &str, value: Option<Value>) -> StoreResult<String> {
    match value {
        Some(v) if is_scalar(&v) => Ok(cell_text(&v)),
        _ => Err(StoreError::Validation(format!(
            "{} must be a string or number",
            field
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(body: Value) -> CustomerPayload {
        serde_json::from_value(body).unwrap()
    }

    fn full() -> Value {
        json!({
            "id": 11,
            "name": "Emma Davis",
            "email": "emma@example.com",
            "phone": "555-100-2000",
            "address": "9 Pine St",
            "transactionAmount": 450
        })
    }

    #[test]
    fn test_valid_payload() {
        let customer = payload(full()).into_customer().unwrap();
        assert_eq!(customer.id, json!(11));
        assert_eq!(customer.name, "Emma Davis");
        assert_eq!(customer.transaction_amount, json!(450));
    }

    #[test]
    fn test_zero_amount_is_valid() {
        let mut body = full();
        body["transactionAmount"] = json!(0);
        assert!(payload(body).into_customer().is_ok());
    }

    #[test]
    fn test_each_missing_field_rejected() {
        for field in ["id", "name", "email", "phone", "address", "transactionAmount"] {
            let mut body = full();
            body.as_object_mut().unwrap().remove(field);

            let err = payload(body).into_customer().unwrap_err();
            match err {
                StoreError::Validation(msg) => assert!(msg.contains(field), "{}", msg),
                other => panic!("unexpected error: {:?}", other),
            }
        }
    }

    #[test]
    fn test_falsy_values_rejected() {
        let mut body = full();
        body["name"] = json!("");
        assert!(payload(body).into_customer().is_err());

        let mut body = full();
        body["id"] = json!(0);
        assert!(payload(body).into_customer().is_err());

        let mut body = full();
        body["transactionAmount"] = json!(null);
        assert!(payload(body).into_customer().is_err());
    }

    #[test]
    fn test_non_numeric_amount_rejected() {
        let mut body = full();
        body["transactionAmount"] = json!("lots");
        let err = payload(body).into_customer().unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn test_numeric_string_amount_kept() {
        let mut body = full();
        body["transactionAmount"] = json!("120.50");
        let customer = payload(body).into_customer().unwrap();
        assert_eq!(customer.transaction_amount, json!("120.50"));
    }

    #[test]
    fn test_with_id_ignores_body_id() {
        let mut body = full();
        body.as_object_mut().unwrap().remove("id");
        let customer = payload(body).into_customer_with_id("27").unwrap();
        assert_eq!(customer.id, json!("27"));
    }

    #[test]
    fn test_numeric_phone_rendered() {
        let mut body = full();
        body["phone"] = json!(5551002000u64);
        let customer = payload(body).into_customer().unwrap();
        assert_eq!(customer.phone, "5551002000");
    }

    #[test]
    fn test_snake_case_amount_alias() {
        let mut body = full();
        let amount = body.as_object_mut().unwrap().remove("transactionAmount").unwrap();
        body["transaction_amount"] = amount;
        assert!(payload(body).into_customer().is_ok());
    }
}
