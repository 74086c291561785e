//! Mock customer data
//!
//! Generates plausible customers for seeding an in-memory table during
//! development and pagination testing.

use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;

use crate::record::Customer;

const FIRST_NAMES: [&str; 10] = [
    "John", "Jane", "Michael", "Sarah", "David", "Lisa", "Robert", "Emma", "William", "Olivia",
];

const LAST_NAMES: [&str; 10] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez",
];

const DOMAINS: [&str; 5] = [
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "company.com",
    "business.org",
];

/// Generate `count` customers with ids `1..=count`
pub fn generate_customers<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Customer> {
    (1..=count).map(|i| generate_customer(i, rng)).collect()
}

fn generate_customer<R: Rng + ?Sized>(id: usize, rng: &mut R) -> Customer {
    let first = pick(&FIRST_NAMES, rng);
    let last = pick(&LAST_NAMES, rng);
    let domain = pick(&DOMAINS, rng);

    Customer {
        id: json!(id),
        name: format!("{} {}", first, last),
        email: format!(
            "{}.{}{}@{}",
            first.to_lowercase(),
            last.to_lowercase(),
            id,
            domain
        ),
        phone: format!(
            "555-{}-{}",
            rng.gen_range(100..1000),
            rng.gen_range(1000..10000)
        ),
        address: format!("{} {} St", rng.gen_range(1..10000), pick(&LAST_NAMES, rng)),
        transaction_amount: json!(rng.gen_range(100..10100)),
    }
}

fn pick<R: Rng + ?Sized>(items: &[&'static str], rng: &mut R) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}
