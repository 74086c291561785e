//! Customer record model
//!
//! A record is a header-keyed map of scalar cells. The backing table stores
//! records positionally in a fixed column order:
//!
//! ```text
//! | id | name | email | phone | address | transactionAmount |
//! ```
//!
//! - `codec` converts between records and positional rows
//! - `locator` resolves a record id to its current row position

pub mod codec;
pub mod locator;
mod types;

pub use codec::{decode, decode_rows, encode, to_camel_case};
pub use locator::{locate, RowPosition};
pub use types::{cell_text, parse_amount, Customer, Record, COLUMNS, COLUMN_COUNT};
