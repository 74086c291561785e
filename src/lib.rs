//! sheetdb - customer records stored in a Google Sheet
//!
//! The first row of the sheet is a header naming the columns; every later
//! row is one customer. Records are located by a linear scan of the id
//! column, so positions are never cached between requests.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod mock;
pub mod preferences;
pub mod record;
pub mod store;
pub mod table;
