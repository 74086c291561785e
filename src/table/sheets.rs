//! # Google Sheets Table
//!
//! Implements the table primitives against the Sheets v4 REST API:
//!
//! | Primitive      | Endpoint                                          |
//! |----------------|---------------------------------------------------|
//! | `read`         | `GET  spreadsheets/{id}/values/{range}`           |
//! | `append`       | `POST spreadsheets/{id}/values/{range}:append`    |
//! | `update`       | `PUT  spreadsheets/{id}/values/{range}`           |
//! | `batch_update` | `POST spreadsheets/{id}:batchUpdate`              |
//!
//! Writes use `valueInputOption=USER_ENTERED`, so numeric strings are
//! stored as numbers by the service.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::auth::Credentials;
use super::errors::{TableError, TableResult};
use super::range::SheetRange;
use super::{DeleteRowRequest, Row, TableCollaborator};

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4";

const VALUE_INPUT_OPTION: &str = "USER_ENTERED";

/// Response of `values.get`. The `values` key is absent for empty ranges.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Row>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<String>,
    major_dimension: &'static str,
    values: [&'a Row; 1],
}

/// Google Sheets backed table
pub struct GoogleSheetsTable {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    credentials: Credentials,
}

impl GoogleSheetsTable {
    pub fn new(client: Client, spreadsheet_id: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            credentials,
        }
    }

    /// Point the client at a different API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// URL of `spreadsheets/{id}/{last}`
    fn url(&self, segments: &[&str]) -> TableResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| TableError::Transport(format!("invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| TableError::Transport("base URL cannot have a path".to_string()))?
            .pop_if_empty()
            .push("spreadsheets")
            .extend(segments);
        Ok(url)
    }

    fn values_url(&self, range: &SheetRange, suffix: &str) -> TableResult<Url> {
        let segment = format!("{}{}", range, suffix);
        self.url(&[&self.spreadsheet_id, "values", &segment])
    }

    fn batch_update_url(&self) -> TableResult<Url> {
        let segment = format!("{}:batchUpdate", self.spreadsheet_id);
        self.url(&[&segment])
    }
}

/// Turn non-success responses into `TableError::Status`
async fn check(response: Response) -> TableResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(body);

    Err(TableError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Body of a single-row `deleteDimension` batch update
fn delete_rows_body(request: &DeleteRowRequest) -> Value {
    json!({
        "requests": [{
            "deleteDimension": {
                "range": {
                    "sheetId": request.sheet_id,
                    "dimension": "ROWS",
                    "startIndex": request.start_index,
                    "endIndex": request.end_index,
                }
            }
        }]
    })
}

#[async_trait]
impl TableCollaborator for GoogleSheetsTable {
    async fn read(&self, range: &SheetRange) -> TableResult<Vec<Row>> {
        let url = self.values_url(range, "")?;
        let request = self.credentials.authorize(self.client.get(url), None).await?;

        let response = check(request.send().await?).await?;
        let body: ValueRange = response.json().await?;

        tracing::debug!(range = %range, rows = body.values.len(), "read sheet values");
        Ok(body.values)
    }

    async fn append(&self, range: &SheetRange, row: Row) -> TableResult<()> {
        let url = self.values_url(range, ":append")?;
        let request = self
            .client
            .post(url)
            .query(&[
                ("valueInputOption", VALUE_INPUT_OPTION),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&ValueBody {
                range: None,
                major_dimension: "ROWS",
                values: [&row],
            });
        let request = self.credentials.authorize(request, Some("append")).await?;

        check(request.send().await?).await?;
        tracing::debug!(range = %range, "appended row");
        Ok(())
    }

    async fn update(&self, range: &SheetRange, row: Row) -> TableResult<()> {
        let url = self.values_url(range, "")?;
        let request = self
            .client
            .put(url)
            .query(&[("valueInputOption", VALUE_INPUT_OPTION)])
            .json(&ValueBody {
                range: Some(range.to_string()),
                major_dimension: "ROWS",
                values: [&row],
            });
        let request = self.credentials.authorize(request, Some("update")).await?;

        check(request.send().await?).await?;
        tracing::debug!(range = %range, "updated row");
        Ok(())
    }

    async fn batch_update(&self, request: DeleteRowRequest) -> TableResult<()> {
        let url = self.batch_update_url()?;
        let http = self.client.post(url).json(&delete_rows_body(&request));
        let http = self.credentials.authorize(http, Some("delete")).await?;

        check(http.send().await?).await?;
        tracing::debug!(
            sheet_id = request.sheet_id,
            start_index = request.start_index,
            end_index = request.end_index,
            "deleted rows"
        );
        Ok(())
    }
}
