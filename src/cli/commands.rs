//! CLI command implementations
//!
//! `serve` is the composition root: it loads configuration, builds the
//! table collaborator and theme store, loads the saved theme, and starts
//! the HTTP server.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::AppConfig;
use crate::http_server::{AppState, HttpServer};
use crate::mock::generate_customers;
use crate::preferences::{
    FilePreferenceStorage, MemoryPreferenceStorage, PreferenceStorage, ThemeStore,
};
use crate::store::RecordStore;
use crate::table::{
    Credentials, GoogleSheetsTable, InMemoryTable, ServiceAccountAuth, ServiceAccountKey,
    TableCollaborator,
};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Parse CLI args and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            port,
            in_memory,
            mock_count,
        } => serve(config.as_deref(), port, in_memory, mock_count),
        Command::Mock { count, seed } => mock(count, seed, &mut std::io::stdout()),
    }
}

/// Start the HTTP API
pub fn serve(
    config_path: Option<&Path>,
    port: Option<u16>,
    in_memory: bool,
    mock_count: usize,
) -> CliResult<()> {
    let mut config = AppConfig::load(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    let theme = build_theme_store(&config)?;
    let table = build_table(&config, in_memory, mock_count)?;
    let range = config.sheets.sheet_range()?;
    let store = RecordStore::new(table, range, config.sheets.sheet_id);

    let state = Arc::new(AppState::new(store, theme));
    let server = HttpServer::new(config.server.clone(), state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Build the theme store and load the saved preference
pub fn build_theme_store(config: &AppConfig) -> CliResult<ThemeStore> {
    let storage: Box<dyn PreferenceStorage> = match &config.preferences.theme_file {
        Some(path) => Box::new(FilePreferenceStorage::new(path)),
        None => Box::new(MemoryPreferenceStorage::new()),
    };

    let theme = ThemeStore::new(storage);
    let loaded = theme.load(config.preferences.prefers_dark)?;
    tracing::info!(theme = %loaded, "theme preference ready");
    Ok(theme)
}

/// Build the table the store runs against
pub fn build_table(
    config: &AppConfig,
    in_memory: bool,
    mock_count: usize,
) -> CliResult<Arc<dyn TableCollaborator>> {
    if in_memory {
        let customers = generate_customers(mock_count, &mut rand::thread_rng());
        tracing::info!(customers = customers.len(), "using in-memory table");
        return Ok(Arc::new(InMemoryTable::with_customers(&customers)));
    }

    config.validate_sheets()?;
    let client = reqwest::Client::new();

    let credentials = match &config.sheets.service_account {
        Some(encoded) => {
            let key = ServiceAccountKey::from_base64(encoded)?;
            let auth = ServiceAccountAuth::new(key, client.clone())?;
            tracing::info!(client_email = auth.client_email(), "using service account");
            Credentials::ServiceAccount(auth)
        }
        None => {
            let key = config
                .sheets
                .api_key
                .clone()
                .ok_or_else(|| CliError::config_error("no spreadsheet credentials"))?;
            tracing::warn!("using API key; create, update and delete will fail");
            Credentials::ApiKey(key)
        }
    };

    tracing::info!(
        spreadsheet_id = %config.sheets.spreadsheet_id,
        range = %config.sheets.range,
        "using Google Sheets table"
    );
    Ok(Arc::new(GoogleSheetsTable::new(
        client,
        config.sheets.spreadsheet_id.clone(),
        credentials,
    )))
}

/// Print `count` mock customers as a JSON array
pub fn mock<W: Write>(count: usize, seed: Option<u64>, out: &mut W) -> CliResult<()> {
    let customers = match seed {
        Some(seed) => generate_customers(count, &mut StdRng::seed_from_u64(seed)),
        None => generate_customers(count, &mut rand::thread_rng()),
    };

    serde_json::to_writer_pretty(&mut *out, &customers)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::Theme;
    use tempfile::TempDir;

    #[test]
    fn test_mock_output() {
        let mut out = Vec::new();
        mock(3, Some(1), &mut out).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let items = parsed.as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[2]["id"], 3);
        assert!(items[0]["transactionAmount"].is_number());
    }

    #[test]
    fn test_build_in_memory_table() {
        let config = AppConfig::default();
        assert!(build_table(&config, true, 5).is_ok());
    }

    #[test]
    fn test_build_table_requires_settings() {
        let config = AppConfig::default();
        let err = build_table(&config, false, 0).err().unwrap();
        assert_eq!(err.code_str(), "SHEETDB_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_build_table_with_api_key() {
        let mut config = AppConfig::default();
        config.sheets.spreadsheet_id = "abc".to_string();
        config.sheets.api_key = Some("key".to_string());
        assert!(build_table(&config, false, 0).is_ok());
    }

    #[test]
    fn test_build_table_bad_service_account() {
        let mut config = AppConfig::default();
        config.sheets.spreadsheet_id = "abc".to_string();
        config.sheets.service_account = Some("%%%".to_string());
        let err = build_table(&config, false, 0).err().unwrap();
        assert_eq!(err.code_str(), "SHEETDB_CLI_CREDENTIALS_ERROR");
    }

    #[test]
    fn test_theme_store_loads_saved_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("theme.json");
        FilePreferenceStorage::new(&path)
            .save_theme(Theme::Dark)
            .unwrap();

        let mut config = AppConfig::default();
        config.preferences.theme_file = Some(path);
        let theme = build_theme_store(&config).unwrap();
        assert!(theme.is_loaded());
        assert_eq!(theme.get(), Theme::Dark);
    }
}
