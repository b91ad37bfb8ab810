pub mod file;
pub mod stdin;

use findash_core::SourceTable;

use crate::config::DashboardConfig;

/// Pick the source table: an explicit `--data` path wins, then piped stdin,
/// then the configured data path.
pub fn load_source(
    data: Option<&str>,
    config: &DashboardConfig,
) -> Result<SourceTable, Box<dyn std::error::Error>> {
    if let Some(path) = data {
        return file::read_source_table(path);
    }
    if let Some(table) = stdin::read_stdin()? {
        tracing::debug!("reading source table from stdin");
        return Ok(table);
    }
    file::read_source_table(&config.data_path.to_string_lossy())
}
