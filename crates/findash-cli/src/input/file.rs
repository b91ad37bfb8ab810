use findash_core::SourceTable;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::path::Path;

/// Read a JSON file and deserialise into a typed struct.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let value: T = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    Ok(value)
}

/// Read a YAML file and deserialise into a typed struct.
pub fn read_yaml<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let value: T = serde_yaml::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    Ok(value)
}

/// Read the monthly CSV table. The file handle is dropped before returning.
pub fn read_source_table(path: &str) -> Result<SourceTable, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let table = {
        let file = File::open(&canonical)
            .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
        SourceTable::from_csv_reader(file)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    tracing::debug!(
        path = %canonical.display(),
        rows = table.len(),
        columns = ?table.columns(),
        "source table loaded"
    );
    Ok(table)
}

/// Resolve and validate the path, preventing directory traversal.
fn resolve_path(path: &str) -> Result<std::path::PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "months,accounts receivable,accounts payable,income,income budget,\
cost of goods sold,total operating expenses,Taxes,quick ratio,current ratio,cash at eom,expense budget
Jan,1,2,3,4,5,6,7,8,9,10,11
Feb,2,2,3,4,5,6,7,8,9,10,11
";

    #[test]
    fn test_read_source_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();

        let table = read_source_table(file.path().to_str().unwrap()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns()[0], "month");
    }

    #[test]
    fn test_missing_file() {
        let err = read_source_table("/definitely/not/here.csv").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_source_table(dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Not a file"));
    }
}
