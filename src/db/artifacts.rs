use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;

use crate::{models::CatalogRecord, services::similarity::SimilarityTable};

/// Reads the catalog listing, a JSON array of `{movie_id, title}` records
pub fn load_catalog(path: impl AsRef<Path>) -> anyhow::Result<Vec<CatalogRecord>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open catalog at {}", path.display()))?;

    let records: Vec<CatalogRecord> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse catalog at {}", path.display()))?;

    tracing::info!(path = %path.display(), movies = records.len(), "Catalog loaded");
    Ok(records)
}

/// Reads the similarity matrix, a JSON array of rows in catalog order
pub fn load_similarity(path: impl AsRef<Path>) -> anyhow::Result<SimilarityTable> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open similarity table at {}", path.display()))?;

    let rows: Vec<Vec<f32>> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse similarity table at {}", path.display()))?;

    let table = SimilarityTable::from_rows(rows)?;

    tracing::info!(path = %path.display(), size = table.size(), "Similarity table loaded");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_catalog() {
        let file = write_temp(
            r#"[{"movie_id": 19995, "title": "Avatar"}, {"movie_id": 285, "title": "Pirates of the Caribbean: At World's End"}]"#,
        );

        let records = load_catalog(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].movie_id, 285);
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let err = load_catalog("/nonexistent/movie_list.json").unwrap_err();
        assert!(err.to_string().contains("Failed to open catalog"));
    }

    #[test]
    fn test_load_similarity() {
        let file = write_temp("[[1.0, 0.25], [0.25, 1.0]]");

        let table = load_similarity(file.path()).unwrap();

        assert_eq!(table.size(), 2);
        assert_eq!(table.row(0), Some(&[1.0, 0.25][..]));
    }

    #[test]
    fn test_load_similarity_rejects_ragged_rows() {
        let file = write_temp("[[1.0, 0.25], [0.25]]");
        assert!(load_similarity(file.path()).is_err());
    }

    #[test]
    fn test_load_similarity_rejects_malformed_json() {
        let file = write_temp("[[1.0, 0.25], ");
        let err = load_similarity(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse similarity table"));
    }
}
