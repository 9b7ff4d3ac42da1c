//! Schema sources: where declared elements come from.

use crate::loader::parse_elements;
use crate::{DeclaredElement, StoreError, StoreResult};
use async_trait::async_trait;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Serialization format of a schema source document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    Json,
}

impl SourceFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> StoreResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Ok(SourceFormat::Yaml),
            Some("json") => Ok(SourceFormat::Json),
            _ => Err(StoreError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// A source of declared schema elements
#[async_trait]
pub trait SchemaSource: Send + Sync + Debug {
    /// Human-readable description of the source, used in logs
    fn describe(&self) -> String;

    /// Read and parse every element the source declares
    async fn read(&self) -> StoreResult<Vec<DeclaredElement>>;
}

/// A schema document on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SchemaSource for FileSource {
    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    async fn read(&self) -> StoreResult<Vec<DeclaredElement>> {
        let format = SourceFormat::from_path(&self.path)?;
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), bytes = content.len(), "Read schema source");
        parse_elements(&content, format)
    }
}

/// A schema document held in memory
#[derive(Debug, Clone)]
pub struct InlineSource {
    label: String,
    format: SourceFormat,
    content: String,
}

impl InlineSource {
    pub fn new(label: impl Into<String>, format: SourceFormat, content: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            format,
            content: content.into(),
        }
    }

    pub fn yaml(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(label, SourceFormat::Yaml, content)
    }

    pub fn json(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(label, SourceFormat::Json, content)
    }
}

#[async_trait]
impl SchemaSource for InlineSource {
    fn describe(&self) -> String {
        format!("inline:{}", self.label)
    }

    async fn read(&self) -> StoreResult<Vec<DeclaredElement>> {
        parse_elements(&self.content, self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("schema.yaml")).unwrap(), SourceFormat::Yaml);
        assert_eq!(SourceFormat::from_path(Path::new("schema.yml")).unwrap(), SourceFormat::Yaml);
        assert_eq!(SourceFormat::from_path(Path::new("schema.json")).unwrap(), SourceFormat::Json);

        let err = SourceFormat::from_path(Path::new("schema.graphqls")).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn test_file_source_reads_yaml() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            r#"
elements:
  - name: Money
    type: graphql_type
    fields:
      value: {{ type: Float }}
      currency: {{ type: String }}
"#
        )
        .unwrap();

        let source = FileSource::new(file.path());
        assert!(source.describe().starts_with("file:"));

        let elements = source.read().await.unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].name, "Money");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = FileSource::new("/definitely/not/here/schema.yaml");
        let err = source.read().await.unwrap_err();
        assert_eq!(err.error_code(), "ERR_STORE_IO");
    }

    #[tokio::test]
    async fn test_inline_json_source() {
        let source = InlineSource::json(
            "catalog",
            r#"{ "elements": [ { "name": "Query", "type": "graphql_type" } ] }"#,
        );
        assert_eq!(source.describe(), "inline:catalog");

        let elements = source.read().await.unwrap();
        assert_eq!(elements[0].element_type.as_deref(), Some("graphql_type"));
    }
}
