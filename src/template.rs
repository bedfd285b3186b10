//! テンプレート管理 - templates ディレクトリの Markdown ファイル

use crate::error::{AppError, Result};
use std::path::{Path, PathBuf};

/// テンプレートの拡張子
const TEMPLATE_EXTENSION: &str = ".md";

/// テンプレート置き場
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// テンプレートファイル名の一覧を取得 (ディレクトリが無ければ作成)
    pub fn list_templates(&self) -> Result<Vec<String>> {
        let to_error = |source| AppError::TemplateRead {
            name: self.dir.display().to_string(),
            source,
        };

        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(to_error)?;
            tracing::info!("テンプレートディレクトリを作成しました: {:?}", self.dir);
        }

        let mut names: Vec<String> = std::fs::read_dir(&self.dir)
            .map_err(to_error)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(TEMPLATE_EXTENSION))
            .collect();
        names.sort();

        Ok(names)
    }

    /// テンプレートの内容を読み込む
    pub fn load_template(&self, name: &str) -> Result<String> {
        let path = self.dir.join(name);
        let content = std::fs::read_to_string(&path).map_err(|source| AppError::TemplateRead {
            name: name.to_string(),
            source,
        })?;

        tracing::info!("テンプレートを読み込みました: {}", name);
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_directory_and_returns_empty() {
        let root = tempfile::tempdir().unwrap();
        let store = TemplateStore::new(root.path().join("templates"));

        let names = store.list_templates().unwrap();
        assert!(names.is_empty());
        assert!(store.dir().is_dir());
    }

    #[test]
    fn lists_only_markdown_files() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path();
        std::fs::write(dir.join("b.md"), "b").unwrap();
        std::fs::write(dir.join("a.md"), "a").unwrap();
        std::fs::write(dir.join("notes.txt"), "x").unwrap();
        std::fs::create_dir(dir.join("drafts.md")).unwrap();

        let names = TemplateStore::new(dir).list_templates().unwrap();
        assert_eq!(names, vec!["a.md".to_string(), "b.md".to_string()]);
    }

    #[test]
    fn loads_template_content() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("intro.md"), "---\ntitle: 紹介\n---\n本文\n").unwrap();

        let content = TemplateStore::new(root.path()).load_template("intro.md").unwrap();
        assert_eq!(content, "---\ntitle: 紹介\n---\n本文\n");
    }

    #[test]
    fn missing_template_is_read_error() {
        let root = tempfile::tempdir().unwrap();

        let err = TemplateStore::new(root.path()).load_template("none.md").unwrap_err();
        assert!(matches!(err, AppError::TemplateRead { ref name, .. } if name == "none.md"));
    }
}
