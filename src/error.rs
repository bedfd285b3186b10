//! エラー定義

use std::path::PathBuf;
use thiserror::Error;

/// アプリケーションエラー
///
/// `ConfigMissing` / `ConfigRead` / `ConfigParse` 以外はすべて操作単位で捕捉され、
/// ダイアログとしてユーザーに通知される。
#[derive(Error, Debug)]
pub enum AppError {
    #[error("設定ファイルが見つかりません: {}", .0.display())]
    ConfigMissing(PathBuf),

    #[error("設定ファイルの読み込みに失敗しました: {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("設定ファイルの書式が不正です: {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("テンプレート '{name}' の読み込みに失敗しました: {source}")]
    TemplateRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("記事内容が空です")]
    EmptyContent,

    #[error("Dev.to の API キーが設定されていません")]
    MissingCredential,

    #[error("記事にフロントマター (---) がありません")]
    MissingFrontMatter,

    #[error("'{program}' が見つかりません。インストールされていないか、PATH が通っていません")]
    ToolNotFound { program: String },

    #[error("コマンド '{command}' の実行に失敗しました:\n{output}")]
    ExternalTool { command: String, output: String },

    #[error("記事ファイルの書き込みに失敗しました: {}: {source}", path.display())]
    ArticleWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dev.to への接続に失敗しました: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Dev.to API エラー ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Dev.to API の応答が不正です: {0}")]
    UnexpectedResponse(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_tool_error_includes_captured_output() {
        let err = AppError::ExternalTool {
            command: "git push".to_string(),
            output: "fatal: no upstream".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("git push"));
        assert!(message.contains("fatal: no upstream"));
    }

    #[test]
    fn api_error_includes_status_and_body() {
        let err = AppError::Api {
            status: 422,
            body: "Title can't be blank".to_string(),
        };
        assert_eq!(err.to_string(), "Dev.to API エラー (422): Title can't be blank");
    }
}
