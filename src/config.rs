//! 設定ファイル (config.ini) の読み込み

use crate::error::{AppError, Result};
use ini::{Ini, ParseOption, Properties};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// API キーの環境変数 (設定ファイルより優先)
pub const API_KEY_ENV: &str = "APOSTLE_DEVTO_API_KEY";

/// 基準ディレクトリの環境変数
pub const BASE_DIR_ENV: &str = "APOSTLE_BASE_DIR";

const DEFAULT_SLUG_PREFIX: &str = "wsl-orchestrator-intro-";
const DEFAULT_CLI_TITLE: &str = "WSL Orchestrator紹介";

/// アプリケーションが使うパス一式
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub base_dir: PathBuf,
}

impl AppPaths {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// `APOSTLE_BASE_DIR` があればそれを、なければ実行ファイルのディレクトリを基準にする
    pub fn from_env() -> std::io::Result<Self> {
        let exe = std::env::current_exe()?;
        Ok(Self::new(resolve_base_dir(
            std::env::var_os(BASE_DIR_ENV),
            &exe,
        )))
    }

    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE_NAME)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.base_dir.join("templates")
    }

    /// Zenn リポジトリ (git / zenn コマンドの作業ディレクトリ)
    pub fn zenn_repo_dir(&self) -> PathBuf {
        self.base_dir.clone()
    }
}

/// 空でない上書き指定を優先し、なければ実行ファイルの親ディレクトリ
fn resolve_base_dir(override_dir: Option<OsString>, exe: &Path) -> PathBuf {
    match override_dir {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => exe
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    }
}

/// Zenn 関連の設定
#[derive(Debug, Clone, PartialEq)]
pub struct ZennSettings {
    /// slug の接頭辞 (後ろに YYYYMMDD が付く)
    pub slug_prefix: String,
    /// 旧方式の `zenn new:article` を実行するか
    pub use_cli: bool,
    /// `zenn new:article --title` に渡すタイトル
    pub cli_title: String,
    pub remote: Option<String>,
    pub branch: Option<String>,
}

impl Default for ZennSettings {
    fn default() -> Self {
        Self {
            slug_prefix: DEFAULT_SLUG_PREFIX.to_string(),
            use_cli: false,
            cli_title: DEFAULT_CLI_TITLE.to_string(),
            remote: None,
            branch: None,
        }
    }
}

impl ZennSettings {
    fn from_section(section: Option<&Properties>) -> Self {
        let defaults = Self::default();
        Self {
            slug_prefix: value(section, "SLUG_PREFIX").unwrap_or(defaults.slug_prefix),
            use_cli: value(section, "USE_CLI").is_some_and(|v| v.eq_ignore_ascii_case("true")),
            cli_title: value(section, "CLI_TITLE").unwrap_or(defaults.cli_title),
            remote: value(section, "REMOTE"),
            branch: value(section, "BRANCH"),
        }
    }
}

/// 起動時に一度だけ読み込まれる設定
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub devto_api_key: Option<String>,
    pub zenn: ZennSettings,
}

impl Config {
    /// 設定ファイルを読み込む。ファイルが存在しない場合は致命的エラー
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::ConfigMissing(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::parse(&text).map_err(|e| AppError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::info!(
            "設定を読み込みました: {:?} (Dev.to API キー: {})",
            path,
            if config.devto_api_key.is_some() { "あり" } else { "なし" }
        );
        Ok(config)
    }

    /// INI 形式のテキストから設定を構築
    ///
    /// セクション名は大文字小文字を区別し、キーは区別しない。
    pub fn parse(text: &str) -> std::result::Result<Self, ini::ParseError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        // Windows のパスを値に書けるようエスケープ解釈は無効
        let option = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(text, option)?;

        Ok(Self {
            devto_api_key: value(ini.section(Some("DEVTO")), "API_KEY"),
            zenn: ZennSettings::from_section(ini.section(Some("ZENN"))),
        })
    }

    /// 環境変数の API キーで上書き
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            let key = key.trim();
            if !key.is_empty() {
                tracing::debug!("{} の API キーを使用します", API_KEY_ENV);
                self.devto_api_key = Some(key.to_string());
            }
        }
        self
    }
}

/// セクション内の値を取得 (空文字列は未設定扱い)
fn value(section: Option<&Properties>, key: &str) -> Option<String> {
    section?
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.trim())
        .last()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
