//! Apostle - Markdown テンプレートから Zenn / Dev.to へ記事を公開するツール
//!
//! # 機能
//! - templates ディレクトリのテンプレートを選択して編集
//! - Zenn: 記事ファイルを生成し git add / commit / push
//! - Dev.to: フロントマターからタイトル等を読み取り API で投稿

pub mod command;
pub mod config;
pub mod error;
pub mod front_matter;
pub mod gui;
pub mod publish;
pub mod template;

pub use error::{AppError, Result};
pub use front_matter::{FrontMatter, ParsedDocument};
pub use publish::{PublishOutcome, PublishTarget, Publisher};
