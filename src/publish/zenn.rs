//! Zenn 公開 - 記事ファイル生成と git add / commit / push

use super::{Confirm, PublishOutcome};
use crate::command::{
    CommandOutput, CommandRunner, SystemCommandRunner, display_command, shell_invocation,
};
use crate::config::ZennSettings;
use crate::error::{AppError, Result};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

/// Zenn の記事ディレクトリ名
const ARTICLES_DIR: &str = "articles";

/// 日付から slug を生成 (接頭辞 + YYYYMMDD)
pub fn slug_for(prefix: &str, date: NaiveDate) -> String {
    format!("{}{}", prefix, date.format("%Y%m%d"))
}

/// コミットメッセージ
pub fn commit_message(date: NaiveDate) -> String {
    format!("Publish article: {}", date.format("%Y-%m-%d"))
}

/// 改行を LF に統一し、末尾をちょうど 1 つの改行で終える
fn normalize_newlines(content: &str) -> String {
    let mut text = content.replace("\r\n", "\n").replace('\r', "\n");
    text.truncate(text.trim_end().len());
    text.push('\n');
    text
}

/// Zenn リポジトリへの公開
pub struct ZennPublisher<R = SystemCommandRunner> {
    runner: R,
    repo_dir: PathBuf,
    settings: ZennSettings,
}

impl<R: CommandRunner> ZennPublisher<R> {
    pub fn new(runner: R, repo_dir: impl Into<PathBuf>, settings: ZennSettings) -> Self {
        Self {
            runner,
            repo_dir: repo_dir.into(),
            settings,
        }
    }

    pub fn articles_dir(&self) -> PathBuf {
        self.repo_dir.join(ARTICLES_DIR)
    }

    /// 記事ファイルのみ生成 (git は実行しない)
    pub fn generate(&self, content: &str) -> Result<PathBuf> {
        self.generate_on(Local::now().date_naive(), content)
    }

    /// 確認のうえ記事ファイルを生成し、git で push する
    pub fn publish(&self, content: &str, confirm: &dyn Confirm) -> Result<PublishOutcome> {
        self.publish_on(Local::now().date_naive(), content, confirm)
    }

    fn generate_on(&self, date: NaiveDate, content: &str) -> Result<PathBuf> {
        if content.trim().is_empty() {
            return Err(AppError::EmptyContent);
        }

        let slug = slug_for(&self.settings.slug_prefix, date);
        tracing::info!("slug: {}", slug);

        if self.settings.use_cli {
            let args = vec![
                "new:article".to_string(),
                "--slug".to_string(),
                slug.clone(),
                "--title".to_string(),
                self.settings.cli_title.clone(),
            ];
            let (program, args) = shell_invocation("zenn", &args);
            self.run_step(&program, &args)?;
        }

        let dir = self.articles_dir();
        let path = dir.join(format!("{}.md", slug));
        let to_error = |source| AppError::ArticleWrite {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(&dir).map_err(to_error)?;
        std::fs::write(&path, normalize_newlines(content)).map_err(to_error)?;

        tracing::info!("記事ファイルを生成しました: {:?}", path);
        Ok(path)
    }

    fn publish_on(
        &self,
        date: NaiveDate,
        content: &str,
        confirm: &dyn Confirm,
    ) -> Result<PublishOutcome> {
        if content.trim().is_empty() {
            return Err(AppError::EmptyContent);
        }

        let message = format!(
            "記事ファイルを生成し、Zenn リポジトリに commit / push します。\n\n{}\n\nよろしいですか？",
            self.repo_dir.display()
        );
        if !confirm.confirm("Zenn へ公開", &message) {
            tracing::info!("Zenn への公開を中止しました");
            return Ok(PublishOutcome::Cancelled);
        }

        let path = self.generate_on(date, content)?;

        // 途中で失敗しても、それまでの commit などは巻き戻さない
        self.run_step("git", &["add".to_string(), ".".to_string()])?;
        self.run_step(
            "git",
            &["commit".to_string(), "-m".to_string(), commit_message(date)],
        )?;
        self.run_step("git", &self.push_args())?;

        tracing::info!("Zenn へ push しました");
        Ok(PublishOutcome::Zenn { path })
    }

    fn push_args(&self) -> Vec<String> {
        let mut args = vec!["push".to_string()];
        if let (Some(remote), Some(branch)) = (&self.settings.remote, &self.settings.branch) {
            args.push(remote.clone());
            args.push(branch.clone());
        }
        args
    }

    /// コマンドを 1 つ実行し、終了コード 0 以外はエラーにする
    fn run_step(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let command = display_command(program, args);
        tracing::info!("実行: {}", command);

        let output = self
            .runner
            .run(program, args, &self.repo_dir)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => AppError::ToolNotFound {
                    program: program.to_string(),
                },
                _ => AppError::ExternalTool {
                    command: command.clone(),
                    output: e.to_string(),
                },
            })?;

        if !output.success {
            tracing::warn!("{} が失敗しました: {}", command, output.error_text());
            return Err(AppError::ExternalTool {
                command,
                output: output.error_text(),
            });
        }

        Ok(output)
    }
}
