//! 公開処理 - 公開先ごとのパブリッシャーへの振り分け

pub mod devto;
pub mod zenn;

pub use devto::{DevToClient, DevToPublisher};
pub use zenn::ZennPublisher;

use crate::command::{CommandRunner, SystemCommandRunner};
use crate::error::Result;
use std::fmt;
use std::path::PathBuf;

/// 公開先
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishTarget {
    #[default]
    Zenn,
    DevTo,
}

impl PublishTarget {
    pub const ALL: [PublishTarget; 2] = [PublishTarget::Zenn, PublishTarget::DevTo];
}

impl fmt::Display for PublishTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishTarget::Zenn => write!(f, "Zenn"),
            PublishTarget::DevTo => write!(f, "Dev.to"),
        }
    }
}

/// 公開処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// ユーザーが確認ダイアログで中止した
    Cancelled,
    /// 記事ファイルを生成し push まで完了した
    Zenn { path: PathBuf },
    /// Dev.to に記事が作成された
    DevTo { url: String },
}

/// はい/いいえの確認
pub trait Confirm {
    fn confirm(&self, title: &str, message: &str) -> bool;
}

/// 公開先に応じてパブリッシャーを呼び分ける
pub struct Publisher<R = SystemCommandRunner> {
    zenn: ZennPublisher<R>,
    devto: DevToPublisher,
}

impl<R: CommandRunner> Publisher<R> {
    pub fn new(zenn: ZennPublisher<R>, devto: DevToPublisher) -> Self {
        Self { zenn, devto }
    }

    pub fn zenn(&self) -> &ZennPublisher<R> {
        &self.zenn
    }

    pub fn devto(&self) -> &DevToPublisher {
        &self.devto
    }

    pub async fn publish(
        &self,
        target: PublishTarget,
        content: &str,
        confirm: &dyn Confirm,
    ) -> Result<PublishOutcome> {
        tracing::info!("公開先: {}", target);
        match target {
            PublishTarget::Zenn => self.zenn.publish(content, confirm),
            PublishTarget::DevTo => self.devto.publish(content, confirm).await,
        }
    }
}
