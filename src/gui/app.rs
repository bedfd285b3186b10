//! メインアプリケーションウィンドウ

use crate::command::SystemCommandRunner;
use crate::config::{AppPaths, Config};
use crate::error::AppError;
use crate::publish::{
    DevToClient, DevToPublisher, PublishOutcome, PublishTarget, Publisher, ZennPublisher,
};
use crate::template::TemplateStore;
use anyhow::{Context, Result};
use eframe::egui;
use egui::{CentralPanel, RichText, TopBottomPanel, Vec2};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use super::dialog::{DialogConfirm, ask_yes_no, show_error, show_info, show_warning};
use super::theme::{Colors, dark_theme, install_japanese_fonts};

const APP_TITLE: &str = "Project Apostle v2.0";

/// アプリケーション状態
pub struct ApostleApp {
    /// Tokioランタイム (Dev.to への送信を block_on で待つ)
    runtime: Runtime,
    templates: TemplateStore,
    /// テンプレートファイル名一覧
    template_names: Vec<String>,
    selected_template: Option<String>,
    /// 編集中の記事
    editor: String,
    target: PublishTarget,
    publisher: Publisher,
    /// ステータスメッセージ
    status: String,
    /// 最後に生成した記事ファイル
    last_article: Option<PathBuf>,
}

impl ApostleApp {
    pub fn new(paths: &AppPaths, config: Config) -> Result<Self> {
        let runtime = Runtime::new().context("Tokioランタイムの作成に失敗")?;
        let templates = TemplateStore::new(paths.templates_dir());

        let template_names = match templates.list_templates() {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!("テンプレート一覧の取得に失敗: {}", e);
                show_error("エラー", &e.to_string());
                Vec::new()
            }
        };

        let zenn = ZennPublisher::new(SystemCommandRunner, paths.zenn_repo_dir(), config.zenn);
        let devto = DevToPublisher::new(DevToClient::new(), config.devto_api_key);

        Ok(Self {
            runtime,
            templates,
            template_names,
            selected_template: None,
            editor: String::new(),
            target: PublishTarget::default(),
            publisher: Publisher::new(zenn, devto),
            status: "テンプレートを選択して開始".to_string(),
            last_article: None,
        })
    }

    /// 選択されたテンプレートをエディタに読み込む
    fn load_template(&mut self, name: String) {
        match apply_template(&mut self.editor, self.templates.load_template(&name)) {
            Ok(()) => {
                self.status = format!("'{}' を読み込みました", name);
                show_info("読み込み完了", &format!("'{}'を読み込みました。", name));
                self.selected_template = Some(name);
            }
            Err(e) => {
                self.status = "テンプレートの読み込みに失敗しました".to_string();
                show_error(
                    "エラー",
                    &format!("テンプレートの読み込みに失敗しました:\n{}", e),
                );
            }
        }
    }

    fn reload_templates(&mut self) {
        match self.templates.list_templates() {
            Ok(names) => {
                self.status = format!("{} 件のテンプレート", names.len());
                self.template_names = names;
            }
            Err(e) => show_error("エラー", &e.to_string()),
        }
    }

    /// 記事ファイルのみ生成
    fn generate_article_file(&mut self) {
        match self.publisher.zenn().generate(&self.editor) {
            Ok(path) => {
                self.status = format!("生成完了: {}", path.display());
                show_info(
                    "生成完了",
                    &format!(
                        "Zennの記事ファイルを以下に生成しました:\n{}\n\nプレビューで内容を確認してください。",
                        path.display()
                    ),
                );
                self.last_article = Some(path);
            }
            Err(e) => self.report_error(e),
        }
    }

    /// 選択中の公開先へ公開
    fn publish(&mut self) {
        let result = self
            .runtime
            .block_on(self.publisher.publish(self.target, &self.editor, &DialogConfirm));

        match result {
            Ok(PublishOutcome::Cancelled) => {
                self.status = "公開を中止しました".to_string();
            }
            Ok(PublishOutcome::Zenn { path }) => {
                self.status = format!("Zenn へ公開しました: {}", path.display());
                show_info(
                    "公開完了",
                    &format!("記事を commit / push しました:\n{}", path.display()),
                );
                self.last_article = Some(path);
            }
            Ok(PublishOutcome::DevTo { url }) => {
                self.status = format!("Dev.to へ投稿しました: {}", url);
                let message = format!("Dev.to に投稿しました:\n{}\n\nブラウザで開きますか？", url);
                if ask_yes_no("投稿完了", &message) {
                    if let Err(e) = open::that(&url) {
                        tracing::warn!("URL を開けませんでした: {}", e);
                    }
                }
            }
            Err(e) => self.report_error(e),
        }
    }

    /// エラーをダイアログで通知
    fn report_error(&mut self, error: AppError) {
        tracing::warn!("{}", error);
        self.status = "エラーが発生しました".to_string();
        match &error {
            AppError::EmptyContent => show_warning("警告", &error.to_string()),
            AppError::ToolNotFound { .. } | AppError::ExternalTool { .. } => {
                show_error("外部コマンドエラー", &error.to_string())
            }
            AppError::Network(_) | AppError::Api { .. } | AppError::UnexpectedResponse(_) => {
                show_error("Dev.to エラー", &error.to_string())
            }
            _ => show_error("エラー", &error.to_string()),
        }
    }
}

impl eframe::App for ApostleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ステータスバー
        TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(
                RichText::new(&self.status)
                    .size(13.0)
                    .color(Colors::TEXT_SECONDARY),
            );
        });

        let mut chosen_template: Option<String> = None;
        let mut action: Option<Action> = None;

        CentralPanel::default().show(ctx, |ui| {
            ui.spacing_mut().item_spacing = Vec2::new(8.0, 10.0);

            // 1. テンプレート選択
            ui.group(|ui| {
                ui.label(
                    RichText::new("1. テンプレート選択").color(Colors::TEXT_PRIMARY),
                );
                ui.horizontal(|ui| {
                    let selected = self.selected_template.as_deref().unwrap_or("(未選択)");
                    egui::ComboBox::from_id_salt("template")
                        .selected_text(selected)
                        .width(ui.available_width() - 80.0)
                        .show_ui(ui, |ui| {
                            for name in &self.template_names {
                                let is_selected =
                                    self.selected_template.as_ref() == Some(name);
                                if ui.selectable_label(is_selected, name).clicked() {
                                    chosen_template = Some(name.clone());
                                }
                            }
                        });
                    if ui.button("🔄 更新").clicked() {
                        action = Some(Action::ReloadTemplates);
                    }
                });
            });

            // 3. 公開実行 (エディタより先に下端へ配置)
            egui::TopBottomPanel::bottom("actions")
                .frame(egui::Frame::new().inner_margin(egui::Margin::symmetric(0, 6)))
                .show_inside(ui, |ui| {
                    ui.group(|ui| {
                        ui.label(RichText::new("3. 公開実行").color(Colors::TEXT_PRIMARY));
                        ui.horizontal(|ui| {
                            for target in PublishTarget::ALL {
                                ui.radio_value(&mut self.target, target, target.to_string());
                            }
                            if self.target == PublishTarget::DevTo
                                && !self.publisher.devto().has_api_key()
                            {
                                ui.label(
                                    RichText::new("⚠ API キー未設定")
                                        .color(Colors::TEXT_SECONDARY),
                                );
                            }
                        });
                        ui.horizontal(|ui| {
                            if ui.button("Zenn用記事ファイルとして生成").clicked() {
                                action = Some(Action::Generate);
                            }
                            let open_folder = egui::Button::new("📁 フォルダを開く");
                            if ui
                                .add_enabled(self.last_article.is_some(), open_folder)
                                .clicked()
                            {
                                action = Some(Action::OpenFolder);
                            }

                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                let color = match self.target {
                                    PublishTarget::Zenn => Colors::ZENN,
                                    PublishTarget::DevTo => Colors::DEVTO,
                                };
                                let label = RichText::new(format!("{} へ公開", self.target))
                                    .color(Colors::TEXT_PRIMARY);
                                if ui.add(egui::Button::new(label).fill(color)).clicked() {
                                    action = Some(Action::Publish);
                                }
                            });
                        });
                    });
                });

            // 2. 最終編集
            ui.label(RichText::new("2. 最終編集").color(Colors::TEXT_PRIMARY));
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add_sized(
                        ui.available_size(),
                        egui::TextEdit::multiline(&mut self.editor)
                            .code_editor()
                            .desired_width(f32::INFINITY),
                    );
                });
        });

        // ダイアログはフレーム描画の外で出す
        if let Some(name) = chosen_template {
            self.load_template(name);
        }
        match action {
            Some(Action::ReloadTemplates) => self.reload_templates(),
            Some(Action::Generate) => self.generate_article_file(),
            Some(Action::Publish) => self.publish(),
            Some(Action::OpenFolder) => {
                let folder = self.publisher.zenn().articles_dir();
                if let Err(e) = open::that(&folder) {
                    tracing::warn!("フォルダを開けませんでした: {:?}: {}", folder, e);
                }
            }
            None => {}
        }
    }
}

/// 読み込み結果をエディタに反映 (失敗時はエディタを変更しない)
fn apply_template(
    editor: &mut String,
    loaded: crate::error::Result<String>,
) -> crate::error::Result<()> {
    *editor = loaded?;
    Ok(())
}

/// 起動時の設定読み込み。失敗した場合はメインウィンドウを作らない
fn startup(paths: &AppPaths) -> crate::error::Result<Config> {
    Config::load(paths.config_file()).map(Config::with_env_overrides)
}

/// ボタン操作
enum Action {
    ReloadTemplates,
    Generate,
    Publish,
    OpenFolder,
}

/// アプリケーションを起動
///
/// 設定ファイルが無い場合はエラーを通知し、メインウィンドウを開かずに終了する。
pub fn run() -> Result<()> {
    let paths = AppPaths::from_env().context("基準ディレクトリの取得に失敗")?;

    let config = match startup(&paths) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            show_error("設定エラー", &format!("{}\n\nアプリケーションを終了します。", e));
            return Err(e.into());
        }
    };

    let app = ApostleApp::new(&paths, config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([600.0, 450.0])
            .with_title(APP_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_style(dark_theme());
            install_japanese_fonts(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("アプリケーションエラー: {}", e))
}
