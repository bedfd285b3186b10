//! GUI - egui によるテンプレート選択・編集・公開画面

mod app;
mod dialog;
mod theme;

pub use app::{ApostleApp, run};
