//! ネイティブダイアログ (rfd)

use crate::publish::Confirm;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

pub fn show_info(title: &str, message: &str) {
    show(MessageLevel::Info, title, message);
}

pub fn show_warning(title: &str, message: &str) {
    show(MessageLevel::Warning, title, message);
}

pub fn show_error(title: &str, message: &str) {
    show(MessageLevel::Error, title, message);
}

fn show(level: MessageLevel, title: &str, message: &str) {
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

/// はい/いいえダイアログ
pub fn ask_yes_no(title: &str, message: &str) -> bool {
    let result = MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::YesNo)
        .show();
    matches!(result, MessageDialogResult::Yes)
}

/// 公開前の確認をダイアログで行う
pub struct DialogConfirm;

impl Confirm for DialogConfirm {
    fn confirm(&self, title: &str, message: &str) -> bool {
        ask_yes_no(title, message)
    }
}
