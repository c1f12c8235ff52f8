//! 界面文案
//!
//! 只包含核心流程用到的英文文案，错误文案键由服务端错误文本规范化而来。

use leptos::prelude::*;
use slowers_shared::MessageCatalog;
use slowers_shared::error::KEY_ERROR_PREFIX;

pub fn default_catalog() -> MessageCatalog {
    MessageCatalog::new()
        .with(KEY_ERROR_PREFIX, "Error")
        .with("error.sessionmissing", "Please log in again")
        .with("error.invalidcredentials", "Wrong email or password")
        .with("error.filetoolarge", "The image file is too large")
        .with("error.invalidimageformat", "Unsupported image format")
        .with("image.missingfile", "Select an image file")
        .with("image.missingnote", "Write a note for the image")
        .with("image.nositeimages", "This site has no images yet")
        .with("image.noflowerimages", "This flower has no images yet")
        .with("image.uploaded", "Image uploaded")
        .with("image.deleted", "Image deleted")
        .with("image.select", "Select image")
        .with("image.note", "Note")
        .with("button.save", "Save")
}

/// 从 Context 获取文案表
pub fn use_messages() -> StoredValue<MessageCatalog> {
    use_context::<StoredValue<MessageCatalog>>().expect("MessageCatalog should be provided")
}

/// 查找文案，找不到时返回键本身
pub fn t(key: &str) -> String {
    use_messages().with_value(|catalog| catalog.text(key).to_string())
}
