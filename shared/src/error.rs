//! 客户端错误与文案
//!
//! 校验错误、传输错误和它们到界面文案键的映射。

use std::collections::HashMap;

use thiserror::Error;

// =========================================================
// 错误类型
// =========================================================

/// 上传表单的本地校验错误
///
/// 在任何网络请求之前产生，直接显示在表单上。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no image file selected")]
    MissingFile,
    #[error("image note is empty")]
    MissingNote,
}

impl ValidationError {
    /// 表单提示对应的文案键
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationError::MissingFile => "image.missingfile",
            ValidationError::MissingNote => "image.missingnote",
        }
    }
}

/// 图片接口调用失败
///
/// `status` 为空表示请求根本没有得到响应（网络错误、请求构建失败）。
/// `message` 保存服务端返回的原始文本。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.render())]
pub struct TransportError {
    pub status: Option<u16>,
    pub message: String,
}

impl TransportError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// 把服务端错误文本规范化为文案键：
    /// 小写后去掉所有非 `a-z` 字符，加上 `error.` 前缀。
    pub fn error_key(&self) -> String {
        error_key(&self.message)
    }

    fn render(&self) -> String {
        match self.status {
            Some(status) => format!("HTTP {}: {}", status, self.message),
            None => format!("network error: {}", self.message),
        }
    }
}

/// 客户端核心的统一错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// 没有可用的 token，由路由重定向到登录页处理
    #[error("no active session")]
    SessionMissing,
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClientError {
    /// 是否需要弹出提示。`SessionMissing` 只触发重定向。
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, ClientError::SessionMissing)
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

pub fn error_key(raw: &str) -> String {
    let normalized: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();
    format!("error.{}", normalized)
}

// =========================================================
// 错误文案表
// =========================================================

/// 错误文案查找表
///
/// 只负责“键 -> 文案”的映射和回退逻辑，不做完整的本地化。
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    entries: HashMap<String, String>,
}

pub const KEY_ERROR_PREFIX: &str = "error.error";

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(key, text);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// 查找键，找不到时原样返回键本身
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    /// 服务端原始错误文本的显示文案：先查规范化后的键，查不到就用原文。
    pub fn server_message<'a>(&'a self, raw: &'a str) -> &'a str {
        self.get(&error_key(raw)).unwrap_or(raw)
    }

    /// 生成提示给用户的完整文案
    pub fn describe(&self, err: &ClientError) -> String {
        let detail = match err {
            ClientError::SessionMissing => self.text("error.sessionmissing").to_string(),
            ClientError::Transport(e) => self.server_message(&e.message).to_string(),
            ClientError::Validation(e) => self.text(e.message_key()).to_string(),
        };
        format!("{}: {}", self.text(KEY_ERROR_PREFIX), detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_key_normalization() {
        assert_eq!(error_key("File too large!"), "error.filetoolarge");
        assert_eq!(error_key("Invalid entity ID 42"), "error.invalidentityid");
        assert_eq!(error_key(""), "error.");
        assert_eq!(error_key("Ääkköset ok"), "error.kksetok");
    }

    #[test]
    fn test_server_message_mapped() {
        let catalog = MessageCatalog::new().with("error.filetoolarge", "The file is too large");
        assert_eq!(catalog.server_message("File too large"), "The file is too large");
    }

    #[test]
    fn test_server_message_falls_back_to_raw() {
        let catalog = MessageCatalog::new();
        assert_eq!(catalog.server_message("Unexpected thing"), "Unexpected thing");
    }

    #[test]
    fn test_describe_transport_error() {
        let catalog = MessageCatalog::new()
            .with(KEY_ERROR_PREFIX, "Error")
            .with("error.invalidnote", "Note is not valid");
        let err = ClientError::from(TransportError::http(400, "Invalid note"));
        assert_eq!(catalog.describe(&err), "Error: Note is not valid");

        let err = ClientError::from(TransportError::http(500, "db down"));
        assert_eq!(catalog.describe(&err), "Error: db down");
    }

    #[test]
    fn test_describe_validation_error() {
        let catalog = MessageCatalog::new()
            .with(KEY_ERROR_PREFIX, "Error")
            .with("image.missingfile", "Select an image");
        let err = ClientError::from(ValidationError::MissingFile);
        assert_eq!(catalog.describe(&err), "Error: Select an image");
    }

    #[test]
    fn test_session_missing_is_not_user_facing() {
        assert!(!ClientError::SessionMissing.is_user_facing());
        assert!(ClientError::from(ValidationError::MissingNote).is_user_facing());
    }

    #[test]
    fn test_transport_display() {
        assert_eq!(
            TransportError::http(404, "not found").to_string(),
            "HTTP 404: not found"
        );
        assert_eq!(
            TransportError::network("offline").to_string(),
            "network error: offline"
        );
    }
}
