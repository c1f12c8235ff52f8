//! Object URL 封装模块
//!
//! 把 Blob 包装为可直接放进 `<img src>` 的本地地址。
//! `ObjectUrl` 被 drop 时自动调用 `URL.revokeObjectURL` 回收。

use web_sys::{Blob, Url};

use super::http::HttpError;

/// 本地 Object URL 句柄
#[derive(Debug, PartialEq, Eq)]
pub struct ObjectUrl {
    url: String,
}

impl ObjectUrl {
    /// 为 Blob 创建 Object URL
    pub fn from_blob(blob: &Blob) -> Result<Self, HttpError> {
        let url = Url::create_object_url_with_blob(blob)
            .map_err(|e| HttpError::ResponseParseFailed(format!("create object url: {:?}", e)))?;
        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        let _ = Url::revoke_object_url(&self.url);
    }
}
