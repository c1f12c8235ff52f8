//! 图片接口的传输层契约
//!
//! `ImageEndpoint` 描述每个接口的方法和路径，`ImageTransport` 是控制器依赖的抽象，
//! 浏览器实现位于前端 crate，测试中使用 mock。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ClientResult;
use crate::image::{Image, UploadDraft};
use crate::session::Role;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// 认证头名称。后端直接读取原始 token。
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// multipart 表单字段名
pub const FIELD_NOTE: &str = "note";
pub const FIELD_ENTITY: &str = "entity";
pub const FIELD_IMAGE: &str = "image";

// =========================================================
// Endpoint Definitions
// =========================================================

/// 图片接口
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageEndpoint<'a> {
    /// 获取单张原始图片
    Fetch { filename: &'a str },
    /// multipart 上传
    Create,
    /// 列出实体的全部图片
    ListByEntity { entity_id: &'a str },
    Delete { image_id: &'a str },
    SetFavorite { image_id: &'a str },
}

impl ImageEndpoint<'_> {
    pub fn method(&self) -> HttpMethod {
        match self {
            Self::Fetch { .. } | Self::ListByEntity { .. } => HttpMethod::Get,
            Self::Create | Self::SetFavorite { .. } => HttpMethod::Post,
            Self::Delete { .. } => HttpMethod::Delete,
        }
    }

    /// 相对于 API 根地址的路径
    pub fn path(&self) -> String {
        match self {
            Self::Fetch { filename } => format!("/images/{}", filename),
            Self::Create => "/images".to_string(),
            Self::ListByEntity { entity_id } => format!("/images/entity/{}", entity_id),
            Self::Delete { image_id } => format!("/images/{}", image_id),
            Self::SetFavorite { image_id } => format!("/images/{}/favorite", image_id),
        }
    }
}

// =========================================================
// 认证接口的数据结构
// =========================================================

pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 登录成功后后端签发的凭据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// 保留原始字符串，无法识别的角色由落地页规则兜底
    #[serde(default)]
    pub role: String,
}

impl LoginResponse {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}

// =========================================================
// 传输抽象
// =========================================================

/// 图片传输层
///
/// 每个调用都携带会话 token；token 缺失时返回 `ClientError::SessionMissing`，不发请求。
/// 非 2xx 响应返回携带原始响应文本的 `TransportError`，不做重试。
#[async_trait(?Send)]
pub trait ImageTransport {
    /// 平台文件句柄
    type File;
    /// 可在本地引用的图片地址，释放时必须回收
    type ObjectUrl;

    async fn fetch(&self, filename: &str) -> ClientResult<Self::ObjectUrl>;
    async fn create(&self, draft: UploadDraft<Self::File>) -> ClientResult<Image>;
    async fn list_by_entity(&self, entity_id: &str) -> ClientResult<Vec<Image>>;
    async fn delete(&self, image_id: &str) -> ClientResult<()>;
    async fn set_favorite(&self, image: &Image) -> ClientResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_table() {
        let cases = [
            (
                ImageEndpoint::Fetch { filename: "a.png" },
                HttpMethod::Get,
                "/images/a.png",
            ),
            (ImageEndpoint::Create, HttpMethod::Post, "/images"),
            (
                ImageEndpoint::ListByEntity { entity_id: "e1" },
                HttpMethod::Get,
                "/images/entity/e1",
            ),
            (
                ImageEndpoint::Delete { image_id: "i1" },
                HttpMethod::Delete,
                "/images/i1",
            ),
            (
                ImageEndpoint::SetFavorite { image_id: "i1" },
                HttpMethod::Post,
                "/images/i1/favorite",
            ),
        ];

        for (endpoint, method, path) in cases {
            assert_eq!(endpoint.method(), method);
            assert_eq!(endpoint.path(), path);
        }
    }

    #[test]
    fn test_login_response_role() {
        let res: LoginResponse = serde_json::from_str(r#"{"token":"t","role":"retailer"}"#).unwrap();
        assert_eq!(res.role(), Some(Role::Retailer));

        let res: LoginResponse = serde_json::from_str(r#"{"token":"t"}"#).unwrap();
        assert_eq!(res.role(), None);
    }
}
