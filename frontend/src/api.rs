use async_trait::async_trait;
use slowers_shared::transport::{
    FIELD_ENTITY, FIELD_IMAGE, FIELD_NOTE, HEADER_AUTHORIZATION, LOGIN_PATH,
};
use slowers_shared::{
    ClientConfig, ClientError, ClientResult, Image, ImageEndpoint, ImageTransport, LoginRequest,
    LoginResponse, TransportError, UploadDraft,
};
use web_sys::{File, FormData};

use crate::web::{HttpClient, HttpError, ObjectUrl};

/// 后端 API 客户端
///
/// 持有配置和当前会话的 token，克隆成本低，可以随时按最新会话重新创建。
#[derive(Clone, Debug, PartialEq)]
pub struct SlowersApi {
    config: ClientConfig,
    token: Option<String>,
}

impl SlowersApi {
    pub fn new(config: ClientConfig, token: Option<String>) -> Self {
        Self { config, token }
    }

    fn url(&self, path: &str) -> String {
        self.config.url(path)
    }

    // 认证头，token 缺失时不发请求
    fn auth_header(&self) -> ClientResult<(&str, &str)> {
        match self.token.as_deref() {
            Some(token) => Ok((HEADER_AUTHORIZATION, token)),
            None => Err(ClientError::SessionMissing),
        }
    }

    fn decode<T: serde::de::DeserializeOwned>(body: &str) -> ClientResult<T> {
        serde_json_wasm::from_str(body)
            .map_err(|e| HttpError::ResponseParseFailed(e.to_string()).into())
    }

    /// 登录，成功后返回后端签发的 token 和角色
    pub async fn login(&self, req: &LoginRequest) -> ClientResult<LoginResponse> {
        let body = serde_json_wasm::to_string(req)
            .map_err(|e| HttpError::RequestBuildFailed(e.to_string()))?;

        let res = HttpClient::post(&self.url(LOGIN_PATH))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?
            .error_for_status()
            .await?;

        Self::decode(&res.text().await?)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: ImageEndpoint<'_>,
    ) -> ClientResult<T> {
        let (key, value) = self.auth_header()?;
        let res = HttpClient::request(endpoint.method(), &self.url(&endpoint.path()))
            .header(key, value)
            .send()
            .await?
            .error_for_status()
            .await?;

        Self::decode(&res.text().await?)
    }

    async fn send_empty(&self, endpoint: ImageEndpoint<'_>) -> ClientResult<()> {
        let (key, value) = self.auth_header()?;
        HttpClient::request(endpoint.method(), &self.url(&endpoint.path()))
            .header(key, value)
            .send()
            .await?
            .error_for_status()
            .await?;
        Ok(())
    }
}

fn form_error(e: wasm_bindgen::JsValue) -> ClientError {
    TransportError::network(format!("build multipart body: {:?}", e)).into()
}

#[async_trait(?Send)]
impl ImageTransport for SlowersApi {
    type File = File;
    type ObjectUrl = ObjectUrl;

    /// 获取原始图片并包装为 Object URL
    async fn fetch(&self, filename: &str) -> ClientResult<ObjectUrl> {
        let (key, value) = self.auth_header()?;
        let endpoint = ImageEndpoint::Fetch { filename };
        let res = HttpClient::get(&self.url(&endpoint.path()))
            .header(key, value)
            .send()
            .await?
            .error_for_status()
            .await?;

        let blob = res.blob().await?;
        Ok(ObjectUrl::from_blob(&blob)?)
    }

    /// multipart 上传：`note`、`entity`、`image` 三个字段
    async fn create(&self, draft: UploadDraft<File>) -> ClientResult<Image> {
        let (key, value) = self.auth_header()?;

        let form = FormData::new().map_err(form_error)?;
        form.append_with_str(FIELD_NOTE, &draft.note).map_err(form_error)?;
        form.append_with_str(FIELD_ENTITY, &draft.entity_id).map_err(form_error)?;
        form.append_with_blob_and_filename(FIELD_IMAGE, &draft.file, &draft.file.name())
            .map_err(form_error)?;

        let endpoint = ImageEndpoint::Create;
        let res = HttpClient::request(endpoint.method(), &self.url(&endpoint.path()))
            .header(key, value)
            .form(form)
            .send()
            .await?
            .error_for_status()
            .await?;

        Self::decode(&res.text().await?)
    }

    async fn list_by_entity(&self, entity_id: &str) -> ClientResult<Vec<Image>> {
        self.send_json(ImageEndpoint::ListByEntity { entity_id }).await
    }

    async fn delete(&self, image_id: &str) -> ClientResult<()> {
        self.send_empty(ImageEndpoint::Delete { image_id }).await
    }

    async fn set_favorite(&self, image: &Image) -> ClientResult<()> {
        self.send_empty(ImageEndpoint::SetFavorite {
            image_id: &image.id,
        })
        .await
    }
}
