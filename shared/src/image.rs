//! 图片模型
//!
//! 字段名按后端 JSON 重命名：`_id`、`entity`。

use serde::{Deserialize, Serialize};

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 拥有图片的实体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Site,
    Flower,
}

impl EntityKind {
    /// 图库为空时的提示文案键
    pub fn empty_gallery_key(&self) -> &'static str {
        match self {
            EntityKind::Site => "image.nositeimages",
            EntityKind::Flower => "image.noflowerimages",
        }
    }
}

/// 后端返回的图片元数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "entity")]
    pub entity_id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub favorite: bool,
}

impl Image {
    /// 取图片接口使用的文件名（url 的最后一段）
    pub fn filename(&self) -> &str {
        self.url
            .rsplit('/')
            .find(|s| !s.is_empty())
            .unwrap_or(&self.id)
    }
}

/// 待上传的图片草稿
///
/// `F` 为平台相关的文件句柄。草稿只存在于表单提交和接口调用之间。
#[derive(Debug, Clone, PartialEq)]
pub struct UploadDraft<F> {
    pub file: F,
    pub note: String,
    pub entity_id: String,
}

impl<F> UploadDraft<F> {
    pub fn new(file: F, note: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            file,
            note: note.into(),
            entity_id: entity_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_wire_format() {
        let raw = r#"{"_id":"img1","entity":"site9","url":"/api/images/img1.png","note":"north field"}"#;
        let image: Image = serde_json::from_str(raw).unwrap();
        assert_eq!(image.id, "img1");
        assert_eq!(image.entity_id, "site9");
        assert_eq!(image.note, "north field");
        // 缺失的 favorite 默认为 false
        assert!(!image.favorite);

        let value = serde_json::to_value(&image).unwrap();
        assert_eq!(value["_id"], "img1");
        assert_eq!(value["entity"], "site9");
        assert_eq!(value["favorite"], false);
    }

    #[test]
    fn test_filename_from_url() {
        let mut image = Image {
            id: "img1".into(),
            entity_id: "e".into(),
            url: "/api/images/img1.jpg".into(),
            note: String::new(),
            favorite: false,
        };
        assert_eq!(image.filename(), "img1.jpg");

        image.url = "img2.png/".into();
        assert_eq!(image.filename(), "img2.png");

        image.url.clear();
        assert_eq!(image.filename(), "img1");
    }

    #[test]
    fn test_empty_gallery_keys() {
        assert_eq!(EntityKind::Flower.empty_gallery_key(), "image.noflowerimages");
        assert_eq!(EntityKind::Site.empty_gallery_key(), "image.nositeimages");
    }
}
