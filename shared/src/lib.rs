//! Slowers 客户端核心
//!
//! 与平台无关的领域逻辑：
//! - `session`: 会话存储（token + 角色）
//! - `route`: 路由定义、访问守卫、默认落地页
//! - `collection`: 图片集合控制器（单一收藏图不变量）
//! - `transport`: 图片接口契约
//! - `upload` / `gallery`: 上传表单与图库布局

pub mod collection;
pub mod config;
pub mod error;
pub mod gallery;
pub mod image;
pub mod route;
pub mod session;
pub mod transport;
pub mod upload;

pub use collection::{ImageCollection, ImageCollectionController, Outcome};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, MessageCatalog, TransportError, ValidationError};
pub use image::{EntityKind, Image, UploadDraft};
pub use route::{AppRoute, Navigation, Resolution, guard, landing, resolve};
pub use session::{KeyValueStorage, Role, Session, SessionStore};
pub use transport::{ImageEndpoint, ImageTransport, LoginRequest, LoginResponse};
pub use upload::UploadForm;
