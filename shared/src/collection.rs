//! 图片集合控制器
//!
//! 持有单个实体的图片列表（插入顺序即显示顺序），保证任意时刻最多只有一张收藏图。
//! 所有变更都先经过传输层，成功后再更新本地状态。

use std::cell::{Cell, Ref, RefCell};

use tracing::{debug, warn};

use crate::error::ClientResult;
use crate::image::{Image, UploadDraft};
use crate::transport::ImageTransport;
use crate::upload;

// =========================================================
// 集合状态 (纯数据，无 IO)
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageCollection {
    images: Vec<Image>,
    favorite_index: Option<usize>,
    /// 已发出但尚未确认的收藏选择
    pending_favorite: Option<String>,
}

impl ImageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn favorite_index(&self) -> Option<usize> {
        self.favorite_index
    }

    /// 只有当前没有收藏图、也没有进行中的选择时才允许选择
    pub fn can_select_favorite(&self) -> bool {
        self.favorite_index.is_none() && self.pending_favorite.is_none()
    }

    pub fn pending_favorite(&self) -> Option<&str> {
        self.pending_favorite.as_deref()
    }

    /// 占用收藏选择，直到 `settle_favorite` 被调用
    ///
    /// 不允许选择或图片不存在时返回 `false`。
    pub fn begin_favorite(&mut self, image_id: &str) -> bool {
        if !self.can_select_favorite() || !self.contains(image_id) {
            return false;
        }
        self.pending_favorite = Some(image_id.to_string());
        true
    }

    /// 结束进行中的选择；`confirmed` 时把该图标为收藏
    pub fn settle_favorite(&mut self, confirmed: bool) -> bool {
        let Some(image_id) = self.pending_favorite.take() else {
            return false;
        };
        confirmed && self.mark_favorite(&image_id)
    }

    pub fn contains(&self, image_id: &str) -> bool {
        self.position(image_id).is_some()
    }

    fn position(&self, image_id: &str) -> Option<usize> {
        self.images.iter().position(|img| img.id == image_id)
    }

    /// 用后端列表替换本地集合
    ///
    /// 列表中出现多张收藏图时只保留第一张的标记。
    pub fn replace(&mut self, mut images: Vec<Image>) {
        let mut seen = false;
        for image in images.iter_mut().filter(|img| img.favorite) {
            if seen {
                warn!(image_id = %image.id, "extra favorite in listing cleared");
                image.favorite = false;
            }
            seen = true;
        }
        self.images = images;
        self.recompute();
    }

    /// 追加新上传的图片，新图片从不是收藏图
    pub fn append(&mut self, mut image: Image) {
        image.favorite = false;
        self.images.push(image);
        self.recompute();
    }

    /// 移除图片。移除收藏图后不会自动指定新的收藏图。
    pub fn remove(&mut self, image_id: &str) -> Option<Image> {
        let removed = self.position(image_id).map(|i| self.images.remove(i));
        self.recompute();
        removed
    }

    /// 把指定图片标为收藏
    ///
    /// 已有收藏图（包括它自己）、另一张图的选择正在进行或图片不存在时不做任何修改，
    /// 返回 `false`。
    pub fn mark_favorite(&mut self, image_id: &str) -> bool {
        if self.favorite_index.is_some() {
            return false;
        }
        if self
            .pending_favorite
            .as_deref()
            .is_some_and(|pending| pending != image_id)
        {
            return false;
        }
        match self.position(image_id) {
            Some(i) => {
                self.images[i].favorite = true;
                self.recompute();
                true
            }
            None => false,
        }
    }

    /// 扫描第一张收藏图，重新计算收藏下标
    fn recompute(&mut self) {
        self.favorite_index = self.images.iter().position(|img| img.favorite);
    }
}

// =========================================================
// 控制器 (Controller)
// =========================================================

/// 异步操作的结果
///
/// 视图已卸载或请求已被更新的请求取代时，响应被丢弃，本地状态不变。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Applied(T),
    Discarded,
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(v) => Some(v),
            Outcome::Discarded => None,
        }
    }
}

/// 图片集合控制器
///
/// 单线程协作式调度：状态放在 `RefCell` 中，任何借用都不会跨越 await。
/// 同一控制器上的并发操作不做排队，结果按完成顺序生效。
pub struct ImageCollectionController<T> {
    transport: T,
    state: RefCell<ImageCollection>,
    entity_id: RefCell<String>,
    load_epoch: Cell<u64>,
    detached: Cell<bool>,
}

impl<T: ImageTransport> ImageCollectionController<T> {
    pub fn new(transport: T, entity_id: impl Into<String>) -> Self {
        Self {
            transport,
            state: RefCell::new(ImageCollection::new()),
            entity_id: RefCell::new(entity_id.into()),
            load_epoch: Cell::new(0),
            detached: Cell::new(false),
        }
    }

    pub fn entity_id(&self) -> String {
        self.entity_id.borrow().clone()
    }

    pub fn state(&self) -> Ref<'_, ImageCollection> {
        self.state.borrow()
    }

    /// 当前图片列表的拷贝，供视图渲染
    pub fn snapshot(&self) -> Vec<Image> {
        self.state.borrow().images().to_vec()
    }

    /// 视图卸载时调用，之后到达的响应全部丢弃
    pub fn detach(&self) {
        self.detached.set(true);
    }

    pub fn is_detached(&self) -> bool {
        self.detached.get()
    }

    /// 操作开始时的实体仍是当前实体，且视图仍然挂载
    fn is_current(&self, entity_id: &str) -> bool {
        !self.is_detached() && *self.entity_id.borrow() == entity_id
    }

    /// 加载实体的全部图片，替换本地集合
    ///
    /// 失败时不做重试，本地集合保持不变。
    pub async fn load(&self, entity_id: &str) -> ClientResult<Outcome<usize>> {
        let epoch = self.load_epoch.get() + 1;
        self.load_epoch.set(epoch);
        *self.entity_id.borrow_mut() = entity_id.to_string();

        let result = self.transport.list_by_entity(entity_id).await;

        // 被更新的加载取代时，成功和失败都不再上报
        if self.load_epoch.get() != epoch || !self.is_current(entity_id) {
            debug!(entity_id, failed = result.is_err(), "stale image listing discarded");
            return Ok(Outcome::Discarded);
        }
        let images = result?;

        let count = images.len();
        self.state.borrow_mut().replace(images);
        debug!(entity_id, count, "image collection loaded");
        Ok(Outcome::Applied(count))
    }

    /// 上传草稿并把返回的图片追加到集合末尾
    ///
    /// 本地校验失败时直接返回，不发起任何请求。
    pub async fn add(&self, mut draft: UploadDraft<T::File>) -> ClientResult<Outcome<Image>> {
        upload::validate(Some(&draft.file), &draft.note)?;

        let entity_id = self.entity_id();
        if draft.entity_id.is_empty() {
            draft.entity_id = entity_id.clone();
        }

        let mut image = self.transport.create(draft).await?;
        image.favorite = false;

        if !self.is_current(&entity_id) {
            debug!(image_id = %image.id, "late upload response discarded");
            return Ok(Outcome::Discarded);
        }

        self.state.borrow_mut().append(image.clone());
        debug!(image_id = %image.id, entity_id = %entity_id, "image added");
        Ok(Outcome::Applied(image))
    }

    /// 删除图片
    pub async fn delete(&self, image: &Image) -> ClientResult<Outcome<()>> {
        let entity_id = self.entity_id();
        self.transport.delete(&image.id).await?;

        if !self.is_current(&entity_id) {
            debug!(image_id = %image.id, "late delete response discarded");
            return Ok(Outcome::Discarded);
        }

        let removed = self.state.borrow_mut().remove(&image.id);
        debug!(
            image_id = %image.id,
            was_favorite = removed.is_some_and(|img| img.favorite),
            "image deleted"
        );
        Ok(Outcome::Applied(()))
    }

    /// 选择收藏图
    ///
    /// 已有收藏图时（包括这张图本身已是收藏）或另一次选择尚未返回时什么都不做，
    /// 也不发请求，返回 `Applied(false)`。
    pub async fn favorite(&self, image: &Image) -> ClientResult<Outcome<bool>> {
        if !self.state.borrow_mut().begin_favorite(&image.id) {
            debug!(image_id = %image.id, "favorite selection not open, ignored");
            return Ok(Outcome::Applied(false));
        }

        let entity_id = self.entity_id();
        let result = self.transport.set_favorite(image).await;
        let current = self.is_current(&entity_id);

        // 无论结果如何都要释放占用
        let marked = self
            .state
            .borrow_mut()
            .settle_favorite(result.is_ok() && current);
        result?;

        if !current {
            debug!(image_id = %image.id, "late favorite response discarded");
            return Ok(Outcome::Discarded);
        }

        debug!(image_id = %image.id, marked, "favorite selected");
        Ok(Outcome::Applied(marked))
    }

    /// 获取图片的本地可引用地址
    pub async fn fetch(&self, image: &Image) -> ClientResult<T::ObjectUrl> {
        self.transport.fetch(image.filename()).await
    }
}
