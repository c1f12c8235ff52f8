//! 实体图片面板
//!
//! 持有一个实体的图片集合控制器，把上传、删除、收藏命令接到控制器上，
//! 并在每次变更后用控制器快照刷新图库。

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use slowers_shared::gallery;
use slowers_shared::{
    ClientError, EntityKind, Image, ImageCollectionController, Outcome, UploadDraft,
};
use web_sys::File;

use crate::api::SlowersApi;
use crate::auth::use_session;
use crate::components::add_image::AddImage;
use crate::components::gallery::ImageGallery;
use crate::messages::use_messages;

type Controller = ImageCollectionController<SlowersApi>;

#[component]
pub fn EntityImages(
    #[prop(into)] entity_id: String,
    #[prop(into)] name: String,
    kind: EntityKind,
) -> impl IntoView {
    let session_ctx = use_session();
    let messages = use_messages();

    let controller = StoredValue::new_local(Rc::new(Controller::new(
        session_ctx.api(),
        entity_id.clone(),
    )));
    let images = RwSignal::new(Vec::<Image>::new());
    let notification = RwSignal::new(None::<(String, bool)>); // 消息内容, 是否出错
    // 点击收藏后立即禁用所有收藏按钮，直到请求返回
    let selecting = RwSignal::new(false);

    // 视图卸载后控制器丢弃所有迟到的响应
    on_cleanup(move || {
        controller.try_with_value(|c| c.detach());
    });

    // 用控制器快照刷新视图；视图已卸载时什么都不做
    let refresh = move |ctrl: &Controller| {
        let _ = images.try_set(ctrl.snapshot());
    };

    let notify_error = move |err: ClientError| {
        // 会话缺失由路由重定向处理，不弹提示
        if !err.is_user_facing() {
            return;
        }
        if let Some(msg) = messages.try_with_value(|catalog| catalog.describe(&err)) {
            let _ = notification.try_set(Some((msg, true)));
        }
    };

    let notify_ok = move |key: &str| {
        if let Some(msg) = messages.try_with_value(|catalog| catalog.text(key).to_string()) {
            let _ = notification.try_set(Some((msg, false)));
        }
    };

    // 初始加载
    {
        let ctrl = controller.get_value();
        spawn_local(async move {
            let entity_id = ctrl.entity_id();
            match ctrl.load(&entity_id).await {
                Ok(Outcome::Applied(_)) => refresh(&ctrl),
                Ok(Outcome::Discarded) => {}
                Err(e) => notify_error(e),
            }
        });
    }

    let handle_add = move |draft: UploadDraft<File>| {
        let Some(ctrl) = controller.try_get_value() else {
            return;
        };
        spawn_local(async move {
            match ctrl.add(draft).await {
                Ok(Outcome::Applied(_)) => {
                    refresh(&ctrl);
                    notify_ok("image.uploaded");
                }
                Ok(Outcome::Discarded) => {}
                Err(e) => notify_error(e),
            }
        });
    };

    let handle_delete = move |image: Image| {
        let Some(ctrl) = controller.try_get_value() else {
            return;
        };
        spawn_local(async move {
            match ctrl.delete(&image).await {
                Ok(Outcome::Applied(())) => {
                    refresh(&ctrl);
                    notify_ok("image.deleted");
                }
                Ok(Outcome::Discarded) => {}
                Err(e) => notify_error(e),
            }
        });
    };

    let handle_favorite = move |image: Image| {
        let Some(ctrl) = controller.try_get_value() else {
            return;
        };
        selecting.set(true);
        spawn_local(async move {
            let result = ctrl.favorite(&image).await;
            let _ = selecting.try_set(false);
            match result {
                Ok(Outcome::Applied(true)) => refresh(&ctrl),
                Ok(_) => {}
                Err(e) => notify_error(e),
            }
        });
    };

    let items = Signal::derive(move || {
        let session = session_ctx.session.get();
        // 订阅图片列表变化，布局数据从控制器状态计算
        images.track();
        let mut list = controller
            .try_with_value(|c| gallery::items(&c.state(), &session))
            .unwrap_or_default();
        if selecting.get() {
            for item in &mut list {
                item.favorite_enabled = false;
            }
        }
        list
    });

    // 3秒后清除通知
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || {
                    let _ = notification.try_set(None);
                },
                std::time::Duration::from_secs(3),
            );
        }
    });

    let is_grower = move || session_ctx.session.with(|s| s.is_grower());

    view! {
        <div class="entity-images">
            <Show when=move || notification.get().is_some()>
                <div class=move || {
                    let is_err = notification.get().map(|(_, e)| e).unwrap_or(false);
                    if is_err { "alert alert-danger" } else { "alert alert-success" }
                }>
                    {move || notification.get().map(|(msg, _)| msg).unwrap_or_default()}
                </div>
            </Show>
            <Show when=is_grower>
                <AddImage entity_id=entity_id.clone() name=name.clone() on_add=handle_add />
            </Show>
            <ImageGallery
                items=items
                kind=kind
                on_delete=handle_delete
                on_favorite=handle_favorite
            />
        </div>
    }
}
