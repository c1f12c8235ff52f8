//! 图库组件
//!
//! 固定列数的瀑布流布局。种植者可以看到删除和收藏按钮，其他角色只看图片。

use std::collections::{HashMap, HashSet};

use leptos::prelude::*;
use leptos::task::spawn_local;
use slowers_shared::gallery::{self, GalleryItem};
use slowers_shared::{EntityKind, Image, ImageTransport};
use tracing::warn;

use crate::auth::use_session;
use crate::messages::t;
use crate::web::ObjectUrl;

fn viewport_width() -> u32 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .map(|w| w as u32)
        .unwrap_or(1024)
}

#[component]
pub fn ImageGallery(
    #[prop(into)] items: Signal<Vec<GalleryItem>>,
    kind: EntityKind,
    #[prop(into)] on_delete: Callback<Image>,
    #[prop(into)] on_favorite: Callback<Image>,
) -> impl IntoView {
    let width = RwSignal::new(viewport_width());
    let resize = window_event_listener(leptos::ev::resize, move |_| {
        width.set(viewport_width());
    });
    on_cleanup(move || resize.remove());

    // 按图片 id 缓存 Object URL：新图片才去下载，被移除的图片随即回收
    let urls = RwSignal::new_local(HashMap::<String, ObjectUrl>::new());
    let requested = StoredValue::new(HashSet::<String>::new());
    let api = use_session().api();

    Effect::new(move |_| {
        let delta =
            items.with(|list| requested.with_value(|known| gallery::url_delta(known, list)));

        if !delta.revoke.is_empty() {
            urls.update(|map| {
                for id in &delta.revoke {
                    map.remove(id);
                }
            });
            requested.update_value(|set| {
                for id in &delta.revoke {
                    set.remove(id);
                }
            });
        }

        for (id, filename) in delta.fetch {
            requested.update_value(|set| {
                set.insert(id.clone());
            });
            let api = api.clone();
            spawn_local(async move {
                match api.fetch(&filename).await {
                    Ok(url) => {
                        // 下载期间图片被删除或组件已卸载时，url 在这里被 drop 并回收
                        let still_wanted = requested
                            .try_with_value(|set| set.contains(&id))
                            .unwrap_or(false);
                        if still_wanted {
                            let _ = urls.try_update(|map| {
                                map.insert(id, url);
                            });
                        }
                    }
                    Err(e) => warn!(filename = %filename, error = %e, "image fetch failed"),
                }
            });
        }
    });

    on_cleanup(move || {
        let _ = urls.try_update_untracked(|map| map.clear());
    });

    let columns = move || {
        let cols = gallery::columns_for_width(width.get());
        gallery::distribute(&items.get(), cols)
    };

    view! {
        <div class="m-2">
            <Show
                when=move || !items.with(|list| list.is_empty())
                fallback=move || view! { <p>{t(kind.empty_gallery_key())}</p> }
            >
                <div class="my-masonry-grid">
                    {move || {
                        columns()
                            .into_iter()
                            .map(|column| {
                                view! {
                                    <div class="my-masonry-grid_column">
                                        {column
                                            .into_iter()
                                            .map(|item| {
                                                let id = item.image.id.clone();
                                                let src = Signal::derive(move || {
                                                    urls.with(|map| {
                                                        map.get(&id).map(|u| u.as_str().to_string())
                                                    })
                                                });
                                                view! {
                                                    <GalleryImage
                                                        item=item
                                                        src=src
                                                        on_delete=on_delete
                                                        on_favorite=on_favorite
                                                    />
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </Show>
        </div>
    }
}

/// 单张图片，地址由图库统一管理
#[component]
fn GalleryImage(
    item: GalleryItem,
    src: Signal<Option<String>>,
    on_delete: Callback<Image>,
    on_favorite: Callback<Image>,
) -> impl IntoView {
    let GalleryItem {
        image,
        show_controls,
        is_favorite,
        favorite_enabled,
    } = item;
    let delete_target = image.clone();
    let favorite_target = image.clone();

    let favorite_class = if is_favorite {
        "favourite-button selected"
    } else {
        "favourite-button"
    };
    let star_class = if is_favorite {
        "bi bi-star-fill text-warning"
    } else {
        "bi bi-star-fill"
    };

    view! {
        <div class="image-box">
            <img src=move || src.get() alt=image.note.clone() />
            <Show when=move || show_controls>
                <div class="image-buttons">
                    <button
                        class="btn btn-dark delete-button"
                        aria-label="Delete"
                        on:click={
                            let target = delete_target.clone();
                            move |_| on_delete.run(target.clone())
                        }
                    >
                        <i class="bi bi-trash"></i>
                    </button>
                    <button
                        class=format!("btn btn-dark {}", favorite_class)
                        aria-label="Favorite"
                        disabled=!favorite_enabled
                        on:click={
                            let target = favorite_target.clone();
                            move |_| on_favorite.run(target.clone())
                        }
                    >
                        <i class=star_class></i>
                    </button>
                </div>
            </Show>
        </div>
    }
}
