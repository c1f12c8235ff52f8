//! 页面外壳
//!
//! 导航栏、角色主页和各个简单页面。业务内容只在站点页挂载图片面板。

use leptos::prelude::*;
use slowers_shared::{EntityKind, Role};

use crate::auth::{logout, use_session};
use crate::components::entity_images::EntityImages;
use crate::web::router::Link;

#[component]
pub fn NavBar() -> impl IntoView {
    let session_ctx = use_session();
    let role = move || session_ctx.session.with(|s| s.role());
    let logged_in = move || session_ctx.session.with(|s| s.is_logged_in());

    view! {
        <nav class="navbar navbar-light bg-light">
            <Link to="/" class="navbar-brand">"Slowers"</Link>
            <Show
                when=logged_in
                fallback=|| {
                    view! {
                        <Link to="/login" class="nav-link">"Log in"</Link>
                        <Link to="/register" class="nav-link">"Register"</Link>
                    }
                }
            >
                {move || match role() {
                    Some(Role::Retailer) => {
                        view! { <Link to="/retailer/flowers" class="nav-link">"Flowers"</Link> }
                            .into_any()
                    }
                    _ => {
                        view! {
                            <Link to="/site" class="nav-link">"Sites"</Link>
                            <Link to="/grower/flowers" class="nav-link">"Flowers"</Link>
                        }
                            .into_any()
                    }
                }}
                // 在零售商和种植者视图之间切换
                <details class="nav-item dropdown">
                    <summary class="nav-link dropdown-toggle">"Role"</summary>
                    <div class="dropdown-menu show">
                        <Link to="/retailer" class="dropdown-item">"Retailer"</Link>
                        <Link to="/grower" class="dropdown-item">"Grower"</Link>
                    </div>
                </details>
                <Link to="/user" class="nav-link">"User"</Link>
                // 会话清空后路由服务把受限页面重定向到登录页
                <button class="btn btn-outline-dark" on:click=move |_| logout(&session_ctx)>
                    "Log out"
                </button>
            </Show>
            <Link to="/terms" class="nav-link">"Terms"</Link>
        </nav>
    }
}

/// 角色主页框架
#[component]
pub fn RoleLayout(
    role: Role,
    #[prop(into)] title: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div class=format!("layout layout-{}", role)>
            <h2>{title}</h2>
            {children()}
        </div>
    }
}

#[component]
pub fn SitePage(site_id: Option<String>) -> impl IntoView {
    match site_id {
        Some(id) => view! {
            <div class="site-page">
                <h2>"Site"</h2>
                <EntityImages entity_id=id.clone() name=id kind=EntityKind::Site />
            </div>
        }
        .into_any(),
        None => view! {
            <div class="site-page">
                <h2>"Sites"</h2>
                <p>"Choose a site to see its images."</p>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn SimplePage(#[prop(into)] title: String) -> impl IntoView {
    view! {
        <div class="page">
            <h2>{title}</h2>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="text-center">
            <h1>"404"</h1>
            <p>"Page not found"</p>
            <Link to="/">"Back to home"</Link>
        </div>
    }
}
