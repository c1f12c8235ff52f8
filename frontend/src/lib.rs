//! Slowers 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `slowers_shared::route`: 路由定义和守卫（纯逻辑）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话状态管理
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    mod add_image;
    pub mod entity_images;
    mod gallery;
    mod image_form;
    pub mod login;
    pub mod pages;
}
mod messages;

use crate::auth::SessionContext;
use crate::components::login::LoginPage;
use crate::components::pages::{NavBar, NotFoundPage, RoleLayout, SimplePage, SitePage};

use leptos::prelude::*;
use slowers_shared::{AppRoute, ClientConfig, Role};

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod http;
    pub mod logging;
    mod object_url;
    pub mod router;
    mod storage;

    pub use http::{HttpClient, HttpError};
    pub use object_url::ObjectUrl;
    pub use storage::LocalStorage;
}

use web::router::{Router, RouterOutlet};

pub use web::logging::init as init_logging;

/// 构建期配置，未设置的变量使用默认值
fn app_config() -> ClientConfig {
    ClientConfig::from_vars(|name| match name {
        "SLOWERS_API_BASE" => option_env!("SLOWERS_API_BASE").map(str::to_string),
        "SLOWERS_TOKEN_KEY" => option_env!("SLOWERS_TOKEN_KEY").map(str::to_string),
        "SLOWERS_ROLE_KEY" => option_env!("SLOWERS_ROLE_KEY").map(str::to_string),
        _ => None,
    })
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
/// Root 总会被守卫重定向，这里不会真正渲染。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <SimplePage title="Register" /> }.into_any(),
        AppRoute::Terms => view! { <SimplePage title="Terms of use" /> }.into_any(),
        AppRoute::Site(id) => view! { <SitePage site_id=id /> }.into_any(),
        AppRoute::Flowers => view! { <SimplePage title="Flowers" /> }.into_any(),
        AppRoute::RetailerHome => view! {
            <RoleLayout role=Role::Retailer title="Retailer">
                <p>"Browse flowers offered by growers."</p>
            </RoleLayout>
        }
        .into_any(),
        AppRoute::RetailerFlowers => view! {
            <RoleLayout role=Role::Retailer title="Flowers">
                <p>"Flowers available for purchase."</p>
            </RoleLayout>
        }
        .into_any(),
        AppRoute::GrowerHome => view! {
            <RoleLayout role=Role::Grower title="Grower">
                <p>"Manage your sites and flowers."</p>
            </RoleLayout>
        }
        .into_any(),
        AppRoute::GrowerFlowers => view! {
            <RoleLayout role=Role::Grower title="Your flowers">
                <p>"Flowers grown on your sites."</p>
            </RoleLayout>
        }
        .into_any(),
        AppRoute::User => view! { <SimplePage title="User" /> }.into_any(),
        AppRoute::Root | AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话上下文（从 LocalStorage 加载一次）
    let session_ctx = SessionContext::new(app_config());
    provide_context(session_ctx);

    // 2. 界面文案
    provide_context(StoredValue::new(messages::default_catalog()));

    // 3. 获取会话信号，用于注入路由服务
    let session = session_ctx.session_signal();

    view! {
        // 4. 路由器组件：注入会话信号实现守卫
        <Router session=session>
            <NavBar />
            <main class="container">
                <RouterOutlet matcher=route_matcher />
            </main>
        </Router>
    }
}
