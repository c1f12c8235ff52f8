//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 每次导航都用当前会话重新执行守卫："监听 -> 验证 -> 处理 -> 加载"。

use leptos::prelude::*;
use slowers_shared::route::{self, AppRoute, Resolution};
use slowers_shared::Session;
use tracing::{debug, info};
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 会话以信号形式注入，守卫本身是共享 crate 中的纯函数。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 当前会话（注入的信号，实现解耦）
    session: Signal<Session>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// 初始路由同样经过守卫，重定向时替换地址栏中的路径。
    fn new(session: Signal<Session>) -> Self {
        let path = current_path();
        let resolution = route::resolve(&path, &session.get_untracked());
        if resolution.redirected {
            replace_history_state(&resolution.route.to_path());
        }
        let (current_route, set_route) = signal(resolution.route);

        Self {
            current_route,
            set_route,
            session,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        let session = self.session.get_untracked();
        let resolution = route::resolve(path, &session);
        self.apply(resolution, true);
    }

    /// 应用守卫结果
    ///
    /// # Arguments
    /// * `resolution` - 守卫给出的最终路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn apply(&self, resolution: Resolution, use_push: bool) {
        let Resolution { route, redirected } = resolution;
        if redirected {
            info!(to = %route, "[Router] navigation redirected");
        }

        let path = route.to_path();
        if use_push {
            push_history_state(&path);
        } else {
            replace_history_state(&path);
        }
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let session = router.session.get_untracked();
            let resolution = route::resolve(&current_path(), &session);
            debug!(route = %resolution.route, "[Router] popstate");
            // 后退到受保护页面时替换而不是新增记录
            router.apply(resolution, false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话变化（登录/注销）时对当前路由重新执行守卫
    fn setup_session_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let session = router.session.get();
            let route = router.current_route.get_untracked();
            let resolution = route::resolve_route(route, &session);

            if resolution.redirected {
                info!(
                    logged_in = session.is_logged_in(),
                    "[Router] session changed, re-routing"
                );
                router.apply(resolution, true);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: Signal<Session>) -> RouterService {
    let router = RouterService::new(session);

    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话信号
    session: Signal<Session>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接，点击时经过路由守卫而不是整页跳转
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
