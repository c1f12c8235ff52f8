//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、访问守卫和登录后的默认落地页。

use std::fmt::Display;

use tracing::debug;

use crate::session::{Role, Session};

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 根路径，总是重定向
    #[default]
    Root,
    Login,
    Register,
    Terms,
    /// 站点页面，可带站点 id
    Site(Option<String>),
    Flowers,
    RetailerHome,
    RetailerFlowers,
    GrowerHome,
    GrowerFlowers,
    User,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Root,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["terms"] => Self::Terms,
            ["site"] => Self::Site(None),
            ["site", id] => Self::Site(Some((*id).to_string())),
            ["flowers"] => Self::Flowers,
            ["retailer"] => Self::RetailerHome,
            ["retailer", "flowers"] => Self::RetailerFlowers,
            ["grower"] => Self::GrowerHome,
            ["grower", "flowers"] => Self::GrowerFlowers,
            ["user"] => Self::User,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Root => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Terms => "/terms".to_string(),
            Self::Site(None) => "/site".to_string(),
            Self::Site(Some(id)) => format!("/site/{}", id),
            Self::Flowers => "/flowers".to_string(),
            Self::RetailerHome => "/retailer".to_string(),
            Self::RetailerFlowers => "/retailer/flowers".to_string(),
            Self::GrowerHome => "/grower".to_string(),
            Self::GrowerFlowers => "/grower/flowers".to_string(),
            Self::User => "/user".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Self::Root | Self::Login | Self::Register | Self::Terms | Self::NotFound
        )
    }

    /// 定义已认证用户是否应该离开此路由（登录、注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取已认证用户离开登录页时的重定向目标
    pub fn auth_success_redirect() -> Self {
        Self::Root
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// 默认落地页
// =========================================================

/// 登录用户访问根路径时的落地页
///
/// 零售商进入 `/retailer`，其余情况（种植者、缺失或无法识别的角色）一律进入 `/grower`。
pub fn landing(role: Option<Role>) -> AppRoute {
    if role == Some(Role::Retailer) {
        AppRoute::RetailerHome
    } else {
        AppRoute::GrowerHome
    }
}

// =========================================================
// 路由守卫
// =========================================================

/// 守卫对一次导航的裁决
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(AppRoute),
    Redirect(AppRoute),
}

/// 根据当前会话判断是否可以渲染目标路由
///
/// 纯函数，每次导航都要重新计算。
pub fn guard(route: &AppRoute, session: &Session) -> Navigation {
    let logged_in = session.is_logged_in();

    match route {
        AppRoute::Root if logged_in => Navigation::Redirect(landing(session.role())),
        AppRoute::Root => Navigation::Redirect(AppRoute::auth_failure_redirect()),
        r if r.requires_auth() && !logged_in => {
            Navigation::Redirect(AppRoute::auth_failure_redirect())
        }
        r if r.should_redirect_when_authenticated() && logged_in => {
            Navigation::Redirect(AppRoute::auth_success_redirect())
        }
        r => Navigation::Render(r.clone()),
    }
}

/// 一次导航的最终结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub route: AppRoute,
    pub redirected: bool,
}

/// 重定向链的最大长度。登录用户访问 `/login` 时为 `/login -> / -> /grower`。
const MAX_REDIRECTS: usize = 4;

/// 解析路径并沿重定向链走到可渲染的路由
pub fn resolve(path: &str, session: &Session) -> Resolution {
    resolve_route(AppRoute::from_path(path), session)
}

pub fn resolve_route(route: AppRoute, session: &Session) -> Resolution {
    let mut current = route;
    let mut redirected = false;

    for _ in 0..MAX_REDIRECTS {
        match guard(&current, session) {
            Navigation::Render(route) => {
                return Resolution {
                    route,
                    redirected,
                };
            }
            Navigation::Redirect(next) => {
                debug!(from = %current, to = %next, "route redirected");
                current = next;
                redirected = true;
            }
        }
    }

    // 守卫的重定向目标都是可渲染的，正常不会走到这里
    Resolution {
        route: AppRoute::NotFound,
        redirected: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESTRICTED: &[&str] = &[
        "/site",
        "/site/abc123",
        "/flowers",
        "/retailer",
        "/retailer/flowers",
        "/grower",
        "/grower/flowers",
        "/user",
    ];

    fn logged_in(role: Option<Role>) -> Session {
        Session::new("t1", role)
    }

    #[test]
    fn test_from_path_roundtrip_table() {
        for path in RESTRICTED
            .iter()
            .chain(["/", "/login", "/register", "/terms"].iter())
        {
            assert_eq!(AppRoute::from_path(path).to_path(), *path);
        }
    }

    #[test]
    fn test_from_path_normalizes() {
        assert_eq!(AppRoute::from_path("/grower/"), AppRoute::GrowerHome);
        assert_eq!(AppRoute::from_path("/login?next=x"), AppRoute::Login);
        assert_eq!(
            AppRoute::from_path("/site/42#images"),
            AppRoute::Site(Some("42".into()))
        );
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/site/1/2"), AppRoute::NotFound);
    }

    #[test]
    fn test_restricted_paths_redirect_to_login_when_logged_out() {
        let session = Session::anonymous();
        for path in RESTRICTED {
            let route = AppRoute::from_path(path);
            assert_eq!(
                guard(&route, &session),
                Navigation::Redirect(AppRoute::Login),
                "path {}",
                path
            );
        }
    }

    #[test]
    fn test_role_without_token_is_logged_out() {
        let session = Session {
            token: None,
            role: Some(Role::Retailer),
        };
        assert_eq!(resolve("/retailer", &session).route, AppRoute::Login);
    }

    #[test]
    fn test_login_and_register_redirect_to_root_when_logged_in() {
        let session = logged_in(Some(Role::Grower));
        for path in ["/login", "/register"] {
            assert_eq!(
                guard(&AppRoute::from_path(path), &session),
                Navigation::Redirect(AppRoute::Root)
            );
        }
    }

    #[test]
    fn test_public_paths_render_when_logged_out() {
        let session = Session::anonymous();
        for path in ["/login", "/register", "/terms"] {
            let route = AppRoute::from_path(path);
            assert_eq!(guard(&route, &session), Navigation::Render(route));
        }
    }

    #[test]
    fn test_terms_render_when_logged_in() {
        let session = logged_in(None);
        assert_eq!(
            guard(&AppRoute::Terms, &session),
            Navigation::Render(AppRoute::Terms)
        );
    }

    #[test]
    fn test_role_menu_targets_reachable_for_either_role() {
        for role in [Role::Grower, Role::Retailer] {
            let session = logged_in(Some(role));
            for path in ["/retailer", "/grower", "/terms"] {
                let resolution = resolve(path, &session);
                assert_eq!(resolution.route, AppRoute::from_path(path));
                assert!(!resolution.redirected);
            }
        }
    }

    #[test]
    fn test_landing_is_total() {
        assert_eq!(landing(Some(Role::Retailer)), AppRoute::RetailerHome);
        assert_eq!(landing(Some(Role::Grower)), AppRoute::GrowerHome);
        assert_eq!(landing(None), AppRoute::GrowerHome);
        assert_eq!(landing(Role::parse("admin")), AppRoute::GrowerHome);
    }

    #[test]
    fn test_retailer_lands_on_retailer() {
        let resolution = resolve("/", &logged_in(Some(Role::Retailer)));
        assert_eq!(resolution.route, AppRoute::RetailerHome);
        assert!(resolution.redirected);
        assert_eq!(resolution.route.to_path(), "/retailer");
    }

    #[test]
    fn test_anonymous_grower_flowers_goes_to_login() {
        let resolution = resolve("/grower/flowers", &Session::anonymous());
        assert_eq!(resolution.route, AppRoute::Login);
        assert!(resolution.redirected);
    }

    #[test]
    fn test_login_when_logged_in_follows_chain_to_landing() {
        let resolution = resolve("/login", &logged_in(Some(Role::Grower)));
        assert_eq!(resolution.route, AppRoute::GrowerHome);
        assert!(resolution.redirected);
    }

    #[test]
    fn test_root_when_logged_out_goes_to_login() {
        let resolution = resolve("/", &Session::anonymous());
        assert_eq!(resolution.route, AppRoute::Login);
    }

    #[test]
    fn test_render_without_redirect() {
        let resolution = resolve("/site/7", &logged_in(Some(Role::Grower)));
        assert_eq!(resolution.route, AppRoute::Site(Some("7".into())));
        assert!(!resolution.redirected);
    }

    #[test]
    fn test_every_resolution_is_renderable() {
        let sessions = [
            Session::anonymous(),
            logged_in(None),
            logged_in(Some(Role::Grower)),
            logged_in(Some(Role::Retailer)),
        ];
        let paths = RESTRICTED
            .iter()
            .chain(["/", "/login", "/register", "/terms", "/missing"].iter());

        for path in paths {
            for session in &sessions {
                let resolution = resolve(path, session);
                assert_eq!(
                    guard(&resolution.route, session),
                    Navigation::Render(resolution.route.clone())
                );
            }
        }
    }
}
