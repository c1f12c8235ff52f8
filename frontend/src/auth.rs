//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 会话在启动时从 LocalStorage 读取一次，之后镜像在内存信号中；
//! 路由服务通过注入的会话信号执行守卫。

use crate::api::SlowersApi;
use crate::web::LocalStorage;
use leptos::prelude::*;
use slowers_shared::{ClientConfig, ClientResult, LoginRequest, Session, SessionStore};

/// 认证上下文
///
/// 包含会话读写信号和会话存储，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// 当前会话（只读）
    pub session: ReadSignal<Session>,
    set_session: WriteSignal<Session>,
    store: StoredValue<SessionStore<LocalStorage>>,
    config: StoredValue<ClientConfig>,
}

impl SessionContext {
    /// 创建认证上下文并加载持久化的会话
    pub fn new(config: ClientConfig) -> Self {
        let store = SessionStore::new(LocalStorage, &config);
        let (session, set_session) = signal(store.load());

        Self {
            session,
            set_session,
            store: StoredValue::new(store),
            config: StoredValue::new(config),
        }
    }

    /// 获取会话信号（用于路由服务注入）
    pub fn session_signal(&self) -> Signal<Session> {
        self.session.into()
    }

    /// 按当前会话创建 API 客户端
    pub fn api(&self) -> SlowersApi {
        let token = self.session.with_untracked(|s| s.token.clone());
        SlowersApi::new(self.config.get_value(), token)
    }
}

/// 从 Context 获取认证上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// 登录并保存会话
///
/// 导航由路由服务监听会话变化自动处理。
pub async fn login(ctx: &SessionContext, email: String, password: String) -> ClientResult<()> {
    let res = ctx.api().login(&LoginRequest { email, password }).await?;

    let session = ctx
        .store
        .with_value(|store| store.save(&res.token, res.role()));
    ctx.set_session.set(session);
    Ok(())
}

/// 注销并清除会话
pub fn logout(ctx: &SessionContext) {
    let session = ctx.store.with_value(|store| store.clear());
    ctx.set_session.set(session);
}
