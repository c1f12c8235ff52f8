//! 会话模块
//!
//! 会话 = 持久化的 token + 角色。`SessionStore` 是进程内唯一读写它们的入口，
//! 路由守卫只接收 `Session` 值，不直接访问存储。

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ClientConfig;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Grower,
    Retailer,
}

impl Role {
    /// 解析存储中的角色字符串，无法识别时返回 `None`
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "grower" => Some(Role::Grower),
            "retailer" => Some(Role::Retailer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Grower => "grower",
            Role::Retailer => "retailer",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 当前会话
///
/// 只有 token 存在时 `role` 才有意义；token 缺失一律视为未登录。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<Role>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(token: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            token: Some(token.into()),
            role,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// 已登录时的角色，未登录一律返回 `None`
    pub fn role(&self) -> Option<Role> {
        if self.is_logged_in() { self.role } else { None }
    }

    pub fn is_grower(&self) -> bool {
        self.role() == Some(Role::Grower)
    }
}

// =========================================================
// 持久化存储抽象
// =========================================================

/// 持久化键值存储（浏览器中即 LocalStorage）
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

/// 会话存储
///
/// 负责 token/角色的读取、保存和清除，不校验 token 内容。
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
    token_key: String,
    role_key: String,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S, config: &ClientConfig) -> Self {
        Self {
            storage,
            token_key: config.token_key.clone(),
            role_key: config.role_key.clone(),
        }
    }

    /// 读取持久化的会话，空 token 视为不存在
    pub fn load(&self) -> Session {
        let token = self
            .storage
            .get(&self.token_key)
            .filter(|t| !t.is_empty());
        let role = self
            .storage
            .get(&self.role_key)
            .and_then(|r| Role::parse(&r));

        debug!(logged_in = token.is_some(), ?role, "session loaded");
        Session { token, role }
    }

    /// 保存登录结果，返回保存后的会话
    pub fn save(&self, token: &str, role: Option<Role>) -> Session {
        self.storage.set(&self.token_key, token);
        match role {
            Some(role) => {
                self.storage.set(&self.role_key, role.as_str());
            }
            None => {
                self.storage.remove(&self.role_key);
            }
        }

        info!(?role, "session saved");
        Session::new(token, role)
    }

    /// 注销，清除 token 和角色
    pub fn clear(&self) -> Session {
        self.storage.remove(&self.token_key);
        self.storage.remove(&self.role_key);
        info!("session cleared");
        Session::anonymous()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// 内存实现，克隆后共享同一份数据
    #[derive(Clone, Default)]
    pub struct MemoryStorage {
        data: Rc<RefCell<HashMap<String, String>>>,
    }

    impl MemoryStorage {
        pub fn with(entries: &[(&str, &str)]) -> Self {
            let storage = Self::default();
            for (k, v) in entries {
                storage.set(k, v);
            }
            storage
        }
    }

    impl KeyValueStorage for MemoryStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.data.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> bool {
            self.data
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            true
        }

        fn remove(&self, key: &str) -> bool {
            self.data.borrow_mut().remove(key);
            true
        }
    }

    fn store(storage: MemoryStorage) -> SessionStore<MemoryStorage> {
        SessionStore::new(storage, &ClientConfig::default())
    }

    #[test]
    fn test_load_empty_storage() {
        let session = store(MemoryStorage::default()).load();
        assert_eq!(session, Session::anonymous());
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStorage::default();
        let store = store(storage.clone());
        store.save("t1", Some(Role::Retailer));

        assert_eq!(storage.get("token").as_deref(), Some("t1"));
        assert_eq!(storage.get("role").as_deref(), Some("retailer"));
        assert_eq!(store.load(), Session::new("t1", Some(Role::Retailer)));
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let storage = MemoryStorage::with(&[("token", "t1"), ("role", "grower")]);
        let store = store(storage.clone());
        assert!(store.load().is_logged_in());

        let cleared = store.clear();
        assert!(!cleared.is_logged_in());
        assert!(storage.get("token").is_none());
        assert!(storage.get("role").is_none());
        assert!(!store.load().is_logged_in());
    }

    #[test]
    fn test_unknown_role_is_absent() {
        let storage = MemoryStorage::with(&[("token", "t1"), ("role", "admin")]);
        let session = store(storage).load();
        assert!(session.is_logged_in());
        assert_eq!(session.role, None);
    }

    #[test]
    fn test_empty_token_is_logged_out() {
        let storage = MemoryStorage::with(&[("token", ""), ("role", "grower")]);
        let session = store(storage).load();
        assert!(!session.is_logged_in());
        // 角色在未登录时没有意义
        assert_eq!(session.role(), None);
    }

    #[test]
    fn test_save_without_role_drops_stale_role() {
        let storage = MemoryStorage::with(&[("role", "retailer")]);
        let store = store(storage.clone());
        store.save("t2", None);
        assert!(storage.get("role").is_none());
        assert_eq!(store.load(), Session::new("t2", None));
    }

    #[test]
    fn test_custom_keys() {
        let storage = MemoryStorage::default();
        let config = ClientConfig::from_vars(|k| match k {
            crate::config::VAR_TOKEN_KEY => Some("slowers_token".to_string()),
            _ => None,
        });
        let store = SessionStore::new(storage.clone(), &config);
        store.save("abc", Some(Role::Grower));
        assert_eq!(storage.get("slowers_token").as_deref(), Some("abc"));
        assert!(storage.get("token").is_none());
    }

    #[test]
    fn test_grower_capability() {
        assert!(Session::new("t", Some(Role::Grower)).is_grower());
        assert!(!Session::new("t", Some(Role::Retailer)).is_grower());
        assert!(!Session::new("t", None).is_grower());
        let stale = Session {
            token: None,
            role: Some(Role::Grower),
        };
        assert!(!stale.is_grower());
    }
}
