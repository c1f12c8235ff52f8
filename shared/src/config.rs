//! 客户端配置

// =========================================================
// 运行时配置 (Client Configuration)
// =========================================================

/// 这些是默认值，构建时没有提供对应变量时使用
pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_TOKEN_KEY: &str = "token";
pub const DEFAULT_ROLE_KEY: &str = "role";

pub const VAR_API_BASE: &str = "SLOWERS_API_BASE";
pub const VAR_TOKEN_KEY: &str = "SLOWERS_TOKEN_KEY";
pub const VAR_ROLE_KEY: &str = "SLOWERS_ROLE_KEY";

/// 客户端配置
///
/// 后端地址和会话存储键名，全部可以在构建时覆盖。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub token_key: String,
    pub role_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

impl ClientConfig {
    /// 通过变量查找函数构建配置，读不到或为空就用默认值
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            api_base: var(VAR_API_BASE, DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            token_key: var(VAR_TOKEN_KEY, DEFAULT_TOKEN_KEY),
            role_key: var(VAR_ROLE_KEY, DEFAULT_ROLE_KEY),
        }
    }

    /// 拼接后端接口地址
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_base, path)
        } else {
            format!("{}/{}", self.api_base, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base, "/api");
        assert_eq!(config.token_key, "token");
        assert_eq!(config.role_key, "role");
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let vars: HashMap<&str, &str> = [
            (VAR_API_BASE, "https://slowers.example/api/"),
            (VAR_TOKEN_KEY, "slowers_token"),
            (VAR_ROLE_KEY, "  "),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_vars(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_base, "https://slowers.example/api");
        assert_eq!(config.token_key, "slowers_token");
        // 空白值视为未设置
        assert_eq!(config.role_key, "role");
    }

    #[test]
    fn test_url_join() {
        let config = ClientConfig::default();
        assert_eq!(config.url("/images"), "/api/images");
        assert_eq!(config.url("images/entity/1"), "/api/images/entity/1");
    }
}
