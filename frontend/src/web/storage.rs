//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 实现核心库的 [`KeyValueStorage`]。

use circuitai::{AppError, KeyValueStorage, Result};

/// 浏览器本地存储
///
/// 命名避开 `leptos::prelude::LocalStorage`。
#[derive(Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| AppError::Storage("localStorage unavailable".to_string()))
    }
}

#[async_trait::async_trait(?Send)]
impl KeyValueStorage for BrowserStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| AppError::Storage(format!("failed to read {key}")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| AppError::Storage(format!("failed to write {key}")))
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let storage = Self::storage()?;
        let existed = storage
            .get_item(key)
            .map_err(|_| AppError::Storage(format!("failed to read {key}")))?
            .is_some();
        storage
            .remove_item(key)
            .map_err(|_| AppError::Storage(format!("failed to delete {key}")))?;
        Ok(existed)
    }
}
