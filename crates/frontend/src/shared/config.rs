//! Настройки дашборда.
//!
//! Хранятся в localStorage под ключом [`STORAGE_KEY`] в виде JSON; при
//! отсутствии или ошибке разбора используются значения по умолчанию.

use crate::shared::infinite_list::InfiniteListConfig;
use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "dashboard_config_v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Использовать локальные тестовые данные вместо API
    pub use_mock_data: bool,
    /// Количество заказов в тестовом наборе
    pub mock_total_orders: u32,
    /// Искусственная задержка ответа тестового источника, мс
    pub mock_latency_ms: u32,
    pub infinite_list: InfiniteListConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            use_mock_data: true,
            mock_total_orders: 237,
            mock_latency_ms: 400,
            infinite_list: InfiniteListConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<DashboardConfig>(raw) {
            Ok(mut config) => {
                config.infinite_list = config.infinite_list.sanitized();
                config
            }
            Err(err) => {
                log::warn!("dashboard config ignored: {}", err);
                Self::default()
            }
        }
    }

    pub fn load() -> Self {
        match storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten()) {
            Some(raw) => Self::from_json(&raw),
            None => {
                log::debug!("dashboard config not found, using defaults");
                Self::default()
            }
        }
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}
