use contracts::shared::paging::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOOKAHEAD_PX: u32 = 100;

/// Настройки бесконечной прокрутки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfiniteListConfig {
    /// Размер страницы, запрашиваемой у источника
    pub page_size: u32,
    /// Запас (px) до конца списка, при котором начинается подгрузка
    pub lookahead_px: u32,
}

impl Default for InfiniteListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            lookahead_px: DEFAULT_LOOKAHEAD_PX,
        }
    }
}

impl InfiniteListConfig {
    /// Нулевой размер страницы заменяется значением по умолчанию
    pub fn sanitized(mut self) -> Self {
        if self.page_size == 0 {
            log::warn!(
                "infinite list: page_size = 0 is invalid, using {}",
                DEFAULT_PAGE_SIZE
            );
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        self
    }
}
