//! Конверт постраничной выдачи списков.
//!
//! Страницы нумеруются с 1. Сервер не сообщает общее количество записей:
//! пустая страница означает, что данные закончились.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Параметры запроса страницы (`?page=..&page_size=..`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl PageQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size,
        }
    }

    /// Смещение первой записи страницы
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

/// Ответ сервера со страницей записей
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub page: u32,
    pub items: Vec<T>,
}

impl<T> PageResponse<T> {
    pub fn new(page: u32, items: Vec<T>) -> Self {
        Self { page, items }
    }

    /// Пустая страница = конец списка
    pub fn is_terminal(&self) -> bool {
        self.items.is_empty()
    }
}
