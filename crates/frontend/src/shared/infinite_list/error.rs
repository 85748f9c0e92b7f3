use thiserror::Error;

/// Failure of a single page fetch.
///
/// The loader treats every variant the same way (the page can be retried);
/// the split only exists so the list footer can say what went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("не удалось сформировать запрос: {0}")]
    Request(String),
    #[error("сетевая ошибка: {0}")]
    Network(String),
    #[error("HTTP {status}")]
    Http { status: u16 },
    #[error("не удалось разобрать ответ: {0}")]
    Decode(String),
}

/// The visibility primitive could not be attached to the sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("visibility watch failed: {0}")]
pub struct WatchError(pub String);
