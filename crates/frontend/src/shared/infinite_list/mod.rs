//! Infinite scroll: a page-by-page list loader plus a sentinel watcher that
//! asks it for the next page.
//!
//! Wiring used by list views:
//!
//! ```ignore
//! let list = use_incremental_list(move |page| fetch(page, page_size));
//! let sentinel = use_viewport_trigger(
//!     move || list.request_next_page(),
//!     list.trigger_enabled(),
//!     config.lookahead_px,
//!     None,
//! );
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod hooks;
pub mod loader;
pub mod state;
pub mod trigger;
pub mod view;

pub use config::InfiniteListConfig;
pub use error::{FetchError, WatchError};
pub use hooks::{use_incremental_list, use_viewport_trigger, IncrementalList};
pub use loader::IncrementalListLoader;
pub use state::{ListSnapshot, PagingState};
pub use trigger::{ViewportTrigger, VisibilitySource};
pub use view::InfiniteScrollSentinel;
