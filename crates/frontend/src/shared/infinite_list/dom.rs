//! `IntersectionObserver` backed [`VisibilitySource`].

use super::error::WatchError;
use super::trigger::VisibilitySource;
use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Watches one sentinel element, relative to the viewport or to a
/// scrolling container.
pub struct IntersectionVisibility {
    target: Element,
    root: Option<Element>,
}

impl IntersectionVisibility {
    pub fn new(target: Element) -> Self {
        Self { target, root: None }
    }

    /// Measure against a scrolling container instead of the viewport.
    pub fn with_root(mut self, root: Element) -> Self {
        self.root = Some(root);
        self
    }
}

/// Live observer; disconnected on drop.
pub struct IntersectionWatch {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for IntersectionWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

impl VisibilitySource for IntersectionVisibility {
    type Watch = IntersectionWatch;

    fn watch(
        &self,
        margin_px: u32,
        on_change: Box<dyn Fn(bool)>,
    ) -> Result<IntersectionWatch, WatchError> {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                // Entries are queued in order; the last one is current.
                let visible = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .last()
                    .map(|entry| entry.is_intersecting());
                if let Some(visible) = visible {
                    on_change(visible);
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_root_margin(&format!("0px 0px {}px 0px", margin_px));
        if let Some(root) = &self.root {
            options.set_root(Some(root.as_ref()));
        }

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(|e| WatchError(format!("{e:?}")))?;
        observer.observe(&self.target);

        Ok(IntersectionWatch {
            observer,
            _callback: callback,
        })
    }
}
