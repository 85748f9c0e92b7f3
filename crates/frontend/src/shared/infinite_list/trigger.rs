//! Fires a callback when the end-of-list sentinel scrolls into view.
//!
//! The visibility primitive is abstracted behind [`VisibilitySource`]; the
//! browser implementation lives in `dom.rs`.

use super::error::WatchError;
use std::cell::Cell;
use std::rc::Rc;

/// Something that can report the sentinel's visibility.
pub trait VisibilitySource {
    /// Releases the underlying observer when dropped.
    type Watch;

    /// Starts reporting visibility of the sentinel, counting it as visible
    /// once it is within `margin_px` of the viewport edge.
    ///
    /// `on_change` receives the current visibility after every change, and
    /// an initial observation once the watch is attached.
    fn watch(&self, margin_px: u32, on_change: Box<dyn Fn(bool)>)
        -> Result<Self::Watch, WatchError>;
}

pub struct ViewportTrigger<S: VisibilitySource> {
    source: S,
    callback: Rc<dyn Fn()>,
    margin_px: u32,
    enabled: bool,
    watch: Option<S::Watch>,
}

impl<S: VisibilitySource> ViewportTrigger<S> {
    pub fn new(source: S, callback: Rc<dyn Fn()>, margin_px: u32, enabled: bool) -> Self {
        let mut trigger = Self {
            source,
            callback,
            margin_px,
            enabled: false,
            watch: None,
        };
        trigger.set_enabled(enabled);
        trigger
    }

    /// Attaches the watch when turned on, drops it when turned off.
    ///
    /// Every new watch starts from "not visible", so a sentinel that is
    /// already on screen when the trigger is enabled fires once.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;

        if !enabled {
            self.watch = None;
            return;
        }

        let callback = Rc::clone(&self.callback);
        let was_visible = Cell::new(false);
        let on_change = Box::new(move |visible: bool| {
            let before = was_visible.replace(visible);
            if visible && !before {
                callback();
            }
        });

        match self.source.watch(self.margin_px, on_change) {
            Ok(watch) => self.watch = Some(watch),
            Err(err) => {
                log::error!("infinite list: {}", err);
                self.enabled = false;
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
