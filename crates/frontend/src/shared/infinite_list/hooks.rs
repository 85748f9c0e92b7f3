//! Leptos bindings for the loader and the viewport trigger.

use super::dom::IntersectionVisibility;
use super::error::FetchError;
use super::loader::IncrementalListLoader;
use super::state::{ListSnapshot, PagingState};
use super::trigger::ViewportTrigger;
use leptos::html;
use leptos::prelude::*;
use std::future::Future;
use std::rc::Rc;

/// Handle to an incrementally loaded list owned by the current view.
///
/// The loader lives as long as the reactive owner that created it; fetches
/// completing after that are discarded.
pub struct IncrementalList<T: Send + Sync + 'static> {
    snapshot: RwSignal<ListSnapshot<T>>,
    loader: StoredValue<IncrementalListLoader<T>, LocalStorage>,
}

impl<T: Send + Sync + 'static> Clone for IncrementalList<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for IncrementalList<T> {}

/// Creates the loader and requests page 1 right away.
pub fn use_incremental_list<T, F, Fut>(fetch_page: F) -> IncrementalList<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(u32) -> Fut + 'static,
    Fut: Future<Output = Result<Vec<T>, FetchError>> + 'static,
{
    let snapshot = RwSignal::new(ListSnapshot::default());
    let loader = IncrementalListLoader::with_listener(
        fetch_page,
        |task| leptos::task::spawn_local(task),
        // one write per transition: readers never see a half-applied page
        move |state: &PagingState<T>| {
            let _ = snapshot.try_set(state.snapshot());
        },
    );

    IncrementalList {
        snapshot,
        loader: StoredValue::new_local(loader),
    }
}

impl<T: Clone + Send + Sync + 'static> IncrementalList<T> {
    pub fn items(&self) -> Signal<Vec<T>> {
        let snapshot = self.snapshot;
        Signal::derive(move || snapshot.with(|s| s.items.clone()))
    }

    pub fn len(&self) -> Signal<usize> {
        let snapshot = self.snapshot;
        Signal::derive(move || snapshot.with(|s| s.items.len()))
    }

    pub fn is_loading(&self) -> Signal<bool> {
        let snapshot = self.snapshot;
        Signal::derive(move || snapshot.with(|s| s.is_loading))
    }

    pub fn has_more(&self) -> Signal<bool> {
        let snapshot = self.snapshot;
        Signal::derive(move || snapshot.with(|s| s.has_more))
    }

    pub fn error(&self) -> Signal<Option<FetchError>> {
        let snapshot = self.snapshot;
        Signal::derive(move || snapshot.with(|s| s.error.clone()))
    }

    /// `has_more && !is_loading && no error`: wire this into
    /// [`use_viewport_trigger`] so the sentinel is only watched when a
    /// request would go out.
    pub fn trigger_enabled(&self) -> Signal<bool> {
        let snapshot = self.snapshot;
        Signal::derive(move || snapshot.with(ListSnapshot::trigger_enabled))
    }

    pub fn request_next_page(&self) {
        let _ = self.loader.try_with_value(|l| l.request_next_page());
    }

    pub fn retry(&self) {
        let _ = self.loader.try_with_value(|l| l.retry());
    }

    pub fn reset(&self) {
        let _ = self.loader.try_with_value(|l| l.reset());
    }
}

/// Returns the node ref for the end-of-list sentinel and calls `on_visible`
/// each time it comes within `lookahead_px` of the visible area while
/// `enabled` is true.
///
/// With `root` set, visibility is measured against that scrolling
/// container instead of the browser viewport.
pub fn use_viewport_trigger(
    on_visible: impl Fn() + 'static,
    enabled: Signal<bool>,
    lookahead_px: u32,
    root: Option<NodeRef<html::Div>>,
) -> NodeRef<html::Div> {
    let sentinel = NodeRef::<html::Div>::new();
    let on_visible: Rc<dyn Fn()> = Rc::new(on_visible);
    let trigger = StoredValue::new_local(None::<ViewportTrigger<IntersectionVisibility>>);

    Effect::new(move |_| {
        let enabled = enabled.get();
        let Some(target) = sentinel.get() else {
            return;
        };
        let root = match root {
            Some(root) => match root.get() {
                Some(el) => Some(el),
                None => return,
            },
            None => None,
        };

        trigger.update_value(|slot| {
            if let Some(trigger) = slot.as_mut() {
                trigger.set_enabled(enabled);
                return;
            }
            let mut source = IntersectionVisibility::new(target.into());
            if let Some(root) = root {
                source = source.with_root(root.into());
            }
            *slot = Some(ViewportTrigger::new(
                source,
                Rc::clone(&on_visible),
                lookahead_px,
                enabled,
            ));
        });
    });

    sentinel
}
