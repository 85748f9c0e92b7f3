//! Async driver around [`PagingState`].
//!
//! Everything runs on one thread: fetches are spawned on a local executor
//! (`leptos::task::spawn_local` in the browser, a `LocalPool` in tests) and
//! their completions are applied back to the shared state.

use super::error::FetchError;
use super::state::{Completion, PageTicket, PagingState};
use futures::future::{FutureExt, LocalBoxFuture};
use std::cell::RefCell;
use std::future::Future;
use std::rc::{Rc, Weak};

pub type PageFuture<T> = LocalBoxFuture<'static, Result<Vec<T>, FetchError>>;

type FetchFn<T> = Box<dyn Fn(u32) -> PageFuture<T>>;
type SpawnFn = Box<dyn Fn(LocalBoxFuture<'static, ()>)>;
type Listener<T> = Box<dyn Fn(&PagingState<T>)>;

/// Loads a list page by page through a caller supplied fetch function.
///
/// Page 1 is requested on construction. Clones share the same state; once
/// the last clone is dropped, completions of outstanding fetches are
/// discarded.
pub struct IncrementalListLoader<T: 'static> {
    inner: Rc<LoaderInner<T>>,
}

impl<T: 'static> Clone for IncrementalListLoader<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

struct LoaderInner<T> {
    state: RefCell<PagingState<T>>,
    fetch_page: FetchFn<T>,
    spawn: SpawnFn,
    listener: Option<Listener<T>>,
}

impl<T: 'static> IncrementalListLoader<T> {
    pub fn new<F, Fut, S>(fetch_page: F, spawn: S) -> Self
    where
        F: Fn(u32) -> Fut + 'static,
        Fut: Future<Output = Result<Vec<T>, FetchError>> + 'static,
        S: Fn(LocalBoxFuture<'static, ()>) + 'static,
    {
        Self::start(box_fetch(fetch_page), Box::new(spawn), None)
    }

    /// Like [`IncrementalListLoader::new`], with `listener` called after every
    /// observable transition (request issued, page applied, failure, reset).
    ///
    /// The listener must not call back into the loader synchronously.
    pub fn with_listener<F, Fut, S, L>(fetch_page: F, spawn: S, listener: L) -> Self
    where
        F: Fn(u32) -> Fut + 'static,
        Fut: Future<Output = Result<Vec<T>, FetchError>> + 'static,
        S: Fn(LocalBoxFuture<'static, ()>) + 'static,
        L: Fn(&PagingState<T>) + 'static,
    {
        Self::start(box_fetch(fetch_page), Box::new(spawn), Some(Box::new(listener)))
    }

    fn start(fetch_page: FetchFn<T>, spawn: SpawnFn, listener: Option<Listener<T>>) -> Self {
        let loader = Self {
            inner: Rc::new(LoaderInner {
                state: RefCell::new(PagingState::new()),
                fetch_page,
                spawn,
                listener,
            }),
        };
        loader.request_next_page();
        loader
    }

    /// Fetches the cursor page unless a fetch is in flight, the list is
    /// exhausted or the last fetch failed.
    pub fn request_next_page(&self) {
        request_next(&self.inner);
    }

    /// Re-issues the page whose fetch failed. No-op otherwise.
    pub fn retry(&self) {
        let ticket = self.inner.state.borrow_mut().begin_retry();
        if let Some(ticket) = ticket {
            log::info!("infinite list: retrying page {}", ticket.page);
            issue(&self.inner, ticket);
        }
    }

    /// Drops everything loaded so far and loads page 1 again, as soon as any
    /// outstanding fetch has settled.
    pub fn reset(&self) {
        self.inner.state.borrow_mut().reset();
        log::debug!("infinite list: reset");
        if !request_next(&self.inner) {
            self.inner.notify();
        }
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&PagingState<T>) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    pub fn items(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.with_state(|s| s.items().to_vec())
    }

    pub fn is_loading(&self) -> bool {
        self.with_state(PagingState::is_loading)
    }

    pub fn has_more(&self) -> bool {
        self.with_state(PagingState::has_more)
    }

    pub fn last_error(&self) -> Option<FetchError> {
        self.with_state(|s| s.last_error().cloned())
    }

    pub fn next_page(&self) -> u32 {
        self.with_state(PagingState::next_page)
    }
}

fn box_fetch<T, F, Fut>(fetch_page: F) -> FetchFn<T>
where
    F: Fn(u32) -> Fut + 'static,
    Fut: Future<Output = Result<Vec<T>, FetchError>> + 'static,
{
    Box::new(move |page| fetch_page(page).boxed_local())
}

impl<T> LoaderInner<T> {
    fn notify(&self) {
        if let Some(listener) = &self.listener {
            listener(&self.state.borrow());
        }
    }
}

/// Returns `true` when a fetch was issued.
fn request_next<T: 'static>(inner: &Rc<LoaderInner<T>>) -> bool {
    let ticket = inner.state.borrow_mut().begin_next();
    match ticket {
        Some(ticket) => {
            issue(inner, ticket);
            true
        }
        None => false,
    }
}

fn issue<T: 'static>(inner: &Rc<LoaderInner<T>>, ticket: PageTicket) {
    log::debug!("infinite list: requesting page {}", ticket.page);
    inner.notify();

    let fetch = (inner.fetch_page)(ticket.page);
    let weak: Weak<LoaderInner<T>> = Rc::downgrade(inner);
    (inner.spawn)(
        async move {
            let result = fetch.await;
            match weak.upgrade() {
                Some(inner) => settle(&inner, ticket, result),
                None => log::debug!(
                    "infinite list: page {} arrived after the list was dropped",
                    ticket.page
                ),
            }
        }
        .boxed_local(),
    );
}

fn settle<T: 'static>(
    inner: &Rc<LoaderInner<T>>,
    ticket: PageTicket,
    result: Result<Vec<T>, FetchError>,
) {
    let completion = inner.state.borrow_mut().complete(ticket, result);
    match completion {
        Completion::Appended { page, count } => {
            log::debug!("infinite list: page {} appended {} items", page, count);
        }
        Completion::Exhausted { page } => {
            log::debug!("infinite list: page {} is empty, list exhausted", page);
        }
        Completion::Failed { page } => {
            let reason = inner
                .state
                .borrow()
                .last_error()
                .map(ToString::to_string)
                .unwrap_or_default();
            log::warn!("infinite list: page {} failed: {}", page, reason);
        }
        Completion::Stale => {
            log::debug!("infinite list: dropped stale page {}", ticket.page);
            // a reset is waiting for this fetch to settle
            if request_next(inner) {
                return;
            }
        }
    }
    inner.notify();
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use std::cell::Cell;
    use std::collections::HashMap;

    /// Fetcher backed by a fixed set of pages; records every call.
    #[derive(Clone, Default)]
    struct PagedSource {
        pages: Rc<HashMap<u32, Vec<char>>>,
        calls: Rc<RefCell<Vec<u32>>>,
    }

    impl PagedSource {
        fn new(pages: &[&[char]]) -> Self {
            let pages = pages
                .iter()
                .enumerate()
                .map(|(i, p)| (i as u32 + 1, p.to_vec()))
                .collect();
            Self {
                pages: Rc::new(pages),
                calls: Rc::default(),
            }
        }

        fn fetch(&self) -> impl Fn(u32) -> futures::future::Ready<Result<Vec<char>, FetchError>> {
            let source = self.clone();
            move |page| {
                source.calls.borrow_mut().push(page);
                futures::future::ready(Ok(source.pages.get(&page).cloned().unwrap_or_default()))
            }
        }

        fn calls(&self) -> Vec<u32> {
            self.calls.borrow().clone()
        }
    }

    /// Fetcher whose responses are released by the test through channels.
    #[derive(Clone, Default)]
    struct GatedSource {
        pending: Rc<RefCell<Vec<(u32, oneshot::Sender<Result<Vec<char>, FetchError>>)>>>,
        in_flight: Rc<Cell<usize>>,
        max_in_flight: Rc<Cell<usize>>,
    }

    impl GatedSource {
        fn fetch(&self) -> impl Fn(u32) -> LocalBoxFuture<'static, Result<Vec<char>, FetchError>> {
            let source = self.clone();
            move |page| {
                let (tx, rx) = oneshot::channel();
                source.pending.borrow_mut().push((page, tx));
                source.in_flight.set(source.in_flight.get() + 1);
                source
                    .max_in_flight
                    .set(source.max_in_flight.get().max(source.in_flight.get()));
                let in_flight = Rc::clone(&source.in_flight);
                async move {
                    let result = rx
                        .await
                        .unwrap_or_else(|_| Err(FetchError::Network("cancelled".into())));
                    in_flight.set(in_flight.get() - 1);
                    result
                }
                .boxed_local()
            }
        }

        fn requested_pages(&self) -> Vec<u32> {
            self.pending.borrow().iter().map(|(page, _)| *page).collect()
        }

        fn respond(&self, result: Result<Vec<char>, FetchError>) -> u32 {
            let (page, tx) = self.pending.borrow_mut().remove(0);
            let _ = tx.send(result);
            page
        }
    }

    fn spawner(pool: &LocalPool) -> impl Fn(LocalBoxFuture<'static, ()>) {
        let spawner = pool.spawner();
        move |task| {
            spawner
                .spawn_local(task)
                .expect("local pool accepts tasks");
        }
    }

    #[test]
    fn test_first_page_is_requested_on_construction() {
        let pool = LocalPool::new();
        let source = PagedSource::new(&[&['a']]);
        let loader = IncrementalListLoader::new(source.fetch(), spawner(&pool));

        assert_eq!(source.calls(), vec![1]);
        assert!(loader.is_loading());
    }

    #[test]
    fn test_three_pages_then_exhausted() {
        let mut pool = LocalPool::new();
        let source = PagedSource::new(&[&['a', 'b'], &['c']]);
        let loader = IncrementalListLoader::new(source.fetch(), spawner(&pool));
        pool.run_until_stalled();

        loader.request_next_page();
        pool.run_until_stalled();
        loader.request_next_page();
        pool.run_until_stalled();

        assert_eq!(loader.items(), vec!['a', 'b', 'c']);
        assert!(!loader.has_more());
        assert!(!loader.is_loading());
        assert_eq!(source.calls(), vec![1, 2, 3]);

        loader.request_next_page();
        pool.run_until_stalled();
        assert_eq!(source.calls(), vec![1, 2, 3]);
    }

    #[test]
    fn test_back_to_back_requests_issue_one_fetch() {
        let mut pool = LocalPool::new();
        let source = GatedSource::default();
        let loader = IncrementalListLoader::new(source.fetch(), spawner(&pool));

        loader.request_next_page();
        loader.request_next_page();
        pool.run_until_stalled();
        assert_eq!(source.requested_pages(), vec![1]);

        source.respond(Ok(vec!['a']));
        pool.run_until_stalled();
        assert_eq!(loader.items(), vec!['a']);
        assert!(!loader.is_loading());
    }

    #[test]
    fn test_fetches_never_overlap() {
        let mut pool = LocalPool::new();
        let source = GatedSource::default();
        let loader = IncrementalListLoader::new(source.fetch(), spawner(&pool));

        for page in 1..=4 {
            for _ in 0..3 {
                loader.request_next_page();
            }
            pool.run_until_stalled();
            assert_eq!(source.respond(Ok(vec!['x'; page as usize])), page);
            pool.run_until_stalled();
            loader.request_next_page();
        }

        assert_eq!(source.max_in_flight.get(), 1);
        assert_eq!(loader.items().len(), 1 + 2 + 3 + 4);
    }

    #[test]
    fn test_failure_then_retry_reissues_same_page() {
        let mut pool = LocalPool::new();
        let source = GatedSource::default();
        let loader = IncrementalListLoader::new(source.fetch(), spawner(&pool));
        source.respond(Ok(vec!['a']));
        pool.run_until_stalled();

        loader.request_next_page();
        source.respond(Err(FetchError::Http { status: 503 }));
        pool.run_until_stalled();

        assert!(!loader.is_loading());
        assert!(loader.has_more());
        assert_eq!(loader.last_error(), Some(FetchError::Http { status: 503 }));

        loader.request_next_page();
        assert!(source.requested_pages().is_empty());

        loader.retry();
        assert_eq!(source.requested_pages(), vec![2]);
        source.respond(Ok(vec!['b']));
        pool.run_until_stalled();

        assert_eq!(loader.items(), vec!['a', 'b']);
        assert_eq!(loader.last_error(), None);
        assert_eq!(loader.next_page(), 3);
    }

    #[test]
    fn test_reset_while_in_flight_waits_then_reloads_page_one() {
        let mut pool = LocalPool::new();
        let source = GatedSource::default();
        let loader = IncrementalListLoader::new(source.fetch(), spawner(&pool));
        source.respond(Ok(vec!['a']));
        pool.run_until_stalled();

        loader.request_next_page();
        loader.reset();
        assert!(loader.items().is_empty());
        assert_eq!(source.requested_pages(), vec![2]);

        source.respond(Ok(vec!['s']));
        pool.run_until_stalled();
        assert_eq!(source.requested_pages(), vec![1]);
        assert!(loader.items().is_empty());

        source.respond(Ok(vec!['z']));
        pool.run_until_stalled();
        assert_eq!(loader.items(), vec!['z']);
        assert_eq!(source.max_in_flight.get(), 1);
    }

    #[test]
    fn test_completion_after_drop_is_ignored() {
        let mut pool = LocalPool::new();
        let source = GatedSource::default();
        let notified = Rc::new(Cell::new(0));
        let counter = Rc::clone(&notified);
        let loader = IncrementalListLoader::with_listener(
            source.fetch(),
            spawner(&pool),
            move |_: &PagingState<char>| counter.set(counter.get() + 1),
        );
        assert_eq!(notified.get(), 1);

        drop(loader);
        source.respond(Ok(vec!['a']));
        pool.run_until_stalled();

        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn test_listener_sees_whole_transitions() {
        let mut pool = LocalPool::new();
        let source = PagedSource::new(&[&['a', 'b']]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let loader = IncrementalListLoader::with_listener(
            source.fetch(),
            spawner(&pool),
            move |state: &PagingState<char>| {
                log.borrow_mut()
                    .push((state.items().len(), state.is_loading(), state.next_page()));
            },
        );
        pool.run_until_stalled();
        loader.request_next_page();
        pool.run_until_stalled();

        assert_eq!(
            *seen.borrow(),
            vec![(0, true, 1), (2, false, 2), (2, true, 2), (2, false, 3)]
        );
        assert!(!loader.has_more());
    }
}
