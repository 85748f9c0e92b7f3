//! Paging state of an incrementally loaded list.
//!
//! Pure and synchronous: the async driver in `loader.rs` asks for a ticket,
//! runs the fetch and hands the result back through [`PagingState::complete`].

use super::error::FetchError;

/// Permission to fetch one page, handed out by the in-flight guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    pub page: u32,
    generation: u64,
}

/// Outcome of applying a fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Appended { page: u32, count: usize },
    Exhausted { page: u32 },
    Failed { page: u32 },
    /// The list was reset while the fetch was outstanding; result dropped.
    Stale,
}

#[derive(Debug, Clone)]
pub struct PagingState<T> {
    items: Vec<T>,
    next_page: u32,
    exhausted: bool,
    in_flight: Option<PageTicket>,
    last_error: Option<FetchError>,
    generation: u64,
}

impl<T> Default for PagingState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PagingState<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_page: 1,
            exhausted: false,
            in_flight: None,
            last_error: None,
            generation: 0,
        }
    }

    /// Grants a ticket for the cursor page, or `None` while a fetch is
    /// outstanding, after exhaustion, or while the last fetch is failed
    /// (use [`PagingState::begin_retry`] for that).
    pub fn begin_next(&mut self) -> Option<PageTicket> {
        if self.in_flight.is_some() || self.exhausted || self.last_error.is_some() {
            return None;
        }
        Some(self.issue())
    }

    /// Re-issues the page whose fetch failed.
    pub fn begin_retry(&mut self) -> Option<PageTicket> {
        if self.in_flight.is_some() || self.last_error.is_none() {
            return None;
        }
        self.last_error = None;
        Some(self.issue())
    }

    fn issue(&mut self) -> PageTicket {
        let ticket = PageTicket {
            page: self.next_page,
            generation: self.generation,
        };
        self.in_flight = Some(ticket);
        ticket
    }

    /// Applies a fetch result in one step: append, exhaustion check,
    /// cursor advance and in-flight release.
    pub fn complete(
        &mut self,
        ticket: PageTicket,
        result: Result<Vec<T>, FetchError>,
    ) -> Completion {
        if self.in_flight != Some(ticket) {
            return Completion::Stale;
        }
        self.in_flight = None;
        if ticket.generation != self.generation {
            return Completion::Stale;
        }

        match result {
            Ok(page_items) => {
                let count = page_items.len();
                self.items.extend(page_items);
                self.next_page += 1;
                if count == 0 {
                    self.exhausted = true;
                    Completion::Exhausted { page: ticket.page }
                } else {
                    Completion::Appended {
                        page: ticket.page,
                        count,
                    }
                }
            }
            Err(err) => {
                self.last_error = Some(err);
                Completion::Failed { page: ticket.page }
            }
        }
    }

    /// Starts the list over from page 1.
    ///
    /// An outstanding fetch keeps the guard closed until it settles; its
    /// result is then reported as [`Completion::Stale`].
    pub fn reset(&mut self) {
        self.items.clear();
        self.next_page = 1;
        self.exhausted = false;
        self.last_error = None;
        self.generation += 1;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn has_more(&self) -> bool {
        !self.exhausted
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn snapshot(&self) -> ListSnapshot<T>
    where
        T: Clone,
    {
        ListSnapshot {
            items: self.items.clone(),
            is_loading: self.is_loading(),
            has_more: self.has_more(),
            error: self.last_error.clone(),
            next_page: self.next_page,
        }
    }
}

/// Owned copy of the observable state, published once per transition.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<T> {
    pub items: Vec<T>,
    pub is_loading: bool,
    pub has_more: bool,
    pub error: Option<FetchError>,
    pub next_page: u32,
}

impl<T> Default for ListSnapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            has_more: true,
            error: None,
            next_page: 1,
        }
    }
}

impl<T> ListSnapshot<T> {
    /// Outer guard for the viewport trigger: only watch the sentinel when a
    /// request would actually be issued.
    pub fn trigger_enabled(&self) -> bool {
        self.has_more && !self.is_loading && self.error.is_none()
    }
}
