//! # Persistence Transport
//!
//! Boundary to whatever stores page content. The engine treats the
//! tree as an opaque JSON-serializable document; the transport only
//! has to load it and signal save success or failure.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use stencil_model::PageContent;
use thiserror::Error;

/// Identifier of one editable page.
pub type PageId = String;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("page not found: {0}")]
    NotFound(PageId),

    #[error("network failure: {0}")]
    Network(String),

    #[error("server rejected save: {0}")]
    Rejected(String),
}

/// JSON-over-anything persistence channel.
///
/// Implementations must be cheap to call from the autosave task; the
/// returned futures carry the actual I/O.
pub trait ContentTransport: Send + Sync {
    fn load(&self, page_id: &PageId) -> BoxFuture<'static, Result<PageContent, TransportError>>;

    fn save(
        &self,
        page_id: &PageId,
        content: PageContent,
    ) -> BoxFuture<'static, Result<(), TransportError>>;
}

#[derive(Default)]
struct MemoryInner {
    pages: HashMap<PageId, PageContent>,
    saved: Vec<PageContent>,
    fail_next_saves: usize,
    save_count: usize,
    live: usize,
    max_live: usize,
}

/// In-memory transport for tests and local development.
///
/// Records every successful save in order and can be scripted to fail
/// the next N save calls. An optional artificial delay keeps the save
/// "in flight" long enough to exercise the scheduler's busy states.
#[derive(Clone, Default)]
pub struct InMemoryTransport {
    inner: Arc<Mutex<MemoryInner>>,
    save_delay: Duration,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_save_delay(save_delay: Duration) -> Self {
        Self {
            inner: Arc::default(),
            save_delay,
        }
    }

    /// Seed the stored content for a page.
    pub fn seed(&self, page_id: impl Into<PageId>, content: PageContent) {
        self.inner
            .lock()
            .expect("transport lock")
            .pages
            .insert(page_id.into(), content);
    }

    /// Make the next `n` save calls fail with a network error.
    pub fn fail_next_saves(&self, n: usize) {
        self.inner.lock().expect("transport lock").fail_next_saves = n;
    }

    /// Every successfully saved tree, in send order.
    pub fn saved(&self) -> Vec<PageContent> {
        self.inner.lock().expect("transport lock").saved.clone()
    }

    /// Number of save calls issued (successful or not).
    pub fn save_count(&self) -> usize {
        self.inner.lock().expect("transport lock").save_count
    }

    /// Highest number of saves ever in flight at once. The scheduler
    /// guarantees this never exceeds 1.
    pub fn max_in_flight(&self) -> usize {
        self.inner.lock().expect("transport lock").max_live
    }
}

impl ContentTransport for InMemoryTransport {
    fn load(&self, page_id: &PageId) -> BoxFuture<'static, Result<PageContent, TransportError>> {
        let inner = Arc::clone(&self.inner);
        let page_id = page_id.clone();
        async move {
            inner
                .lock()
                .expect("transport lock")
                .pages
                .get(&page_id)
                .cloned()
                .ok_or(TransportError::NotFound(page_id))
        }
        .boxed()
    }

    fn save(
        &self,
        page_id: &PageId,
        content: PageContent,
    ) -> BoxFuture<'static, Result<(), TransportError>> {
        let inner = Arc::clone(&self.inner);
        let page_id = page_id.clone();
        let delay = self.save_delay;
        async move {
            {
                let mut guard = inner.lock().expect("transport lock");
                guard.save_count += 1;
                guard.live += 1;
                guard.max_live = guard.max_live.max(guard.live);
            }
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let mut guard = inner.lock().expect("transport lock");
            guard.live -= 1;
            if guard.fail_next_saves > 0 {
                guard.fail_next_saves -= 1;
                return Err(TransportError::Network("simulated failure".to_string()));
            }
            guard.saved.push(content.clone());
            guard.pages.insert(page_id, content);
            Ok(())
        }
        .boxed()
    }
}
