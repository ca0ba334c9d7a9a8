//! # Stencil Workspace
//!
//! Session layer of the Stencil editing engine: one [`EditorSession`]
//! per open page, a debounced [`autosave`] scheduler, the persistence
//! [`transport`] boundary, and the injected UI preference store.
//!
//! Concurrency model: all tree mutation is synchronous and pure inside
//! `stencil-editor`; the only asynchronous work is the persistence
//! call, which runs on the autosave task. The UI thread never waits on
//! it.

pub mod autosave;
pub mod prefs;
pub mod session;
pub mod transport;

pub use autosave::{AutosaveConfig, AutosaveHandle, AutosaveStatus};
pub use prefs::{MemoryPrefStore, PrefStore};
pub use session::{EditorSession, SessionError};
pub use transport::{ContentTransport, InMemoryTransport, PageId, TransportError};
