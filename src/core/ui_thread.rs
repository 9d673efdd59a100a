// src/core/ui_thread.rs
//! Reserved-thread guard for the blocking scrape calls.
//!
//! A frontend marks its event-loop thread once at startup; the scrape client
//! then refuses to run on it, since a call blocks for the full network round
//! trip. With no reservation the guard is inert, so plain library use and
//! tests need no setup.

use std::sync::OnceLock;
use std::thread::{self, ThreadId};

static RESERVED: OnceLock<ThreadId> = OnceLock::new();

/// Mark the calling thread as the event-loop thread. First call wins; later
/// calls are ignored.
pub fn reserve_current() {
    let _ = RESERVED.set(thread::current().id());
}

/// Panic if called from the reserved thread. The scrape client runs this
/// before any network I/O.
pub fn assert_background() {
    if let Some(reserved) = RESERVED.get() {
        assert!(
            *reserved != thread::current().id(),
            "blocking scrape invoked on the reserved event-loop thread"
        );
    }
}
