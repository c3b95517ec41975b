//! Cooperative stop signal for the long-running tasks.
//!
//! The service loop and the router task poll it at their timeout
//! checkpoints. The classifier has no timeout, so it awaits [`Shutdown::wait`]
//! instead.
use core::future::poll_fn;
use core::sync::atomic::{AtomicBool, Ordering};
use core::task::Poll;

use embassy_sync::waitqueue::AtomicWaker;

pub struct Shutdown {
    triggered: AtomicBool,
    waker: AtomicWaker,
}

impl Shutdown {
    pub const fn new() -> Self {
        Self {
            triggered: AtomicBool::new(false),
            waker: AtomicWaker::new(),
        }
    }

    /// Request every task observing this signal to stop. Interrupt safe.
    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::Release);
        self.waker.wake();
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::Acquire)
    }

    /// Resolve once [`Shutdown::trigger`] has been called.
    ///
    /// Only one task may wait at a time; a second waiter replaces the first.
    pub async fn wait(&self) {
        poll_fn(|cx| {
            self.waker.register(cx.waker());
            if self.is_triggered() {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
