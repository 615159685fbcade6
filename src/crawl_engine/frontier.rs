//! Shared crawl frontier
//!
//! A FIFO of [`FrontierItem`]s with an outstanding-work counter. Every push
//! counts one unit of work; every popped item must be acknowledged exactly
//! once. [`Frontier::wait_until_drained`] resolves when the counter is back at
//! zero, which is how the orchestrator knows the crawl is finished.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::ops::Deref;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

use super::crawl_types::FrontierItem;

#[derive(Debug, Default)]
pub struct Frontier {
    queue: Mutex<VecDeque<FrontierItem>>,
    available: Notify,
    /// Pushed but not yet acknowledged
    outstanding: AtomicUsize,
    drained: Notify,
}

impl Frontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item and wake one waiting worker.
    pub fn push(&self, item: FrontierItem) {
        // Count before the item becomes visible so a fast ack can't underflow
        self.outstanding.fetch_add(1, Ordering::AcqRel);
        self.queue.lock().push_back(item);
        self.available.notify_one();
    }

    /// Take the oldest item, suspending while the queue is empty.
    ///
    /// The returned lease acknowledges the item when dropped, so a worker
    /// that bails out early on any path still releases its unit of work.
    pub async fn pop(&self) -> FrontierLease<'_> {
        loop {
            let notified = self.available.notified();
            tokio::pin!(notified);
            // Register before checking so a concurrent push can't be missed
            notified.as_mut().enable();

            if let Some(item) = self.queue.lock().pop_front() {
                return FrontierLease {
                    frontier: self,
                    item,
                };
            }

            notified.await;
        }
    }

    /// Mark one popped item as fully processed.
    ///
    /// Called by [`FrontierLease`] on drop.
    fn ack(&self) {
        let previous = self.outstanding.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(previous > 0, "frontier ack without matching push");
        if previous == 1 {
            self.drained.notify_waiters();
        }
    }

    /// Resolve once every pushed item has been acknowledged.
    pub async fn wait_until_drained(&self) {
        loop {
            let notified = self.drained.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.outstanding.load(Ordering::Acquire) == 0 {
                return;
            }

            notified.await;
        }
    }

    /// Items waiting in the queue (not counting in-flight work)
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.lock().len()
    }

    /// Items pushed but not yet acknowledged
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }
}

/// A popped item whose acknowledgement is tied to this value's lifetime.
#[derive(Debug)]
pub struct FrontierLease<'a> {
    frontier: &'a Frontier,
    item: FrontierItem,
}

impl FrontierLease<'_> {
    #[must_use]
    pub fn item(&self) -> &FrontierItem {
        &self.item
    }
}

impl Deref for FrontierLease<'_> {
    type Target = FrontierItem;

    fn deref(&self) -> &Self::Target {
        &self.item
    }
}

impl Drop for FrontierLease<'_> {
    fn drop(&mut self) {
        self.frontier.ack();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn pops_in_fifo_order() {
        let frontier = Frontier::new();
        frontier.push(FrontierItem::new("a", 0));
        frontier.push(FrontierItem::new("b", 1));

        assert_eq!(frontier.pop().await.url, "a");
        assert_eq!(frontier.pop().await.url, "b");
        assert_eq!(frontier.outstanding(), 0);
    }

    #[tokio::test]
    async fn drained_waits_for_ack_not_just_empty_queue() {
        let frontier = Arc::new(Frontier::new());
        frontier.push(FrontierItem::new("a", 0));

        let lease = frontier.pop().await;
        assert_eq!(frontier.queued(), 0);
        assert_eq!(frontier.outstanding(), 1);

        let waiter = {
            let frontier = Arc::clone(&frontier);
            tokio::spawn(async move { frontier.wait_until_drained().await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(lease);
        timeout(Duration::from_secs(1), waiter)
            .await
            .expect("drain should resolve after ack")
            .unwrap();
    }

    #[tokio::test]
    async fn drained_resolves_immediately_when_idle() {
        let frontier = Frontier::new();
        timeout(Duration::from_millis(100), frontier.wait_until_drained())
            .await
            .expect("empty frontier is drained");
    }

    #[tokio::test]
    async fn pop_suspends_until_push() {
        let frontier = Arc::new(Frontier::new());
        let popper = {
            let frontier = Arc::clone(&frontier);
            tokio::spawn(async move { frontier.pop().await.item().clone() })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!popper.is_finished());

        frontier.push(FrontierItem::new("late", 2));
        let item = timeout(Duration::from_secs(1), popper).await.unwrap().unwrap();
        assert_eq!(item, FrontierItem::new("late", 2));
        assert_eq!(frontier.outstanding(), 0);
    }

    #[tokio::test]
    async fn children_pushed_before_ack_keep_frontier_open() {
        let frontier = Frontier::new();
        frontier.push(FrontierItem::new("seed", 0));

        let lease = frontier.pop().await;
        frontier.push(lease.child("child"));
        drop(lease);
        assert_eq!(frontier.outstanding(), 1);

        let child = frontier.pop().await;
        assert_eq!(child.depth, 1);
        drop(child);
        timeout(Duration::from_millis(100), frontier.wait_until_drained())
            .await
            .unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn many_workers_drain_every_item() {
        let frontier = Arc::new(Frontier::new());
        for i in 0..200 {
            frontier.push(FrontierItem::new(format!("u{i}"), 0));
        }
        let seen = Arc::new(AtomicUsize::new(0));
        let mut workers = Vec::new();
        for _ in 0..8 {
            let frontier = Arc::clone(&frontier);
            let seen = Arc::clone(&seen);
            workers.push(tokio::spawn(async move {
                loop {
                    let _lease = frontier.pop().await;
                    seen.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }
        timeout(Duration::from_secs(5), frontier.wait_until_drained())
            .await
            .unwrap();
        for w in &workers {
            w.abort();
        }
        assert_eq!(seen.load(Ordering::SeqCst), 200);
    }
}
