//! Background replication of board snapshots.
//!
//! The board never waits on storage: [`SyncHandle::queue`] hands a snapshot
//! to a tokio worker that writes snapshots one at a time in queue order.

mod worker;

pub use worker::BridgeStats;

use crate::retry::RetryPolicy;
use crate::traits::ComponentDataStore;
use boardkit_core::{BoardError, BoardResult};
use boardkit_domain::{ComponentData, PersistHandle};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use worker::Message;

/// Owns the worker task. Dropping the bridge aborts it.
pub struct PersistenceBridge {
    tx: mpsc::UnboundedSender<Message>,
    worker: Option<JoinHandle<BridgeStats>>,
}

/// Cloneable sender side handed to board controllers.
#[derive(Clone)]
pub struct SyncHandle {
    tx: mpsc::UnboundedSender<Message>,
}

impl PersistenceBridge {
    /// Start the worker on the current tokio runtime.
    pub fn spawn(store: Arc<dyn ComponentDataStore>, policy: RetryPolicy) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(worker::run(store, policy, rx));
        Self {
            tx,
            worker: Some(worker),
        }
    }

    pub fn handle(&self) -> SyncHandle {
        SyncHandle {
            tx: self.tx.clone(),
        }
    }

    /// Write everything queued so far, then stop the worker.
    pub async fn shutdown(mut self) -> BoardResult<BridgeStats> {
        let _ = self.tx.send(Message::Shutdown);
        match self.worker.take() {
            Some(worker) => worker
                .await
                .map_err(|e| BoardError::Internal(format!("Persistence worker failed: {}", e))),
            None => Ok(BridgeStats::default()),
        }
    }

    /// Stop immediately, abandoning queued and in-flight writes.
    pub fn cancel(mut self) {
        self.abort_worker();
    }

    fn abort_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            tracing::debug!("Aborting persistence worker");
            worker.abort();
        }
    }
}

impl Drop for PersistenceBridge {
    fn drop(&mut self) {
        self.abort_worker();
    }
}

impl SyncHandle {
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl PersistHandle for SyncHandle {
    fn queue(&self, data: ComponentData) {
        let component_id = data.component_id.clone();
        match self.tx.send(Message::Save(data)) {
            Ok(()) => tracing::debug!("Snapshot for {} queued", component_id),
            Err(_) => tracing::error!(
                "Failed to queue snapshot for {}: persistence worker stopped",
                component_id
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockComponentDataStore;
    use async_trait::async_trait;
    use boardkit_domain::{Board, NewTask, Task};
    use chrono::Utc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    fn snapshot(id: &str, titles: &[&str]) -> ComponentData {
        let mut board = Board::new(id, "Board");
        board
            .create_column_with_id("col1".into(), "To Do".into())
            .unwrap();
        for title in titles {
            board
                .add_task("col1", NewTask::titled(*title), Utc::now())
                .unwrap();
        }
        ComponentData::from_board(&board)
    }

    fn fast_retry() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    /// Records writes and fails the first `failures` of them.
    #[derive(Default)]
    struct FlakyStore {
        failures: u32,
        attempts: AtomicU32,
        saved: Mutex<Vec<ComponentData>>,
    }

    #[async_trait]
    impl ComponentDataStore for FlakyStore {
        async fn fetch(&self, _component_id: &str) -> BoardResult<Option<Vec<Task>>> {
            Ok(None)
        }

        async fn save(&self, data: &ComponentData) -> BoardResult<()> {
            if self.attempts.fetch_add(1, Ordering::SeqCst) < self.failures {
                return Err(BoardError::Remote {
                    status: Some(503),
                    message: "unavailable".into(),
                });
            }
            self.saved.lock().unwrap().push(data.clone());
            Ok(())
        }

        fn describe(&self) -> String {
            "flaky".into()
        }
    }

    #[tokio::test]
    async fn test_writes_in_queue_order() {
        let store = Arc::new(FlakyStore::default());
        let bridge = PersistenceBridge::spawn(store.clone(), fast_retry());
        let handle = bridge.handle();

        handle.queue(snapshot("kanban-1", &["a"]));
        handle.queue(snapshot("kanban-2", &["b"]));
        let stats = bridge.shutdown().await.unwrap();

        assert_eq!(stats.saved, 2);
        let saved = store.saved.lock().unwrap();
        let ids: Vec<_> = saved.iter().map(|d| d.component_id.as_str()).collect();
        assert_eq!(ids, vec!["kanban-1", "kanban-2"]);
    }

    #[tokio::test]
    async fn test_coalesces_latest_per_component() {
        let store = Arc::new(FlakyStore::default());
        let bridge = PersistenceBridge::spawn(store.clone(), fast_retry());
        let handle = bridge.handle();

        // Nothing runs until the test yields, so all three land in one batch
        handle.queue(snapshot("kanban-1", &["a"]));
        handle.queue(snapshot("kanban-1", &["a", "b"]));
        handle.queue(snapshot("kanban-1", &["a", "b", "c"]));
        let stats = bridge.shutdown().await.unwrap();

        assert_eq!(stats.saved, 1);
        assert_eq!(stats.coalesced, 2);
        let saved = store.saved.lock().unwrap();
        assert_eq!(saved[0].tasks.len(), 3);
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried() {
        let store = Arc::new(FlakyStore {
            failures: 2,
            ..Default::default()
        });
        let bridge = PersistenceBridge::spawn(store.clone(), fast_retry());
        bridge.handle().queue(snapshot("kanban-1", &["a"]));
        let stats = bridge.shutdown().await.unwrap();

        assert_eq!(stats.saved, 1);
        assert_eq!(store.attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_failure_is_logged_not_raised() {
        let mut store = MockComponentDataStore::new();
        store.expect_save().times(1).returning(|_| {
            Err(BoardError::Remote {
                status: Some(400),
                message: "bad request".into(),
            })
        });
        let bridge = PersistenceBridge::spawn(Arc::new(store), fast_retry());
        bridge.handle().queue(snapshot("kanban-1", &["a"]));

        let stats = bridge.shutdown().await.unwrap();
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.saved, 0);
    }

    struct StuckStore;

    #[async_trait]
    impl ComponentDataStore for StuckStore {
        async fn fetch(&self, _component_id: &str) -> BoardResult<Option<Vec<Task>>> {
            Ok(None)
        }

        async fn save(&self, _data: &ComponentData) -> BoardResult<()> {
            std::future::pending().await
        }

        fn describe(&self) -> String {
            "stuck".into()
        }
    }

    #[tokio::test]
    async fn test_cancel_abandons_in_flight_write() {
        let bridge = PersistenceBridge::spawn(Arc::new(StuckStore), RetryPolicy::none());
        let handle = bridge.handle();
        handle.queue(snapshot("kanban-1", &["a"]));
        tokio::task::yield_now().await;

        bridge.cancel();
        tokio::time::timeout(Duration::from_secs(1), async {
            while !handle.is_closed() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();

        // Queueing after cancellation is logged and dropped
        handle.queue(snapshot("kanban-1", &["b"]));
    }

    #[tokio::test]
    async fn test_drop_aborts_worker() {
        let handle = {
            let bridge = PersistenceBridge::spawn(Arc::new(StuckStore), RetryPolicy::none());
            bridge.handle()
        };
        tokio::time::timeout(Duration::from_secs(1), async {
            while !handle.is_closed() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
    }
}
