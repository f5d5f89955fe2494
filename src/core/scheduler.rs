use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration};

/// Keyed one-shot timer for deferred callbacks.
///
/// Scheduling under a key that already has a pending task replaces the old
/// task. The reconnect loop relies on this: however many failure signals a
/// dying connection emits, at most one retry is ever pending.
#[derive(Debug)]
pub struct Scheduler {
    timeouts: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
}

impl Scheduler {
    /// Creates a new Scheduler instance
    pub fn new() -> Self {
        Self {
            timeouts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Schedule a callback to run once after `delay`, replacing any pending
    /// task scheduled under the same key.
    pub async fn schedule<F>(&self, callback: F, delay: Duration, key: String)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel(&key).await;

        let timeouts = self.timeouts.clone();
        let handle = tokio::spawn({
            let key = key.clone();
            async move {
                time::sleep(delay).await;
                callback();
                timeouts.lock().await.remove(&key);
            }
        });

        self.timeouts.lock().await.insert(key, handle);
    }

    /// Cancel a pending task by its key. Does nothing if no task is pending.
    pub async fn cancel(&self, key: &str) {
        if let Some(handle) = self.timeouts.lock().await.remove(key) {
            handle.abort();
        }
    }

    /// Check if a task with the given key is pending
    pub async fn has(&self, key: &str) -> bool {
        self.timeouts.lock().await.contains_key(key)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_schedule_and_execute() {
        let scheduler = Scheduler::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        scheduler
            .schedule(
                move || {
                    calls_clone.fetch_add(1, Ordering::SeqCst);
                },
                Duration::from_millis(50),
                "retry".to_string(),
            )
            .await;

        assert!(scheduler.has("retry").await);
        time::sleep(Duration::from_millis(100)).await;
        assert!(!scheduler.has("retry").await);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancel() {
        let scheduler = Scheduler::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        scheduler
            .schedule(
                move || {
                    calls_clone.fetch_add(1, Ordering::SeqCst);
                },
                Duration::from_millis(50),
                "retry".to_string(),
            )
            .await;

        scheduler.cancel("retry").await;
        assert!(!scheduler.has("retry").await);

        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_same_key_replaces_pending_task() {
        let scheduler = Scheduler::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let calls_clone = calls.clone();
            scheduler
                .schedule(
                    move || {
                        calls_clone.fetch_add(1, Ordering::SeqCst);
                    },
                    Duration::from_millis(50),
                    "retry".to_string(),
                )
                .await;
        }

        time::sleep(Duration::from_millis(120)).await;
        // Only the last of the three schedules survives.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
