//! Serialization of the resolve-or-ask sequence.

use std::future::Future;

use tokio::sync::Mutex;

/// Runs async operations one at a time, in arrival order.
///
/// `tokio::sync::Mutex` queues waiters fairly, so callers are admitted FIFO
/// and each operation runs to completion before the next starts.
#[derive(Debug, Default)]
pub struct ConfirmationSemaphore {
    gate: Mutex<()>,
}

impl ConfirmationSemaphore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `operation` while holding the only permit.
    pub async fn lock<F, T>(&self, operation: F) -> T
    where
        F: Future<Output = T>,
    {
        let _permit = self.gate.lock().await;
        operation.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_operations_do_not_overlap() {
        let semaphore = Arc::new(ConfirmationSemaphore::new());
        let log = Arc::new(parking_lot::Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for i in 0..4 {
            let semaphore = semaphore.clone();
            let log = log.clone();
            handles.push(tokio::spawn(async move {
                semaphore
                    .lock(async {
                        log.lock().push(format!("start {i}"));
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        log.lock().push(format!("end {i}"));
                    })
                    .await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let log = log.lock();
        assert_eq!(log.len(), 8);
        for pair in log.chunks(2) {
            let start = pair[0].strip_prefix("start ").unwrap();
            let end = pair[1].strip_prefix("end ").unwrap();
            assert_eq!(start, end, "operations interleaved: {:?}", *log);
        }
    }

    #[tokio::test]
    async fn test_waiters_admitted_in_arrival_order() {
        let semaphore = Arc::new(ConfirmationSemaphore::new());
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));

        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
        let holder = {
            let semaphore = semaphore.clone();
            tokio::spawn(async move {
                semaphore
                    .lock(async {
                        let _ = release_rx.await;
                    })
                    .await;
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        let mut waiters = Vec::new();
        for i in 0..3 {
            let semaphore = semaphore.clone();
            let order = order.clone();
            waiters.push(tokio::spawn(async move {
                semaphore.lock(async { order.lock().push(i) }).await;
            }));
            // Let each waiter enqueue before the next one arrives.
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        release_tx.send(()).unwrap();
        holder.await.unwrap();
        for waiter in waiters {
            waiter.await.unwrap();
        }

        assert_eq!(*order.lock(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_returns_operation_output() {
        let semaphore = ConfirmationSemaphore::new();
        assert_eq!(semaphore.lock(async { 42 }).await, 42);
    }
}
