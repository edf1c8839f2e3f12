//! Per-date running mean task
//!
//! One accumulator task owns the count/total pair for one date key. Values
//! arrive on a bounded mpsc channel; dropping the sender is the close signal,
//! and the finalized mean comes back exactly once through a oneshot channel.

use tokio::sync::{mpsc, oneshot};

/// Running count/total state behind one accumulator task.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunningMean {
    count: u64,
    total: f64,
}

impl RunningMean {
    pub fn accept(&mut self, value: f64) {
        self.count += 1;
        self.total += value;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Arithmetic mean of the accepted values. Meaningful only once at least
    /// one value has been accepted; the router guarantees that by forwarding
    /// the first value of a key to the task it just spawned.
    pub fn mean(&self) -> f64 {
        self.total / self.count as f64
    }
}

/// Handle to one spawned accumulator task.
///
/// Values go in through `input`; dropping `input` closes the task's stream,
/// after which `result` resolves with the finalized mean. The oneshot
/// receiver makes the mean single-consumer by construction.
#[derive(Debug)]
pub struct AccumulatorHandle {
    pub input: mpsc::Sender<f64>,
    pub result: oneshot::Receiver<f64>,
}

/// Spawn a fresh running-mean task with the given input channel capacity.
pub fn spawn(buffer: usize) -> AccumulatorHandle {
    let (input, rx) = mpsc::channel(buffer);
    let (result_tx, result) = oneshot::channel();
    tokio::spawn(running_mean(rx, result_tx));
    AccumulatorHandle { input, result }
}

/// Drain the input channel, then emit `total / count` exactly once.
async fn running_mean(mut rx: mpsc::Receiver<f64>, result: oneshot::Sender<f64>) {
    let mut state = RunningMean::default();
    while let Some(value) = rx.recv().await {
        state.accept(value);
    }
    // Send fails only if the router gave up on this key's result.
    let _ = result.send(state.mean());
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn mean_of(values: &[f64]) -> f64 {
        let handle = spawn(1);
        for &value in values {
            handle.input.send(value).await.unwrap();
        }
        drop(handle.input);
        handle.result.await.unwrap()
    }

    #[tokio::test]
    async fn test_running_mean_task() {
        let mean = mean_of(&[14.0, 53.2, 6.0, 0.0, -10.0, 12.6, 6.0, 12.0]).await;
        assert!((mean - 11.725).abs() < 1e-9);

        let mean = mean_of(&[1.0, 2.0, 3.0, 5.0, 8.0, -10.0]).await;
        assert!((mean - 1.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_single_value_mean_is_that_value() {
        let mean = mean_of(&[121.2]).await;
        assert!((mean - 121.2).abs() < 1e-9);
    }

    #[test]
    fn test_running_mean_state() {
        let mut state = RunningMean::default();
        assert_eq!(state.count(), 0);
        state.accept(2.0);
        state.accept(4.0);
        assert_eq!(state.count(), 2);
        assert!((state.mean() - 3.0).abs() < 1e-9);
    }
}
