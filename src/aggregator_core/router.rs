//! Fan-out/fan-in routing of orders to per-date accumulators
//!
//! The router is the only owner of the date-to-accumulator map and the only
//! submission path, so no lock is needed anywhere: each accumulator's state
//! is private to its own task, fed through its own channel.

use super::accumulator::{self, AccumulatorHandle};
use super::normalizer::Order;
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};

/// Final date-to-mean mapping, one entry per distinct date observed.
pub type ResultMapping = HashMap<String, f64>;

pub struct AggregationRouter {
    channel_buffer: usize,
    workers: HashMap<String, AccumulatorHandle>,
}

impl AggregationRouter {
    pub fn new(channel_buffer: usize) -> Self {
        Self {
            channel_buffer,
            workers: HashMap::new(),
        }
    }

    /// Route one validated order to the accumulator owning its date key.
    ///
    /// The accumulator task is spawned and registered on first sight of a
    /// key, before the value is forwarded, so the first value of a key is
    /// delivered like any other. Awaits only when the key's channel is full.
    pub async fn submit(&mut self, order: Order) {
        let buffer = self.channel_buffer;
        let worker = self
            .workers
            .entry(order.date)
            .or_insert_with(|| accumulator::spawn(buffer));
        if worker.input.send(order.value).await.is_err() {
            log::error!("accumulator channel closed before end of input");
        }
    }

    /// Number of distinct date keys seen so far.
    pub fn key_count(&self) -> usize {
        self.workers.len()
    }

    /// Signal end of input and join every accumulator.
    ///
    /// Closes each worker's input channel, then awaits its finalized mean.
    /// Returns only once every per-date task has finalized; collection order
    /// does not matter since the mapping is keyed. Zero submitted orders
    /// yield an empty mapping.
    pub async fn finish(self) -> ResultMapping {
        let mut result = ResultMapping::with_capacity(self.workers.len());
        for (date, worker) in self.workers {
            let AccumulatorHandle { input, result: mean } = worker;
            drop(input); // close signal: no more values for this key
            match mean.await {
                Ok(mean) => {
                    result.insert(date, mean);
                }
                Err(_) => {
                    log::error!("accumulator for {} exited without a result", date);
                }
            }
        }
        result
    }
}

/// Channel-driven form of the router.
///
/// Returns the ingestion sender and a receiver that resolves with the final
/// mapping once every sender clone has been dropped and all accumulators
/// have finalized.
pub fn spawn(channel_buffer: usize) -> (mpsc::Sender<Order>, oneshot::Receiver<ResultMapping>) {
    let (tx, mut rx) = mpsc::channel::<Order>(channel_buffer);
    let (result_tx, result_rx) = oneshot::channel();
    tokio::spawn(async move {
        let mut router = AggregationRouter::new(channel_buffer);
        while let Some(order) = rx.recv().await {
            router.submit(order).await;
        }
        let _ = result_tx.send(router.finish().await);
    });
    (tx, result_rx)
}
