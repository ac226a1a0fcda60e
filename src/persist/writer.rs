//! Background writer for persisted snapshots.
//!
//! Store mutations enqueue the serialized snapshot and return immediately;
//! the writer thread applies them to the engine in order. When several
//! snapshots queue up behind a slow write only the newest is written, since
//! each one fully replaces the previous.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

use super::engine::StorageEngine;

pub(crate) struct WriteOp {
    pub key: String,
    pub value: String,
}

pub(crate) struct SnapshotWriter {
    engine: Arc<dyn StorageEngine>,
    sender: Option<Sender<WriteOp>>,
    handle: Option<JoinHandle<()>>,
}

impl SnapshotWriter {
    pub fn spawn(engine: Arc<dyn StorageEngine>) -> Self {
        let (sender, receiver) = channel();
        let thread_engine = Arc::clone(&engine);
        let spawned = std::thread::Builder::new()
            .name("persist-writer".to_string())
            .spawn(move || writer_loop(receiver, thread_engine));

        match spawned {
            Ok(handle) => Self {
                engine,
                sender: Some(sender),
                handle: Some(handle),
            },
            Err(err) => {
                tracing::warn!(error = %err, "Persist writer thread unavailable, writing inline");
                Self {
                    engine,
                    sender: None,
                    handle: None,
                }
            }
        }
    }

    /// Queue a write. Never waits for the engine.
    pub fn submit(&self, op: WriteOp) {
        let op = match &self.sender {
            Some(sender) => match sender.send(op) {
                Ok(()) => return,
                Err(err) => err.0,
            },
            None => op,
        };
        apply(self.engine.as_ref(), op);
    }

    /// Stop accepting writes and wait for queued ones to land.
    pub fn flush(&mut self) {
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("Persist writer thread panicked");
            }
        }
    }
}

impl Drop for SnapshotWriter {
    fn drop(&mut self) {
        self.flush();
    }
}

fn writer_loop(receiver: Receiver<WriteOp>, engine: Arc<dyn StorageEngine>) {
    while let Ok(mut op) = receiver.recv() {
        while let Ok(newer) = receiver.try_recv() {
            op = newer;
        }
        apply(engine.as_ref(), op);
    }
}

fn apply(engine: &dyn StorageEngine, op: WriteOp) {
    if let Err(err) = engine.set_item(&op.key, &op.value) {
        tracing::warn!(key = %op.key, error = %err, "Failed to persist snapshot");
    }
}
