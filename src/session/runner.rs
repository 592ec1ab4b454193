use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::warn;

use crate::api::AdvisoryBackend;
use crate::session::request::{execute, Completion, Request};

type Wakeup = Arc<dyn Fn() + Send + Sync>;

/// Bridges the UI thread and the async runtime.
///
/// `submit` spawns the request and returns immediately; completions queue up
/// until the UI thread calls `drain` at the start of its next frame, so all
/// state mutation stays on that thread.
pub struct RequestRunner {
    handle: Handle,
    backend: Arc<dyn AdvisoryBackend>,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
    wakeup: Option<Wakeup>,
}

impl RequestRunner {
    pub fn new(handle: Handle, backend: Arc<dyn AdvisoryBackend>) -> Self {
        let (tx, rx) = unbounded_channel();
        Self { handle, backend, tx, rx, wakeup: None }
    }

    /// Called after every completion is queued; the GUI uses it to request a
    /// repaint so the completion is picked up without user input.
    pub fn with_wakeup(mut self, wakeup: impl Fn() + Send + Sync + 'static) -> Self {
        self.wakeup = Some(Arc::new(wakeup));
        self
    }

    pub fn submit(&self, request: Request) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        let wakeup = self.wakeup.clone();
        self.handle.spawn(async move {
            let name = request.name();
            let completion = execute(backend, request).await;
            if tx.send(completion).is_err() {
                warn!(request = name, "completion dropped; UI is gone");
                return;
            }
            if let Some(wakeup) = wakeup {
                wakeup();
            }
        });
    }

    pub fn submit_all(&self, requests: impl IntoIterator<Item = Request>) {
        for request in requests {
            self.submit(request);
        }
    }

    /// Everything that finished since the last call, in completion order.
    pub fn drain(&mut self) -> Vec<Completion> {
        let mut completions = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            completions.push(completion);
        }
        completions
    }

    /// Waits for the next completion. Used by tests and headless callers.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.rx.recv().await
    }
}
