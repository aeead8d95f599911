//! Paint worker - one dedicated thread draining requests in order

use std::thread::JoinHandle;
use std::time::Instant;

use tokio::sync::{mpsc, oneshot};

use crate::core::error::Error;
use crate::core::types::{Result, Vec3};
use crate::voxel::brush::{PaintSession, SlicingAxis};
use crate::voxel::buffer::{ElementType, PaintedLabelmap};
use super::config::WorkerConfig;
use super::protocol::{PaintRequest, PaintResponse};

/// A queued request and the channel its result goes back on
struct Envelope {
    request: PaintRequest,
    reply: oneshot::Sender<Result<PaintResponse>>,
}

/// Pending result of a submitted request
pub struct Completion {
    op: &'static str,
    rx: oneshot::Receiver<Result<PaintResponse>>,
}

impl Completion {
    /// Wait for the worker to finish the request
    pub async fn wait(self) -> Result<PaintResponse> {
        let Completion { op, rx } = self;
        rx.await.map_err(|_| {
            log::warn!("Paint worker dropped `{}` without answering", op);
            Error::WorkerClosed
        })?
    }

    /// Block the current thread until the request finishes.
    /// Must not be called from inside an async runtime.
    pub fn blocking_wait(self) -> Result<PaintResponse> {
        self.rx.blocking_recv().map_err(|_| Error::WorkerClosed)?
    }
}

/// Owns a [`PaintSession`] on a dedicated thread.
///
/// Requests are handled strictly one at a time in submission order; each one
/// completes before the next one's effects exist. Submitting never blocks the
/// caller. Painting runs to completion once accepted.
pub struct PaintWorker {
    /// Channel for sending requests to the worker thread
    request_tx: Option<mpsc::UnboundedSender<Envelope>>,
    thread: Option<JoinHandle<()>>,
    config: WorkerConfig,
}

impl PaintWorker {
    /// Start the worker thread
    pub fn spawn(config: WorkerConfig) -> Result<Self> {
        let (request_tx, request_rx) = mpsc::unbounded_channel::<Envelope>();

        let thread_config = config.clone();
        let thread = std::thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || Self::worker_loop(request_rx, thread_config))?;

        log::info!("Paint worker `{}` started", config.thread_name);

        Ok(Self {
            request_tx: Some(request_tx),
            thread: Some(thread),
            config,
        })
    }

    /// Start with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::spawn(WorkerConfig::default())
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Worker loop: one session, requests applied in arrival order
    fn worker_loop(mut request_rx: mpsc::UnboundedReceiver<Envelope>, config: WorkerConfig) {
        let mut session = PaintSession::new();

        while let Some(Envelope { request, reply }) = request_rx.blocking_recv() {
            let op = request.op_name();
            let started = Instant::now();

            let result = session.handle_request(request, config.default_element_type);

            if config.log_request_timing {
                log::debug!(
                    "`{}` took {:.3}ms",
                    op,
                    started.elapsed().as_secs_f64() * 1000.0
                );
            }
            if let Err(e) = &result {
                log::warn!("`{}` rejected: {}", op, e);
            }
            if reply.send(result).is_err() {
                log::trace!("Caller dropped completion for `{}`", op);
            }
        }

        log::info!("Paint worker `{}` stopped", config.thread_name);
    }

    /// Queue a request. Returns immediately; the result arrives on the
    /// returned [`Completion`].
    pub fn submit(&self, request: PaintRequest) -> Result<Completion> {
        let tx = self.request_tx.as_ref().ok_or(Error::WorkerClosed)?;
        let op = request.op_name();
        let (reply, rx) = oneshot::channel();

        log::trace!("Queueing `{}`", op);
        tx.send(Envelope { request, reply }).map_err(|_| Error::WorkerClosed)?;

        Ok(Completion { op, rx })
    }

    /// Submit a request and wait for its result
    pub async fn request(&self, request: PaintRequest) -> Result<PaintResponse> {
        self.submit(request)?.wait().await
    }

    /// Parse one JSON-encoded request and run it through the queue
    pub async fn handle_json(&self, json: &str) -> Result<PaintResponse> {
        let request: PaintRequest = serde_json::from_str(json.trim())?;
        self.request(request).await
    }

    /// Begin a session. `element_type` falls back to the configured default.
    pub async fn start(
        &self,
        dimensions: [u32; 3],
        element_type: Option<ElementType>,
        slicing_axis: Option<SlicingAxis>,
    ) -> Result<()> {
        self.request(PaintRequest::Start { dimensions, element_type, slicing_axis })
            .await
            .map(|_| ())
    }

    /// Paint one stroke sample
    pub async fn paint(&self, point: Vec3, radius: Vec3) -> Result<()> {
        self.request(PaintRequest::Paint {
            point: point.to_array(),
            radius: radius.to_array(),
        })
        .await
        .map(|_| ())
    }

    /// Fill the box between two corners
    pub async fn paint_rectangle(&self, point1: Vec3, point2: Vec3) -> Result<()> {
        self.request(PaintRequest::PaintRectangle {
            point1: point1.to_array(),
            point2: point2.to_array(),
        })
        .await
        .map(|_| ())
    }

    /// End the session and take the labelmap
    pub async fn end(&self) -> Result<PaintedLabelmap> {
        match self.request(PaintRequest::End).await? {
            PaintResponse::Labelmap(labelmap) => Ok(labelmap),
            PaintResponse::Done => Err(Error::UnexpectedResponse("end")),
        }
    }

    /// Stop accepting requests, let queued ones finish, and join the thread
    pub fn shutdown(&mut self) {
        self.request_tx = None;
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Paint worker `{}` panicked", self.config.thread_name);
            }
        }
    }

    /// Check if the worker accepts requests
    pub fn is_running(&self) -> bool {
        self.request_tx.is_some()
    }
}

impl Drop for PaintWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
