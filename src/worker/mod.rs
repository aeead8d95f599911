//! Dedicated paint worker and its request/response protocol
//!
//! Start the worker and drive a session from async code:
//! ```ignore
//! let worker = PaintWorker::spawn(WorkerConfig::default())?;
//! worker.start([64, 64, 64], None, None).await?;
//! worker.paint(point, radius).await?;
//! let labelmap = worker.end().await?;
//! ```

pub mod protocol;
pub mod config;
pub mod paint_worker;

pub use protocol::{PaintRequest, PaintResponse};
pub use config::WorkerConfig;
pub use paint_worker::{Completion, PaintWorker};
