pub mod error;
pub mod model;
pub mod retry;
pub mod service;

pub use error::{BatchError, SynthesisError};
pub use model::{BatchConfig, BatchResult};
pub use retry::{retry, Backoff, Exhausted, RetryPolicy};
pub use service::{BatchRunner, BatchRunnerApi};
