//! Detached continuations — work that outlives the request that spawned it.
//!
//! A detached task shares no cancellation scope with its originating request:
//! the response has already been sent when it runs. Failures land in the log
//! with full job/resume context and nowhere else; the task is never retried.

use std::future::Future;

use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;

pub fn run_detached<F>(task: &'static str, job_id: Uuid, resume_id: Uuid, fut: F)
where
    F: Future<Output = Result<(), AppError>> + Send + 'static,
{
    tokio::spawn(async move {
        match fut.await {
            Ok(()) => info!(task, %job_id, %resume_id, "detached task completed"),
            Err(e) => {
                error!(task, %job_id, %resume_id, error = %e, "detached task failed; dropping (no retry)")
            }
        }
    });
}
