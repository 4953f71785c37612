use crate::usecase::ports::backend::BackendError;

/// Runs a blocking backend call on the runtime's blocking pool so the
/// window keeps repainting while it waits.
pub async fn run_blocking<F, T>(f: F) -> Result<T, BackendError>
where
    F: FnOnce() -> Result<T, BackendError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result,
        Err(err) => Err(BackendError::Worker(err.to_string())),
    }
}
