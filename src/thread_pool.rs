//! Shared worker pool for bootstrap replicates.
//!
//! All parallel work in the crate runs inside one rayon pool so nested
//! callers (several studies on separate threads, each bootstrapping in
//! parallel) do not each spawn a pool of their own.

#[cfg(feature = "parallel")]
use rayon::ThreadPool;

#[cfg(feature = "parallel")]
use std::sync::OnceLock;

#[cfg(feature = "parallel")]
static THREAD_POOL: OnceLock<ThreadPool> = OnceLock::new();

/// Get or initialize the shared thread pool.
///
/// One worker per logical CPU. Falls back to rayon's global pool if a
/// dedicated pool cannot be built.
#[cfg(feature = "parallel")]
fn get_thread_pool() -> Option<&'static ThreadPool> {
    if let Some(pool) = THREAD_POOL.get() {
        return Some(pool);
    }
    match rayon::ThreadPoolBuilder::new()
        .thread_name(|i| format!("gamma-bootstrap-{i}"))
        .build()
    {
        Ok(pool) => Some(THREAD_POOL.get_or_init(|| pool)),
        Err(err) => {
            tracing::warn!(%err, "failed to build bootstrap thread pool, using global pool");
            None
        }
    }
}

/// Execute a parallel operation on the shared pool.
#[cfg(feature = "parallel")]
pub fn install<OP, R>(op: OP) -> R
where
    OP: FnOnce() -> R + Send,
    R: Send,
{
    match get_thread_pool() {
        Some(pool) => pool.install(op),
        None => op(),
    }
}

/// Without the `parallel` feature, run `op` on the calling thread.
#[cfg(not(feature = "parallel"))]
#[allow(dead_code)]
pub fn install<OP, R>(op: OP) -> R
where
    OP: FnOnce() -> R,
{
    op()
}
