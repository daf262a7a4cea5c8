//! Rayon thread-pool utilities.
//!
//! - Local pool guard for scoped parallel regions (no global mutation)
//! - Helpers that gracefully degrade to sequential execution when the `rayon`
//!   feature is disabled (so call sites don't need `cfg` peppered everywhere).
//!
//! Environment variables (used if explicit config not provided):
//! - `ALLOWLIST_RAYON_THREADS`: integer >= 1 (defaults to available_parallelism)
//! - `ALLOWLIST_RAYON_NAME`:    thread name prefix (default: "allowlist-w")
//!
//! Prefer `with_pool` in libraries to avoid interfering with a host's global
//! pool configuration.

use crate::error::Result;

/// Inputs shorter than this are processed sequentially even with `rayon` on.
pub const PAR_THRESHOLD: usize = 1024;

/// Configuration for a Rayon thread-pool.
///
/// When `num_threads` is `None`, we'll prefer `ALLOWLIST_RAYON_THREADS` if set,
/// otherwise `std::thread::available_parallelism()`.
#[derive(Clone, Debug, Default)]
pub struct PoolConfig {
    pub num_threads: Option<usize>,
    pub thread_name: Option<String>,
}

impl PoolConfig {
    /// Build config reading environment overrides.
    pub fn from_env() -> Self {
        let num_threads = std::env::var("ALLOWLIST_RAYON_THREADS")
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n >= 1);

        let thread_name = std::env::var("ALLOWLIST_RAYON_NAME")
            .ok()
            .filter(|s| !s.is_empty());

        PoolConfig { num_threads, thread_name }
    }

    /// Determine the effective thread count.
    pub fn effective_threads(&self) -> usize {
        self.num_threads
            .filter(|&n| n >= 1)
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
            })
    }

    /// Thread name prefix (defaults to "allowlist-w").
    pub fn name_prefix(&self) -> String {
        self.thread_name
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "allowlist-w".to_string())
    }

    /// Run `f` inside a local pool sized by this config.
    pub fn install<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        let name = self.name_prefix();
        with_pool(self.effective_threads(), Some(&name), f)
    }
}

/* -------------------------- Public API -------------------------- */

/// Run `f` inside a **local** thread pool with `num_threads`.
///
/// This does **not** mutate the Rayon global pool. All parallel work spawned
/// inside `f` via `rayon` combinators will use this pool.
///
/// When the `rayon` feature is disabled, `f` simply runs on the current thread.
pub fn with_pool<F, R>(num_threads: usize, name_prefix: Option<&str>, f: F) -> Result<R>
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    with_pool_impl(num_threads, name_prefix, f)
}

/// Maybe-parallel map: if rayon is available **and** `len >= threshold`,
/// map in parallel; otherwise fall back to sequential. Output order always
/// matches input order.
pub fn maybe_par_map<T, U, F>(input: &[T], threshold: usize, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync,
{
    maybe_par_map_impl(input, threshold, f)
}

/// Report whether parallel helpers are compiled in.
#[inline]
pub const fn parallel_enabled() -> bool {
    cfg!(feature = "rayon")
}

/* ------------------ cfg(feature = "rayon") impls ------------------ */

#[cfg(feature = "rayon")]
fn with_pool_impl<F, R>(num_threads: usize, name_prefix: Option<&str>, f: F) -> Result<R>
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    use rayon::ThreadPoolBuilder;

    let name = name_prefix.unwrap_or("allowlist-w-local").to_string();
    let pool = ThreadPoolBuilder::new()
        .num_threads(num_threads.max(1))
        .thread_name(move |i| format!("{}-{:02}", name, i + 1))
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    Ok(pool.install(f))
}

#[cfg(not(feature = "rayon"))]
fn with_pool_impl<F, R>(_num_threads: usize, _name_prefix: Option<&str>, f: F) -> Result<R>
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    Ok(f())
}

#[cfg(feature = "rayon")]
fn maybe_par_map_impl<T, U, F>(input: &[T], threshold: usize, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync,
{
    use rayon::prelude::*;
    if input.len() >= threshold {
        input.par_iter().map(&f).collect()
    } else {
        input.iter().map(f).collect()
    }
}

#[cfg(not(feature = "rayon"))]
fn maybe_par_map_impl<T, U, F>(input: &[T], _threshold: usize, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync,
{
    input.iter().map(f).collect()
}

/* ------------------------------ Tests ------------------------------ */
