//! Constants for the download module (timeouts, concurrency bounds).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default total per-transfer timeout (60 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default maximum concurrent transfers.
pub const DEFAULT_CONCURRENCY: usize = 20;

/// Idle connection pool cap per host. The semaphore in the engine is the
/// authoritative concurrency limit; this only bounds kept-alive sockets.
pub const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 10;
