use std::sync::LazyLock;
use std::time::Duration;

/// User-Agent sent with every outbound platform call.
pub const USER_AGENT: &str = concat!("lan-notifier/", env!("CARGO_PKG_VERSION"));

/// Global HTTP client instance shared by every platform notifier
///
/// This client is initialized lazily on first access and reused across the
/// application; clones handed to the registry share one connection pool.
///
/// # Features
/// - **Connection pooling**: Reuses TCP connections to the platform APIs
/// - **Compression**: Supports gzip, deflate, brotli, and zstd compression
/// - **HTTP/2**: Adaptive window sizing and keep-alive
/// - **Timeouts**: 30s request timeout, 10s connect timeout
/// - **Security**: Rustls for TLS (no OpenSSL dependency)
///
/// # Example
/// ```ignore
/// use crate::external::client::HTTP_CLIENT;
///
/// let registry = NotifierRegistry::from_config(&settings.platforms, HTTP_CLIENT.clone())?;
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        // Enable compression (gzip, deflate, brotli, zstd)
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .zstd(true)
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to build HTTP client")
});
