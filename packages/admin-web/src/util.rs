//! Small platform helpers

use std::time::Duration;

/// Wait without blocking the UI thread (browser) or the runtime (server)
pub async fn sleep(duration: Duration) {
    #[cfg(feature = "web")]
    gloo_timers::future::sleep(duration).await;

    #[cfg(all(feature = "server", not(feature = "web")))]
    tokio::time::sleep(duration).await;

    #[cfg(not(any(feature = "web", feature = "server")))]
    let _ = duration;
}
