//! Network status providers
//!
//! Web: status mirrors the browser's online/offline signal.
//! Native: status comes from a TCP reachability probe.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::{ConnectivityListener, LinkType, NetworkState, NetworkStatusProvider};
use crate::services::connectivity::{ConnectivityRegistry, Subscription};

/// Browser-backed connectivity
pub struct WebNetworkStatus {
    online: AtomicBool,
    registry: Arc<ConnectivityRegistry>,
}

impl WebNetworkStatus {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
            registry: ConnectivityRegistry::new(Self::state_for(online)),
        }
    }

    // The browser only tells us online/offline, never the link type
    fn state_for(online: bool) -> NetworkState {
        if online {
            NetworkState::online(LinkType::Unknown)
        } else {
            NetworkState::offline()
        }
    }

    /// Entry point for the browser's `online` / `offline` events
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
        tracing::info!(
            "netinfo(web): browser reports {}",
            if online { "online" } else { "offline" }
        );
        self.registry.dispatch(Self::state_for(online));
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    pub fn registry(&self) -> &Arc<ConnectivityRegistry> {
        &self.registry
    }
}

impl Default for WebNetworkStatus {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl NetworkStatusProvider for WebNetworkStatus {
    async fn fetch(&self) -> NetworkState {
        Self::state_for(self.is_online())
    }

    fn subscribe(&self, listener: ConnectivityListener) -> Subscription {
        self.registry.register(listener)
    }
}

pub const MIN_WATCH_INTERVAL: Duration = Duration::from_millis(10);

/// Probe-backed connectivity for native targets
pub struct NativeNetworkStatus {
    probe_addr: String,
    timeout: Duration,
    registry: Arc<ConnectivityRegistry>,
}

impl NativeNetworkStatus {
    /// `probe_addr` is a `host:port` that answers TCP when the internet is up.
    /// Until the first probe the status is reported as offline.
    pub fn new(probe_addr: impl Into<String>) -> Self {
        Self {
            probe_addr: probe_addr.into(),
            timeout: Duration::from_secs(3),
            registry: ConnectivityRegistry::new(NetworkState::offline()),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn probe_addr(&self) -> &str {
        &self.probe_addr
    }

    async fn probe(&self) -> NetworkState {
        match tokio::time::timeout(self.timeout, TcpStream::connect(&self.probe_addr)).await {
            Ok(Ok(_)) => NetworkState::online(LinkType::Unknown),
            Ok(Err(e)) => {
                tracing::debug!("netinfo(native): probe {} failed: {}", self.probe_addr, e);
                NetworkState::offline()
            }
            Err(_) => {
                tracing::debug!("netinfo(native): probe {} timed out", self.probe_addr);
                NetworkState::offline()
            }
        }
    }

    /// Probe now and notify subscribers if the status changed
    pub async fn refresh(&self) -> NetworkState {
        let state = self.probe().await;
        if state != self.registry.current() {
            self.registry.dispatch(state);
        }
        state
    }

    /// Refresh on a fixed interval until the returned task is aborted.
    /// The first refresh runs immediately. Intervals shorter than
    /// `MIN_WATCH_INTERVAL` are raised to it.
    pub fn spawn_watcher(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        let every = if every < MIN_WATCH_INTERVAL {
            tracing::warn!(
                "netinfo(native): watch interval {:?} too short, using {:?}",
                every,
                MIN_WATCH_INTERVAL
            );
            MIN_WATCH_INTERVAL
        } else {
            every
        };
        tracing::info!(
            "netinfo(native): watching {} every {:?}",
            self.probe_addr,
            every
        );

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                self.refresh().await;
            }
        })
    }
}

#[async_trait]
impl NetworkStatusProvider for NativeNetworkStatus {
    async fn fetch(&self) -> NetworkState {
        self.refresh().await
    }

    fn subscribe(&self, listener: ConnectivityListener) -> Subscription {
        self.registry.register(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_web_fetch_follows_browser_signal() {
        let net = WebNetworkStatus::new(true);
        let state = net.fetch().await;
        assert!(state.is_connected);
        assert!(state.is_internet_reachable);

        net.set_online(false);
        let state = net.fetch().await;
        assert!(!state.is_connected);
        assert!(!state.is_internet_reachable);
    }

    #[tokio::test]
    async fn test_web_subscribers_see_transitions() {
        let net = WebNetworkStatus::new(false);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = net.subscribe(Arc::new(move |s: &NetworkState| {
            sink.lock().unwrap().push(s.is_connected);
        }));

        net.set_online(true);
        net.set_online(false);
        sub.unsubscribe();
        net.set_online(true);

        assert_eq!(*seen.lock().unwrap(), vec![false, true, false]);
    }

    #[tokio::test]
    async fn test_native_reachable_endpoint_is_online() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let accept = tokio::spawn(async move {
            let _ = listener.accept().await;
        });

        let net = NativeNetworkStatus::new(addr.to_string());
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&changes);
        let sub = net.subscribe(Arc::new(move |s: &NetworkState| {
            sink.lock().unwrap().push(s.is_connected);
        }));

        let state = net.fetch().await;
        assert!(state.is_connected);
        // offline seed, then the change to online
        assert_eq!(*changes.lock().unwrap(), vec![false, true]);

        sub.unsubscribe();
        accept.await.unwrap();
    }

    #[tokio::test]
    async fn test_native_unreachable_endpoint_is_offline() {
        // Bind then drop to get a port with nothing listening
        let addr = {
            let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            l.local_addr().unwrap()
        };
        let net = NativeNetworkStatus::new(addr.to_string())
            .with_timeout(Duration::from_millis(500));
        assert_eq!(net.fetch().await, NetworkState::offline());
    }

    #[tokio::test]
    async fn test_watcher_pushes_transition_without_fetch() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let net = Arc::new(
            NativeNetworkStatus::new(addr.to_string()).with_timeout(Duration::from_millis(500)),
        );
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = net.subscribe(Arc::new(move |s: &NetworkState| {
            sink.lock().unwrap().push(s.is_connected);
        }));

        // Zero would panic inside tokio's interval; it is raised to the minimum
        let watcher = Arc::clone(&net).spawn_watcher(Duration::ZERO);

        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while seen.lock().unwrap().len() < 2 && tokio::time::Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        watcher.abort();

        // offline seed, then the watcher's own change notification
        assert_eq!(*seen.lock().unwrap(), vec![false, true]);
        assert!(net.registry.current().is_connected);
        sub.unsubscribe();
        drop(listener);
    }
}
