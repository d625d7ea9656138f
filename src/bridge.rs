//! Google identity SDK bridge
//!
//! The SDK script is loaded by the host page at some arbitrary later
//! time, so the bridge polls a readiness probe until a handle appears,
//! initializes it exactly once, and forwards completed sign-in gestures
//! into the auth flow. Tearing the bridge down cancels a still-pending
//! poll; an SDK that never appears is harmless, not an error.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Delay between SDK readiness probes
pub const SDK_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Callback the SDK invokes once per user sign-in gesture
pub type CredentialCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Customization for the rendered sign-in button
#[derive(Debug, Clone)]
pub struct ButtonOptions {
    pub theme: String,
    pub size: String,
}

impl Default for ButtonOptions {
    fn default() -> Self {
        Self {
            theme: "outline".to_string(),
            size: "large".to_string(),
        }
    }
}

/// Surface of an SDK that has become reachable
pub trait SdkHandle: Send + Sync {
    /// Register the client identifier and the sign-in callback
    fn initialize(&self, client_id: &str, callback: CredentialCallback);

    /// Render the sign-in affordance into the designated mount point
    fn render_button(&self, mount_id: &str, options: &ButtonOptions);

    /// Display the one-time sign-in prompt
    fn prompt(&self);
}

/// Readiness probe for the externally-loaded SDK
pub trait IdentitySdk: Send + Sync {
    /// Returns a handle once the SDK has become observably present
    fn try_acquire(&self) -> Option<Arc<dyn SdkHandle>>;
}

/// Bridge lifecycle; `Initialized` is entered at most once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    NotInitialized,
    Polling,
    Initialized,
}

/// Polls for the identity SDK and wires it into the auth flow
///
/// The bridge never touches the credential store and never navigates;
/// it only forwards credential strings to its channel.
pub struct SdkBridge {
    state: Arc<Mutex<BridgeState>>,
    task: JoinHandle<()>,
}

impl SdkBridge {
    /// Start polling for the SDK
    ///
    /// Each credential produced by a completed sign-in gesture is sent
    /// through `credentials`. Polling has no attempt bound; it stops
    /// only on availability or teardown.
    pub fn spawn(
        sdk: Arc<dyn IdentitySdk>,
        client_id: impl Into<String>,
        mount_id: impl Into<String>,
        credentials: UnboundedSender<String>,
    ) -> Self {
        let client_id = client_id.into();
        let mount_id = mount_id.into();
        let state = Arc::new(Mutex::new(BridgeState::Polling));
        let task_state = Arc::clone(&state);

        let task = tokio::spawn(async move {
            let mut attempts: u64 = 0;
            let handle = loop {
                if let Some(handle) = sdk.try_acquire() {
                    break handle;
                }
                attempts += 1;
                if attempts % 100 == 0 {
                    tracing::debug!(attempts, "identity SDK still not available");
                }
                tokio::time::sleep(SDK_POLL_INTERVAL).await;
            };

            let callback: CredentialCallback = Arc::new(move |credential: String| {
                if credentials.send(credential).is_err() {
                    tracing::warn!("credential receiver dropped, sign-in gesture ignored");
                }
            });

            handle.initialize(&client_id, callback);
            handle.render_button(&mount_id, &ButtonOptions::default());
            handle.prompt();

            *task_state.lock().unwrap() = BridgeState::Initialized;
            tracing::info!("identity SDK initialized");
        });

        Self { state, task }
    }

    /// Current lifecycle state
    pub fn state(&self) -> BridgeState {
        *self.state.lock().unwrap()
    }

    /// Cancel a still-pending poll; idempotent, also runs on drop
    pub fn shutdown(&self) {
        self.task.abort();
    }
}

impl Drop for SdkBridge {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct FakeHandle {
        initializations: AtomicUsize,
        renders: AtomicUsize,
        prompts: AtomicUsize,
        callback: Mutex<Option<CredentialCallback>>,
    }

    impl SdkHandle for FakeHandle {
        fn initialize(&self, _client_id: &str, callback: CredentialCallback) {
            self.initializations.fetch_add(1, Ordering::SeqCst);
            *self.callback.lock().unwrap() = Some(callback);
        }

        fn render_button(&self, _mount_id: &str, _options: &ButtonOptions) {
            self.renders.fetch_add(1, Ordering::SeqCst);
        }

        fn prompt(&self) {
            self.prompts.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct FakeSdk {
        available_after: usize,
        probes: AtomicUsize,
        handle: Arc<FakeHandle>,
    }

    impl FakeSdk {
        fn new(available_after: usize) -> Arc<Self> {
            Arc::new(Self {
                available_after,
                probes: AtomicUsize::new(0),
                handle: Arc::new(FakeHandle::default()),
            })
        }

        fn never() -> Arc<Self> {
            Self::new(usize::MAX)
        }
    }

    impl IdentitySdk for FakeSdk {
        fn try_acquire(&self) -> Option<Arc<dyn SdkHandle>> {
            let probe = self.probes.fetch_add(1, Ordering::SeqCst);
            if probe >= self.available_after {
                Some(Arc::clone(&self.handle) as Arc<dyn SdkHandle>)
            } else {
                None
            }
        }
    }

    async fn wait_until_initialized(bridge: &SdkBridge) {
        while bridge.state() != BridgeState::Initialized {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_initializes_exactly_once_after_late_availability() {
        let sdk = FakeSdk::new(3);
        let (tx, _rx) = mpsc::unbounded_channel();
        let bridge = SdkBridge::spawn(sdk.clone(), "client-123", "googleSignInDiv", tx);

        wait_until_initialized(&bridge).await;

        assert_eq!(sdk.handle.initializations.load(Ordering::SeqCst), 1);
        assert_eq!(sdk.handle.renders.load(Ordering::SeqCst), 1);
        assert_eq!(sdk.handle.prompts.load(Ordering::SeqCst), 1);
        // three misses plus the successful probe
        assert_eq!(sdk.probes.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_availability_skips_the_delay() {
        let sdk = FakeSdk::new(0);
        let (tx, _rx) = mpsc::unbounded_channel();
        let bridge = SdkBridge::spawn(sdk.clone(), "client-123", "googleSignInDiv", tx);

        wait_until_initialized(&bridge).await;

        assert_eq!(sdk.probes.load(Ordering::SeqCst), 1);
        assert_eq!(sdk.handle.initializations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_credentials_are_forwarded_to_the_channel() {
        let sdk = FakeSdk::new(0);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let bridge = SdkBridge::spawn(sdk.clone(), "client-123", "googleSignInDiv", tx);

        wait_until_initialized(&bridge).await;

        let callback = sdk.handle.callback.lock().unwrap().clone().unwrap();
        callback("google-id-token".to_string());

        assert_eq!(rx.recv().await.unwrap(), "google-id-token");
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_pending_poll() {
        let sdk = FakeSdk::never();
        let (tx, _rx) = mpsc::unbounded_channel();
        let bridge = SdkBridge::spawn(sdk.clone(), "client-123", "googleSignInDiv", tx);

        // let a few probes happen
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(bridge.state(), BridgeState::Polling);

        bridge.shutdown();
        drop(bridge);
        tokio::task::yield_now().await;

        let probes_at_teardown = sdk.probes.load(Ordering::SeqCst);

        // no further side effects after advancing time well past teardown
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(sdk.probes.load(Ordering::SeqCst), probes_at_teardown);
        assert_eq!(sdk.handle.initializations.load(Ordering::SeqCst), 0);
    }
}
