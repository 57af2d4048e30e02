// Shared one-time server bootstrap backed by in-process fake collaborators.
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use followage_server::domain::{
    Clock, FollowLookupError, FollowRecord, FollowRelationshipService, Identity, TelemetryEvent,
    TelemetrySink, UserLookupError, UserLookupService,
};
use followage_server::interface_adapters::state::AppState;
use std::{
    // Lookup results are keyed by lower-cased login.
    collections::HashMap,
    // `Arc` shares data between threads; `OnceLock` writes a value only once.
    sync::{Arc, Mutex, OnceLock},
    // Sleep durations are used in readiness polling loops.
    time::Duration,
};

// Global base URL used by all tests after the server publishes its bound address.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the server bootstrap path runs only once.
static SERVER_READY: OnceLock<()> = OnceLock::new();
// Every telemetry event the shared server recorded, across all tests.
static TELEMETRY: OnceLock<Arc<Mutex<Vec<TelemetryEvent>>>> = OnceLock::new();

// Fixed "now" so follow durations render the same on every run.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

// Known accounts: alice (streamer), bob (follows alice), carol (does not).
struct Users;

#[async_trait]
impl UserLookupService for Users {
    async fn resolve(
        &self,
        logins: &[String],
    ) -> Result<HashMap<String, Identity>, UserLookupError> {
        // A login of "down" stands in for a Helix outage.
        if logins.iter().any(|login| login == "down") {
            return Err(UserLookupError::upstream("helix transport error: timed out"));
        }

        // Unknown logins are simply absent from the map, as Helix omits them.
        Ok(logins
            .iter()
            .filter(|login| matches!(login.as_str(), "alice" | "bob" | "carol"))
            .map(|login| {
                (
                    login.clone(),
                    Identity {
                        id: format!("id-{login}"),
                        login: login.clone(),
                    },
                )
            })
            .collect())
    }
}

// Follow table: bob followed two years, three hours and a second before `now()`.
struct Follows;

#[async_trait]
impl FollowRelationshipService for Follows {
    async fn fetch(
        &self,
        _streamer: &Identity,
        viewer: &Identity,
        moderator_id: Option<&str>,
    ) -> Result<FollowRecord, FollowLookupError> {
        // This moderator's token has been revoked upstream.
        if moderator_id == Some("revoked-mod") {
            return Err(FollowLookupError::AuthRevoked);
        }

        if viewer.login == "bob" {
            let followed_at = now() - chrono::Duration::seconds(2 * 365 * 86_400 + 3 * 3_600 + 1);
            return Ok(FollowRecord::following_since(followed_at));
        }

        Ok(FollowRecord::not_following())
    }
}

// Records events synchronously so tests can read them right after a response.
struct Telemetry(Arc<Mutex<Vec<TelemetryEvent>>>);

impl TelemetrySink for Telemetry {
    fn record(&self, event: TelemetryEvent) {
        self.0.lock().expect("telemetry mutex poisoned").push(event);
    }
}

struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        now()
    }
}

// Snapshot of every telemetry event recorded so far.
pub fn telemetry_events() -> Vec<TelemetryEvent> {
    TELEMETRY
        .get()
        .map(|events| events.lock().expect("telemetry mutex poisoned").clone())
        .unwrap_or_default()
}

// Ensure the test server is running and return the shared base URL.
pub fn ensure_server() -> &'static str {
    // Run initialization exactly once even if multiple tests call this function.
    SERVER_READY.get_or_init(|| {
        // Create the shared telemetry log before the server thread captures it.
        let events = TELEMETRY.get_or_init(|| Arc::new(Mutex::new(Vec::new()))).clone();
        // Local one-time slot where the server thread publishes its selected URL.
        let published_url = Arc::new(OnceLock::<String>::new());
        // Clone so the spawned thread can write into the same shared slot.
        let published_url_thread = Arc::clone(&published_url);
        // Spawn an OS thread so the server outlives individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            // Each server thread owns its own Tokio runtime.
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            // Run async server startup and serving on this dedicated runtime.
            runtime.block_on(async move {
                // Bind to an ephemeral port to avoid collisions with local services.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                // Capture the exact address that was assigned by the OS.
                let addr = listener.local_addr().expect("get local addr");
                // Publish the final base URL so test code can target the right server.
                let _ = published_url_thread.set(format!("http://{}", addr));

                // Wire the in-process fakes where Helix and the telemetry queue would be.
                let state = Arc::new(AppState {
                    users: Arc::new(Users),
                    follows: Arc::new(Follows),
                    telemetry: Arc::new(Telemetry(events)),
                    clock: Arc::new(FixedClock),
                });
                // Start serving requests until the test process exits.
                followage_server::run(listener, state)
                    .await
                    .expect("server failed");
            });
        });
        // Block until URL is published and the bound port starts accepting connections.
        wait_for_server_url_and_readiness(published_url);
    });

    // Return the stable shared URL used by all tests in this binary.
    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

// Wait for URL publication and then wait for the server socket to accept TCP connections.
fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    // Poll until the server thread publishes the base URL.
    let base_url = loop {
        // If the URL is published, clone it and stop waiting.
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        // Avoid a tight loop while waiting for the background thread.
        std::thread::sleep(Duration::from_millis(10));
    };

    // Persist the URL globally so every test gets the same endpoint.
    let _ = SERVER_URL.set(base_url.clone());

    // Strip the scheme so we can use host:port for raw TCP readiness checks.
    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    // Retry for a short period to avoid racing server bind/accept.
    for _ in 0..100 {
        // Successful connect means the server socket is accepting connections.
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        // Wait briefly before the next readiness probe.
        std::thread::sleep(Duration::from_millis(20));
    }

    // Fail fast if startup never reached an accepting state.
    panic!("server did not become ready in time");
}
