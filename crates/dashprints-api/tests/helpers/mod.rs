//! Test helpers: build the router with a temporary uploads directory.
//!
//! Run from workspace root: `cargo test -p dashprints-api`.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use dashprints_api::setup::{routes, services};
use dashprints_core::{Config, DeliveryResult, OutboundMessage};
use dashprints_mail::DeliveryTransport;
use dashprints_storage::LocalArtworkStore;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracing_subscriber::fmt::MakeWriter;

pub const BUSINESS_EMAIL: &str = "owner@dashprints.test";

/// In-memory log sink for asserting on emitted tracing events
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Subscriber writing plain-text events into this capture
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Transport that records messages instead of sending them
pub struct RecordingTransport {
    result: DeliveryResult,
    sent: Mutex<Vec<OutboundMessage>>,
}

impl RecordingTransport {
    pub fn returning(result: DeliveryResult) -> Arc<Self> {
        Arc::new(Self {
            result,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeliveryTransport for RecordingTransport {
    async fn send(&self, message: &OutboundMessage) -> DeliveryResult {
        self.sent.lock().unwrap().push(message.clone());
        self.result.clone()
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Test application: server plus the temp directory holding uploads.
pub struct TestApp {
    pub server: TestServer,
    pub config: Config,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn uploads_dir(&self) -> &Path {
        self.config.uploads_dir()
    }

    /// Every file under the uploads directory
    pub fn stored_files(&self) -> Vec<PathBuf> {
        fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
            let Ok(entries) = std::fs::read_dir(dir) else {
                return;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    walk(&path, out);
                } else {
                    out.push(path);
                }
            }
        }
        let mut files = Vec::new();
        walk(self.uploads_dir(), &mut files);
        files
    }
}

pub fn static_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../public")
}

/// Build a config from defaults plus `vars`, with uploads under `temp_dir`.
pub fn test_config(temp_dir: &TempDir, vars: &[(&str, &str)]) -> Config {
    let mut map: HashMap<String, String> = HashMap::from([
        ("EMAIL_USER".to_string(), BUSINESS_EMAIL.to_string()),
        (
            "UPLOADS_DIR".to_string(),
            temp_dir.path().join("uploads").display().to_string(),
        ),
        ("STATIC_DIR".to_string(), static_dir().display().to_string()),
    ]);
    for (key, value) in vars {
        map.insert(key.to_string(), value.to_string());
    }
    Config::from_lookup(|key| map.get(key).cloned()).expect("test config")
}

/// Setup a test app around the given transport.
pub async fn setup_test_app_with(
    vars: &[(&str, &str)],
    transport: Arc<dyn DeliveryTransport>,
) -> TestApp {
    let temp_dir = TempDir::new().expect("temp dir");
    let config = test_config(&temp_dir, vars);

    let store = LocalArtworkStore::new(config.uploads_dir())
        .await
        .expect("artwork store");
    let state = services::build_state(&config, Arc::new(store), transport);
    let app = routes::setup_routes(&config, state);

    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        config,
        _temp_dir: temp_dir,
    }
}

/// Setup a test app with a recording transport returning `result`.
pub async fn setup_test_app(result: DeliveryResult) -> (TestApp, Arc<RecordingTransport>) {
    let transport = RecordingTransport::returning(result);
    let app = setup_test_app_with(&[], transport.clone()).await;
    (app, transport)
}
