use anyhow::{Context, Result};
use tempfile::TempDir;
use tokio::task::JoinHandle;

use timenotes::api::{router, AppState};
use timenotes::domain::{Alarm, MemoDraft};
use timenotes::infrastructure::{ApiClient, MediaStore, SqliteStore};

/// Test fixture that boots a real Time Notes server on an ephemeral port,
/// backed by a temporary data directory.
#[allow(dead_code)]
pub struct TestServer {
    _data_dir: TempDir,
    handle: JoinHandle<()>,
    pub base_url: String,
}

#[allow(dead_code)]
impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let data_dir = tempfile::tempdir().context("Failed to create temporary data directory")?;

        let store = SqliteStore::new(data_dir.path().join("memos.db"))
            .context("Failed to open test store")?;
        let media = MediaStore::new(data_dir.path().join("uploads"))
            .context("Failed to open test media store")?;
        let app = router(AppState::new(store, media));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind test listener")?;
        let addr = listener.local_addr().context("Failed to read local addr")?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server should run until aborted");
        });

        Ok(Self {
            _data_dir: data_dir,
            handle,
            base_url: format!("http://{addr}"),
        })
    }

    /// Typed client pointed at this server.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Draft with an enabled alarm at the given offset from now, in seconds.
#[allow(dead_code)]
pub fn draft_with_alarm(title: &str, offset_secs: i64) -> MemoDraft {
    let mut draft = MemoDraft::new(title, "");
    draft.alarm = Alarm::at(chrono::Utc::now() + chrono::Duration::seconds(offset_secs));
    draft
}

// 1x1 transparent PNG, enough to exercise the upload paths
#[allow(dead_code)]
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x62, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];
