//! In-process HTTP stubs for client tests.

use std::path::PathBuf;

use axum::Router;

use crate::download::DownloadSink;
use crate::error::SunicsResult;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Keeps saved files in memory.
#[derive(Default)]
pub struct MemorySink {
    pub saved: Vec<(String, Vec<u8>)>,
}

impl DownloadSink for MemorySink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> SunicsResult<PathBuf> {
        self.saved.push((filename.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(filename))
    }
}
