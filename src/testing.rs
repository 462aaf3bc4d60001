//! Test doubles: a local leaderboard API and a responder that records replies.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::platform::Responder;
use crate::reply::Reply;

/// Serves canned `(path, status, body)` responses on an ephemeral local port.
pub struct MockApi {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    server: JoinHandle<()>,
}

impl MockApi {
    pub async fn start(routes: Vec<(&'static str, StatusCode, String)>) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));

        let mut router = Router::new();
        for (path, status, body) in routes {
            let hits = hits.clone();
            router = router.route(
                path,
                get(move || {
                    let hits = hits.clone();
                    let body = body.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        (status, body)
                    }
                }),
            );
        }
        let fallback_hits = hits.clone();
        let router = router.fallback(move || {
            let hits = fallback_hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                (StatusCode::NOT_FOUND, "not found".to_string())
            }
        });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            hits,
            server,
        }
    }

    /// A base url nothing is listening on.
    pub async fn unused_base_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    /// Requests received so far, on any path.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Keeps every reply, applying edits in place like a chat client would.
#[derive(Default)]
pub struct RecordingResponder {
    sent: Mutex<Vec<Reply>>,
    current: Mutex<Vec<Reply>>,
    edits: Mutex<Vec<usize>>,
    fail: bool,
}

impl RecordingResponder {
    /// A responder whose every send fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Replies as the user currently sees them.
    pub fn messages(&self) -> Vec<Reply> {
        self.current.lock().unwrap().clone()
    }

    /// The first reply, as originally sent.
    pub fn sent_first(&self) -> Option<Reply> {
        self.sent.lock().unwrap().first().cloned()
    }

    /// Indexes of edited replies, in edit order.
    pub fn edits(&self) -> Vec<usize> {
        self.edits.lock().unwrap().clone()
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    type Sent = usize;

    async fn reply(&self, reply: Reply) -> Result<usize> {
        anyhow::ensure!(!self.fail, "send refused");
        self.sent.lock().unwrap().push(reply.clone());
        let mut current = self.current.lock().unwrap();
        current.push(reply);
        Ok(current.len() - 1)
    }

    async fn edit(&self, sent: &mut usize, reply: Reply) -> Result<()> {
        anyhow::ensure!(!self.fail, "edit refused");
        self.current.lock().unwrap()[*sent] = reply;
        self.edits.lock().unwrap().push(*sent);
        Ok(())
    }
}
