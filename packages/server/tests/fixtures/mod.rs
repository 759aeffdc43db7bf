//! Test fixtures for integration tests.

use std::sync::Arc;

use staychat_server::ui::{app, state::AppState};

/// A server instance running in the background for one test.
pub struct TestServer {
    port: u16,
}

impl TestServer {
    /// Bind the app on the given port and serve it in the background.
    ///
    /// The listener is bound before this returns, so the server accepts
    /// connections as soon as the future resolves.
    pub async fn start(port: u16) -> Self {
        let state = Arc::new(AppState::new());
        let router = app(state);
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .expect("Failed to bind test listener");
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server crashed");
        });
        Self { port }
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }
}
