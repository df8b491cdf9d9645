use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[derive(Default)]
struct OriginState {
    hits: AtomicUsize,
    offline: AtomicBool,
}

/// Local HTTP origin serving a fixed set of resources under `/libs/`.
///
/// - `foo/bar.js` → 200 `application/javascript` `var x=1;`
/// - `no-type.bin` → 200 without a content type
/// - `moved.js` → 301 to `foo/bar.js`
/// - `slow.js` → 200 after two seconds
/// - anything else → 404
///
/// Taking the origin offline makes every request answer 503.
pub struct MockOrigin {
    addr: SocketAddr,
    state: Arc<OriginState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockOrigin {
    pub async fn start() -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(OriginState::default());

        let app = Router::new()
            .route("/libs/{*path}", get(serve))
            .with_state(Arc::clone(&state));

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Ok(Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/libs/", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.offline.store(offline, Ordering::SeqCst);
    }

    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockOrigin {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn serve(State(state): State<Arc<OriginState>>, Path(path): Path<String>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    if state.offline.load(Ordering::SeqCst) {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }

    match path.as_str() {
        "foo/bar.js" => (
            [(header::CONTENT_TYPE, "application/javascript")],
            "var x=1;",
        )
            .into_response(),
        "no-type.bin" => Response::new(axum::body::Body::from(vec![0u8, 1, 2, 3])),
        "moved.js" => (
            StatusCode::MOVED_PERMANENTLY,
            [(header::LOCATION, "/libs/foo/bar.js")],
        )
            .into_response(),
        "slow.js" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            ([(header::CONTENT_TYPE, "application/javascript")], "slow").into_response()
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}
