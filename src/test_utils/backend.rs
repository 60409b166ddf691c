use axum::Router;
use tokio::{net::TcpListener, task::JoinHandle};

use crate::api::ApiClient;

/// Serve `router` as a stand-in MyPockit backend on a random local port and
/// return a client pointed at it.
///
/// The server task is aborted when the returned guard is dropped.
pub(crate) async fn serve_backend(router: Router) -> (ApiClient, BackendGuard) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind a local port for the mock backend");
    let address = listener
        .local_addr()
        .expect("Could not get the mock backend's address");

    let task = tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Mock backend stopped unexpectedly");
    });

    (ApiClient::new(&format!("http://{address}")), BackendGuard(task))
}

pub(crate) struct BackendGuard(JoinHandle<()>);

impl Drop for BackendGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}
