use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, Response};

use crate::error::ProbeError;

/// Overall per-request timeout, connect through body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the shared client used for a whole probe run.
pub fn build_client(timeout: Duration) -> Result<Client, ProbeError> {
    // Probes go straight to the node, never through an environment proxy.
    Client::builder()
        .timeout(timeout)
        .no_proxy()
        .build()
        .map_err(ProbeError::ClientBuild)
}

/// Send a bare GET (no body, no custom headers) and return the response
/// with its body still unread.
pub async fn send_get(client: &Client, url: &str) -> Result<Response, ProbeError> {
    let request = client
        .get(url)
        .build()
        .map_err(|source| ProbeError::RequestBuild {
            url: url.to_string(),
            source,
        })?;

    client.execute(request).await.map_err(|source| {
        // reqwest reports an unsupported scheme only once the request runs.
        if source.is_builder() {
            ProbeError::RequestBuild {
                url: url.to_string(),
                source,
            }
        } else {
            ProbeError::Transport {
                url: url.to_string(),
                source,
            }
        }
    })
}

/// Read the whole body. The response is consumed, so its connection goes
/// back to the pool (or is closed) on every path out of here.
pub async fn read_body(url: &str, response: Response) -> Result<Bytes, ProbeError> {
    response.bytes().await.map_err(|source| ProbeError::BodyRead {
        url: url.to_string(),
        source,
    })
}
