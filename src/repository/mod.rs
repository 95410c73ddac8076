pub mod error;

use crate::{
    config::ApiConfig,
    io::Io,
    models::{ManagerRecord, RouteId},
};
use bytes::Bytes;
pub use error::{ApiError, ErrorEnvelope};
use http::{Method, Request, header};
use http_body_util::{BodyExt, Full};
use tokio::{net::TcpStream, task::JoinHandle};
use tracing::instrument;

/// Remote store of manager records.
pub trait ManagerApi: Send + Sync + 'static {
    fn get_manager(
        &self,
        id: &RouteId,
    ) -> impl Future<Output = Result<ManagerRecord, ApiError>> + Send;

    fn update_manager(
        &self,
        id: &RouteId,
        record: &ManagerRecord,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// [`ManagerApi`] backed by the user service's HTTP endpoints.
#[derive(Debug, Clone)]
pub struct HttpRepository {
    config: ApiConfig,
}

impl HttpRepository {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(
        &self,
        method: Method,
        path: String,
        body: Bytes,
    ) -> Result<Request<Full<Bytes>>, ApiError> {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header(header::HOST, self.config.authority())
            .header(header::ACCEPT, mime::APPLICATION_JSON.as_ref());

        if !body.is_empty() {
            builder = builder
                .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .header(header::CONTENT_LENGTH, body.len());
        }

        Ok(builder.body(Full::new(body))?)
    }

    async fn send(&self, req: Request<Full<Bytes>>) -> Result<Bytes, ApiError> {
        match self.config.request_timeout {
            Some(limit) => tokio::time::timeout(limit, self.round_trip(req))
                .await
                .map_err(|_| ApiError::Timeout)?,
            None => self.round_trip(req).await,
        }
    }

    async fn round_trip(&self, req: Request<Full<Bytes>>) -> Result<Bytes, ApiError> {
        tracing::debug!(
            "Request {{ Method: {}, Uri: {}, Host: {} }}",
            req.method(),
            req.uri(),
            self.config.authority()
        );

        let stream = TcpStream::connect(self.config.authority()).await?;
        let (mut sender, conn) = hyper::client::conn::http1::handshake(Io::new(stream)).await?;
        let _conn = AbortOnDrop(tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::error!("{e:?}");
            }
        }));

        let duration = std::time::Instant::now();
        let response = sender.send_request(req).await?;
        let status = response.status();
        let body = response.into_body().collect().await?.to_bytes();

        tracing::debug!(
            "Response {{ Status: {}, duration: {}ms, length: {} }}",
            status,
            duration.elapsed().as_millis(),
            body.len()
        );

        if !status.is_success() {
            return Err(ApiError::status(status, &body));
        }

        Ok(body)
    }
}

/// Closes the connection when the exchange that owns it goes away.
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl ManagerApi for HttpRepository {
    #[instrument(skip_all, fields(id = %id))]
    async fn get_manager(&self, id: &RouteId) -> Result<ManagerRecord, ApiError> {
        let req = self.request(Method::GET, format!("/user/get/{id}"), Bytes::new())?;
        let body = self.send(req).await?;

        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn update_manager(&self, id: &RouteId, record: &ManagerRecord) -> Result<(), ApiError> {
        let body = serde_json::to_vec(record).map_err(|e| ApiError::Encode(e.to_string()))?;
        let req = self.request(
            Method::PUT,
            format!("/user/update-manager/{id}"),
            Bytes::from(body),
        )?;
        self.send(req).await?;

        Ok(())
    }
}
