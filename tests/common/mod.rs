//! Stand-in for the user service, served by hyper on an ephemeral port.
#![allow(dead_code)]

use bytes::Bytes;
use http::{HeaderMap, Method, Request, Response, StatusCode, header};
use http_body_util::{BodyExt, Full};
use hyper::{body::Incoming, server::conn::http1, service::service_fn};
use manager_editor::{ApiConfig, io::Io};
use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{net::TcpListener, task::JoinHandle};

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn json(status: StatusCode, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or_default()
    }
}

struct Routes {
    get: Reply,
    update: Reply,
    requests: Mutex<Vec<Recorded>>,
}

pub struct FakeUserService {
    addr: SocketAddr,
    routes: Arc<Routes>,
    task: JoinHandle<()>,
}

impl FakeUserService {
    pub async fn start(get: Reply, update: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes = Arc::new(Routes {
            get,
            update,
            requests: Mutex::new(Vec::new()),
        });

        let state = Arc::clone(&routes);
        let task = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let state = Arc::clone(&state);
                tokio::task::spawn(async move {
                    if let Err(e) = http1::Builder::new()
                        .serve_connection(
                            Io::new(stream),
                            service_fn(move |req| handle(req, Arc::clone(&state))),
                        )
                        .await
                    {
                        tracing::error!("{e}");
                    }
                });
            }
        });

        Self { addr, routes, task }
    }

    pub fn config(&self) -> ApiConfig {
        ApiConfig::new("127.0.0.1", self.addr.port())
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.routes.requests.lock().unwrap().clone()
    }
}

impl Drop for FakeUserService {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handle(
    req: Request<Incoming>,
    routes: Arc<Routes>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();
    let body = body.collect().await.map(|x| x.to_bytes()).unwrap_or_default();
    let path = parts.uri.path().to_string();

    routes.requests.lock().unwrap().push(Recorded {
        method: parts.method.clone(),
        path: path.clone(),
        headers: parts.headers,
        body,
    });

    let reply = match (&parts.method, path.as_str()) {
        (&Method::GET, p) if p.starts_with("/user/get/") => routes.get.clone(),
        (&Method::PUT, p) if p.starts_with("/user/update-manager/") => routes.update.clone(),
        _ => Reply::raw(StatusCode::NOT_FOUND, ""),
    };

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    Ok(Response::builder()
        .status(reply.status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(reply.body)))
        .unwrap_or_default())
}
