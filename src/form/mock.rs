//! In-memory [`ManagerApi`] whose calls are answered by the test itself.
//!
//! Every call shows up on the receiver returned by [`MockApi::new`] together
//! with a responder, so a test decides when and how each request completes.

use crate::{
    models::{ManagerRecord, RouteId},
    repository::{ApiError, ManagerApi},
};
use tokio::sync::{mpsc, oneshot};

pub type Responder<T> = oneshot::Sender<Result<T, ApiError>>;

#[derive(Debug)]
pub enum ApiCall {
    Get {
        id: RouteId,
        respond_to: Responder<ManagerRecord>,
    },
    Update {
        id: RouteId,
        record: ManagerRecord,
        respond_to: Responder<()>,
    },
}

pub struct MockApi {
    sender: mpsc::UnboundedSender<ApiCall>,
}

impl MockApi {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ApiCall>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl ManagerApi for MockApi {
    async fn get_manager(&self, id: &RouteId) -> Result<ManagerRecord, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ApiCall::Get {
                id: id.clone(),
                respond_to,
            })
            .map_err(|_| ApiError::Cancelled)?;
        response.await.map_err(|_| ApiError::Cancelled)?
    }

    async fn update_manager(&self, id: &RouteId, record: &ManagerRecord) -> Result<(), ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ApiCall::Update {
                id: id.clone(),
                record: record.clone(),
                respond_to,
            })
            .map_err(|_| ApiError::Cancelled)?;
        response.await.map_err(|_| ApiError::Cancelled)?
    }
}

/// Waits for the next call and asserts it is a load.
pub async fn expect_get(
    receiver: &mut mpsc::UnboundedReceiver<ApiCall>,
) -> (RouteId, Responder<ManagerRecord>) {
    match receiver.recv().await {
        Some(ApiCall::Get { id, respond_to }) => (id, respond_to),
        other => panic!("Expected Get, got {other:?}"),
    }
}

/// Waits for the next call and asserts it is an update.
pub async fn expect_update(
    receiver: &mut mpsc::UnboundedReceiver<ApiCall>,
) -> (RouteId, ManagerRecord, Responder<()>) {
    match receiver.recv().await {
        Some(ApiCall::Update {
            id,
            record,
            respond_to,
        }) => (id, record, respond_to),
        other => panic!("Expected Update, got {other:?}"),
    }
}
