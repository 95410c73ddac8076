pub mod effect;
pub mod state;
pub mod validation;

#[cfg(test)]
mod mock;

use crate::{
    models::{Field, ManagerRecord, Route, RouteId},
    repository::{ApiError, ManagerApi},
};
pub use effect::{Effect, Notice, UPDATE_FAILED, UPDATE_SUCCEEDED};
pub use state::{FormPhase, FormSnapshot};
use std::sync::Arc;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
pub use validation::{ValidationError, is_valid, validate};

const EVENT_BUFFER: usize = 32;
const EFFECT_BUFFER: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Change { field: Field, value: String },
    Submit,
    ChangePassword,
}

enum Completion {
    Loaded(Result<ManagerRecord, ApiError>),
    Updated(Result<(), ApiError>),
}

/// The edit-manager component: owns the record and reacts to [`FormEvent`]s.
///
/// Network calls run on their own tasks and report back through an internal
/// channel. All of them are tied to the form's [`CancellationToken`], so a
/// completion arriving after teardown is dropped without touching any state.
pub struct ManagerForm<R> {
    id: RouteId,
    api: Arc<R>,
    record: ManagerRecord,
    phase: FormPhase,
    token: CancellationToken,
    effects: mpsc::Sender<Effect>,
    state: watch::Sender<FormSnapshot>,
    completions: mpsc::Sender<Completion>,
}

impl<R: ManagerApi> ManagerForm<R> {
    /// Starts the form on the current runtime and issues the initial load.
    pub fn spawn(id: RouteId, api: Arc<R>) -> (FormHandle, mpsc::Receiver<Effect>) {
        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
        let (effects_tx, effects_rx) = mpsc::channel(EFFECT_BUFFER);
        let (completions_tx, completions_rx) = mpsc::channel(2);
        let (state_tx, state_rx) = watch::channel(FormSnapshot::default());
        let token = CancellationToken::new();

        let form = Self {
            id,
            api,
            record: ManagerRecord::default(),
            phase: FormPhase::Loading,
            token: token.clone(),
            effects: effects_tx,
            state: state_tx,
            completions: completions_tx,
        };
        let task = tokio::spawn(form.run(events_rx, completions_rx));

        let handle = FormHandle {
            sender: events_tx,
            state: state_rx,
            token,
            task: Some(task),
        };
        (handle, effects_rx)
    }

    async fn run(
        mut self,
        mut events: mpsc::Receiver<FormEvent>,
        mut completions: mpsc::Receiver<Completion>,
    ) {
        info!("Manager form started {{ id: {} }}", self.id);
        self.start_load();

        let token = self.token.clone();
        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event).await,
                    None => break,
                },
                Some(done) = completions.recv() => self.handle_completion(done).await,
            }
        }

        token.cancel();
        info!("Manager form stopped {{ id: {}, phase: {} }}", self.id, self.phase);
    }

    fn start_load(&self) {
        let api = Arc::clone(&self.api);
        let id = self.id.clone();
        self.spawn_request(async move { Completion::Loaded(api.get_manager(&id).await) });
    }

    fn start_update(&self) {
        let api = Arc::clone(&self.api);
        let id = self.id.clone();
        let record = self.record.clone();
        self.spawn_request(async move {
            Completion::Updated(api.update_manager(&id, &record).await)
        });
    }

    fn spawn_request<F>(&self, request: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let token = self.token.clone();
        let completions = self.completions.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => debug!("Request abandoned, form is gone"),
                done = request => {
                    let _ = completions.send(done).await;
                }
            }
        });
    }

    async fn handle_event(&mut self, event: FormEvent) {
        match event {
            FormEvent::Change { field, value } => self.handle_change(field, value).await,
            FormEvent::Submit => self.handle_submit().await,
            FormEvent::ChangePassword => {
                self.emit(Effect::Navigate(Route::ChangePassword(self.id.clone())))
                    .await
            }
        }
    }

    async fn handle_change(&mut self, field: Field, value: String) {
        if !self.phase.can_edit() {
            debug!("Edit ignored {{ field: {}, phase: {} }}", field, self.phase);
            return;
        }

        match self.record.with_field(field, &value) {
            Ok(record) => {
                self.record = record;
                if self.phase != FormPhase::Submitting {
                    self.phase = FormPhase::Editing;
                }
                self.publish();
            }
            Err(e) => self.emit(Effect::Notify(Notice::Error(e.to_string()))).await,
        }
    }

    async fn handle_submit(&mut self) {
        if !self.phase.can_submit() {
            debug!("Submit ignored {{ phase: {} }}", self.phase);
            return;
        }

        if let Err(e) = validate(&self.record) {
            debug!("Validation failed {{ reason: {:?} }}", e);
            self.emit(Effect::Notify(Notice::Error(e.message().to_string())))
                .await;
            return;
        }

        self.phase = FormPhase::Submitting;
        self.publish();
        self.start_update();
    }

    async fn handle_completion(&mut self, done: Completion) {
        if self.token.is_cancelled() {
            return;
        }

        match done {
            Completion::Loaded(_) if self.phase != FormPhase::Loading => {
                debug!("Late load response ignored {{ phase: {} }}", self.phase);
            }
            Completion::Loaded(Ok(record)) => {
                info!("Manager loaded {{ id: {}, username: {} }}", self.id, record.username);
                self.record = record;
                self.phase = FormPhase::Populated;
                self.publish();
            }
            Completion::Loaded(Err(e)) => {
                error!("Error loading manager {{ id: {}, error: {} }}", self.id, e);
                self.phase = FormPhase::LoadFailed;
                self.publish();
            }
            Completion::Updated(Ok(())) => {
                info!("Manager details updated {{ id: {} }}", self.id);
                self.phase = FormPhase::SubmittedOk;
                self.publish();
                self.emit(Effect::Notify(Notice::Success(UPDATE_SUCCEEDED.to_string())))
                    .await;
                self.emit(Effect::Navigate(Route::ManagerList)).await;
            }
            Completion::Updated(Err(e)) => {
                error!("Error updating manager {{ id: {}, error: {} }}", self.id, e);
                self.phase = FormPhase::SubmitFailed;
                self.publish();
                self.emit(Effect::Notify(Notice::Error(UPDATE_FAILED.to_string())))
                    .await;
            }
        }
    }

    fn publish(&self) {
        self.state.send_replace(FormSnapshot {
            record: self.record.clone(),
            phase: self.phase,
        });
    }

    /// Hands an effect to the host. Gives up once the form is torn down, so a
    /// host that stopped reading can never keep the task alive.
    async fn emit(&self, effect: Effect) {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => debug!("Effect dropped, form is gone"),
            sent = self.effects.send(effect) => {
                if sent.is_err() {
                    debug!("Effect dropped, host is not listening");
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    Closed,
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::Closed => write!(f, "Form is closed"),
        }
    }
}

impl std::error::Error for FormError {}

/// Host side of a running [`ManagerForm`]. Dropping it tears the form down.
pub struct FormHandle {
    sender: mpsc::Sender<FormEvent>,
    state: watch::Receiver<FormSnapshot>,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl FormHandle {
    pub async fn change(&self, field: Field, value: impl Into<String>) -> Result<(), FormError> {
        self.send(FormEvent::Change {
            field,
            value: value.into(),
        })
        .await
    }

    pub async fn submit(&self) -> Result<(), FormError> {
        self.send(FormEvent::Submit).await
    }

    pub async fn change_password(&self) -> Result<(), FormError> {
        self.send(FormEvent::ChangePassword).await
    }

    pub async fn send(&self, event: FormEvent) -> Result<(), FormError> {
        self.sender.send(event).await.map_err(|_| FormError::Closed)
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.state.borrow().clone()
    }

    /// Waits until the published state satisfies `pred`.
    pub async fn wait_for<F>(&self, mut pred: F) -> Result<FormSnapshot, FormError>
    where
        F: FnMut(&FormSnapshot) -> bool,
    {
        let mut state = self.state.clone();
        let snapshot = state
            .wait_for(|x| pred(x))
            .await
            .map_err(|_| FormError::Closed)?;
        Ok(snapshot.clone())
    }

    /// Cancels every outstanding request and waits for the form task to end.
    pub async fn teardown(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!("Manager form task failed: {e:?}");
            }
        }
    }
}

impl Drop for FormHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
