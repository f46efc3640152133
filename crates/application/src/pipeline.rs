//! Execution pipeline.
//!
//! Runs a persisted request through the execution collaborator and shows
//! the normalized result in the response viewer. Runs are independent:
//! several may be in flight at once and the viewer shows whichever
//! settled last.

use std::sync::Arc;

use relay_domain::{
    CacheKey, ExecutionResult, OperationKey, OperationKind, OperationState, TabId,
    ValidationError, normalize_execution,
};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::ExecutionError;
use crate::ports::{ExecutionPort, Notification, Notifier};
use crate::store::PlaygroundStore;

const RUN_FAILED: &str = "Failed to run request";

/// Pipeline from a request identity to the response viewer.
pub struct ExecutionPipeline<E, N> {
    store: Arc<PlaygroundStore>,
    executor: Arc<E>,
    notifier: Arc<N>,
}

impl<E: ExecutionPort, N: Notifier> ExecutionPipeline<E, N> {
    /// Creates a pipeline over the shared store.
    #[must_use]
    pub const fn new(store: Arc<PlaygroundStore>, executor: Arc<E>, notifier: Arc<N>) -> Self {
        Self {
            store,
            executor,
            notifier,
        }
    }

    /// Runs a persisted request.
    ///
    /// A target answering 4xx/5xx, or not answering (status 0), is a
    /// successful run. On success every request list of the workspace is
    /// invalidated and, if `owning_tab` is still open, the result is
    /// recorded on it.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::Validation` for a blank request id, or
    /// `ExecutionError::Collaborator` if the run could not be performed.
    pub async fn run(
        &self,
        request_id: &str,
        owning_tab: Option<&TabId>,
    ) -> Result<ExecutionResult, ExecutionError> {
        let request_id = request_id.trim();
        if request_id.is_empty() {
            let error = ValidationError::MissingRequestId;
            self.notifier.notify(Notification::error(error.to_string()));
            return Err(error.into());
        }

        let operation = OperationKey::new(OperationKind::Run, request_id);
        let scope = self.store.workspace_id();
        self.store.begin_operation(operation.clone());
        debug!(request_id, "Running request");

        let payload = match self.executor.run(request_id).await {
            Ok(payload) => payload,
            Err(error) => {
                warn!(request_id, %error, "{RUN_FAILED}");
                self.notifier.notify(Notification::error(RUN_FAILED));
                self.store
                    .finish_operation(operation, OperationState::failed(RUN_FAILED));
                return Err(error.into());
            }
        };

        let result = normalize_execution(&payload);
        self.store
            .invalidate(&CacheKey::all_requests(scope.as_deref()));
        self.store.show_response(result.clone());
        if let Some(tab_id) = owning_tab
            && !self.store.record_tab_result(tab_id, &result)
        {
            debug!(tab_id = %tab_id, request_id, "Tab closed before the run completed");
        }

        self.store
            .finish_operation(operation, OperationState::Succeeded);
        info!(
            request_id,
            status = result.status_code.as_u16(),
            outcome = ?result.outcome(),
            "Run completed"
        );
        Ok(result)
    }
}

impl<E, N> ExecutionPipeline<E, N>
where
    E: ExecutionPort + 'static,
    N: Notifier + 'static,
{
    /// Starts a run in the background.
    ///
    /// The handle may be dropped; the run still settles into the store.
    pub fn spawn_run(
        self: &Arc<Self>,
        request_id: impl Into<String>,
        owning_tab: Option<TabId>,
    ) -> JoinHandle<Result<ExecutionResult, ExecutionError>> {
        let pipeline = Arc::clone(self);
        let request_id = request_id.into();
        tokio::spawn(async move { pipeline.run(&request_id, owning_tab.as_ref()).await })
    }
}
