//! Playground facade wiring the store, gateway and pipeline together.

use std::sync::Arc;

use crate::gateway::RequestSyncGateway;
use crate::pipeline::ExecutionPipeline;
use crate::ports::{ExecutionPort, Notifier, PersistencePort, SessionPort};
use crate::session::{Access, SessionGate};
use crate::store::PlaygroundStore;

/// Everything a playground view needs, sharing one store.
pub struct Playground<P, E, N> {
    store: Arc<PlaygroundStore>,
    gateway: RequestSyncGateway<P, N>,
    pipeline: Arc<ExecutionPipeline<E, N>>,
}

impl<P, E, N> Playground<P, E, N>
where
    P: PersistencePort,
    E: ExecutionPort,
    N: Notifier,
{
    /// Builds a playground over fresh state.
    #[must_use]
    pub fn new(persistence: Arc<P>, executor: Arc<E>, notifier: Arc<N>) -> Self {
        let store = Arc::new(PlaygroundStore::new());
        let gateway =
            RequestSyncGateway::new(Arc::clone(&store), persistence, Arc::clone(&notifier));
        let pipeline = Arc::new(ExecutionPipeline::new(
            Arc::clone(&store),
            executor,
            notifier,
        ));
        Self {
            store,
            gateway,
            pipeline,
        }
    }

    /// Shared state.
    #[must_use]
    pub fn store(&self) -> &Arc<PlaygroundStore> {
        &self.store
    }

    /// Save and load operations.
    #[must_use]
    pub const fn gateway(&self) -> &RequestSyncGateway<P, N> {
        &self.gateway
    }

    /// Run operations.
    #[must_use]
    pub fn pipeline(&self) -> &Arc<ExecutionPipeline<E, N>> {
        &self.pipeline
    }

    /// Evaluates the session and clears all state once it is gone.
    pub fn sync_session<S: SessionPort + ?Sized>(&self, session: &S) -> Access {
        let access = SessionGate::check(session);
        if access == Access::RedirectToSignIn {
            self.store.sign_out();
        }
        access
    }
}
