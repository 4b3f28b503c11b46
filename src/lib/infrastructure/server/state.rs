use crate::application::relay::CommandRelay;
use crate::model::ModelProvider;
use std::sync::Arc;

pub(crate) struct ServerState<P: ModelProvider> {
    relay: Arc<CommandRelay<P>>,
}

impl<P: ModelProvider> ServerState<P> {
    pub(crate) fn new(relay: Arc<CommandRelay<P>>) -> Self {
        Self { relay }
    }

    pub(crate) fn relay(&self) -> Arc<CommandRelay<P>> {
        Arc::clone(&self.relay)
    }
}
