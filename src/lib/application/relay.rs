use crate::application::actions::{FinalResponse, SequenceExecutor};
use crate::application::interpreter::CommandInterpreter;
use crate::application::tooling::SessionConnector;
use crate::infrastructure::model::ModelProvider;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// One command end to end: interpret, connect, execute, close.
pub struct CommandRelay<P: ModelProvider> {
    interpreter: CommandInterpreter<P>,
    connector: Arc<dyn SessionConnector>,
    executor: SequenceExecutor,
}

impl<P: ModelProvider> CommandRelay<P> {
    pub fn new(
        interpreter: CommandInterpreter<P>,
        connector: Arc<dyn SessionConnector>,
        executor: SequenceExecutor,
    ) -> Self {
        Self {
            interpreter,
            connector,
            executor,
        }
    }

    pub async fn handle(&self, command: &str) -> FinalResponse {
        let request_id = Uuid::new_v4();
        info!(%request_id, command, "Received command");

        let actions = match self.interpreter.interpret(command).await {
            Ok(actions) => actions,
            Err(err) => {
                warn!(%request_id, %err, "Command could not be interpreted");
                return FinalResponse::error(err.user_message());
            }
        };

        let session = match self.connector.connect().await {
            Ok(session) => session,
            Err(err) => {
                error!(%request_id, %err, "Failed to execute command");
                return FinalResponse::error(err.to_string());
            }
        };

        let response = self.executor.execute(session.as_ref(), &actions).await;
        session.close().await;

        if let Some(error) = response.error_message() {
            warn!(%request_id, error, "Command finished with error");
        } else {
            info!(%request_id, message = response.message(), "Command finished");
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::tooling::{RemoteResult, RetryPolicy, ToolInvokeError, ToolSession};
    use crate::config::ModelConfig;
    use crate::infrastructure::model::{ModelError, ModelRequest, ModelResponse};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct FixedProvider(&'static str);

    #[async_trait]
    impl ModelProvider for FixedProvider {
        async fn chat(&self, _request: ModelRequest) -> Result<ModelResponse, ModelError> {
            Ok(ModelResponse::new(self.0))
        }
    }

    #[derive(Default)]
    struct EchoSession {
        closed: AtomicBool,
    }

    #[async_trait]
    impl ToolSession for EchoSession {
        async fn call_tool(
            &self,
            _name: &str,
            _arguments: Value,
        ) -> Result<RemoteResult, ToolInvokeError> {
            Ok(RemoteResult::success("{}"))
        }

        async fn close(&self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    struct SharedConnector {
        session: Arc<EchoSession>,
        connects: AtomicUsize,
    }

    #[async_trait]
    impl SessionConnector for SharedConnector {
        async fn connect(&self) -> Result<Arc<dyn ToolSession>, ToolInvokeError> {
            self.connects.fetch_add(1, Ordering::SeqCst);
            Ok(self.session.clone())
        }
    }

    fn relay(reply: &'static str) -> (CommandRelay<FixedProvider>, Arc<SharedConnector>) {
        let connector = Arc::new(SharedConnector {
            session: Arc::new(EchoSession::default()),
            connects: AtomicUsize::new(0),
        });
        let relay = CommandRelay::new(
            CommandInterpreter::new(FixedProvider(reply), ModelConfig::default()),
            connector.clone(),
            SequenceExecutor::new(RetryPolicy::new(1, Default::default())),
        );
        (relay, connector)
    }

    #[tokio::test]
    async fn executes_and_closes_session() {
        let (relay, connector) =
            relay(r#"[{"tool_name": "SpotifyPlayback", "params": {"action": "pause"}}]"#);

        let response = relay.handle("pause").await;

        assert_eq!(response.message(), Some("Playback paused"));
        assert!(connector.session.closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn declined_command_never_connects() {
        let (relay, connector) = relay(r#"{"error": "Command not related to Spotify"}"#);

        let response = relay.handle("order a pizza").await;

        assert_eq!(response.error_message(), Some("Command not related to Spotify"));
        assert_eq!(connector.connects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_reply_is_wrapped() {
        let (relay, _) = relay(r#"[{"tool_name": "SpotifyPlayback"}]"#);
        let response = relay.handle("play").await;
        let error = response.error_message().expect("error");
        assert!(error.starts_with("Failed to parse command:"));
    }
}
