use crate::application::tooling::{RemoteResult, ToolInvokeError, ToolSession};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

enum Scripted {
    Answer(RemoteResult),
    Unreachable,
    Panic,
}

/// In-memory session that replays scripted answers per tool and records calls
#[derive(Default)]
pub(crate) struct ScriptedSession {
    replies: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl ScriptedSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(self, tool: &str, reply: Scripted) -> Self {
        self.replies
            .lock()
            .expect("replies lock")
            .entry(tool.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub(crate) fn reply(self, tool: &str, result: RemoteResult) -> Self {
        self.push(tool, Scripted::Answer(result))
    }

    pub(crate) fn reply_json(self, tool: &str, payload: Value) -> Self {
        self.reply(tool, RemoteResult::success(payload.to_string()))
    }

    pub(crate) fn unreachable(self, tool: &str) -> Self {
        self.push(tool, Scripted::Unreachable)
    }

    pub(crate) fn panicking(self, tool: &str) -> Self {
        self.push(tool, Scripted::Panic)
    }

    pub(crate) fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub(crate) fn calls_to(&self, tool: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|(name, _)| name == tool)
            .map(|(_, arguments)| arguments)
            .collect()
    }

    pub(crate) fn tools_called(&self) -> Vec<String> {
        self.calls().into_iter().map(|(name, _)| name).collect()
    }
}

#[async_trait]
impl ToolSession for ScriptedSession {
    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<RemoteResult, ToolInvokeError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((name.to_string(), arguments));
        let reply = self
            .replies
            .lock()
            .expect("replies lock")
            .get_mut(name)
            .and_then(VecDeque::pop_front);
        match reply {
            Some(Scripted::Answer(result)) => Ok(result),
            Some(Scripted::Panic) => panic!("scripted panic in {name}"),
            Some(Scripted::Unreachable) | None => Err(ToolInvokeError::Transport {
                endpoint: "scripted".into(),
                message: format!("no answer for {name}"),
            }),
        }
    }
}
