mod error;
mod http;
mod interface;
mod remote;
mod retry;

pub use error::ToolInvokeError;
pub use http::{HttpConnector, HttpSession};
pub use interface::{SessionConnector, ToolSession};
pub use remote::{ContentBlock, EMPTY_PAYLOAD, RemoteResult};
pub use retry::{RetryPolicy, call_tool_with_retry};
