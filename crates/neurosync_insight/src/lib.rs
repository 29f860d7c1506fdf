pub mod api_types;
pub mod board;
pub mod llm;
pub mod parse;
pub mod prompts;
pub mod providers;
pub mod requestor;
pub mod schema;

pub use board::{InsightBoard, InsightState, Ticket};
pub use llm::{GenerateOutput, GenerateRequest, GenerativeTransport, TransportError};
pub use parse::{parse_insight, MalformedResponse};
pub use requestor::{FailureKind, InsightRequestor, RequestFailure, RequestOptions};
