pub mod gemini;
pub mod health;

pub use gemini::{GeminiRelay, InboundRequest};
pub use health::handle_health_check;
