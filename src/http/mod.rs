pub mod client;
pub mod error;
pub mod response;
pub use response::{envelope_response, json_response};

pub use client::{HttpUpstream, Upstream, UpstreamReply};
