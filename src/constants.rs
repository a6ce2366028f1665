/// Gemini API endpoint pieces
pub const GEMINI_DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
pub const GEMINI_API_VERSION: &str = "v1beta";
pub const GEMINI_GENERATE_ACTION: &str = "generateContent";
pub const GEMINI_KEY_PARAM: &str = "key";

/// Process environment key holding the upstream credential
pub const CREDENTIAL_ENV_VAR: &str = "GEMINI_API_KEY";

/// Response headers
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";
pub const UPSTREAM_CONTENT_TYPE: &str = "application/json";
pub const HEADER_CACHE_CONTROL: &str = "no-cache";

/// Envelope messages
pub const MESSAGE_METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const MESSAGE_UPSTREAM_ERROR: &str = "Error from Gemini API";
pub const MESSAGE_INTERNAL_ERROR: &str = "Internal Server Error";
pub const MESSAGE_INVALID_PAYLOAD: &str = "Invalid JSON payload";
pub const MESSAGE_PAYLOAD_TOO_LARGE: &str = "Request body too large";
pub const MESSAGE_NOT_FOUND: &str = "Not found";
pub const MESSAGE_BAD_REQUEST: &str = "Bad request";
pub const MESSAGE_LENGTH_REQUIRED: &str = "Content-Length header required";

pub const ERROR_CREDENTIAL_NOT_SET: &str = "GEMINI_API_KEY is not set in environment variables.";

/// Logging prefixes
pub const LOG_PREFIX_SUCCESS: &str = "✅";
pub const LOG_PREFIX_ERROR: &str = "❌";
pub const LOG_PREFIX_WARNING: &str = "⚠️";

/// Shown in logs in place of the credential
pub const REDACTED: &str = "***";

/// Longest request/response body written to the debug log (chars)
pub const LOG_BODY_PREVIEW_CHARS: usize = 4096;

/// Maximum accepted JSON body size (bytes)
pub const MAX_JSON_BODY_SIZE_BYTES: u64 = 16 * 1024 * 1024;
