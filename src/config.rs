use std::time::Duration;

/// Location of the couplet dataset, relative to the working directory.
pub const DATA_PATH: &str = "attached_assets/thirukkural_data.json";

/// Number of results returned when the caller gives no limit.
pub const DEFAULT_LIMIT: usize = 5;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "KURALSEARCH_LOG";

/// Relevance reported for every random fallback result.
pub const RANDOM_RELEVANCE: f64 = 0.1;

/// Translate TTS endpoint used by the default speech backend.
pub const TTS_ENDPOINT: &str = "https://translate.google.com/translate_tts";

/// Longest text fragment the TTS endpoint accepts per request.
pub const TTS_MAX_CHARS: usize = 100;

/// Time allowed to open a connection to the TTS endpoint.
pub const TTS_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Time allowed to read one audio segment back.
pub const TTS_READ_TIMEOUT: Duration = Duration::from_secs(20);
