//! kuralsearch - keyword search and speech over the Thirukkural couplets.
//!
//! The crate backs two batch command-line tools that an application runs
//! as child processes. Each prints exactly one JSON document on stdout and
//! logs to stderr:
//!
//! * `kural-search <query> [limit]` ranks couplets by how many query words
//!   they contain, falling back to a random sample when nothing matches.
//! * `kural-tts <text> <language>` strips markup from the text and returns
//!   synthesized MP3 audio as base64.
//!
//! # Quick start
//!
//! ```no_run
//! use std::path::Path;
//!
//! use kuralsearch::{dataset, search};
//!
//! let data = dataset::load_dataset(Path::new(kuralsearch::config::DATA_PATH));
//! match search::search("virtue wealth", 5, Some(data)) {
//!     Ok(results) => {
//!         for r in &results {
//!             println!("#{} (score: {}, relevance: {:.2})", r.number, r.score, r.relevance);
//!         }
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod record;
pub mod search;
pub mod speech;

pub use dataset::{Dataset, decode_dataset, load_dataset};
pub use error::{Error, ErrorPayload, LoadError, Result, SearchError, SpeechError};
pub use search::ScoredResult;
pub use speech::{GoogleTts, Language, SpeechPayload, Synthesizer};
