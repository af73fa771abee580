//! pagetext engine: fetching, decoding, tokenizing and saving around the core extractor.
mod config;
mod decode;
mod fetch;
mod harvest;
mod persist;
mod save_path;
mod tokenize;
mod types;

pub use config::{load_overrides, ConfigLoadError};
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use fetch::{FetchSettings, Fetcher, LogProgressSink, ProgressSink, ReqwestFetcher};
pub use harvest::{extract_text, HarvestError, HarvestOutcome, Harvester};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use save_path::{relative_output_path, SavePathError};
pub use tokenize::{ScraperTokenizer, Tokenizer};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput, Progress, Stage};
