//! One page from URL to saved text file.

use std::path::PathBuf;

use pagetext_core::{render, resolve, ExtractionResult, Template, TemplateOverride};
use pagetext_logging::{pagetext_info, pagetext_warn};
use thiserror::Error;
use url::Url;

use crate::decode::{decode_html, DecodeError};
use crate::fetch::{FetchSettings, Fetcher, ProgressSink, ReqwestFetcher};
use crate::persist::{AtomicFileWriter, PersistError};
use crate::save_path::{relative_output_path, SavePathError};
use crate::tokenize::{ScraperTokenizer, Tokenizer};
use crate::{FailureKind, FetchError, Progress, Stage};

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("cannot derive output path: {0}")]
    SavePath(#[from] SavePathError),
    #[error("cannot save output: {0}")]
    Persist(#[from] PersistError),
    #[error("cannot start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestOutcome {
    pub final_url: String,
    pub encoding: String,
    pub title: Option<String>,
    pub paragraph_count: usize,
    pub text: String,
    /// `None` when nothing was extracted and no file was written.
    pub saved_to: Option<PathBuf>,
}

/// Tokenizes `html`, extracts with `template` and renders the text.
pub fn extract_text(
    html: &str,
    template: &Template,
    tokenizer: &dyn Tokenizer,
) -> (ExtractionResult, String) {
    render(template, tokenizer.tokenize(html))
}

pub struct Harvester {
    fetcher: Box<dyn Fetcher>,
    tokenizer: Box<dyn Tokenizer>,
    overrides: Vec<TemplateOverride>,
    writer: AtomicFileWriter,
}

impl Harvester {
    pub fn new(settings: FetchSettings, overrides: Vec<TemplateOverride>, output_root: PathBuf) -> Self {
        Self::with_components(
            Box::new(ReqwestFetcher::new(settings)),
            Box::new(ScraperTokenizer),
            overrides,
            output_root,
        )
    }

    pub fn with_components(
        fetcher: Box<dyn Fetcher>,
        tokenizer: Box<dyn Tokenizer>,
        overrides: Vec<TemplateOverride>,
        output_root: PathBuf,
    ) -> Self {
        Self {
            fetcher,
            tokenizer,
            overrides,
            writer: AtomicFileWriter::new(output_root),
        }
    }

    /// Runs [`Harvester::harvest`] to completion on a fresh tokio runtime.
    pub fn harvest_blocking(
        &self,
        url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<HarvestOutcome, HarvestError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(HarvestError::Runtime)?;
        runtime.block_on(self.harvest(url, sink))
    }

    /// Fetches `url`, extracts its content and saves it under the output root.
    ///
    /// The template is chosen by the hostname of `url` as given, not of the
    /// final URL after redirects; the same goes for the save path.
    pub async fn harvest(
        &self,
        url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<HarvestOutcome, HarvestError> {
        let parsed = Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let hostname = parsed
            .host_str()
            .ok_or_else(|| FetchError::new(FailureKind::InvalidUrl, "url has no hostname"))?
            .to_string();
        let relative = relative_output_path(url)?;

        let fetched = self.fetcher.fetch(url, sink).await?;

        sink.emit(Progress::stage(Stage::Decoding));
        let decoded = decode_html(&fetched.bytes, fetched.metadata.content_type.as_deref())?;

        sink.emit(Progress::stage(Stage::Extracting));
        let template = resolve(&hostname, &self.overrides);
        let (result, text) = extract_text(&decoded.html, &template, self.tokenizer.as_ref());

        let mut outcome = HarvestOutcome {
            final_url: fetched.metadata.final_url,
            encoding: decoded.encoding_label,
            title: result.title.clone(),
            paragraph_count: result.paragraphs.len(),
            text,
            saved_to: None,
        };

        if result.is_empty() {
            pagetext_warn!("no content found at {url}; nothing written");
            sink.emit(Progress::stage(Stage::Done));
            return Ok(outcome);
        }

        sink.emit(Progress::stage(Stage::Writing));
        let saved_to = self.writer.write(&relative, &outcome.text)?;
        pagetext_info!(
            "saved {} paragraphs from {} to {:?}",
            outcome.paragraph_count,
            url,
            saved_to
        );
        outcome.saved_to = Some(saved_to);

        sink.emit(Progress::stage(Stage::Done));
        Ok(outcome)
    }
}
