//! Single-pass content extraction over a tokenizer event stream.
//!
//! The extractor tracks whether it is inside the content region (entered on
//! a start tag matching the template's content tag and attributes, left when
//! the stack of tags opened since then empties), formats text and attribute
//! values found there, and cuts the captured fragments into paragraphs on
//! closing tags. Independently it captures the text that follows the first
//! matching title tag.

use std::mem;

use pagetext_logging::{pagetext_debug, pagetext_trace};

use crate::event::{Attributes, Event};
use crate::template::Template;

/// End tag that never closes a paragraph.
const SCRIPT_TAG: &str = "script";

/// What one run produced: the title and the flushed paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractionResult {
    pub title: Option<String>,
    pub paragraphs: Vec<Vec<String>>,
}

impl ExtractionResult {
    /// No title text and no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.title.as_deref().map_or(true, |t| t.trim().is_empty()) && self.paragraphs.is_empty()
    }
}

/// Mutable state of one extraction run.
#[derive(Debug, Default)]
pub struct ExtractionState {
    title_found: bool,
    title_pending: bool,
    title_text: Option<String>,
    context_stack: Vec<String>,
    in_content_region: bool,
    current_paragraph: Vec<String>,
    paragraphs: Vec<Vec<String>>,
}

impl ExtractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_content_region(&self) -> bool {
        self.in_content_region
    }

    pub fn context_stack(&self) -> &[String] {
        &self.context_stack
    }

    pub fn current_paragraph(&self) -> &[String] {
        &self.current_paragraph
    }

    pub fn title_found(&self) -> bool {
        self.title_found
    }

    fn flush_paragraph(&mut self) {
        if self.current_paragraph.is_empty() {
            return;
        }
        let paragraph = mem::take(&mut self.current_paragraph);
        pagetext_trace!("paragraph {} flushed ({} fragments)", self.paragraphs.len(), paragraph.len());
        self.paragraphs.push(paragraph);
    }

    pub fn into_result(self) -> ExtractionResult {
        ExtractionResult {
            title: self.title_text,
            paragraphs: self.paragraphs,
        }
    }
}

/// Applies one [`Template`] to event streams.
#[derive(Debug, Clone, Copy)]
pub struct ContentExtractor<'t> {
    template: &'t Template,
}

impl<'t> ContentExtractor<'t> {
    pub fn new(template: &'t Template) -> Self {
        Self { template }
    }

    /// Consumes `events` to the end and returns what was captured.
    ///
    /// Fragments still buffered at the end are dropped unless the template
    /// asks for a trailing flush.
    pub fn run<I>(&self, events: I) -> ExtractionResult
    where
        I: IntoIterator<Item = Event>,
    {
        let mut state = ExtractionState::new();
        for event in events {
            self.handle(&mut state, event);
        }
        self.finish(state)
    }

    pub fn finish(&self, mut state: ExtractionState) -> ExtractionResult {
        if self.template.flush_trailing_paragraph {
            state.flush_paragraph();
        } else if !state.current_paragraph.is_empty() {
            pagetext_debug!(
                "dropping {} trailing fragments not closed by a paragraph boundary",
                state.current_paragraph.len()
            );
        }
        let result = state.into_result();
        pagetext_debug!(
            "extraction finished: title={:?}, paragraphs={}",
            result.title,
            result.paragraphs.len()
        );
        result
    }

    pub fn handle(&self, state: &mut ExtractionState, event: Event) {
        match event {
            Event::StartTag { name, attributes } => self.on_start_tag(state, name, &attributes),
            Event::Text { content } => self.on_text(state, content),
            Event::EndTag { name } => self.on_end_tag(state, &name),
        }
    }

    fn on_start_tag(&self, state: &mut ExtractionState, tag: String, attributes: &Attributes) {
        let template = self.template;

        if !state.in_content_region && template.is_content_start(&tag, attributes) {
            pagetext_debug!("entering content region at <{tag}>");
            state.in_content_region = true;
        }

        if state.in_content_region {
            if let Some(tag_template) = template.template_tags.get(&tag) {
                for (attribute, format) in &tag_template.attribute_formats {
                    // Empty values are treated as absent.
                    if let Some(value) = attributes.get(attribute).filter(|v| !v.is_empty()) {
                        state.current_paragraph.push(format.apply(value));
                    }
                }
            }
        }

        if state.title_text.is_none()
            && !state.title_pending
            && template.is_title_start(&tag, attributes)
        {
            state.title_pending = true;
        }

        if state.in_content_region {
            state.context_stack.push(tag);
        }
    }

    fn on_text(&self, state: &mut ExtractionState, data: String) {
        if let Some(fragment) = self.format_text(state, &data) {
            state.current_paragraph.push(fragment);
        }

        if state.title_pending {
            pagetext_debug!("title captured: {data:?}");
            state.title_pending = false;
            state.title_found = true;
            state.title_text = Some(data);
        }
    }

    fn format_text(&self, state: &ExtractionState, data: &str) -> Option<String> {
        if !state.in_content_region {
            return None;
        }
        let top = state.context_stack.last()?;
        if !self.template.allowed_nested_tags.contains(top) {
            return None;
        }
        let format = self
            .template
            .template_tags
            .get(top)
            .and_then(|t| t.data_format.as_ref());
        Some(match format {
            Some(format) => format.apply(data),
            None => data.to_string(),
        })
    }

    fn on_end_tag(&self, state: &mut ExtractionState, tag: &str) {
        if state.in_content_region {
            state.context_stack.pop();
            if state.context_stack.is_empty() {
                pagetext_debug!("leaving content region at </{tag}>");
                state.in_content_region = false;
            }
        }

        if tag != SCRIPT_TAG
            && self
                .template
                .paragraph_flush
                .closes_paragraph(tag, &self.template.paragraph_tag)
        {
            state.flush_paragraph();
        }
    }
}
