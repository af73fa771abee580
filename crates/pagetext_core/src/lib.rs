//! pagetext core: template resolution, the content-extraction state machine
//! and plain-text assembly. No IO.
mod assemble;
mod config;
mod error;
mod event;
mod extract;
mod format;
mod resolve;
mod template;

pub use assemble::{assemble, wrap};
pub use config::{parse_overrides, TemplateOverride};
pub use error::ConfigError;
pub use event::{Attributes, Event};
pub use extract::{ContentExtractor, ExtractionResult, ExtractionState};
pub use format::{FormatError, FormatString};
pub use resolve::resolve;
pub use template::{attributes_match, AttributeMap, Hosts, ParagraphFlush, TagTemplate, Template};

/// Extracts and renders `events` with `template` in one call.
pub fn render<I>(template: &Template, events: I) -> (ExtractionResult, String)
where
    I: IntoIterator<Item = Event>,
{
    let result = ContentExtractor::new(template).run(events);
    let text = assemble(
        result.title.as_deref(),
        &result.paragraphs,
        template.word_wrap_column,
    );
    (result, text)
}
