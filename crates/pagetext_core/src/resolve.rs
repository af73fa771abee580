use pagetext_logging::pagetext_debug;

use crate::config::TemplateOverride;
use crate::template::Template;

/// Picks the template for `hostname`.
///
/// The first override whose hosts match wins and is merged over the default
/// template; later matches are ignored. Without a match the default is
/// returned unchanged.
pub fn resolve(hostname: &str, overrides: &[TemplateOverride]) -> Template {
    let defaults = Template::default();
    match overrides
        .iter()
        .enumerate()
        .find(|(_, record)| record.matches(hostname))
    {
        Some((index, record)) => {
            pagetext_debug!("host {hostname}: using override record {index}");
            record.merge_onto(&defaults)
        }
        None => {
            pagetext_debug!("host {hostname}: no override matched, using defaults");
            defaults
        }
    }
}
