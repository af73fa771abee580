//! Site override records, as read from the JSON config list.
//!
//! Records are validated here so a [`TemplateOverride`] is always usable:
//! `hosts` is present, maps are well formed, and every format string has
//! exactly one `%s` slot.

use std::collections::{BTreeMap, BTreeSet};

use pagetext_logging::pagetext_warn;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ConfigError;
use crate::format::FormatString;
use crate::template::{AttributeMap, Hosts, ParagraphFlush, TagTemplate, Template};

/// Key inside a `template_tags` entry that holds the data format.
const DATA_FORMAT_KEY: &str = "_data_";

#[derive(Debug, Deserialize)]
struct RawOverride {
    hosts: Option<Value>,
    content_tag: Option<String>,
    content_tag_attributes: Option<AttributeMap>,
    title_tag: Option<String>,
    title_tag_attributes: Option<AttributeMap>,
    paragraph_tag: Option<String>,
    #[serde(alias = "list_allow_nested_tags")]
    allowed_nested_tags: Option<BTreeSet<String>>,
    template_tags: Option<BTreeMap<String, BTreeMap<String, String>>>,
    word_wrap_column: Option<usize>,
    paragraph_flush: Option<ParagraphFlush>,
    flush_trailing_paragraph: Option<bool>,
    #[serde(flatten)]
    ignored: BTreeMap<String, Value>,
}

/// A partial template scoped to some hosts. Unset fields keep the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOverride {
    pub hosts: Hosts,
    pub content_tag: Option<String>,
    pub content_tag_attributes: Option<AttributeMap>,
    pub title_tag: Option<String>,
    pub title_tag_attributes: Option<AttributeMap>,
    pub paragraph_tag: Option<String>,
    pub allowed_nested_tags: Option<BTreeSet<String>>,
    pub template_tags: Option<BTreeMap<String, TagTemplate>>,
    pub word_wrap_column: Option<usize>,
    pub paragraph_flush: Option<ParagraphFlush>,
    pub flush_trailing_paragraph: Option<bool>,
}

impl TemplateOverride {
    /// An override for `hosts` that changes nothing.
    pub fn new(hosts: Hosts) -> Self {
        Self {
            hosts,
            content_tag: None,
            content_tag_attributes: None,
            title_tag: None,
            title_tag_attributes: None,
            paragraph_tag: None,
            allowed_nested_tags: None,
            template_tags: None,
            word_wrap_column: None,
            paragraph_flush: None,
            flush_trailing_paragraph: None,
        }
    }

    pub fn matches(&self, hostname: &str) -> bool {
        self.hosts.matches(hostname)
    }

    /// Field-by-field merge: every field set here replaces the base value.
    pub fn merge_onto(&self, base: &Template) -> Template {
        let base = base.clone();
        Template {
            content_tag: self.content_tag.clone().unwrap_or(base.content_tag),
            content_tag_attributes: self
                .content_tag_attributes
                .clone()
                .unwrap_or(base.content_tag_attributes),
            title_tag: self.title_tag.clone().unwrap_or(base.title_tag),
            title_tag_attributes: self
                .title_tag_attributes
                .clone()
                .unwrap_or(base.title_tag_attributes),
            paragraph_tag: self.paragraph_tag.clone().unwrap_or(base.paragraph_tag),
            allowed_nested_tags: self
                .allowed_nested_tags
                .clone()
                .unwrap_or(base.allowed_nested_tags),
            template_tags: self.template_tags.clone().unwrap_or(base.template_tags),
            word_wrap_column: self.word_wrap_column.unwrap_or(base.word_wrap_column),
            hosts: self.hosts.clone(),
            paragraph_flush: self.paragraph_flush.unwrap_or(base.paragraph_flush),
            flush_trailing_paragraph: self
                .flush_trailing_paragraph
                .unwrap_or(base.flush_trailing_paragraph),
        }
    }

    /// Validates one record; `index` is its position in the config list.
    pub fn from_json_value(index: usize, value: Value) -> Result<Self, ConfigError> {
        let raw: RawOverride = serde_json::from_value(value)
            .map_err(|source| ConfigError::InvalidRecord { index, source })?;

        let hosts = parse_hosts(index, raw.hosts)?;
        for key in raw.ignored.keys() {
            pagetext_warn!("override record {index}: ignoring unknown key `{key}`");
        }

        if raw.word_wrap_column == Some(0) {
            return Err(ConfigError::InvalidField {
                index,
                field: "word_wrap_column".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let template_tags = raw
            .template_tags
            .map(|tags| {
                tags.into_iter()
                    .map(|(tag, formats)| {
                        let parsed = parse_tag_template(index, &tag, formats)?;
                        Ok((tag, parsed))
                    })
                    .collect::<Result<BTreeMap<_, _>, ConfigError>>()
            })
            .transpose()?;

        Ok(Self {
            hosts,
            content_tag: raw.content_tag,
            content_tag_attributes: raw.content_tag_attributes,
            title_tag: raw.title_tag,
            title_tag_attributes: raw.title_tag_attributes,
            paragraph_tag: raw.paragraph_tag,
            allowed_nested_tags: raw.allowed_nested_tags,
            template_tags,
            word_wrap_column: raw.word_wrap_column,
            paragraph_flush: raw.paragraph_flush,
            flush_trailing_paragraph: raw.flush_trailing_paragraph,
        })
    }
}

/// Parses the config file contents: a JSON array of override records.
pub fn parse_overrides(json: &str) -> Result<Vec<TemplateOverride>, ConfigError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(records) = value else {
        return Err(ConfigError::NotAList);
    };
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| TemplateOverride::from_json_value(index, record))
        .collect()
}

fn parse_hosts(index: usize, hosts: Option<Value>) -> Result<Hosts, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidField {
        index,
        field: "hosts".to_string(),
        reason: reason.to_string(),
    };
    match hosts {
        None | Some(Value::Null) => Err(ConfigError::MissingField {
            index,
            field: "hosts",
        }),
        Some(Value::Bool(true)) => Ok(Hosts::All),
        Some(Value::Bool(false)) => Err(invalid("`false` matches nothing; use a list or `true`")),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(host) => Ok(host),
                _ => Err(invalid("host entries must be strings")),
            })
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Hosts::Only),
        Some(_) => Err(invalid("expected `true` or a list of hostnames")),
    }
}

fn parse_tag_template(
    index: usize,
    tag: &str,
    formats: BTreeMap<String, String>,
) -> Result<TagTemplate, ConfigError> {
    let mut template = TagTemplate::default();
    for (key, pattern) in formats {
        let format = FormatString::parse(&pattern).map_err(|source| ConfigError::Format {
            index,
            field: format!("template_tags.{tag}.{key}"),
            source,
        })?;
        if key == DATA_FORMAT_KEY {
            template.data_format = Some(format);
        } else {
            template.attribute_formats.insert(key, format);
        }
    }
    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatError;

    #[test]
    fn parses_original_style_record() {
        let json = r#"[{
            "hosts": ["example.com"],
            "content_tag": "div",
            "content_tag_attributes": {"class": "post"},
            "list_allow_nested_tags": ["p", "em"],
            "template_tags": {"em": {"_data_": "_%s_"}, "img": {"src": "<%s>"}},
            "word_wrap_column": 60
        }]"#;
        let overrides = parse_overrides(json).unwrap();
        assert_eq!(overrides.len(), 1);
        let record = &overrides[0];
        assert!(record.matches("example.com"));
        assert!(!record.matches("other.com"));
        assert_eq!(record.content_tag.as_deref(), Some("div"));
        assert_eq!(record.word_wrap_column, Some(60));
        let tags = record.template_tags.as_ref().unwrap();
        assert_eq!(tags["em"].data_format.as_ref().unwrap().apply("x"), "_x_");
        assert_eq!(tags["img"].attribute_formats["src"].apply("a.png"), "<a.png>");
        assert!(record.allowed_nested_tags.as_ref().unwrap().contains("em"));
    }

    #[test]
    fn missing_hosts_is_rejected() {
        let err = parse_overrides(r#"[{"hosts": true}, {"content_tag": "div"}]"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField {
                index: 1,
                field: "hosts"
            }
        ));
    }

    #[test]
    fn hosts_false_and_non_string_hosts_are_rejected() {
        assert!(matches!(
            parse_overrides(r#"[{"hosts": false}]"#),
            Err(ConfigError::InvalidField { .. })
        ));
        assert!(matches!(
            parse_overrides(r#"[{"hosts": ["a.com", 3]}]"#),
            Err(ConfigError::InvalidField { .. })
        ));
    }

    #[test]
    fn malformed_maps_are_rejected() {
        assert!(matches!(
            parse_overrides(r#"[{"hosts": true, "content_tag_attributes": {"id": 5}}]"#),
            Err(ConfigError::InvalidRecord { index: 0, .. })
        ));
        assert!(matches!(
            parse_overrides(r#"[{"hosts": true, "template_tags": {"a": "[%s]"}}]"#),
            Err(ConfigError::InvalidRecord { index: 0, .. })
        ));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let overrides = parse_overrides(
            r#"[{"hosts": ["example.com"], "content_tag": "div", "comment": "news site"}]"#,
        )
        .unwrap();
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides[0].content_tag.as_deref(), Some("div"));
        assert!(overrides[0].matches("example.com"));
    }

    #[test]
    fn bad_format_string_names_the_field() {
        let err =
            parse_overrides(r#"[{"hosts": true, "template_tags": {"a": {"href": "[]"}}}]"#)
                .unwrap_err();
        match err {
            ConfigError::Format { field, source, .. } => {
                assert_eq!(field, "template_tags.a.href");
                assert_eq!(source, FormatError::NoPlaceholder);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn zero_wrap_column_is_rejected() {
        assert!(matches!(
            parse_overrides(r#"[{"hosts": true, "word_wrap_column": 0}]"#),
            Err(ConfigError::InvalidField { .. })
        ));
    }

    #[test]
    fn top_level_must_be_a_list() {
        assert!(matches!(
            parse_overrides(r#"{"hosts": true}"#),
            Err(ConfigError::NotAList)
        ));
        assert!(matches!(parse_overrides("[{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn merge_keeps_unset_fields_from_base() {
        let mut record = TemplateOverride::new(Hosts::All);
        record.content_tag = Some("article".to_string());
        record.flush_trailing_paragraph = Some(true);
        let merged = record.merge_onto(&Template::default());
        assert_eq!(merged.content_tag, "article");
        assert!(merged.flush_trailing_paragraph);
        assert_eq!(merged.title_tag, "h1");
        assert_eq!(merged.word_wrap_column, 80);
        assert_eq!(merged.template_tags, Template::default().template_tags);
    }

    #[test]
    fn paragraph_flush_accepts_snake_case() {
        let overrides =
            parse_overrides(r#"[{"hosts": true, "paragraph_flush": "any_end_tag"}]"#).unwrap();
        assert_eq!(overrides[0].paragraph_flush, Some(ParagraphFlush::AnyEndTag));
    }
}
