//! Resolved extraction templates and the built-in default.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::event::Attributes;
use crate::format::FormatString;

/// Required attribute values, keyed by attribute name.
pub type AttributeMap = BTreeMap<String, String>;

/// Formatting rules for one tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagTemplate {
    /// Applied to text directly enclosed by the tag.
    pub data_format: Option<FormatString>,
    /// Applied to attribute values when the tag opens, in attribute-name order.
    pub attribute_formats: BTreeMap<String, FormatString>,
}

/// Which hostnames an override applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hosts {
    All,
    Only(BTreeSet<String>),
}

impl Hosts {
    pub fn matches(&self, hostname: &str) -> bool {
        match self {
            Hosts::All => true,
            Hosts::Only(hosts) => hosts.contains(hostname),
        }
    }
}

/// Which end tags close the current paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphFlush {
    /// The paragraph tag, `strong` and `span`.
    #[default]
    Boundary,
    /// Every end tag.
    AnyEndTag,
}

impl ParagraphFlush {
    pub fn closes_paragraph(self, tag: &str, paragraph_tag: &str) -> bool {
        match self {
            ParagraphFlush::Boundary => tag == paragraph_tag || tag == "strong" || tag == "span",
            ParagraphFlush::AnyEndTag => true,
        }
    }
}

/// The full rule set applied to one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub content_tag: String,
    pub content_tag_attributes: AttributeMap,
    pub title_tag: String,
    pub title_tag_attributes: AttributeMap,
    pub paragraph_tag: String,
    pub allowed_nested_tags: BTreeSet<String>,
    pub template_tags: BTreeMap<String, TagTemplate>,
    pub word_wrap_column: usize,
    pub hosts: Hosts,
    pub paragraph_flush: ParagraphFlush,
    /// Flush fragments still buffered when the document ends.
    pub flush_trailing_paragraph: bool,
}

impl Default for Template {
    fn default() -> Self {
        let allowed_nested_tags = ["p", "a", "b", "i", "u", "span", "strong", "div"]
            .into_iter()
            .map(String::from)
            .collect();

        let mut template_tags = BTreeMap::new();
        template_tags.insert(
            "a".to_string(),
            TagTemplate {
                data_format: Some(FormatString::identity()),
                attribute_formats: BTreeMap::from([(
                    "href".to_string(),
                    FormatString::around("[", "]"),
                )]),
            },
        );
        template_tags.insert(
            "b".to_string(),
            TagTemplate {
                data_format: Some(FormatString::around("**", "**")),
                attribute_formats: BTreeMap::new(),
            },
        );

        Self {
            content_tag: "p".to_string(),
            content_tag_attributes: AttributeMap::new(),
            title_tag: "h1".to_string(),
            title_tag_attributes: AttributeMap::new(),
            paragraph_tag: "p".to_string(),
            allowed_nested_tags,
            template_tags,
            word_wrap_column: 80,
            hosts: Hosts::All,
            paragraph_flush: ParagraphFlush::default(),
            flush_trailing_paragraph: false,
        }
    }
}

impl Template {
    pub fn is_content_start(&self, tag: &str, attributes: &Attributes) -> bool {
        tag == self.content_tag && attributes_match(&self.content_tag_attributes, attributes)
    }

    pub fn is_title_start(&self, tag: &str, attributes: &Attributes) -> bool {
        tag == self.title_tag && attributes_match(&self.title_tag_attributes, attributes)
    }
}

/// All required attributes must be present with equal values.
pub fn attributes_match(required: &AttributeMap, attributes: &Attributes) -> bool {
    required
        .iter()
        .all(|(name, value)| attributes.get(name).is_some_and(|actual| actual == value))
}
