use std::collections::HashMap;

/// Attributes of a start tag, keyed by attribute name.
pub type Attributes = HashMap<String, String>;

/// One tokenizer event, delivered in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StartTag { name: String, attributes: Attributes },
    EndTag { name: String },
    Text { content: String },
}

impl Event {
    pub fn start<I, K, V>(name: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Event::StartTag {
            name: name.into(),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// A start tag without attributes.
    pub fn start_bare(name: impl Into<String>) -> Self {
        Event::StartTag {
            name: name.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn end(name: impl Into<String>) -> Self {
        Event::EndTag { name: name.into() }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Event::Text {
            content: content.into(),
        }
    }
}
