use ego_tree::iter::Edge;
use pagetext_core::Event;
use scraper::node::Node;
use scraper::Html;

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, html: &str) -> Vec<Event>;
}

/// Parses with html5ever (via `scraper`) and replays the tree as events.
///
/// Every element yields a start and an end event, void elements included,
/// so the event stream is always balanced. Comments, doctypes and
/// processing instructions produce nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScraperTokenizer;

impl Tokenizer for ScraperTokenizer {
    fn tokenize(&self, html: &str) -> Vec<Event> {
        let document = Html::parse_document(html);
        let mut events = Vec::new();

        for edge in document.tree.root().traverse() {
            match edge {
                Edge::Open(node) => match node.value() {
                    Node::Element(element) => {
                        events.push(Event::start(element.name(), element.attrs()))
                    }
                    Node::Text(text) => events.push(Event::text(&**text)),
                    _ => {}
                },
                Edge::Close(node) => {
                    if let Node::Element(element) = node.value() {
                        events.push(Event::end(element.name()));
                    }
                }
            }
        }

        events
    }
}
