use std::collections::BTreeSet;

use pagetext_core::{parse_overrides, resolve, Hosts, Template, TemplateOverride};
use pretty_assertions::assert_eq;

fn only(hosts: &[&str]) -> Hosts {
    Hosts::Only(hosts.iter().map(|h| h.to_string()).collect::<BTreeSet<_>>())
}

#[test]
fn first_matching_override_wins_without_merging_later_ones() {
    let mut first = TemplateOverride::new(only(&["news.example"]));
    first.content_tag = Some("article".to_string());

    let mut second = TemplateOverride::new(Hosts::All);
    second.content_tag = Some("main".to_string());
    second.word_wrap_column = Some(40);

    let template = resolve("news.example", &[first, second]);
    assert_eq!(template.content_tag, "article");
    // The second record also matches but contributes nothing.
    assert_eq!(template.word_wrap_column, 80);
}

#[test]
fn hosts_true_matches_every_hostname() {
    let mut record = TemplateOverride::new(Hosts::All);
    record.title_tag = Some("h2".to_string());
    assert_eq!(resolve("a.example", &[record.clone()]).title_tag, "h2");
    assert_eq!(resolve("b.example", &[record]).title_tag, "h2");
}

#[test]
fn unmatched_host_falls_back_to_default() {
    let mut record = TemplateOverride::new(only(&["blog.example"]));
    record.content_tag = Some("section".to_string());
    assert_eq!(resolve("other.example", &[record]), Template::default());
    assert_eq!(resolve("anything", &[]), Template::default());
}

#[test]
fn resolves_from_parsed_config() {
    let json = r#"[
        {"hosts": ["habr.com"], "content_tag": "div",
         "content_tag_attributes": {"id": "post-content-body"},
         "paragraph_flush": "any_end_tag"},
        {"hosts": true, "word_wrap_column": 72}
    ]"#;
    let overrides = parse_overrides(json).unwrap();

    let habr = resolve("habr.com", &overrides);
    assert_eq!(habr.content_tag, "div");
    assert_eq!(habr.content_tag_attributes["id"], "post-content-body");
    assert_eq!(habr.word_wrap_column, 80);

    let other = resolve("example.org", &overrides);
    assert_eq!(other.content_tag, "p");
    assert_eq!(other.word_wrap_column, 72);
}
