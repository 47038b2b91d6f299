// src/extract.rs

//! Best-effort field extraction from docket feed entries.
//!
//! Court feeds format their entry markup inconsistently, and single
//! fields are sometimes missing outright. Every rule here is
//! independently best-effort: a field that cannot be parsed becomes
//! the `"?"` sentinel instead of failing the entry, so one malformed
//! entry never aborts a run.

use regex::Regex;

use crate::models::{FeedEntry, Filing};

/// Fallback value substituted when a field cannot be parsed.
pub const SENTINEL: &str = "?";

/// Extract a structured filing record from a feed entry.
///
/// Never fails. `published` is the one field carried through without
/// a fallback.
pub fn extract(entry: &FeedEntry) -> Filing {
    Filing {
        document_number: document_number(&entry.description).unwrap_or_else(sentinel),
        link: document_link(&entry.description).unwrap_or_else(sentinel),
        case_title: case_title(&entry.title),
        court: court(&entry.link).unwrap_or_else(sentinel),
        description: bracketed_description(&entry.summary).unwrap_or_else(sentinel),
        time: entry.published,
    }
}

fn sentinel() -> String {
    SENTINEL.to_string()
}

/// First run of digits between `>` and `<`: the document number
/// inside the entry's anchor markup.
fn document_number(description: &str) -> Option<String> {
    let pattern = Regex::new(r">([0-9]+)<").ok()?;
    let captures = pattern.captures(description)?;
    Some(captures[1].to_string())
}

/// Quoted target of the first `href=` attribute: the link to the
/// document itself.
fn document_link(description: &str) -> Option<String> {
    let pattern = Regex::new(r#"href="([^"]+)""#).ok()?;
    let captures = pattern.captures(description)?;
    Some(captures[1].to_string())
}

/// Entry titles lead with the case number; everything after the first
/// space-delimited token is the case title.
fn case_title(title: &str) -> String {
    let mut tokens = title.split(' ');
    tokens.next();
    tokens.collect::<Vec<_>>().join(" ")
}

/// Court code between `ecf.` and the following dot of the entry's
/// canonical link.
fn court(link: &str) -> Option<String> {
    let pattern = Regex::new(r"ecf\.([a-z]+)\.").ok()?;
    let captures = pattern.captures(link)?;
    Some(captures[1].to_string())
}

/// Text of a leading `[...]` group in the summary: the docket-entry
/// type as the court labels it.
fn bracketed_description(summary: &str) -> Option<String> {
    let pattern = Regex::new(r"^\[(.+)\]").ok()?;
    let captures = pattern.captures(summary)?;
    Some(captures[1].to_string())
}
