//! RSS 2.0 parsing into feed entries.
//!
//! Court feeds are plain RSS 2.0; only the item fields the scrape
//! needs are read. Item content arrives HTML-escaped (or wrapped in
//! CDATA), so text is unescaped before it reaches the field
//! extractors.

use chrono::{DateTime, Utc};
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::Result;
use crate::models::FeedEntry;

/// Item field currently being captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Description,
    PubDate,
}

/// Accumulates the fields of the `<item>` currently being read.
#[derive(Default)]
struct PartialItem {
    title: String,
    link: String,
    description: String,
    pub_date: String,
}

impl PartialItem {
    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::Description => &mut self.description,
            Field::PubDate => &mut self.pub_date,
        }
    }

    /// Finish the item, or `None` when its publication time is
    /// unusable. The description doubles as the summary, matching how
    /// RSS 2.0 exposes a single markup payload under both names.
    fn into_entry(self) -> Option<FeedEntry> {
        let published = parse_pub_date(&self.pub_date)?;
        let description = self.description.trim().to_string();

        Some(FeedEntry {
            title: self.title.trim().to_string(),
            link: self.link.trim().to_string(),
            summary: description.clone(),
            description,
            published,
        })
    }
}

/// Parse an RSS document into feed entries, in document order.
///
/// Items without a parsable `pubDate` are dropped with a warning:
/// publication time is the one entry field the rest of the pipeline
/// cannot substitute.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>> {
    let mut reader = Reader::from_str(xml);

    let mut entries = Vec::new();
    let mut item: Option<PartialItem> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => match start.local_name().as_ref() {
                b"item" => item = Some(PartialItem::default()),
                b"title" => field = Some(Field::Title),
                b"link" => field = Some(Field::Link),
                b"description" => field = Some(Field::Description),
                b"pubDate" => field = Some(Field::PubDate),
                _ => field = None,
            },
            Event::End(end) => {
                if end.local_name().as_ref() == b"item" {
                    if let Some(partial) = item.take() {
                        match partial.into_entry() {
                            Some(entry) => entries.push(entry),
                            None => {
                                log::warn!("Dropping feed item without a parsable pubDate")
                            }
                        }
                    }
                }
                field = None;
            }
            Event::Text(text) => {
                // Channel-level title/link/description live outside any
                // <item> and are ignored.
                if let (Some(item), Some(field)) = (item.as_mut(), field) {
                    item.field_mut(field).push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let (Some(item), Some(field)) = (item.as_mut(), field) {
                    item.field_mut(field)
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(entries)
}

/// RSS 2.0 dates are RFC 2822; some generators emit RFC 3339 instead.
fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<rss version="2.0">
<channel>
<title>Northern District of Illinois - Recent Docket Entries</title>
<link>https://ecf.ilnd.uscourts.gov</link>
<description>Docket entries filed in the last 24 hours</description>
<item>
<title>1:13-cv-04341 Duffy v. Godfread et al</title>
<link>https://ecf.ilnd.uscourts.gov/cgi-bin/DktRpt.pl?280638</link>
<description>[Order] (&lt;a href="https://ecf.ilnd.uscourts.gov/doc1/067112345678"&gt;23&lt;/a&gt;)</description>
<pubDate>Mon, 07 Oct 2013 14:00:00 GMT</pubDate>
</item>
<item>
<title>2:13-cv-06312 Malibu Media v. Doe</title>
<link>https://ecf.ilnd.uscourts.gov/cgi-bin/DktRpt.pl?287310</link>
<description><![CDATA[[Complaint] (<a href="https://ecf.ilnd.uscourts.gov/doc1/067112345679">1</a>)]]></description>
<pubDate>Mon, 07 Oct 2013 13:30:00 GMT</pubDate>
</item>
</channel>
</rss>"#;

    #[test]
    fn test_parse_items() {
        let entries = parse_feed(SAMPLE).unwrap();
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(first.title, "1:13-cv-04341 Duffy v. Godfread et al");
        assert_eq!(
            first.link,
            "https://ecf.ilnd.uscourts.gov/cgi-bin/DktRpt.pl?280638"
        );
        assert_eq!(first.published.timestamp(), 1381154400);
    }

    #[test]
    fn test_escaped_markup_is_unescaped() {
        let entries = parse_feed(SAMPLE).unwrap();
        assert!(entries[0].description.contains(r#"href="https://"#));
        assert!(entries[0].description.starts_with("[Order]"));
        // summary carries the same payload
        assert_eq!(entries[0].summary, entries[0].description);
    }

    #[test]
    fn test_cdata_description() {
        let entries = parse_feed(SAMPLE).unwrap();
        assert!(entries[1].description.starts_with("[Complaint]"));
        assert!(entries[1].description.contains(r#"href="https://"#));
    }

    #[test]
    fn test_channel_fields_do_not_leak_into_items() {
        let entries = parse_feed(SAMPLE).unwrap();
        assert!(!entries[0].title.contains("Recent Docket Entries"));
        assert!(!entries[0].description.contains("last 24 hours"));
    }

    #[test]
    fn test_item_without_pub_date_is_dropped() {
        let xml = r#"<rss version="2.0"><channel>
<item>
<title>1:13-cv-00001 Doe v. Roe</title>
<link>https://ecf.ilnd.uscourts.gov/cgi-bin/DktRpt.pl?1</link>
<description>[Order]</description>
</item>
<item>
<title>1:13-cv-00002 Roe v. Doe</title>
<link>https://ecf.ilnd.uscourts.gov/cgi-bin/DktRpt.pl?2</link>
<description>[Order]</description>
<pubDate>not a date</pubDate>
</item>
</channel></rss>"#;
        let entries = parse_feed(xml).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_rfc3339_pub_date_accepted() {
        let xml = r#"<rss version="2.0"><channel><item>
<title>1:13-cv-00003 Doe v. Doe</title>
<link>https://ecf.ilnd.uscourts.gov/cgi-bin/DktRpt.pl?3</link>
<description>[Motion]</description>
<pubDate>2013-10-07T14:00:00Z</pubDate>
</item></channel></rss>"#;
        let entries = parse_feed(xml).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].published.timestamp(), 1381154400);
    }

    #[test]
    fn test_empty_feed() {
        let xml = r#"<rss version="2.0"><channel><title>Empty</title></channel></rss>"#;
        let entries = parse_feed(xml).unwrap();
        assert!(entries.is_empty());
    }
}
