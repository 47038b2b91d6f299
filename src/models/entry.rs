//! Feed entry and extracted filing data structures.

use chrono::{DateTime, Utc};

/// Timestamp format used when rendering a filing for a notification.
const TIME_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

/// A single item from a court's docket RSS feed.
///
/// `summary` and `description` both carry the item's markup payload;
/// RSS 2.0 has a single `<description>` element and upstream tooling
/// exposes it under both names, with the formatting differing court by
/// court.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    /// Entry title, e.g. "1:13-cv-50286 Malibu Media v. Doe"
    pub title: String,

    /// Canonical URL of the docket entry
    pub link: String,

    /// Summary text (markup-bearing)
    pub summary: String,

    /// Description markup holding the document anchor
    pub description: String,

    /// Publication time
    pub published: DateTime<Utc>,
}

/// Structured metadata extracted from a matching feed entry.
///
/// Built once per match at notification time and discarded after
/// dispatch. Every field except `time` falls back to the `"?"`
/// sentinel when its source markup cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filing {
    /// Document number within the case
    pub document_number: String,

    /// Link to the document itself
    pub link: String,

    /// Case title with the leading case-number token stripped
    pub case_title: String,

    /// Court code, e.g. "ilnd"
    pub court: String,

    /// Docket-entry description, e.g. "Order"
    pub description: String,

    /// Publication time of the underlying entry
    pub time: DateTime<Utc>,
}

impl Filing {
    /// Format the filing for display using a template.
    ///
    /// Supported placeholders:
    /// - `{num}`, `{link}`, `{case}`, `{court}`, `{description}`, `{time}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{num}", &self.document_number)
            .replace("{link}", &self.link)
            .replace("{case}", &self.case_title)
            .replace("{court}", &self.court)
            .replace("{description}", &self.description)
            .replace("{time}", &self.time.format(TIME_FORMAT).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_filing() -> Filing {
        Filing {
            document_number: "23".to_string(),
            link: "https://ecf.ilnd.uscourts.gov/doc1/067112345678".to_string(),
            case_title: "Duffy v. Godfread et al".to_string(),
            court: "ilnd".to_string(),
            description: "Order".to_string(),
            time: Utc.timestamp_opt(1381154400, 0).unwrap(),
        }
    }

    #[test]
    fn test_format() {
        let filing = sample_filing();
        let result = filing.format("#{num} {description} in {case} ({court})");
        assert_eq!(result, "#23 Order in Duffy v. Godfread et al (ilnd)");
    }

    #[test]
    fn test_format_time() {
        let filing = sample_filing();
        assert_eq!(filing.format("{time}"), "Mon Oct 07 14:00:00 2013");
    }
}
