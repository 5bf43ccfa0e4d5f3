use regex::Regex;
use shared_types::ForwardedHeader;
use std::sync::OnceLock;

use crate::text_cleaner::{clean_sender, strip_tags};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderField {
    From,
    Date,
    Subject,
}

/// Label variants per field, English and Indonesian. Matching is
/// case-insensitive and the first occurrence in the body wins.
const HEADER_LABELS: &[(HeaderField, &[&str])] = &[
    (HeaderField::From, &["Dari", "From"]),
    (HeaderField::Date, &["Date", "Tanggal", "Sent"]),
    (HeaderField::Subject, &["Subject"]),
];

struct HeaderPattern {
    field: HeaderField,
    regex: Regex,
}

fn header_patterns() -> &'static [HeaderPattern] {
    static PATTERNS: OnceLock<Vec<HeaderPattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        HEADER_LABELS
            .iter()
            .map(|(field, labels)| {
                let alternatives = labels
                    .iter()
                    .map(|label| regex::escape(label))
                    .collect::<Vec<_>>()
                    .join("|");
                // The value runs to the end of the line; `\b` keeps `Update:` from
                // satisfying `Date:`.
                let pattern = format!(r"(?i)\b(?:{alternatives}):[ \t]*([^\n]*)");
                HeaderPattern {
                    field: *field,
                    regex: Regex::new(&pattern).expect("invalid header label regex"),
                }
            })
            .collect()
    })
}

fn line_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").expect("invalid line break regex"))
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("invalid email regex")
    })
}

/// Recovers the original sender, date and subject from a forwarded-message
/// block in `content`, which may be plain text or HTML using `<br>` breaks.
///
/// A field is `None` only when its label never appears. A label followed by
/// nothing yields `Some("")`.
pub fn extract_forwarded_header(content: &str) -> ForwardedHeader {
    let mut header = ForwardedHeader::default();
    if content.is_empty() {
        return header;
    }

    let text = line_break_re().replace_all(content, "\n");

    for pattern in header_patterns() {
        let Some(raw) = pattern
            .regex
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
        else {
            continue;
        };

        match pattern.field {
            HeaderField::From => header.from = Some(sender_value(raw)),
            HeaderField::Date => header.date = Some(strip_tags(raw).trim().to_string()),
            HeaderField::Subject => header.subject = Some(strip_tags(raw).trim().to_string()),
        }
    }

    tracing::debug!(
        from = header.from.is_some(),
        date = header.date.is_some(),
        subject = header.subject.is_some(),
        "Forwarded header extracted"
    );

    header
}

/// The bare address when the sender line contains one, the cleaned line otherwise.
fn sender_value(raw: &str) -> String {
    match email_re().find(raw) {
        Some(m) => m.as_str().to_string(),
        None => clean_sender(raw),
    }
}
