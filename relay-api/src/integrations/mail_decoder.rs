use mail_parser::{MessageParser, PartType};
use shared_types::{DecodedEmail, EmailAddress};

/// Decodes a raw RFC 822 message into the parts the relay works with.
///
/// Returns `None` when the bytes do not look like an email at all: nothing
/// parsed, or no sender, subject or body could be recovered.
pub fn decode_email(raw: &[u8]) -> Option<DecodedEmail> {
    let parser = MessageParser::default();
    let parsed = parser.parse(raw)?;

    let from = parsed
        .from()
        .and_then(|addrs| addrs.first())
        .and_then(|addr| {
            Some(EmailAddress {
                email: addr.address()?.to_string(),
                name: addr.name().map(|n| n.to_string()),
            })
        });

    let email = DecodedEmail {
        message_id: parsed.message_id().map(|s| s.to_string()),
        subject: parsed.subject().map(|s| s.to_string()),
        from,
        date: parsed.date().map(|dt| dt.to_rfc822()),
        body_text: parsed.body_text(0).map(|s| s.to_string()),
        // mail-parser synthesizes HTML from text-only messages; only a real
        // HTML part counts here
        body_html: parsed
            .html_part(0)
            .filter(|part| matches!(part.body, PartType::Html(_)))
            .and_then(|_| parsed.body_html(0))
            .map(|s| s.to_string()),
    };

    let has_content = email.from.is_some()
        || email.subject.is_some()
        || email.body_text.as_deref().is_some_and(|b| !b.trim().is_empty())
        || email.body_html.as_deref().is_some_and(|b| !b.trim().is_empty());

    has_content.then_some(email)
}
