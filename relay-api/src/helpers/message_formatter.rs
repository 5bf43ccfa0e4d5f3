//! Rendering of relay summaries as Telegram legacy-Markdown messages.

use shared_types::RelaySummary;

/// Characters with meaning in Telegram's legacy Markdown
const MARKDOWN_SPECIAL: [char; 4] = ['_', '*', '`', '['];

/// Prefixes a backslash to every `_`, `*`, `` ` `` and `[`. Anything else passes
/// through untouched.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Renders the outbound message. Every interpolated value is escaped.
pub fn format_summary(summary: &RelaySummary) -> String {
    let mut lines = vec![
        format!("*Dari:* {}", escape_markdown(&summary.from)),
        format!("*Subjek:* {}", escape_markdown(&summary.subject)),
    ];

    if let Some(date) = summary.date.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(format!("*Tanggal:* {}", escape_markdown(date)));
    }

    let txn = &summary.transaction;
    lines.push(String::new());
    lines.push("*Detail Transaksi*".to_string());
    lines.push(format!("4 Digit Akhir Kartu: {}", escape_markdown(&txn.akhir_kartu)));
    lines.push(format!("Merchant/ATM: {}", escape_markdown(&txn.merchant)));
    lines.push(format!("Tanggal Transaksi: {}", escape_markdown(&txn.tanggal_transaksi)));
    lines.push(format!("Nominal: {}", escape_markdown(&txn.nominal)));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::TransactionFields;

    fn summary(date: Option<&str>) -> RelaySummary {
        RelaySummary {
            from: "alerts_bank@bank.co.id".to_string(),
            subject: "*PENTING* Transaksi [Kartu]".to_string(),
            date: date.map(str::to_string),
            transaction: TransactionFields {
                akhir_kartu: "1234".to_string(),
                merchant: "GRAB_FOOD".to_string(),
                tanggal_transaksi: "01/01/2024".to_string(),
                nominal: "Rp 50.000".to_string(),
            },
        }
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape_markdown("a_b*c`d[e]"), "a\\_b\\*c\\`d\\[e]");
    }

    #[test]
    fn test_escape_passes_other_characters() {
        let text = "Rp 1.000,00 (ok) ~ # + - = | { } . ! > é 日本";
        assert_eq!(escape_markdown(text), text);
        assert_eq!(escape_markdown(""), "");
    }

    #[test]
    fn test_escape_keeps_order_of_plain_characters() {
        let text = "x_y*z";
        let plain: String = escape_markdown(text).chars().filter(|c| *c != '\\').collect();
        assert_eq!(plain, text);
    }

    #[test]
    fn test_escape_single_pass() {
        assert_eq!(escape_markdown("_"), "\\_");
        assert_eq!(escape_markdown(&escape_markdown("_")), "\\\\_");
    }

    #[test]
    fn test_format_summary_with_date() {
        let message = format_summary(&summary(Some("Mon, 1 Jan 2024")));

        assert_eq!(
            message,
            "*Dari:* alerts\\_bank@bank.co.id\n\
             *Subjek:* \\*PENTING\\* Transaksi \\[Kartu]\n\
             *Tanggal:* Mon, 1 Jan 2024\n\
             \n\
             *Detail Transaksi*\n\
             4 Digit Akhir Kartu: 1234\n\
             Merchant/ATM: GRAB\\_FOOD\n\
             Tanggal Transaksi: 01/01/2024\n\
             Nominal: Rp 50.000"
        );
    }

    #[test]
    fn test_format_summary_without_date() {
        let message = format_summary(&summary(None));
        assert!(!message.contains("*Tanggal:*"));

        let message = format_summary(&summary(Some("  ")));
        assert!(!message.contains("*Tanggal:*"));
    }

    #[test]
    fn test_format_summary_defaults() {
        let mut s = summary(None);
        s.transaction = TransactionFields::default();
        let message = format_summary(&s);

        assert!(message.contains("4 Digit Akhir Kartu: N/A"));
        assert!(message.contains("Nominal: N/A"));
    }
}
