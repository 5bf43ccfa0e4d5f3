use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::helpers::message_formatter::format_summary;
use crate::integrations::mail_decoder::decode_email;
use crate::integrations::telegram::TelegramNotifier;
use anyhow::Result;
use extractors::{extract_forwarded_header, TransactionFieldExtractor};
use shared_types::{DecodedEmail, RelaySummary};

const UNKNOWN_SENDER: &str = "Unknown";
const NO_SUBJECT: &str = "(tanpa subjek)";

/// Decode, extract, format and deliver, one inbound email at a time.
pub struct RelayPipeline {
    extractor: TransactionFieldExtractor,
    notifier: Option<TelegramNotifier>,
}

#[derive(Debug)]
pub struct RelayOutcome {
    pub summary: RelaySummary,
    pub delivered: bool,
}

impl RelayPipeline {
    pub fn new(extractor: TransactionFieldExtractor, notifier: Option<TelegramNotifier>) -> Self {
        Self {
            extractor,
            notifier,
        }
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let extractor = match &config.labels {
            Some(labels) => TransactionFieldExtractor::with_extra_labels(&labels.extra_labels())?,
            None => TransactionFieldExtractor::new(),
        };

        let notifier = config
            .telegram
            .as_ref()
            .and_then(TelegramNotifier::from_config);

        if notifier.is_none() {
            tracing::warn!("Telegram bot token or chat id missing; summaries will not be delivered");
        }

        Ok(Self::new(extractor, notifier))
    }

    pub fn notifier_configured(&self) -> bool {
        self.notifier.is_some()
    }

    pub fn extractor(&self) -> &TransactionFieldExtractor {
        &self.extractor
    }

    /// Decodes `raw` and builds the summary without delivering anything.
    pub fn prepare(&self, raw: &[u8]) -> Result<RelaySummary, RelayError> {
        let email = decode_email(raw).ok_or(RelayError::UnparseableEmail)?;

        tracing::info!(
            message_id = email.message_id.as_deref().unwrap_or("-"),
            "Decoded inbound email"
        );

        Ok(self.summarize(&email))
    }

    /// Extracts both records from the bodies and merges them with the outer
    /// headers. Forwarded values win whenever their label was present.
    pub fn summarize(&self, email: &DecodedEmail) -> RelaySummary {
        let header_source = email
            .body_text
            .as_deref()
            .or(email.body_html.as_deref())
            .unwrap_or_default();
        let forwarded = extract_forwarded_header(header_source);

        let transaction_source = email
            .body_html
            .as_deref()
            .or(email.body_text.as_deref())
            .unwrap_or_default();
        let transaction = self.extractor.extract(transaction_source);

        if transaction.is_default() {
            tracing::info!("No transaction labels found in email body");
        }

        let from = forwarded.from.unwrap_or_else(|| {
            email
                .from
                .as_ref()
                .map(|addr| addr.display())
                .unwrap_or_else(|| UNKNOWN_SENDER.to_string())
        });

        let subject = forwarded
            .subject
            .or_else(|| email.subject.clone())
            .unwrap_or_else(|| NO_SUBJECT.to_string());

        RelaySummary {
            from,
            subject,
            date: forwarded.date.or_else(|| email.date.clone()),
            transaction,
        }
    }

    pub async fn deliver(&self, summary: &RelaySummary) -> Result<(), RelayError> {
        let notifier = self.notifier.as_ref().ok_or(RelayError::NotConfigured)?;
        notifier.send_markdown(&format_summary(summary)).await
    }

    /// Runs the whole pipeline. Only an unparseable email is an error; delivery
    /// problems are logged and reported through `delivered`.
    pub async fn relay(&self, raw: &[u8]) -> Result<RelayOutcome, RelayError> {
        let summary = self.prepare(raw)?;

        let delivered = match self.deliver(&summary).await {
            Ok(()) => {
                tracing::info!("Summary delivered to Telegram");
                true
            }
            Err(RelayError::NotConfigured) => {
                tracing::warn!("Skipping delivery: Telegram is not configured");
                false
            }
            Err(e) => {
                tracing::error!("Failed to deliver summary: {}", e);
                false
            }
        };

        Ok(RelayOutcome { summary, delivered })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelsConfig;
    use shared_types::EmailAddress;

    fn pipeline() -> RelayPipeline {
        RelayPipeline::new(TransactionFieldExtractor::new(), None)
    }

    fn forwarded_email() -> DecodedEmail {
        DecodedEmail {
            message_id: Some("m1@example.com".to_string()),
            subject: Some("Fwd: Transaksi".to_string()),
            from: Some(EmailAddress {
                email: "me@example.com".to_string(),
                name: Some("Me".to_string()),
            }),
            date: Some("Tue, 2 Jan 2024 08:00:00 +0700".to_string()),
            body_text: Some(
                "---------- Forwarded message ---------\nFrom: BCA <bca@bca.co.id>\nDate: Mon, 1 Jan 2024\nSubject: Notifikasi Transaksi\n"
                    .to_string(),
            ),
            body_html: Some(
                "4 digit Akhir Kartu: 1234<br>Merchant/ATM: Starbucks<br>Tanggal Transaksi: 01/01/2024<br>Nominal: Rp 50.000"
                    .to_string(),
            ),
        }
    }

    #[test]
    fn test_summarize_prefers_forwarded_header() {
        let summary = pipeline().summarize(&forwarded_email());

        assert_eq!(summary.from, "bca@bca.co.id");
        assert_eq!(summary.subject, "Notifikasi Transaksi");
        assert_eq!(summary.date.as_deref(), Some("Mon, 1 Jan 2024"));
        assert_eq!(summary.transaction.akhir_kartu, "1234");
        assert_eq!(summary.transaction.merchant, "Starbucks");
        assert_eq!(summary.transaction.tanggal_transaksi, "01/01/2024");
        assert_eq!(summary.transaction.nominal, "Rp 50.000");
    }

    #[test]
    fn test_summarize_falls_back_to_outer_headers() {
        let email = DecodedEmail {
            body_text: Some("Halo, tidak ada transaksi.".to_string()),
            body_html: None,
            ..forwarded_email()
        };

        let summary = pipeline().summarize(&email);

        assert_eq!(summary.from, "Me <me@example.com>");
        assert_eq!(summary.subject, "Fwd: Transaksi");
        assert_eq!(summary.date.as_deref(), Some("Tue, 2 Jan 2024 08:00:00 +0700"));
        assert!(summary.transaction.is_default());
    }

    #[test]
    fn test_summarize_empty_email() {
        let summary = pipeline().summarize(&DecodedEmail::default());

        assert_eq!(summary.from, UNKNOWN_SENDER);
        assert_eq!(summary.subject, NO_SUBJECT);
        assert!(summary.date.is_none());
        assert!(summary.transaction.is_default());
    }

    #[test]
    fn test_summarize_uses_html_for_headers_when_no_text() {
        let email = DecodedEmail {
            body_text: None,
            body_html: Some("Dari: Sistem Internal<br>Nominal: Rp 10.000".to_string()),
            ..DecodedEmail::default()
        };

        let summary = pipeline().summarize(&email);

        assert_eq!(summary.from, "Sistem Internal");
        assert_eq!(summary.transaction.nominal, "Rp 10.000");
    }

    #[test]
    fn test_prepare_rejects_garbage() {
        assert!(matches!(
            pipeline().prepare(b""),
            Err(RelayError::UnparseableEmail)
        ));
    }

    #[test]
    fn test_prepare_raw_email() {
        let raw = concat!(
            "From: Me <me@example.com>\r\n",
            "Subject: Fwd: Transaksi\r\n",
            "Content-Type: text/plain; charset=utf-8\r\n",
            "\r\n",
            "Dari: Bank Mandiri <noreply@bankmandiri.co.id>\r\n",
            "Merchant/ATM: ALFAMART\r\n",
            "Nominal: Rp 25.000\r\n",
        );

        let summary = pipeline().prepare(raw.as_bytes()).unwrap();

        assert_eq!(summary.from, "noreply@bankmandiri.co.id");
        assert_eq!(summary.subject, "Fwd: Transaksi");
        assert_eq!(summary.transaction.merchant, "ALFAMART");
        assert_eq!(summary.transaction.nominal, "Rp 25.000");
    }

    #[actix_web::test]
    async fn test_relay_without_notifier_is_not_delivered() {
        let raw = "From: a@b.com\r\nSubject: hi\r\n\r\nNominal: Rp 1\r\n";

        let outcome = pipeline().relay(raw.as_bytes()).await.unwrap();

        assert!(!outcome.delivered);
        assert_eq!(outcome.summary.transaction.nominal, "Rp 1");
    }

    #[test]
    fn test_from_config_with_extra_labels() {
        let config = RelayConfig {
            labels: Some(LabelsConfig {
                amount: vec!["Jumlah".to_string()],
                ..LabelsConfig::default()
            }),
            ..RelayConfig::default()
        };

        let pipeline = RelayPipeline::from_config(&config).unwrap();

        assert!(!pipeline.notifier_configured());
        assert_eq!(pipeline.extractor().extract("Jumlah: Rp 7").nominal, "Rp 7");
    }
}
