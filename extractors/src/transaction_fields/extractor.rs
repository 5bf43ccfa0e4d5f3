use crate::text_cleaner::clean;
use crate::transaction_fields::{default_field_rules, FieldRule};
use regex::Regex;
use shared_types::{ExtractionError, TransactionField, TransactionFields};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

pub struct TransactionFieldExtractor {
    patterns: Vec<CompiledRule>,
}

struct CompiledRule {
    field: TransactionField,
    regex: Regex,
}

impl TransactionFieldExtractor {
    pub fn new() -> Self {
        Self::with_rules(default_field_rules()).expect("built-in field rules are valid")
    }

    /// Builds an extractor from a custom rule table. Rules are tried in order and
    /// the first one that matches a field wins.
    pub fn with_rules(rules: Vec<FieldRule>) -> Result<Self, ExtractionError> {
        let mut patterns = Vec::with_capacity(rules.len());

        for rule in rules {
            patterns.push(CompiledRule {
                field: rule.field,
                regex: rule.compile()?,
            });
        }

        Ok(Self { patterns })
    }

    /// The built-in table with additional label phrasings appended to each field.
    pub fn with_extra_labels(
        extra: &HashMap<TransactionField, Vec<String>>,
    ) -> Result<Self, ExtractionError> {
        let rules = default_field_rules()
            .into_iter()
            .map(|mut rule| {
                if let Some(labels) = extra.get(&rule.field) {
                    rule.labels.extend(labels.iter().cloned());
                }
                rule
            })
            .collect();

        Self::with_rules(rules)
    }

    pub fn extract(&self, html: &str) -> TransactionFields {
        let mut fields = TransactionFields::default();

        if html.trim().is_empty() {
            return fields;
        }

        let mut found = HashSet::new();

        for pattern in &self.patterns {
            if found.contains(&pattern.field) {
                continue;
            }

            let Some(raw) = pattern.regex.captures(html).and_then(|caps| caps.get(1)) else {
                continue;
            };

            *field_slot(&mut fields, pattern.field) = clean(raw.as_str());
            found.insert(pattern.field);
        }

        tracing::debug!(
            matched = found.len(),
            total = TransactionField::ALL.len(),
            "Transaction fields extracted"
        );

        fields
    }
}

impl Default for TransactionFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn field_slot(fields: &mut TransactionFields, field: TransactionField) -> &mut String {
    match field {
        TransactionField::CardSuffix => &mut fields.akhir_kartu,
        TransactionField::Merchant => &mut fields.merchant,
        TransactionField::TransactionDate => &mut fields.tanggal_transaksi,
        TransactionField::Amount => &mut fields.nominal,
    }
}

/// Extracts the four transaction fields with the built-in label table.
pub fn extract_transaction_fields(html: &str) -> TransactionFields {
    static EXTRACTOR: OnceLock<TransactionFieldExtractor> = OnceLock::new();
    EXTRACTOR
        .get_or_init(TransactionFieldExtractor::new)
        .extract(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction_fields::CaptureRule;

    #[test]
    fn test_br_separated_notification() {
        let fields = extract_transaction_fields(
            "4 digit Akhir Kartu: 1234<br>Merchant/ATM: Starbucks<br>Tanggal Transaksi: 01/01/2024<br>Nominal: Rp 50.000",
        );

        assert_eq!(fields.akhir_kartu, "1234");
        assert_eq!(fields.merchant, "Starbucks");
        assert_eq!(fields.tanggal_transaksi, "01/01/2024");
        assert_eq!(fields.nominal, "Rp 50.000");
    }

    #[test]
    fn test_paragraph_html_with_nbsp() {
        let html = r#"
            <p>Yth. Nasabah,</p>
            <p>4 digit   Akhir Kartu :&nbsp;9876</p>
            <p>Merchant/ATM:&nbsp;<b>TOKOPEDIA JAKARTA</b></p>
            <p>Tanggal  Transaksi: 15-03-2024 14:22:01 WIB</p>
            <p>NOMINAL : IDR 1.250.000,00&nbsp;(Satu Juta)</p>
        "#;

        let fields = extract_transaction_fields(html);

        assert_eq!(fields.akhir_kartu, "9876");
        assert_eq!(fields.merchant, "TOKOPEDIA JAKARTA");
        assert_eq!(fields.tanggal_transaksi, "15-03-2024 14:22:01 WIB");
        assert_eq!(fields.nominal, "IDR 1.250.000,00");
    }

    #[test]
    fn test_plain_text_lines() {
        let text = "Merchant/ATM: ATM BERSAMA\r\nNominal: Rp 200.000\nTerima kasih";

        let fields = extract_transaction_fields(text);

        assert_eq!(fields.merchant, "ATM BERSAMA");
        assert_eq!(fields.nominal, "Rp 200.000");
        assert_eq!(fields.akhir_kartu, "N/A");
        assert_eq!(fields.tanggal_transaksi, "N/A");
    }

    #[test]
    fn test_card_suffix_needs_digits() {
        let fields = extract_transaction_fields("4 digit Akhir Kartu: XXXX<br>");
        assert_eq!(fields.akhir_kartu, "N/A");

        let fields = extract_transaction_fields("4 digit Akhir Kartu: 12<br>");
        assert_eq!(fields.akhir_kartu, "N/A");
    }

    #[test]
    fn test_empty_value_is_extracted() {
        let fields = extract_transaction_fields("Merchant/ATM: <br>Nominal: Rp 1");
        assert_eq!(fields.merchant, "");
        assert_eq!(fields.nominal, "Rp 1");
    }

    #[test]
    fn test_blank_value_stops_at_newline() {
        let fields = extract_transaction_fields("Merchant/ATM:\nNominal: Rp 5.000");
        assert_eq!(fields.merchant, "");
        assert_eq!(fields.nominal, "Rp 5.000");

        let fields = extract_transaction_fields("Nominal: \r\nTerima kasih");
        assert_eq!(fields.nominal, "");

        let fields = extract_transaction_fields("Tanggal Transaksi: \r\nMerchant/ATM: ALFAMART");
        assert_eq!(fields.tanggal_transaksi, "");
        assert_eq!(fields.merchant, "ALFAMART");
    }

    #[test]
    fn test_blank_value_stops_at_nbsp_and_paragraph() {
        let fields = extract_transaction_fields("<p>Merchant/ATM:&nbsp;&nbsp;KOPI</p><p>Nominal: </p>");
        assert_eq!(fields.merchant, "");
        assert_eq!(fields.nominal, "");
    }

    #[test]
    fn test_unknown_format_keeps_defaults() {
        let fields = extract_transaction_fields("<html><body>Your statement is ready.</body></html>");
        assert!(fields.is_default());
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_transaction_fields("").is_default());
        assert!(extract_transaction_fields("  \n ").is_default());
    }

    #[test]
    fn test_extra_labels() {
        let mut extra = HashMap::new();
        extra.insert(TransactionField::Merchant, vec!["Nama Merchant".to_string()]);
        extra.insert(TransactionField::Amount, vec!["Jumlah".to_string()]);

        let extractor = TransactionFieldExtractor::with_extra_labels(&extra).unwrap();
        let fields = extractor.extract("Nama  Merchant: Indomaret<br>Jumlah: Rp 15.500");

        assert_eq!(fields.merchant, "Indomaret");
        assert_eq!(fields.nominal, "Rp 15.500");
    }

    #[test]
    fn test_first_rule_wins_per_field() {
        let extractor = TransactionFieldExtractor::with_rules(vec![
            FieldRule::new(TransactionField::Amount, &["Total"], CaptureRule::UntilBreak),
            FieldRule::new(TransactionField::Amount, &["Nominal"], CaptureRule::UntilBreak),
        ])
        .unwrap();

        let fields = extractor.extract("Nominal: Rp 1<br>Total: Rp 2");
        assert_eq!(fields.nominal, "Rp 2");
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let result = TransactionFieldExtractor::with_rules(vec![FieldRule::new(
            TransactionField::CardSuffix,
            &[],
            CaptureRule::Digits(4),
        )]);
        assert!(result.is_err());
    }
}
