use serde::{Deserialize, Serialize};

/// Placeholder for a transaction field whose label was not found
pub const NOT_AVAILABLE: &str = "N/A";

/// Transaction details pulled out of a bank notification body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFields {
    /// Last four digits of the card
    pub akhir_kartu: String,
    pub merchant: String,
    pub tanggal_transaksi: String,
    /// Amount as printed, currency included
    pub nominal: String,
}

impl Default for TransactionFields {
    fn default() -> Self {
        Self {
            akhir_kartu: NOT_AVAILABLE.to_string(),
            merchant: NOT_AVAILABLE.to_string(),
            tanggal_transaksi: NOT_AVAILABLE.to_string(),
            nominal: NOT_AVAILABLE.to_string(),
        }
    }
}

impl TransactionFields {
    /// True when no field was extracted
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sentinel() {
        let fields = TransactionFields::default();
        assert_eq!(fields.akhir_kartu, "N/A");
        assert_eq!(fields.merchant, "N/A");
        assert_eq!(fields.tanggal_transaksi, "N/A");
        assert_eq!(fields.nominal, "N/A");
        assert!(fields.is_default());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(TransactionFields::default()).unwrap();
        assert_eq!(json["akhirKartu"], "N/A");
        assert_eq!(json["tanggalTransaksi"], "N/A");
        assert!(json.get("akhir_kartu").is_none());
    }
}
