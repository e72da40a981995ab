//! Compiled-in jurisdiction tax table.
//!
//! Canadian province/territory sales taxes. Single-rate jurisdictions carry
//! one GST entry, combined-tax provinces one HST entry, and dual-tax
//! provinces list GST before PST because that is the disclosure order those
//! provinces expect on receipts.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;

/// One named rate entry for a jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateEntry {
    pub name: &'static str,
    pub rate: Decimal,
}

/// Immutable mapping from uppercase 2-letter jurisdiction code to its
/// ordered rate entries. Every jurisdiction has one or two entries.
pub struct JurisdictionTaxTable {
    entries: Vec<(&'static str, Vec<RateEntry>)>,
}

static TABLE: Lazy<JurisdictionTaxTable> = Lazy::new(JurisdictionTaxTable::canadian);

impl JurisdictionTaxTable {
    /// The shared compiled-in table.
    pub fn shared() -> &'static JurisdictionTaxTable {
        &TABLE
    }

    fn canadian() -> Self {
        let gst = Decimal::new(5, 2); // 0.05

        let gst_only = |code| (code, vec![RateEntry { name: "GST", rate: gst }]);
        let hst = |code, rate| (code, vec![RateEntry { name: "HST", rate }]);
        let gst_pst = |code, pst| {
            (
                code,
                vec![
                    RateEntry { name: "GST", rate: gst },
                    RateEntry { name: "PST", rate: pst },
                ],
            )
        };

        Self {
            entries: vec![
                gst_only("AB"),
                gst_pst("BC", Decimal::new(7, 2)),
                gst_pst("MB", Decimal::new(7, 2)),
                hst("NB", Decimal::new(15, 2)),
                hst("NL", Decimal::new(15, 2)),
                hst("NS", Decimal::new(15, 2)),
                gst_only("NT"),
                gst_only("NU"),
                hst("ON", Decimal::new(13, 2)),
                hst("PE", Decimal::new(15, 2)),
                gst_pst("QC", Decimal::new(9975, 5)),
                gst_pst("SK", Decimal::new(6, 2)),
                gst_only("YT"),
            ],
        }
    }

    /// Rate entries for a jurisdiction code, matched case-insensitively.
    pub fn entries_for(&self, jurisdiction: &str) -> Option<&[RateEntry]> {
        let code = jurisdiction.trim().to_uppercase();
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, entries)| entries.as_slice())
    }

    /// Sum of all rate entries for one jurisdiction.
    pub fn combined_rate_of(entries: &[RateEntry]) -> Decimal {
        entries.iter().map(|e| e.rate).sum()
    }

    /// Arithmetic mean of the combined rate across every jurisdiction.
    /// Used as the estimated rate when the buyer's jurisdiction is unknown.
    pub fn average_combined_rate(&self) -> Decimal {
        let sum: Decimal = self
            .entries
            .iter()
            .map(|(_, entries)| Self::combined_rate_of(entries))
            .sum();

        sum / Decimal::from(self.entries.len() as u64)
    }

    /// All jurisdiction codes in declaration order.
    pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(code, _)| *code)
    }
}
