use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Money;

/// Distribution mode shared by every entry of a [`SplitSet`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    #[default]
    Percentage,
    Flat,
}

impl SplitMode {
    /// Canonical wire tag used by the gateway (`type` field).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Flat => "flat",
        }
    }
}

/// A payee entitled to a share of a split payment. Read-only
/// reference data owned by the branch directory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Recipient {
    pub id: String,
    pub nome: String,
    pub liable: bool,
}

/// One share of a split: a recipient and its amount under the active
/// mode (percentage points 0–100, or minor units when flat).
///
/// `amount_display` mirrors the flat-mode text input so the UI can
/// echo `4,86` while the entry stores `486`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SplitEntry {
    pub recipient_id: String,
    pub amount: i64,
    pub amount_display: String,
    pub mode: SplitMode,
    pub liable: bool,
}

impl SplitEntry {
    fn empty(mode: SplitMode) -> Self {
        Self {
            recipient_id: String::new(),
            amount: 0,
            amount_display: String::new(),
            mode,
            liable: false,
        }
    }
}

/// Why a split set failed to reconcile against its target.
///
/// Messages are user-facing: flat figures render through the money
/// formatter, percentage figures as integers with a `%` suffix.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    #[error("Adicione ao menos um recebedor ao split!")]
    Empty,
    #[error("A soma dos percentuais deve ser 100% (atual: {actual}%)")]
    PercentageMismatch { actual: i64 },
    #[error("A soma do split deve ser {} (atual: {})", expected.format_symbol(), actual.format_symbol())]
    FlatMismatch { expected: Money, actual: Money },
}

/// Ordered set of split entries sharing one distribution mode.
///
/// Entries only grow within a session; there is no removal
/// operation. Reconciliation is exact: percentages must sum to 100,
/// flat shares must sum to the cart's minor-unit total.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SplitSet {
    pub entries: Vec<SplitEntry>,
    pub mode: SplitMode,
}

impl SplitSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a zeroed entry under the current mode.
    ///
    /// Duplicate recipient ids are allowed; the reconciler only
    /// checks the sum.
    pub fn add_entry(&mut self) -> &mut SplitEntry {
        self.entries.push(SplitEntry::empty(self.mode));
        let index = self.entries.len() - 1;
        &mut self.entries[index]
    }

    /// Switches the distribution mode, resetting every entry's amount
    /// and display mirror to zero. Recipient assignments and
    /// liability flags are preserved.
    ///
    /// Magnitudes under one mode are not meaningfully convertible to
    /// the other, so the numeric state is wiped rather than
    /// reinterpreted.
    pub fn set_mode(&mut self, mode: SplitMode) {
        self.mode = mode;
        for entry in &mut self.entries {
            entry.mode = mode;
            entry.amount = 0;
            entry.amount_display.clear();
        }
    }

    /// Updates one entry's amount from raw text.
    ///
    /// Flat mode uses keypad-style minor-unit entry and refreshes the
    /// display mirror; percentage mode reads the digits as percentage
    /// points. Out-of-range indices are ignored.
    pub fn set_entry_amount(&mut self, index: usize, raw: &str) {
        let mode = self.mode;
        let Some(entry) = self.entries.get_mut(index) else {
            return;
        };
        match mode {
            SplitMode::Flat => {
                let amount = Money::parse_minor_digits(raw);
                entry.amount = amount.minor();
                entry.amount_display = amount.format();
            }
            SplitMode::Percentage => {
                entry.amount = parse_points(raw);
                entry.amount_display.clear();
            }
        }
    }

    /// Binds an entry to a recipient and copies the recipient's
    /// liability flag.
    ///
    /// An unresolved id leaves `liable` untouched: the branch
    /// directory may still be loading, and the submit gate re-checks
    /// consistency anyway.
    pub fn bind_recipient(&mut self, index: usize, recipient_id: &str, recipients: &[Recipient]) {
        let Some(entry) = self.entries.get_mut(index) else {
            return;
        };
        entry.recipient_id = recipient_id.to_string();
        if let Some(recipient) = recipients.iter().find(|r| r.id == recipient_id) {
            entry.liable = recipient.liable;
        }
    }

    /// Sum of entry amounts under the current mode. Saturates instead
    /// of wrapping, so absurd keypad entries surface as a mismatch
    /// rather than a panic.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.entries
            .iter()
            .fold(0i64, |acc, entry| acc.saturating_add(entry.amount))
    }

    /// Checks that the set reconciles exactly with the target total:
    /// 100 for percentage mode, the cart's minor-unit amount for flat
    /// mode. Integer comparison, no tolerance.
    pub fn validate(&self, target: Money) -> Result<(), SplitError> {
        if self.entries.is_empty() {
            return Err(SplitError::Empty);
        }

        let actual = self.total();
        match self.mode {
            SplitMode::Percentage => {
                if actual == 100 {
                    Ok(())
                } else {
                    Err(SplitError::PercentageMismatch { actual })
                }
            }
            SplitMode::Flat => {
                if actual == target.minor() {
                    Ok(())
                } else {
                    Err(SplitError::FlatMismatch {
                        expected: target,
                        actual: Money::new(actual),
                    })
                }
            }
        }
    }
}

/// Percentage points from free-form text: digits only, everything
/// else discarded, empty or overlong input reads as zero.
fn parse_points(raw: &str) -> i64 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipients() -> Vec<Recipient> {
        vec![
            Recipient {
                id: "re_matriz".to_string(),
                nome: "Matriz".to_string(),
                liable: true,
            },
            Recipient {
                id: "re_parceiro".to_string(),
                nome: "Parceiro".to_string(),
                liable: false,
            },
        ]
    }

    fn set_with_amounts(mode: SplitMode, amounts: &[i64]) -> SplitSet {
        let mut set = SplitSet::new();
        set.set_mode(mode);
        for amount in amounts {
            set.add_entry().amount = *amount;
        }
        set
    }

    #[test]
    fn percentage_must_sum_to_exactly_100() {
        let set = set_with_amounts(SplitMode::Percentage, &[60, 40]);
        assert!(set.validate(Money::ZERO).is_ok());

        let set = set_with_amounts(SplitMode::Percentage, &[60, 30]);
        assert_eq!(
            set.validate(Money::ZERO),
            Err(SplitError::PercentageMismatch { actual: 90 })
        );
    }

    #[test]
    fn flat_must_match_the_cart_total() {
        let target = Money::new(10_000);

        let set = set_with_amounts(SplitMode::Flat, &[7_000, 3_000]);
        assert!(set.validate(target).is_ok());

        let set = set_with_amounts(SplitMode::Flat, &[7_000, 2_000]);
        let err = set.validate(target).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("R$ 100,00"), "message: {message}");
        assert!(message.contains("R$ 90,00"), "message: {message}");
    }

    #[test]
    fn empty_set_never_validates() {
        let set = SplitSet::new();
        assert_eq!(set.validate(Money::ZERO), Err(SplitError::Empty));
    }

    #[test]
    fn set_mode_resets_amounts_but_keeps_recipients() {
        let mut set = set_with_amounts(SplitMode::Percentage, &[60, 40]);
        set.bind_recipient(0, "re_matriz", &recipients());

        set.set_mode(SplitMode::Flat);
        assert!(set.entries.iter().all(|e| e.amount == 0));
        assert!(set.entries.iter().all(|e| e.mode == SplitMode::Flat));
        assert_eq!(set.entries[0].recipient_id, "re_matriz");
        assert!(set.entries[0].liable);
    }

    #[test]
    fn bind_recipient_copies_liability() {
        let mut set = SplitSet::new();
        set.add_entry();
        set.bind_recipient(0, "re_parceiro", &recipients());
        assert!(!set.entries[0].liable);

        set.bind_recipient(0, "re_matriz", &recipients());
        assert!(set.entries[0].liable);
    }

    #[test]
    fn bind_recipient_unknown_id_leaves_liable_alone() {
        let mut set = SplitSet::new();
        set.add_entry().liable = true;
        set.bind_recipient(0, "re_desconhecido", &recipients());
        assert!(set.entries[0].liable);
        assert_eq!(set.entries[0].recipient_id, "re_desconhecido");
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let set = set_with_amounts(SplitMode::Flat, &[i64::MAX, i64::MAX, 486]);
        assert_eq!(set.total(), i64::MAX);
        assert_eq!(
            set.validate(Money::new(10_000)),
            Err(SplitError::FlatMismatch {
                expected: Money::new(10_000),
                actual: Money::new(i64::MAX),
            })
        );
    }

    #[test]
    fn percentage_entry_amount_reads_digits_as_points() {
        let mut set = SplitSet::new();
        set.add_entry();
        set.set_entry_amount(0, "60%");
        assert_eq!(set.entries[0].amount, 60);
        assert!(set.entries[0].amount_display.is_empty());

        set.set_entry_amount(0, "x");
        assert_eq!(set.entries[0].amount, 0);
    }

    #[test]
    fn flat_entry_amount_mirrors_display_text() {
        let mut set = SplitSet::new();
        set.set_mode(SplitMode::Flat);
        set.add_entry();
        set.set_entry_amount(0, "486");
        assert_eq!(set.entries[0].amount, 486);
        assert_eq!(set.entries[0].amount_display, "4,86");
    }
}
