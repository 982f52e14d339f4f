use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::FormatError;

// Display math only has to agree with the exchange front-end, which works
// in IEEE doubles
pub type CurrencyFloat = f64;

/// Rendered in place of amounts too small to display meaningfully.
pub const DUST_SENTINEL: &str = "0*";

/// Display scale for currency values. One base unit is 1000 milli units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    Base,
    Milli,
}

impl FromStr for Denomination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "base" => Ok(Denomination::Base),
            "milli" => Ok(Denomination::Milli),
            other => Err(format!("unknown denomination '{}'", other)),
        }
    }
}

/// Display fields with a configured decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BetField {
    Odds,
    Stake,
    Profit,
    Liability,
    Exposure,
    Transaction,
    AvgStake,
    AvgProfitLiability,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Accuracy {
    Round,
    Truncate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatOptions {
    pub accuracy: Accuracy,
    pub skip_dust_check: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            accuracy: Accuracy::Round,
            skip_dust_check: false,
        }
    }
}

/// Decimal places per (field, denomination) pair. Pairs with no entry are
/// not formatted at all; the caller gets the raw value back.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionTable {
    places: HashMap<(BetField, Denomination), u32>,
}

const BASE_PLACES: [(BetField, u32); 8] = [
    (BetField::Odds, 2),
    (BetField::Stake, 3), // minimum stake = 0.001 base units
    (BetField::Profit, 5),
    (BetField::Liability, 5),
    (BetField::Exposure, 5),
    (BetField::Transaction, 3),
    (BetField::AvgStake, 3),
    (BetField::AvgProfitLiability, 5),
];

impl Default for PrecisionTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for &(field, base) in BASE_PLACES.iter() {
            table.set(field, Denomination::Base, base);
            // Odds read the same under either denomination
            let milli = if field == BetField::Odds {
                base
            } else {
                base.saturating_sub(3)
            };
            table.set(field, Denomination::Milli, milli);
        }
        table
    }
}

impl PrecisionTable {
    /// A table with no entries; every lookup misses and formatting passes
    /// the amount through.
    pub fn empty() -> Self {
        Self {
            places: HashMap::new(),
        }
    }

    pub fn set(&mut self, field: BetField, denomination: Denomination, places: u32) {
        self.places.insert((field, denomination), places);
    }

    pub fn places(&self, field: BetField, denomination: Denomination) -> Option<u32> {
        self.places.get(&(field, denomination)).copied()
    }
}

/// Minimum meaningful magnitudes. Amounts between zero and the relevant
/// minimum render as the dust sentinel instead of implying false precision.
#[derive(Debug, Clone, PartialEq)]
pub struct DustPolicy {
    /// Smallest non-dust magnitude under base-unit display
    pub base_min: CurrencyFloat,
    /// Smallest non-dust magnitude under milli-unit display, in milli units
    pub milli_min: CurrencyFloat,
    /// Floor for amounts already quoted with exactly three fractional
    /// digits (minimal-denomination exchange amounts)
    pub exchange_min: CurrencyFloat,
    /// Fractional remainder a milli stake may leave; milli stakes are
    /// otherwise restricted to whole numbers
    pub milli_stake_remainder: CurrencyFloat,
}

impl Default for DustPolicy {
    fn default() -> Self {
        Self {
            base_min: 1e-5,
            milli_min: 0.01,
            exchange_min: 0.001,
            milli_stake_remainder: 0.0,
        }
    }
}

/// Currency glyphs, one per denomination.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolSet {
    pub base: String,
    pub milli: String,
}

impl Default for SymbolSet {
    fn default() -> Self {
        Self {
            base: "\u{0243}".to_string(),
            milli: "m\u{0243}".to_string(),
        }
    }
}

impl SymbolSet {
    pub fn get(&self, denomination: Denomination) -> &str {
        match denomination {
            Denomination::Base => &self.base,
            Denomination::Milli => &self.milli,
        }
    }
}

/// Stake amounts below the floor are quoted at the minimum network fee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransactionFeeFloor {
    /// Floor under base-unit display, in base units
    pub base: CurrencyFloat,
    /// Floor under milli-unit display, in milli units
    pub milli: CurrencyFloat,
}

impl Default for TransactionFeeFloor {
    fn default() -> Self {
        Self {
            base: 0.001,
            milli: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatterConfig {
    pub precision: PrecisionTable,
    pub dust: DustPolicy,
    pub symbols: SymbolSet,
    pub fee_floor: TransactionFeeFloor,
}

/// Converts numeric amounts into display strings under the configured
/// precision, dust, symbol, and fee-floor rules. Built once at startup;
/// every operation is a pure read.
#[derive(Debug, Clone, Default)]
pub struct CurrencyFormatter {
    config: FormatterConfig,
}

impl CurrencyFormatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Strict variant of `format`: reports why an amount cannot be
    /// formatted instead of passing it through.
    pub fn try_format(
        &self,
        amount: CurrencyFloat,
        field: BetField,
        denomination: Denomination,
        options: FormatOptions,
    ) -> Result<String, FormatError> {
        // Zero is never scaled and never dust
        if amount == 0.0 {
            return Ok("0".to_string());
        }
        if !amount.is_finite() {
            return Err(FormatError::NonFinite);
        }
        let places = self
            .config
            .precision
            .places(field, denomination)
            .ok_or(FormatError::UnknownPrecision {
                field,
                denomination,
            })?;
        if !options.skip_dust_check && self.is_dust(amount, field, denomination) {
            return Ok(DUST_SENTINEL.to_string());
        }
        let display_amount = match denomination {
            // Odds are a ratio, not an amount; no scaling
            _ if field == BetField::Odds => amount,
            Denomination::Base => amount,
            Denomination::Milli => amount * 1000.0,
        };
        Ok(match options.accuracy {
            Accuracy::Round => to_fixed(display_amount, places as usize),
            Accuracy::Truncate => to_fixed_truncated(display_amount, places as usize),
        })
    }

    /// Format an amount for display. Anomalous input degrades to the raw
    /// value rendered as a string, so display code never fails.
    pub fn format_with(
        &self,
        amount: CurrencyFloat,
        field: BetField,
        denomination: Denomination,
        options: FormatOptions,
    ) -> String {
        match self.try_format(amount, field, denomination, options) {
            Ok(formatted) => formatted,
            Err(_) => amount.to_string(),
        }
    }

    pub fn format(
        &self,
        amount: CurrencyFloat,
        field: BetField,
        denomination: Denomination,
    ) -> String {
        self.format_with(amount, field, denomination, FormatOptions::default())
    }

    /// Whether an amount is too small to display meaningfully. Zero is
    /// never dust.
    pub fn is_dust(
        &self,
        amount: CurrencyFloat,
        field: BetField,
        denomination: Denomination,
    ) -> bool {
        if amount == 0.0 || !amount.is_finite() {
            return false;
        }
        let magnitude = amount.abs();
        let dust = &self.config.dust;

        // Milli stakes are only placeable in whole milli units
        if field == BetField::Stake && denomination == Denomination::Milli {
            let shifted = magnitude * 1000.0 - dust.milli_stake_remainder;
            // Compare against the nearest whole step; 0.003 * 1000 is not
            // exactly 3 in binary
            return (shifted - shifted.round()).abs() > 1e-6;
        }

        // Amounts already quoted with exactly three fractional digits are
        // minimal-denomination exchange amounts with their own floor
        if fractional_digits(magnitude) == Some(3) {
            return magnitude < dust.exchange_min;
        }

        match denomination {
            Denomination::Base => magnitude < dust.base_min,
            Denomination::Milli => magnitude * 1000.0 < dust.milli_min,
        }
    }

    /// Sign, then the denomination glyph, then the formatted magnitude.
    pub fn with_symbol(
        &self,
        amount: CurrencyFloat,
        field: BetField,
        denomination: Denomination,
        space_after_symbol: bool,
    ) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        let space = if space_after_symbol { " " } else { "" };
        let magnitude = self.format(amount.abs(), field, denomination);
        format!(
            "{}{}{}{}",
            sign,
            self.config.symbols.get(denomination),
            space,
            magnitude
        )
    }

    /// Stakes below the configured floor are quoted at the minimum
    /// transaction fee instead of their true magnitude.
    pub fn transaction_fee_floor(
        &self,
        field: BetField,
        amount: CurrencyFloat,
        denomination: Denomination,
    ) -> String {
        if field == BetField::Stake && amount.is_finite() {
            let (display, floor) = match denomination {
                Denomination::Base => (amount, self.config.fee_floor.base),
                Denomination::Milli => (amount * 1000.0, self.config.fee_floor.milli),
            };
            if display < floor {
                let floor_base = match denomination {
                    Denomination::Base => floor,
                    Denomination::Milli => floor / 1000.0,
                };
                let options = FormatOptions {
                    accuracy: Accuracy::Round,
                    skip_dust_check: true,
                };
                return self.format_with(floor_base, field, denomination, options);
            }
        }
        self.format(amount, field, denomination)
    }
}

/// Number of digits after the decimal point in the shortest decimal
/// rendering, or `None` for whole numbers.
fn fractional_digits(value: CurrencyFloat) -> Option<usize> {
    let rendered = value.to_string();
    rendered.split_once('.').map(|(_, frac)| frac.len())
}

/// Render with one guard digit, then round the decimal string itself.
/// Rounding the rendered text keeps binary representation error from
/// flipping the last retained digit.
pub fn to_fixed(value: CurrencyFloat, places: usize) -> String {
    let extended = format!("{:.*}", places + 1, value);
    round_rendered(&extended, places)
}

/// Like `to_fixed`, but the guard digit is dropped without rounding.
pub fn to_fixed_truncated(value: CurrencyFloat, places: usize) -> String {
    let extended = format!("{:.*}", places + 1, value);
    // With no places kept, the decimal point goes too
    let cut = extended.len() - if places == 0 { 2 } else { 1 };
    extended[..cut].to_string()
}

fn round_rendered(extended: &str, places: usize) -> String {
    let (sign, digits) = match extended.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", extended),
    };
    let bytes = digits.as_bytes();
    let guard = bytes[bytes.len() - 1] - b'0';
    let mut kept: Vec<u8> = bytes[..bytes.len() - 1].to_vec();
    if places == 0 {
        kept.pop(); // trailing '.'
    }
    if guard >= 5 {
        // Carry the round-up through the kept digits
        let mut i = kept.len();
        loop {
            if i == 0 {
                kept.insert(0, b'1');
                break;
            }
            i -= 1;
            if kept[i] == b'.' {
                continue;
            }
            if kept[i] == b'9' {
                kept[i] = b'0';
            } else {
                kept[i] += 1;
                break;
            }
        }
    }
    let mut out = String::with_capacity(sign.len() + kept.len());
    out.push_str(sign);
    out.extend(kept.into_iter().map(char::from));
    out
}
