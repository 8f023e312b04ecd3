//! Amounts are carried around as integer lamports.  Display units (XRS) only appear at the edges:
//! when parsing command line arguments and when printing results.

use std::fmt;

use num_format::{Locale, ToFormattedString, parsing::ParseFormatted};

/// Number of lamports in one XRS.
pub const LAMPORTS_PER_XRS: u64 = 1_000_000_000;

/// Number of fractional digits an XRS amount can have.
const XRS_DECIMALS: usize = 9;

/// Transfer fee is 0.1% of the transferred amount.
const FEE_DIVISOR: u64 = 1_000;

/// Fee for transferring `lamports`.
///
/// Rounded up, so that `balance < lamports + fee_for(lamports)` holds exactly when `balance` is
/// below `lamports * 1.001`.
pub fn fee_for(lamports: u64) -> u64 {
    lamports.div_ceil(FEE_DIVISOR)
}

/// Parses a positive XRS amount, such as `5`, `0.005` or `1,000.25`, into lamports.
pub fn xrs_amount_parser(value: &str) -> Result<u64, String> {
    let value = value.trim();
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (value, None),
    };

    if !is_grouped_integer(whole) {
        return Err(format!("`{value}` is not a valid XRS amount"));
    }
    let whole = u64_nice_parser(whole)?;

    let fraction = match fraction {
        None => 0,
        Some(digits) => {
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(format!("`{value}` is not a valid XRS amount"));
            }
            if digits.len() > XRS_DECIMALS {
                return Err(format!(
                    "`{value}` has more than {XRS_DECIMALS} fractional digits, XRS can not be \
                     split that finely"
                ));
            }
            // Right-pad to nine digits: "005" is 5_000_000 lamports.
            format!("{digits:0<width$}", width = XRS_DECIMALS)
                .parse::<u64>()
                .map_err(|err| err.to_string())?
        }
    };

    let lamports = whole
        .checked_mul(LAMPORTS_PER_XRS)
        .and_then(|lamports| lamports.checked_add(fraction))
        .ok_or_else(|| format!("`{value}` XRS is too large"))?;

    if lamports == 0 {
        return Err("Amount must be positive".to_owned());
    }

    Ok(lamports)
}

/// Digits, optionally split into thousands by `,`: `1000` or `1,000`, but not `1,5` or `10,00`.
///
/// `parse_formatted()` skips separators wherever they are, so their placement is checked here.
fn is_grouped_integer(value: &str) -> bool {
    let is_digits = |group: &str| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit());

    let mut groups = value.split(',');
    let first = groups.next().unwrap_or_default();
    if !value.contains(',') {
        return is_digits(first);
    }

    is_digits(first) && first.len() <= 3 && groups.all(|group| group.len() == 3 && is_digits(group))
}

fn u64_nice_parser(value: &str) -> Result<u64, String> {
    // `SystemLocale` fails to parse a `u64` if instantiated on a system with "C.UTF-8" environment
    // locale.
    let locale = Locale::en;
    value
        .parse_formatted(&locale)
        .map_err(|err| err.to_string())
}

fn u64_nice_printer(value: u64) -> String {
    // See `u64_nice_parser` for the reason locale here is hardcoded.
    let locale = Locale::en;
    value.to_formatted_string(&locale)
}

/// A lamport amount, displayed in XRS: `5 XRS`, `0.005 XRS`, `1,000 XRS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Xrs(pub u64);

impl fmt::Display for Xrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(lamports) = *self;
        let whole = u64_nice_printer(lamports / LAMPORTS_PER_XRS);
        let fraction = lamports % LAMPORTS_PER_XRS;

        if fraction == 0 {
            return write!(f, "{whole} XRS");
        }

        let fraction = format!("{fraction:0>width$}", width = XRS_DECIMALS);
        write!(f, "{whole}.{} XRS", fraction.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!(xrs_amount_parser("5"), Ok(5_000_000_000));
        assert_eq!(xrs_amount_parser("0.005"), Ok(5_000_000));
        assert_eq!(xrs_amount_parser("1,000.25"), Ok(1_000_250_000_000));
        assert_eq!(xrs_amount_parser("0.000000001"), Ok(1));
        assert_eq!(xrs_amount_parser(" 2.5 "), Ok(2_500_000_000));
        assert_eq!(xrs_amount_parser("1,234,567"), Ok(1_234_567_000_000_000));
        assert_eq!(xrs_amount_parser("12,000.5"), Ok(12_000_500_000_000));
    }

    #[test]
    fn rejects_bad_amounts() {
        for value in [
            "", "0", "0.0", "-5", "+5", "five", "1.", ".5", "1.2.3", "1e9", "0.0000000001",
            "18446744074",
            // `,` only separates thousands.
            "1,5", "1,0,0", ",5", ",,5", "1,,000", "1,000,", "1000,000", "1,0000", "1,5.5",
        ] {
            assert!(
                xrs_amount_parser(value).is_err(),
                "`{value}` should have been rejected"
            );
        }
    }

    #[test]
    fn fee_is_a_tenth_of_a_percent() {
        assert_eq!(fee_for(5_000_000_000), 5_000_000);
        assert_eq!(fee_for(1_000_000_000_000), 1_000_000_000);
        assert_eq!(fee_for(1_000), 1);
        assert_eq!(fee_for(0), 0);
    }

    #[test]
    fn fee_rounds_up_below_one_lamport() {
        assert_eq!(fee_for(1), 1);
        assert_eq!(fee_for(1_001), 2);
    }

    #[test]
    fn fee_matches_exact_threshold() {
        // `balance < lamports * 1.001`, evaluated over the rationals.
        for lamports in [1u64, 999, 1_000, 1_001, 123_456_789, 5_000_000_000] {
            let required = lamports + fee_for(lamports);
            for balance in required.saturating_sub(3)..required + 3 {
                let insufficient = balance < required;
                let exact = u128::from(balance) * 1_000 < u128::from(lamports) * 1_001;
                assert_eq!(insufficient, exact, "lamports {lamports}, balance {balance}");
            }
        }
    }

    #[test]
    fn displays_in_xrs() {
        assert_eq!(Xrs(5_000_000_000).to_string(), "5 XRS");
        assert_eq!(Xrs(5_000_000).to_string(), "0.005 XRS");
        assert_eq!(Xrs(1_000_000_000_000).to_string(), "1,000 XRS");
        assert_eq!(Xrs(1).to_string(), "0.000000001 XRS");
        assert_eq!(Xrs(0).to_string(), "0 XRS");
        assert_eq!(Xrs(12_340_000_000).to_string(), "12.34 XRS");
    }
}
