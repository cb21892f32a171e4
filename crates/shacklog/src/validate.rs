//! Entry field validators.
//!
//! Each entry field has a [`FieldKind`] that checks a complete submitted
//! value. The original keystroke-level filters become submission-time checks
//! here, which also lets the date and time kinds insist on real calendar
//! values instead of merely plausible digits.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

fn regex(cell: &'static OnceLock<Regex>, pattern: &'static str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("builtin validator pattern"))
}

static CALLSIGN_RE: OnceLock<Regex> = OnceLock::new();
static FREQ_RE: OnceLock<Regex> = OnceLock::new();
static POWER_RE: OnceLock<Regex> = OnceLock::new();
static RST_RE: OnceLock<Regex> = OnceLock::new();
static SIG_INFO_RE: OnceLock<Regex> = OnceLock::new();
static STATE_RE: OnceLock<Regex> = OnceLock::new();

/// The validator applied to an entry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Free text; double quotes and backslashes are rejected.
    #[default]
    Text,
    /// Letters, digits and `/` (portable and DX prefixes).
    Callsign,
    /// `YYYY-MM-DD`, `MM/DD/YY` or `MM/DD/YYYY`; must be a real date.
    Date,
    /// `HH:MM` or `HHMM`; must be a real time of day.
    Time,
    /// Kilohertz value: digits with at most one decimal point.
    Frequency,
    /// Transmit power: up to four digits.
    Power,
    /// RST report or FT8-style signed SNR (`+05`, `-12`).
    Rst,
    /// Special-interest-group info: letters, digits and dashes.
    SigInfo,
    /// Primary administrative subdivision: one to three letters or digits.
    State,
}

impl FieldKind {
    /// Validate a complete, non-empty field value.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message describing why the value was
    /// rejected.
    pub fn validate(self, value: &str) -> Result<(), String> {
        match self {
            Self::Text => {
                if value.contains('"') || value.contains('\\') {
                    Err("double quotes and backslashes are not allowed".to_string())
                } else {
                    Ok(())
                }
            }
            Self::Callsign => {
                let re = regex(&CALLSIGN_RE, r"^[a-zA-Z0-9/]+$");
                if re.is_match(value) {
                    Ok(())
                } else {
                    Err("callsigns may only contain letters, digits and '/'".to_string())
                }
            }
            Self::Date => parse_date(value).map(|_| ()),
            Self::Time => parse_time(value).map(|_| ()),
            Self::Frequency => {
                let re = regex(&FREQ_RE, r"^\d+\.?\d*$|^\d*\.\d+$");
                if value.len() > 10 {
                    Err("frequency is limited to 10 characters".to_string())
                } else if re.is_match(value) {
                    Ok(())
                } else {
                    Err("expected a kHz value like 14074 or 14074.5".to_string())
                }
            }
            Self::Power => {
                let re = regex(&POWER_RE, r"^\d{1,4}$");
                if re.is_match(value) {
                    Ok(())
                } else {
                    Err("expected up to four digits of watts".to_string())
                }
            }
            Self::Rst => {
                let re = regex(&RST_RE, r"^([1-5][1-9]{0,2}|[+-]\d{1,2})$");
                if re.is_match(value) {
                    Ok(())
                } else {
                    Err("expected an RST like 59 or 599, or a signed SNR like -10".to_string())
                }
            }
            Self::SigInfo => {
                let re = regex(&SIG_INFO_RE, r"^[a-zA-Z0-9-]+$");
                if re.is_match(value) {
                    Ok(())
                } else {
                    Err("may only contain letters, digits and dashes".to_string())
                }
            }
            Self::State => {
                let re = regex(&STATE_RE, r"^[a-zA-Z0-9]{1,3}$");
                if re.is_match(value) {
                    Ok(())
                } else {
                    Err("expected one to three letters or digits".to_string())
                }
            }
        }
    }
}

/// Parse an entered date in `YYYY-MM-DD`, `MM/DD/YYYY` or `MM/DD/YY` form.
///
/// # Errors
///
/// Returns a message when the value matches none of the accepted formats
/// or names an impossible calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    for fmt in ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Ok(date);
        }
    }
    Err("expected YYYY-MM-DD, MM/DD/YY or MM/DD/YYYY".to_string())
}

/// Parse an entered time in `HH:MM`, `HHMM`, `HH:MM:SS` or `HHMMSS` form.
///
/// # Errors
///
/// Returns a message when the value matches none of the accepted formats
/// or names an impossible time of day.
pub fn parse_time(value: &str) -> Result<NaiveTime, String> {
    for fmt in ["%H:%M", "%H%M", "%H:%M:%S", "%H%M%S"] {
        if let Ok(time) = NaiveTime::parse_from_str(value, fmt) {
            return Ok(time);
        }
    }
    Err("expected HH:MM or HHMM".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callsign() {
        assert!(FieldKind::Callsign.validate("W1AW").is_ok());
        assert!(FieldKind::Callsign.validate("EA8/AB3GY").is_ok());
        assert!(FieldKind::Callsign.validate("w1aw").is_ok());
        assert!(FieldKind::Callsign.validate("W1 AW").is_err());
        assert!(FieldKind::Callsign.validate("W1AW!").is_err());
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(
            parse_date("2023-07-04").unwrap(),
            NaiveDate::from_ymd_opt(2023, 7, 4).unwrap()
        );
        assert_eq!(
            parse_date("07/04/2023").unwrap(),
            NaiveDate::from_ymd_opt(2023, 7, 4).unwrap()
        );
        assert_eq!(
            parse_date("07/04/23").unwrap(),
            NaiveDate::from_ymd_opt(2023, 7, 4).unwrap()
        );
    }

    #[test]
    fn test_date_rejects_impossible() {
        // The original's keystroke filter allowed 99/99/9999; submission
        // validation does not.
        assert!(parse_date("99/99/9999").is_err());
        assert!(parse_date("2023-02-30").is_err());
        assert!(parse_date("20230704").is_err());
    }

    #[test]
    fn test_time_formats() {
        let t = NaiveTime::from_hms_opt(13, 45, 0).unwrap();
        assert_eq!(parse_time("13:45").unwrap(), t);
        assert_eq!(parse_time("1345").unwrap(), t);
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("13:60").is_err());
        assert!(parse_time("noon").is_err());
    }

    #[test]
    fn test_frequency() {
        assert!(FieldKind::Frequency.validate("14074").is_ok());
        assert!(FieldKind::Frequency.validate("14074.5").is_ok());
        assert!(FieldKind::Frequency.validate(".5").is_ok());
        assert!(FieldKind::Frequency.validate("14.074.5").is_err());
        assert!(FieldKind::Frequency.validate("14074 kHz").is_err());
        // 10-character limit
        assert!(FieldKind::Frequency.validate("1234567890.").is_err());
    }

    #[test]
    fn test_power() {
        assert!(FieldKind::Power.validate("5").is_ok());
        assert!(FieldKind::Power.validate("1500").is_ok());
        assert!(FieldKind::Power.validate("15000").is_err());
        assert!(FieldKind::Power.validate("5W").is_err());
    }

    #[test]
    fn test_rst() {
        assert!(FieldKind::Rst.validate("5").is_ok());
        assert!(FieldKind::Rst.validate("59").is_ok());
        assert!(FieldKind::Rst.validate("599").is_ok());
        assert!(FieldKind::Rst.validate("-10").is_ok());
        assert!(FieldKind::Rst.validate("+05").is_ok());
        assert!(FieldKind::Rst.validate("699").is_err());
        assert!(FieldKind::Rst.validate("50").is_err());
        assert!(FieldKind::Rst.validate("+").is_err());
    }

    #[test]
    fn test_sig_info() {
        assert!(FieldKind::SigInfo.validate("US-1211").is_ok());
        assert!(FieldKind::SigInfo.validate("K0001").is_ok());
        assert!(FieldKind::SigInfo.validate("US 1211").is_err());
    }

    #[test]
    fn test_state() {
        assert!(FieldKind::State.validate("PA").is_ok());
        assert!(FieldKind::State.validate("759").is_ok());
        assert!(FieldKind::State.validate("ABCD").is_err());
        assert!(FieldKind::State.validate("P-A").is_err());
    }

    #[test]
    fn test_text() {
        assert!(FieldKind::Text.validate("Worked on the long path").is_ok());
        assert!(FieldKind::Text.validate(r#"say "hi""#).is_err());
        assert!(FieldKind::Text.validate(r"back\slash").is_err());
    }

    #[test]
    fn test_kind_deserializes_kebab_case() {
        let kind: FieldKind = serde_json::from_str("\"sig-info\"").unwrap();
        assert_eq!(kind, FieldKind::SigInfo);
        let kind: FieldKind = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(kind, FieldKind::Text);
    }
}
