//! Core contact record types for shacklog.
//!
//! This module defines the data structure for a single logged contact (QSO).
//! A record is built once from validated form input and never mutated after
//! creation; it has no identity beyond its position in the log file.

use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// ADIF names of the standard entry fields, in record output order.
pub const STANDARD_FIELDS: &[&str] = &[
    "CALL", "QSO_DATE", "TIME_ON", "BAND", "MODE", "FREQ", "RST_SENT", "RST_RCVD", "TX_PWR",
    "COMMENT",
];

/// A single user-defined ADIF field and its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdifField {
    /// Uppercase ADIF field name.
    pub name: String,
    /// The field value, exactly as it will appear in the record.
    pub value: String,
}

impl AdifField {
    /// Create a field, normalizing the name to uppercase.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_uppercase(),
            value: value.into(),
        }
    }
}

/// A single logged contact.
///
/// Dates and times are UTC, per logging convention. The frequency is kept in
/// kilohertz as entered; ADIF serialization converts it to megahertz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Qso {
    /// The worked station's callsign, uppercase.
    pub call: String,

    /// UTC date of the contact.
    pub qso_date: NaiveDate,

    /// UTC time the contact started.
    pub time_on: NaiveTime,

    /// Operating mode (SSB, CW, FT8, ...).
    pub mode: String,

    /// ADIF band designator (e.g. `20m`), usually derived from the frequency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<String>,

    /// Frequency in kilohertz, as entered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freq_khz: Option<f64>,

    /// Signal report sent to the other station.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rst_sent: Option<String>,

    /// Signal report received from the other station.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rst_rcvd: Option<String>,

    /// Transmit power in watts, digits only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_pwr: Option<String>,

    /// Free-text comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// User-defined fields from the configuration, in configured order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<AdifField>,
}

impl Qso {
    /// Create a minimal record for the given station and mode, dated now (UTC).
    #[must_use]
    pub fn new(call: impl Into<String>, mode: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            call: call.into().to_uppercase(),
            qso_date: now.date_naive(),
            time_on: now.time(),
            mode: mode.into().to_uppercase(),
            band: None,
            freq_khz: None,
            rst_sent: None,
            rst_rcvd: None,
            tx_pwr: None,
            comment: None,
            extra: Vec::new(),
        }
    }

    /// Check whether the given name is one of the standard entry fields.
    #[must_use]
    pub fn is_standard_field(name: &str) -> bool {
        STANDARD_FIELDS
            .iter()
            .any(|f| f.eq_ignore_ascii_case(name))
    }
}
