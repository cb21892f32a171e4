//! ADIF serialization.
//!
//! Renders [`Qso`] records as single-line ADIF (`<FIELD:len>value`) records
//! and produces the file header written when a new log is created. Field
//! lengths are byte lengths, per the ADIF specification.

use chrono::{NaiveDate, NaiveTime};

use crate::qso::Qso;

/// ADIF specification version written to the log header.
pub const ADIF_VERSION: &str = "3.1.4";

/// End-of-record tag.
pub const EOR: &str = "<EOR>";

/// Amateur band allocations, as (low kHz, high kHz, ADIF band designator).
const BANDS: &[(f64, f64, &str)] = &[
    (1_800.0, 2_000.0, "160m"),
    (3_500.0, 4_000.0, "80m"),
    (5_060.0, 5_450.0, "60m"),
    (7_000.0, 7_300.0, "40m"),
    (10_100.0, 10_150.0, "30m"),
    (14_000.0, 14_350.0, "20m"),
    (18_068.0, 18_168.0, "17m"),
    (21_000.0, 21_450.0, "15m"),
    (24_890.0, 24_990.0, "12m"),
    (28_000.0, 29_700.0, "10m"),
    (50_000.0, 54_000.0, "6m"),
    (144_000.0, 148_000.0, "2m"),
    (222_000.0, 225_000.0, "1.25m"),
    (420_000.0, 450_000.0, "70cm"),
    (902_000.0, 928_000.0, "33cm"),
    (1_240_000.0, 1_300_000.0, "23cm"),
];

/// Map a frequency in kilohertz to its ADIF band designator.
///
/// Returns `None` for frequencies outside the amateur allocations.
#[must_use]
pub fn band_for_khz(khz: f64) -> Option<&'static str> {
    BANDS
        .iter()
        .find(|(low, high, _)| khz >= *low && khz <= *high)
        .map(|(_, _, name)| *name)
}

/// Check ADIF field-name syntax: a letter followed by letters, digits
/// or underscores.
#[must_use]
pub fn is_valid_field_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Append one `<NAME:len>value` field to `out`.
///
/// The length is the value's length in bytes, not characters.
pub fn write_field(out: &mut String, name: &str, value: &str) {
    out.push('<');
    out.push_str(&name.to_uppercase());
    out.push(':');
    out.push_str(&value.len().to_string());
    out.push('>');
    out.push_str(value);
}

/// Format a date in ADIF `YYYYMMDD` form.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Format a time in ADIF `HHMM` form.
#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H%M").to_string()
}

/// Format a kilohertz frequency as decimal megahertz, trailing zeros trimmed.
///
/// ADIF expects `FREQ` in megahertz; entry is in kilohertz.
#[must_use]
pub fn format_freq_mhz(khz: f64) -> String {
    let s = format!("{:.6}", khz / 1000.0);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Render a complete single-line ADIF record for one contact.
///
/// Fields appear in a stable order, empty fields are omitted, and the line
/// is terminated with `<EOR>`.
#[must_use]
pub fn record(qso: &Qso) -> String {
    let mut out = String::new();
    let mut push = |name: &str, value: &str| {
        if !value.is_empty() {
            write_field(&mut out, name, value);
            out.push(' ');
        }
    };

    push("CALL", &qso.call);
    push("QSO_DATE", &format_date(qso.qso_date));
    push("TIME_ON", &format_time(qso.time_on));
    if let Some(band) = &qso.band {
        push("BAND", band);
    }
    push("MODE", &qso.mode);
    if let Some(khz) = qso.freq_khz {
        push("FREQ", &format_freq_mhz(khz));
    }
    if let Some(rst) = &qso.rst_sent {
        push("RST_SENT", rst);
    }
    if let Some(rst) = &qso.rst_rcvd {
        push("RST_RCVD", rst);
    }
    if let Some(pwr) = &qso.tx_pwr {
        push("TX_PWR", pwr);
    }
    if let Some(comment) = &qso.comment {
        push("COMMENT", comment);
    }
    for field in &qso.extra {
        push(&field.name, &field.value);
    }

    out.push_str(EOR);
    out
}

/// Render the ADIF header written once when a log file is created.
///
/// Any text before the first `<` is header text, so the first line is a
/// human-readable banner.
#[must_use]
pub fn header() -> String {
    let program = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let mut out = format!("ADIF log file created by {program}\n");
    write_field(&mut out, "ADIF_VER", ADIF_VERSION);
    out.push('\n');
    write_field(&mut out, "PROGRAMID", program);
    out.push('\n');
    write_field(&mut out, "PROGRAMVERSION", version);
    out.push('\n');
    out.push_str("<EOH>\n");
    out
}
