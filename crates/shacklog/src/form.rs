//! The QSO entry form.
//!
//! A [`Form`] holds the field definitions (standard fields plus configured
//! custom fields) and the operator's current input. Values are validated as
//! they are set and again at submission; a failed submission reports every
//! field problem and leaves the form intact, so a typo never costs the
//! operator the rest of the entry.
//!
//! [`run_session`] drives the form interactively over any `BufRead`/`Write`
//! pair, one prompt per field, looping until end of input or an empty
//! callsign.

use std::io::{BufRead, Write};

use chrono::Utc;
use tracing::{debug, info};

use crate::adif;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logfile::LogFile;
use crate::qso::{AdifField, Qso};
use crate::validate::{parse_date, parse_time, FieldKind};

/// Definition of one entry field.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// ADIF field name, uppercase.
    pub name: String,
    /// Label shown when prompting.
    pub label: String,
    /// Validator applied to entered values.
    pub kind: FieldKind,
    /// Whether submission requires a value.
    pub required: bool,
    /// Uppercase entered values.
    pub uppercase: bool,
    /// Restrict values to this list (the original's read-only combo boxes).
    pub choices: Option<Vec<String>>,
}

/// The entry form: field definitions plus current values.
#[derive(Debug)]
pub struct Form {
    defs: Vec<FieldDef>,
    values: Vec<String>,
}

impl Form {
    /// Build the form from configuration: the standard fields followed by
    /// the configured custom fields.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let text = FieldKind::Text;
        let mut defs = vec![
            FieldDef {
                name: "CALL".into(),
                label: "Callsign".into(),
                kind: FieldKind::Callsign,
                required: true,
                uppercase: true,
                choices: None,
            },
            FieldDef {
                name: "QSO_DATE".into(),
                label: "Date".into(),
                kind: FieldKind::Date,
                required: true,
                uppercase: false,
                choices: None,
            },
            FieldDef {
                name: "TIME_ON".into(),
                label: "Time".into(),
                kind: FieldKind::Time,
                required: true,
                uppercase: false,
                choices: None,
            },
            FieldDef {
                name: "FREQ".into(),
                label: "Frequency (kHz)".into(),
                kind: FieldKind::Frequency,
                required: false,
                uppercase: false,
                choices: None,
            },
            FieldDef {
                name: "BAND".into(),
                label: "Band".into(),
                kind: text,
                required: false,
                uppercase: false,
                choices: Some(config.entry.bands.clone()),
            },
            FieldDef {
                name: "MODE".into(),
                label: "Mode".into(),
                kind: text,
                required: true,
                uppercase: false,
                choices: Some(config.entry.modes.clone()),
            },
            FieldDef {
                name: "RST_SENT".into(),
                label: "RST Sent".into(),
                kind: FieldKind::Rst,
                required: false,
                uppercase: false,
                choices: None,
            },
            FieldDef {
                name: "RST_RCVD".into(),
                label: "RST Rcvd".into(),
                kind: FieldKind::Rst,
                required: false,
                uppercase: false,
                choices: None,
            },
            FieldDef {
                name: "TX_PWR".into(),
                label: "Power (W)".into(),
                kind: FieldKind::Power,
                required: false,
                uppercase: false,
                choices: None,
            },
            FieldDef {
                name: "COMMENT".into(),
                label: "Comment".into(),
                kind: text,
                required: false,
                uppercase: false,
                choices: None,
            },
        ];

        for custom in &config.custom_fields {
            defs.push(FieldDef {
                name: custom.field.to_uppercase(),
                label: custom.label().to_string(),
                kind: custom.kind,
                required: false,
                uppercase: custom.uppercase,
                choices: None,
            });
        }

        let values = vec![String::new(); defs.len()];
        Self { defs, values }
    }

    /// The field definitions, in prompt order.
    #[must_use]
    pub fn defs(&self) -> &[FieldDef] {
        &self.defs
    }

    fn index(&self, name: &str) -> Option<usize> {
        self.defs.iter().position(|d| d.name.eq_ignore_ascii_case(name))
    }

    /// Get the current value of a field; `None` for unknown fields.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.index(name).map(|i| self.values[i].as_str())
    }

    /// Set a field from operator input.
    ///
    /// The value is trimmed; an empty value clears the field. Setting a
    /// valid frequency derives the band, and an out-of-band frequency
    /// clears it. Invalid values leave the stored value unchanged.
    ///
    /// # Errors
    ///
    /// Returns a validation error for unknown fields, values the field's
    /// validator rejects, or values outside the field's choice list.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let i = self
            .index(name)
            .ok_or_else(|| Error::unknown_field(name))?;
        let def = &self.defs[i];

        let mut value = value.trim().to_string();
        if value.is_empty() {
            self.values[i].clear();
            return Ok(());
        }
        if def.uppercase {
            value = value.to_uppercase();
        }

        def.kind
            .validate(&value)
            .map_err(|message| Error::invalid_field(&def.name, message))?;

        // Read-only combo semantics: the value must be one of the choices,
        // and the configured spelling wins.
        if let Some(choices) = &def.choices {
            match choices.iter().find(|c| c.eq_ignore_ascii_case(&value)) {
                Some(canonical) => value = canonical.clone(),
                None => {
                    return Err(Error::invalid_field(
                        &def.name,
                        format!("must be one of: {}", choices.join(", ")),
                    ));
                }
            }
        }

        let name = self.defs[i].name.clone();
        self.values[i] = value;

        if name == "FREQ" {
            self.derive_band();
        }
        Ok(())
    }

    /// Derive the band field from the current frequency, clearing it when
    /// the frequency is outside every amateur allocation.
    fn derive_band(&mut self) {
        let Some(freq) = self.value("FREQ").filter(|v| !v.is_empty()) else {
            return;
        };
        let Ok(khz) = freq.parse::<f64>() else {
            return;
        };
        let band = adif::band_for_khz(khz);
        if let Some(i) = self.index("BAND") {
            match band {
                Some(b) => {
                    debug!("Derived band {b} from {khz} kHz");
                    self.values[i] = b.to_string();
                }
                None => self.values[i].clear(),
            }
        }
    }

    /// Clear all field values.
    pub fn clear(&mut self) {
        for value in &mut self.values {
            value.clear();
        }
    }

    /// Set the date and time fields from the current UTC clock.
    pub fn fill_now(&mut self) {
        let now = Utc::now();
        if let Some(i) = self.index("QSO_DATE") {
            self.values[i] = now.format("%Y-%m-%d").to_string();
        }
        if let Some(i) = self.index("TIME_ON") {
            self.values[i] = now.format("%H:%M").to_string();
        }
    }

    /// Validate the whole form and build the contact record.
    ///
    /// # Errors
    ///
    /// Returns every field problem at once: missing required fields and
    /// values that fail validation. The form is left untouched either way.
    pub fn submit(&self) -> std::result::Result<Qso, Vec<Error>> {
        let mut errors = Vec::new();

        for (def, value) in self.defs.iter().zip(&self.values) {
            if value.is_empty() {
                if def.required {
                    errors.push(Error::missing_field(&def.name));
                }
            } else if let Err(message) = def.kind.validate(value) {
                errors.push(Error::invalid_field(&def.name, message));
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let get = |name: &str| -> Option<String> {
            self.value(name)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string)
        };

        // Unwraps cannot fire: required fields were checked and values
        // were validated above.
        let qso_date = parse_date(&get("QSO_DATE").unwrap_or_default())
            .map_err(|m| vec![Error::invalid_field("QSO_DATE", m)])?;
        let time_on = parse_time(&get("TIME_ON").unwrap_or_default())
            .map_err(|m| vec![Error::invalid_field("TIME_ON", m)])?;
        let freq_khz = match get("FREQ") {
            Some(v) => Some(
                v.parse::<f64>()
                    .map_err(|e| vec![Error::invalid_field("FREQ", e.to_string())])?,
            ),
            None => None,
        };

        let extra = self
            .defs
            .iter()
            .zip(&self.values)
            .filter(|(def, value)| !Qso::is_standard_field(&def.name) && !value.is_empty())
            .map(|(def, value)| AdifField::new(&def.name, value.clone()))
            .collect();

        Ok(Qso {
            call: get("CALL").unwrap_or_default(),
            qso_date,
            time_on,
            mode: get("MODE").unwrap_or_default(),
            band: get("BAND"),
            freq_khz,
            rst_sent: get("RST_SENT"),
            rst_rcvd: get("RST_RCVD"),
            tx_pwr: get("TX_PWR"),
            comment: get("COMMENT"),
            extra,
        })
    }
}

/// Run an interactive entry session.
///
/// Prompts for each field in turn, re-prompting on invalid input, then
/// shows the rendered record and appends it to the log. The session ends
/// at end of input, or when the callsign prompt is answered with an empty
/// line while the form holds no callsign. Returns the number of contacts
/// logged.
///
/// # Errors
///
/// Returns an error only for I/O failures; validation problems are
/// reported on `output` and re-prompted.
pub fn run_session<R: BufRead, W: Write>(
    form: &mut Form,
    log: &LogFile,
    input: &mut R,
    output: &mut W,
) -> Result<usize> {
    writeln!(output, "Logging to {}", log.path().display())?;
    writeln!(
        output,
        "Empty callsign or end of input finishes the session.\n"
    )?;

    let mut logged = 0usize;
    let mut line = String::new();

    'session: loop {
        for i in 0..form.defs().len() {
            loop {
                let def = &form.defs()[i];
                let name = def.name.clone();
                let current = form.value(&name).unwrap_or_default().to_string();

                if current.is_empty() {
                    write!(output, "{}: ", def.label)?;
                } else {
                    write!(output, "{} [{}]: ", def.label, current)?;
                }
                output.flush()?;

                line.clear();
                if input.read_line(&mut line)? == 0 {
                    break 'session; // EOF
                }
                let entered = line.trim();

                if entered.is_empty() {
                    if current.is_empty() {
                        if name == "CALL" {
                            break 'session;
                        }
                        // Empty date/time means "now", the Now button.
                        if name == "QSO_DATE" || name == "TIME_ON" {
                            let now = Utc::now();
                            let value = if name == "QSO_DATE" {
                                now.format("%Y-%m-%d").to_string()
                            } else {
                                now.format("%H:%M").to_string()
                            };
                            // Generated values always pass validation.
                            form.set(&name, &value)?;
                        }
                    }
                    break; // keep the current value
                }

                match form.set(&name, entered) {
                    Ok(()) => break,
                    Err(err) if err.is_validation() => {
                        writeln!(output, "  {err}")?;
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        match form.submit() {
            Ok(qso) => {
                let record = adif::record(&qso);
                log.append_record(&record)?;
                writeln!(output, "Logged: {record}\n")?;
                info!("Logged {} on {}", qso.call, log.path().display());
                logged += 1;
                form.clear();
            }
            Err(errors) => {
                writeln!(output, "QSO not logged:")?;
                for err in errors {
                    writeln!(output, "  {err}")?;
                }
                writeln!(output, "Entries are kept; correct them above.\n")?;
            }
        }
    }

    writeln!(output, "\n{logged} contact(s) logged.")?;
    Ok(logged)
}
