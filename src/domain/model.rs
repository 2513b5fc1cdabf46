use crate::utils::error::{RefError, Result};
use crate::utils::validation::{is_present_number, is_present_text, Validate};
use std::fmt;

pub const COLUMN_ID: &str = "№";
pub const COLUMN_DATE: &str = "дата";
pub const COLUMN_FULL_NAME: &str = "ФИО студента";
pub const COLUMN_STIPEND: &str = "размер стипендии";
pub const COLUMN_DESTINATION: &str = "куда выдается справка";

/// Persisted column order. `to_record_map` and the CSV header both follow it.
pub const COLUMNS: [&str; 5] = [
    COLUMN_ID,
    COLUMN_DATE,
    COLUMN_FULL_NAME,
    COLUMN_STIPEND,
    COLUMN_DESTINATION,
];

/// One student certificate.
///
/// The field set is closed: values are supplied through [`ReferenceBuilder`] and
/// there are no setters, so a reference never changes after it is built.
/// Any field the builder was not given stays unset until `validate` rejects it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentReference {
    id: Option<String>,
    date: Option<String>,
    full_name: Option<String>,
    stipend: Option<f64>,
    destination: Option<String>,
}

impl StudentReference {
    pub fn builder() -> ReferenceBuilder {
        ReferenceBuilder::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Issue date, kept as the text it was entered or loaded with.
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn stipend(&self) -> Option<f64> {
        self.stipend
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    /// Names of the fields that fail the presence check, in declaration order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let checks = [
            ("id", is_present_text(self.id())),
            ("date", is_present_text(self.date())),
            ("full_name", is_present_text(self.full_name())),
            ("stipend", is_present_number(self.stipend)),
            ("destination", is_present_text(self.destination())),
        ];
        checks
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name)
            .collect()
    }

    /// Column/value pairs in persisted order. Unset fields map to empty text.
    pub fn to_record_map(&self) -> [(&'static str, String); 5] {
        let text = |value: Option<&str>| value.unwrap_or_default().to_string();
        [
            (COLUMN_ID, text(self.id())),
            (COLUMN_DATE, text(self.date())),
            (COLUMN_FULL_NAME, text(self.full_name())),
            (
                COLUMN_STIPEND,
                self.stipend.map(format_stipend).unwrap_or_default(),
            ),
            (COLUMN_DESTINATION, text(self.destination())),
        ]
    }
}

impl Validate for StudentReference {
    fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(RefError::ValidationError { missing })
        }
    }
}

impl fmt::Display for StudentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = |value: Option<&str>| value.unwrap_or("None").to_string();
        let stipend = self
            .stipend
            .map(format_stipend)
            .unwrap_or_else(|| "None".to_string());

        writeln!(f, "Справка №{} от {}", text(self.id()), text(self.date()))?;
        writeln!(f, "Студент: {}", text(self.full_name()))?;
        writeln!(f, "Стипендия: {}", stipend)?;
        writeln!(f, "Назначение: {}", text(self.destination()))
    }
}

/// Text form used in files and on screen.
///
/// Integral amounts keep one decimal place (`1500.0`). Magnitudes from `1e16` up
/// and below `1e-4` switch to exponent form with a signed two-digit exponent
/// (`1e+16`, `2.5e-05`), the layout existing data files already use.
pub fn format_stipend(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let exp_form = format!("{:e}", value);
        return match exp_form.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => exp_form,
        };
    }

    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceBuilder {
    inner: StudentReference,
}

impl ReferenceBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.inner.id = Some(id.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.inner.date = Some(date.into());
        self
    }

    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.inner.full_name = Some(full_name.into());
        self
    }

    pub fn stipend(mut self, stipend: f64) -> Self {
        self.inner.stipend = Some(stipend);
        self
    }

    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.inner.destination = Some(destination.into());
        self
    }

    /// Builds without validating; call `validate` before trusting the result.
    pub fn build(self) -> StudentReference {
        self.inner
    }
}
