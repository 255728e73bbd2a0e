use std::collections::HashMap;

use crate::automation::variant::Variant;

/// Message shown when a field value carries control characters.
pub const CONTROL_CHARS_MESSAGE: &str = "Os campos não podem conter caracteres de controle.";

/// A validated submission: the variant's declared fields paired with the
/// user-entered values, in wire order. Values are kept verbatim (untrimmed);
/// trimming happens only for the emptiness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    variant: Variant,
    values: Vec<(&'static str, String)>,
}

impl Submission {
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Field name/value pairs in the variant's declared order.
    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.values
    }
}

/// Validate a raw form record against the variant's rules.
///
/// Returns the user-facing rejection message on failure; the caller displays
/// it verbatim. Validation is holistic: one message covers any number of
/// missing fields.
pub fn validate(variant: Variant, raw: &HashMap<String, String>) -> Result<Submission, String> {
    let fields = variant.fields();

    for field in fields {
        let value = raw.get(field.name).map(String::as_str).unwrap_or("");
        if field.required && value.trim().is_empty() {
            return Err(variant.missing_fields_message().to_string());
        }
        if value.chars().any(char::is_control) {
            return Err(CONTROL_CHARS_MESSAGE.to_string());
        }
    }

    if let Some(options) = variant.nicho_options() {
        let nicho = raw.get("nicho").map(String::as_str).unwrap_or("");
        if !options.contains(&nicho) {
            return Err(variant.missing_fields_message().to_string());
        }
    }

    let values = fields
        .iter()
        .map(|field| {
            let value = raw.get(field.name).cloned().unwrap_or_default();
            (field.name, value)
        })
        .collect();

    Ok(Submission { variant, values })
}
