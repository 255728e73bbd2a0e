use serde::{Deserialize, Serialize};

/// A single field of an automation form: its wire name and whether the
/// trimmed value must be non-empty for the submission to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
}

const fn required(name: &'static str) -> FieldSpec {
    FieldSpec { name, required: true }
}

const fn optional(name: &'static str) -> FieldSpec {
    FieldSpec { name, required: false }
}

/// The three input shapes the duplicate-drive trigger supports.
///
/// The shapes differ only in the declared field list, the required subset and
/// the aggregate rejection message; everything downstream (payload builder,
/// webhook client, controller) is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Minimal,
    Restricted,
    Full,
}

/// `nicho` options accepted by the restricted shape. The UI renders these as
/// a select; the validator enforces membership for hand-built clients.
pub const RESTRICTED_NICHOS: &[&str] = &["Diabetes", "ED", "Emagrecimento", "Memória"];

const MINIMAL_FIELDS: &[FieldSpec] = &[required("nicho"), required("nomeProduto")];

const RESTRICTED_FIELDS: &[FieldSpec] = &[
    required("nicho"),
    required("nomeProduto"),
    required("funilProdutoChiclete"),
];

const FULL_FIELDS: &[FieldSpec] = &[
    required("idioma"),
    required("paises"),
    required("nicho"),
    required("produto"),
    optional("nomeFunil"),
];

impl Variant {
    /// Declared fields in wire order. Payload keys follow this order exactly.
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Variant::Minimal => MINIMAL_FIELDS,
            Variant::Restricted => RESTRICTED_FIELDS,
            Variant::Full => FULL_FIELDS,
        }
    }

    /// Aggregate message shown when any required field is missing.
    pub fn missing_fields_message(&self) -> &'static str {
        match self {
            Variant::Minimal | Variant::Restricted => "Preencha todos os campos obrigatórios.",
            Variant::Full => "Preencha todos os campos de configuração.",
        }
    }

    /// Enumerated `nicho` values, when the shape restricts them.
    pub fn nicho_options(&self) -> Option<&'static [&'static str]> {
        match self {
            Variant::Restricted => Some(RESTRICTED_NICHOS),
            Variant::Minimal | Variant::Full => None,
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(Variant::Minimal),
            "restricted" => Ok(Variant::Restricted),
            "full" => Ok(Variant::Full),
            other => Err(format!("unknown automation variant: {}", other)),
        }
    }
}
