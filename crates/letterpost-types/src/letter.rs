//! Letter structure: the named fields a letter is made of, the sections
//! that group them, and the collection steps that visit them.

use serde::{Deserialize, Serialize};

use std::fmt;

/// One of the seven named fields of a letter, in collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldName {
    #[serde(rename = "address_line1")]
    Address1,
    #[serde(rename = "address_line2")]
    Address2,
    #[serde(rename = "address_line3")]
    Address3,
    #[serde(rename = "salutation")]
    Salutation,
    #[serde(rename = "body")]
    Body,
    #[serde(rename = "closing")]
    Closing,
    #[serde(rename = "signature")]
    Signature,
}

impl FieldName {
    /// Every field, in template order.
    pub const ALL: [FieldName; 7] = [
        FieldName::Address1,
        FieldName::Address2,
        FieldName::Address3,
        FieldName::Salutation,
        FieldName::Body,
        FieldName::Closing,
        FieldName::Signature,
    ];

    /// Stable wire key (matches the serde representation).
    pub fn key(self) -> &'static str {
        match self {
            FieldName::Address1 => "address_line1",
            FieldName::Address2 => "address_line2",
            FieldName::Address3 => "address_line3",
            FieldName::Salutation => "salutation",
            FieldName::Body => "body",
            FieldName::Closing => "closing",
            FieldName::Signature => "signature",
        }
    }

    /// The section this field is elided with, if any.
    ///
    /// `Closing` and `Signature` stand alone and are always retained.
    pub fn section(self) -> Option<SectionName> {
        SectionName::ALL
            .into_iter()
            .find(|section| section.members().contains(&self))
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One named piece of user-supplied text.
///
/// A field counts as provided exactly when it carries a value; there is no
/// separate flag that could drift out of sync with `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: FieldName,
    pub value: Option<String>,
}

impl Field {
    /// A field left at its default (absent) state.
    pub fn absent(name: FieldName) -> Self {
        Self { name, value: None }
    }

    pub fn is_provided(&self) -> bool {
        self.value.is_some()
    }
}

/// A group of fields that is elided from the output as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionName {
    Address,
    Salutation,
    Body,
}

impl SectionName {
    /// Every section, in template order.
    pub const ALL: [SectionName; 3] = [
        SectionName::Address,
        SectionName::Salutation,
        SectionName::Body,
    ];

    /// Member fields of the section. Never empty.
    pub fn members(self) -> &'static [FieldName] {
        match self {
            SectionName::Address => &[FieldName::Address1, FieldName::Address2, FieldName::Address3],
            SectionName::Salutation => &[FieldName::Salutation],
            SectionName::Body => &[FieldName::Body],
        }
    }

    /// Whether the section must survive even when all members are absent.
    /// No section of a letter is required.
    pub fn is_required(self) -> bool {
        false
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionName::Address => write!(f, "address"),
            SectionName::Salutation => write!(f, "salutation"),
            SectionName::Body => write!(f, "body"),
        }
    }
}

/// Position of a session in the collection sequence.
///
/// `Address1 -> Address2 -> Address3 -> Salutation -> Body -> Closing ->
/// Signature -> Done`. There is no branching and no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Address1,
    Address2,
    Address3,
    Salutation,
    Body,
    Closing,
    Signature,
    Done,
}

impl Step {
    /// The step a fresh session starts at.
    pub const FIRST: Step = Step::Address1;

    /// Field collected at this step, or `None` for `Done`.
    pub fn field(self) -> Option<FieldName> {
        match self {
            Step::Address1 => Some(FieldName::Address1),
            Step::Address2 => Some(FieldName::Address2),
            Step::Address3 => Some(FieldName::Address3),
            Step::Salutation => Some(FieldName::Salutation),
            Step::Body => Some(FieldName::Body),
            Step::Closing => Some(FieldName::Closing),
            Step::Signature => Some(FieldName::Signature),
            Step::Done => None,
        }
    }

    /// The following step. `Done` maps to itself.
    pub fn next(self) -> Step {
        match self {
            Step::Address1 => Step::Address2,
            Step::Address2 => Step::Address3,
            Step::Address3 => Step::Salutation,
            Step::Salutation => Step::Body,
            Step::Body => Step::Closing,
            Step::Closing => Step::Signature,
            Step::Signature | Step::Done => Step::Done,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Step::Done
    }

    /// Number of fields already visited when a session sits at this step.
    pub fn visited(self) -> usize {
        match self.field() {
            Some(field) => FieldName::ALL
                .iter()
                .position(|f| *f == field)
                .unwrap_or(FieldName::ALL.len()),
            None => FieldName::ALL.len(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field() {
            Some(field) => write!(f, "{field}"),
            None => write!(f, "done"),
        }
    }
}
