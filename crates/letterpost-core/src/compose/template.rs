//! The default letter blueprint.
//!
//! Seven fields in collection order, partitioned into three elidable
//! sections plus the standalone closing and signature. Each field carries
//! the question a channel asks for it and a placeholder example. The
//! placeholder is presentation only: it never reaches a `Document`.

use letterpost_types::letter::{Field, FieldName, SectionName};

/// Presentation metadata for one template field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: FieldName,
    /// Question shown to the owner when the field is collected.
    pub prompt: &'static str,
    /// Example content, shown as a hint.
    pub placeholder: &'static str,
}

const FIELD_SPECS: [FieldSpec; 7] = [
    FieldSpec {
        name: FieldName::Address1,
        prompt: "Let's start with the first line of the address.",
        placeholder: "Ms. Ada Lovelace",
    },
    FieldSpec {
        name: FieldName::Address2,
        prompt: "Second line of the address.",
        placeholder: "12 St James's Square",
    },
    FieldSpec {
        name: FieldName::Address3,
        prompt: "Third line of the address.",
        placeholder: "London SW1Y 4JH",
    },
    FieldSpec {
        name: FieldName::Salutation,
        prompt: "How do you want to greet the recipient?",
        placeholder: "Dear Ada,",
    },
    FieldSpec {
        name: FieldName::Body,
        prompt: "Now the text of the letter.",
        placeholder: "I hope this letter finds you well.",
    },
    FieldSpec {
        name: FieldName::Closing,
        prompt: "How do you want to conclude?",
        placeholder: "Yours sincerely,",
    },
    FieldSpec {
        name: FieldName::Signature,
        prompt: "Finally, your signature.",
        placeholder: "Charles",
    },
];

/// Immutable letter template.
#[derive(Debug, Clone, Copy, Default)]
pub struct Template;

impl Template {
    /// A fresh working copy of the template's fields, all absent.
    pub fn fields(&self) -> Vec<Field> {
        FieldName::ALL.into_iter().map(Field::absent).collect()
    }

    pub fn sections(&self) -> &'static [SectionName] {
        &SectionName::ALL
    }

    pub fn spec(&self, name: FieldName) -> &'static FieldSpec {
        // FIELD_SPECS is indexed in FieldName::ALL order.
        &FIELD_SPECS[name as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_follow_template_order_and_start_absent() {
        let fields = Template.fields();
        let names: Vec<FieldName> = fields.iter().map(|f| f.name).collect();
        assert_eq!(names, FieldName::ALL.to_vec());
        assert!(fields.iter().all(|f| !f.is_provided()));
    }

    #[test]
    fn test_spec_lookup_matches_name() {
        for name in FieldName::ALL {
            assert_eq!(Template.spec(name).name, name);
            assert!(!Template.spec(name).prompt.is_empty());
        }
    }

    #[test]
    fn test_closing_and_signature_are_outside_every_section() {
        for section in Template.sections() {
            assert!(!section.members().contains(&FieldName::Closing));
            assert!(!section.members().contains(&FieldName::Signature));
        }
    }
}
