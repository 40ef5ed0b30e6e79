//! Column layout of the transaction-181 record.
//!
//! Each field carries a declared width and a pad rule. Padding only ever
//! lengthens a value: a value wider than its field is written unchanged and
//! reported by the integrity check instead of being cut.

use serde::Serialize;

/// How a field is brought up to its declared width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PadRule {
    /// Left-pad with `'0'` (numeric codes).
    ZeroLeft,
    /// Right-pad with `' '` (text codes).
    SpaceRight,
    /// Written as-is.
    None,
}

impl PadRule {
    /// Pads `value` to `width` characters according to the rule.
    pub fn apply(self, value: &str, width: usize) -> String {
        match self {
            Self::ZeroLeft => zero_pad(value, width),
            Self::SpaceRight => space_pad(value, width),
            Self::None => value.to_string(),
        }
    }
}

/// Left-pads with zeros to `width` characters, keeping a leading sign in front.
pub fn zero_pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }
    let fill = "0".repeat(width - len);
    match value.chars().next() {
        Some(sign @ ('+' | '-')) => format!("{sign}{fill}{}", &value[1..]),
        _ => format!("{fill}{value}"),
    }
}

/// Right-pads with spaces to `width` characters.
pub fn space_pad(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}

/// One column of the output record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Declared width; `None` for fields written without padding.
    pub width: Option<usize>,
    pub pad: PadRule,
    /// Human-readable description of the content.
    pub content: &'static str,
}

impl FieldSpec {
    const fn new(name: &'static str, width: usize, pad: PadRule, content: &'static str) -> Self {
        Self {
            name,
            width: Some(width),
            pad,
            content,
        }
    }

    /// Formats a raw value for this field.
    pub fn format(&self, value: &str) -> String {
        match self.width {
            Some(width) => self.pad.apply(value, width),
            None => value.to_string(),
        }
    }

    /// Width a formatted value is expected to have.
    ///
    /// Matches `width` except for `numero-cnh`, which is zero-padded to
    /// [`LICENSE_NUMBER_JOIN_WIDTH`] before formatting and keeps that width.
    pub fn expected_width(&self) -> Option<usize> {
        if self.name == LICENSE_NUMBER_FIELD {
            self.width.map(|width| width.max(LICENSE_NUMBER_JOIN_WIDTH))
        } else {
            self.width
        }
    }

    /// Returns true if a formatted value is wider than its expected width.
    pub fn overflows(&self, value: &str) -> bool {
        self.expected_width()
            .is_some_and(|width| value.chars().count() > width)
    }
}

pub const TRANSACTION_CODE: &str = "181";
pub const TRANSACTION_MODE: &str = "7";
pub const ORIGIN_STATE: &str = "SA";
pub const SENDER_STATE: &str = "SA";
pub const DESTINATION_STATE: &str = "BR";
pub const TRANSACTION_CONDITION: &str = "0";
pub const TRANSACTION_SIZE: &str = "0152";
pub const RETURN_CODE: &str = "00";
pub const KEY_TYPE: &str = "2";
pub const EVENT_TYPE: &str = "C";
pub const COURSE_CODE: &str = "04";
pub const COURSE_MODALITY: &str = "2";
pub const CERTIFICATE_PREFIX: &str = "escola";
pub const CERTIFICATE_ORDINAL_WIDTH: usize = 9;
pub const ENTITY_CNPJ: &str = "00394494000560";
pub const INSTRUCTOR_CPF: &str = "57437670097";
pub const COURSE_MUNICIPALITY: &str = "9701";
pub const COURSE_STATE: &str = "DF";
pub const COURSE_NOTES: &str = "99                  ";
/// Years added to the course start to obtain `data-validade`.
pub const VALIDITY_YEARS: u32 = 5;
/// Width the license number is padded to before final formatting.
pub const LICENSE_NUMBER_JOIN_WIDTH: usize = 11;
const LICENSE_NUMBER_FIELD: &str = "numero-cnh";

pub const FIELD_COUNT: usize = 28;

/// Output columns in order.
pub const FIELD_LAYOUT: [FieldSpec; FIELD_COUNT] = [
    FieldSpec::new("nu-seq-trans", 6, PadRule::ZeroLeft, "sequence number"),
    FieldSpec::new("cod-trans", 3, PadRule::ZeroLeft, "\"181\""),
    FieldSpec {
        name: "cod-mod-trans",
        width: None,
        pad: PadRule::None,
        content: "\"7\"",
    },
    FieldSpec::new("codusu", 11, PadRule::ZeroLeft, "identifier"),
    FieldSpec::new("uf-or-trans", 2, PadRule::SpaceRight, "\"SA\""),
    FieldSpec::new("uf-orig-transm", 2, PadRule::SpaceRight, "\"SA\""),
    FieldSpec::new("uf-des-transm", 2, PadRule::SpaceRight, "\"BR\""),
    FieldSpec::new("cond-trans", 1, PadRule::ZeroLeft, "\"0\""),
    FieldSpec::new("tam-trans", 4, PadRule::ZeroLeft, "\"0152\""),
    FieldSpec::new("cod-ret-trans", 2, PadRule::ZeroLeft, "\"00\""),
    FieldSpec::new("dia-juliano", 3, PadRule::ZeroLeft, "day of year"),
    FieldSpec::new("tipo-chave", 1, PadRule::ZeroLeft, "\"2\""),
    FieldSpec::new("numero-cnh", 10, PadRule::ZeroLeft, "license number"),
    FieldSpec::new("tipo-evento", 1, PadRule::SpaceRight, "\"C\""),
    FieldSpec::new("tipo-atualizacao", 1, PadRule::SpaceRight, "update type"),
    FieldSpec::new("codigo-curso", 2, PadRule::ZeroLeft, "\"04\""),
    FieldSpec::new("modalidade", 1, PadRule::ZeroLeft, "\"2\""),
    FieldSpec::new(
        "Numero Certificado",
        15,
        PadRule::SpaceRight,
        "\"escola\" + 9-digit ordinal",
    ),
    FieldSpec::new("data-inicio-curso", 8, PadRule::SpaceRight, "YYYYMMDD or empty"),
    FieldSpec::new("data-fim-curso", 8, PadRule::SpaceRight, "YYYYMMDD or empty"),
    FieldSpec::new("carga-horaria", 3, PadRule::ZeroLeft, "course hours code"),
    FieldSpec::new("cnpj-entidade-crede", 14, PadRule::ZeroLeft, "\"00394494000560\""),
    FieldSpec::new("cpf-instrutor", 11, PadRule::ZeroLeft, "\"57437670097\""),
    FieldSpec::new("municipio-curso", 5, PadRule::ZeroLeft, "\"9701\""),
    FieldSpec::new("uf-curso", 2, PadRule::SpaceRight, "\"DF\""),
    FieldSpec::new("data-validade", 8, PadRule::SpaceRight, "start + 5 years or empty"),
    FieldSpec::new("categoria", 4, PadRule::SpaceRight, "license category"),
    FieldSpec::new("observacoes-curso", 20, PadRule::SpaceRight, "\"99\" + 18 spaces"),
];

/// Looks up a field by its output name.
pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    FIELD_LAYOUT.iter().find(|spec| spec.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_pad_matches_zfill() {
        assert_eq!(zero_pad("42", 6), "000042");
        assert_eq!(zero_pad("", 3), "000");
        assert_eq!(zero_pad("1234567", 6), "1234567");
        assert_eq!(zero_pad("-5", 4), "-005");
    }

    #[test]
    fn space_pad_never_truncates() {
        assert_eq!(space_pad("B", 4), "B   ");
        assert_eq!(space_pad("", 8), "        ");
        assert_eq!(space_pad("ABCDE", 4), "ABCDE");
    }

    #[test]
    fn space_pad_counts_characters() {
        assert_eq!(space_pad("ção", 4), "ção ");
    }

    #[test]
    fn layout_names_are_unique() {
        for (idx, spec) in FIELD_LAYOUT.iter().enumerate() {
            assert!(
                FIELD_LAYOUT[idx + 1..].iter().all(|other| other.name != spec.name),
                "duplicate field {}",
                spec.name
            );
        }
    }

    #[test]
    fn literal_constants_fit_their_fields() {
        let notes = field_spec("observacoes-curso").unwrap();
        assert_eq!(COURSE_NOTES.len(), notes.width.unwrap());
        let cnpj = field_spec("cnpj-entidade-crede").unwrap();
        assert!(!cnpj.overflows(ENTITY_CNPJ));
    }

    #[test]
    fn unpadded_field_never_overflows() {
        let spec = field_spec("cod-mod-trans").unwrap();
        assert_eq!(spec.format("7"), "7");
        assert!(!spec.overflows("777"));
    }

    #[test]
    fn license_number_expects_join_width() {
        let spec = field_spec("numero-cnh").unwrap();
        assert_eq!(spec.width, Some(10));
        assert_eq!(spec.expected_width(), Some(LICENSE_NUMBER_JOIN_WIDTH));
        assert!(!spec.overflows("00123456789"));
        assert!(spec.overflows("123456789012"));
    }
}
