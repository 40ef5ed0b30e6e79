use serde::Serialize;

use crate::layout::FIELD_COUNT;

/// One formatted output row. Field order matches [`crate::FIELD_LAYOUT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalRecord {
    #[serde(rename = "nu-seq-trans")]
    pub sequence_number: String,
    #[serde(rename = "cod-trans")]
    pub transaction_code: String,
    #[serde(rename = "cod-mod-trans")]
    pub transaction_mode: String,
    #[serde(rename = "codusu")]
    pub user_code: String,
    #[serde(rename = "uf-or-trans")]
    pub origin_state: String,
    #[serde(rename = "uf-orig-transm")]
    pub sender_state: String,
    #[serde(rename = "uf-des-transm")]
    pub destination_state: String,
    #[serde(rename = "cond-trans")]
    pub transaction_condition: String,
    #[serde(rename = "tam-trans")]
    pub transaction_size: String,
    #[serde(rename = "cod-ret-trans")]
    pub return_code: String,
    #[serde(rename = "dia-juliano")]
    pub julian_day: String,
    #[serde(rename = "tipo-chave")]
    pub key_type: String,
    #[serde(rename = "numero-cnh")]
    pub license_number: String,
    #[serde(rename = "tipo-evento")]
    pub event_type: String,
    #[serde(rename = "tipo-atualizacao")]
    pub update_type: String,
    #[serde(rename = "codigo-curso")]
    pub course_code: String,
    #[serde(rename = "modalidade")]
    pub modality: String,
    #[serde(rename = "Numero Certificado")]
    pub certificate_number: String,
    #[serde(rename = "data-inicio-curso")]
    pub start_date: String,
    #[serde(rename = "data-fim-curso")]
    pub end_date: String,
    #[serde(rename = "carga-horaria")]
    pub course_hours: String,
    #[serde(rename = "cnpj-entidade-crede")]
    pub entity_cnpj: String,
    #[serde(rename = "cpf-instrutor")]
    pub instructor_cpf: String,
    #[serde(rename = "municipio-curso")]
    pub course_municipality: String,
    #[serde(rename = "uf-curso")]
    pub course_state: String,
    #[serde(rename = "data-validade")]
    pub validity_date: String,
    #[serde(rename = "categoria")]
    pub license_category: String,
    #[serde(rename = "observacoes-curso")]
    pub course_notes: String,
}

impl FinalRecord {
    /// Builds a record from already formatted values in layout order.
    pub fn from_values(values: [String; FIELD_COUNT]) -> Self {
        let [
            sequence_number,
            transaction_code,
            transaction_mode,
            user_code,
            origin_state,
            sender_state,
            destination_state,
            transaction_condition,
            transaction_size,
            return_code,
            julian_day,
            key_type,
            license_number,
            event_type,
            update_type,
            course_code,
            modality,
            certificate_number,
            start_date,
            end_date,
            course_hours,
            entity_cnpj,
            instructor_cpf,
            course_municipality,
            course_state,
            validity_date,
            license_category,
            course_notes,
        ] = values;
        Self {
            sequence_number,
            transaction_code,
            transaction_mode,
            user_code,
            origin_state,
            sender_state,
            destination_state,
            transaction_condition,
            transaction_size,
            return_code,
            julian_day,
            key_type,
            license_number,
            event_type,
            update_type,
            course_code,
            modality,
            certificate_number,
            start_date,
            end_date,
            course_hours,
            entity_cnpj,
            instructor_cpf,
            course_municipality,
            course_state,
            validity_date,
            license_category,
            course_notes,
        }
    }

    /// Field values in layout order.
    pub fn values(&self) -> [&str; FIELD_COUNT] {
        [
            self.sequence_number.as_str(),
            self.transaction_code.as_str(),
            self.transaction_mode.as_str(),
            self.user_code.as_str(),
            self.origin_state.as_str(),
            self.sender_state.as_str(),
            self.destination_state.as_str(),
            self.transaction_condition.as_str(),
            self.transaction_size.as_str(),
            self.return_code.as_str(),
            self.julian_day.as_str(),
            self.key_type.as_str(),
            self.license_number.as_str(),
            self.event_type.as_str(),
            self.update_type.as_str(),
            self.course_code.as_str(),
            self.modality.as_str(),
            self.certificate_number.as_str(),
            self.start_date.as_str(),
            self.end_date.as_str(),
            self.course_hours.as_str(),
            self.entity_cnpj.as_str(),
            self.instructor_cpf.as_str(),
            self.course_municipality.as_str(),
            self.course_state.as_str(),
            self.validity_date.as_str(),
            self.license_category.as_str(),
            self.course_notes.as_str(),
        ]
    }
}
