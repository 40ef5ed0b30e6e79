//! Registration form transform.
//!
//! The form's license headers were reworded between versions, so both the
//! license number and category columns are located through alias lists.

use cnh_ingest::{CsvTable, resolve_column};
use cnh_model::RegistrationRecord;
use cnh_model::layout::space_pad;
use cnh_model::records::{
    LICENSE_CATEGORY_ALIASES, LICENSE_NUMBER_ALIASES, REGISTRATION_IDENTIFIER_COLUMN,
};
use tracing::{debug, info, info_span};

use crate::error::{Result, TransformError};
use crate::identifier::normalize_identifier;

/// Field separator of the registration form export.
pub const REGISTRATION_DELIMITER: u8 = b',';

/// Width of the category code; categories are one to three letters.
pub const CATEGORY_WIDTH: usize = 4;

/// Transforms the parsed registration form into `(CPF, numero-cnh, categoria)` rows.
pub fn transform_registration(table: &CsvTable) -> Result<Vec<RegistrationRecord>> {
    let span = info_span!("registration", input = %table.input, rows = table.len());
    let _guard = span.enter();

    let stage_error = |source| TransformError::Registration { source };
    let identifier = table
        .require_column(REGISTRATION_IDENTIFIER_COLUMN)
        .map_err(stage_error)?;
    let license_number = resolve_column(table, &LICENSE_NUMBER_ALIASES).map_err(stage_error)?;
    let license_category =
        resolve_column(table, &LICENSE_CATEGORY_ALIASES).map_err(stage_error)?;
    debug!(
        license_number = license_number.alias,
        license_category = license_category.alias,
        "resolved license columns"
    );

    let records: Vec<RegistrationRecord> = (0..table.len())
        .map(|row| RegistrationRecord {
            identifier: normalize_identifier(table.cell(row, identifier)),
            license_number: normalize_identifier(table.cell(row, license_number.index)),
            license_category: space_pad(table.cell(row, license_category.index), CATEGORY_WIDTH),
        })
        .collect();

    info!(records = records.len(), "registration form transformed");
    Ok(records)
}
