//! Inner join of course rows with registration rows on the normalized CPF.

use std::collections::BTreeMap;

use cnh_model::{CourseRecord, JoinedRecord, RegistrationRecord};
use tracing::{info, info_span};

/// Joins on `identifier` and projects to the six `PREPARO_ETL` columns.
///
/// Output follows course-row order; a course row matching several
/// registrations yields one record per match, in registration order.
/// Unmatched rows on either side are dropped. Either input empty yields an
/// empty result without joining.
pub fn join_and_select(
    courses: &[CourseRecord],
    registrations: &[RegistrationRecord],
) -> Vec<JoinedRecord> {
    let span = info_span!(
        "join",
        courses = courses.len(),
        registrations = registrations.len()
    );
    let _guard = span.enter();

    if courses.is_empty() || registrations.is_empty() {
        return Vec::new();
    }

    let mut by_identifier: BTreeMap<&str, Vec<&RegistrationRecord>> = BTreeMap::new();
    for registration in registrations {
        by_identifier
            .entry(registration.identifier.as_str())
            .or_default()
            .push(registration);
    }

    let mut joined = Vec::new();
    let mut unmatched = 0usize;
    for course in courses {
        let Some(matches) = by_identifier.get(course.identifier.as_str()) else {
            unmatched += 1;
            continue;
        };
        for registration in matches {
            joined.push(JoinedRecord {
                identifier_original: course.identifier_original.clone(),
                identifier: course.identifier.clone(),
                start_date_code: course.start_date_code.clone(),
                end_date_code: course.end_date_code.clone(),
                license_number: registration.license_number.clone(),
                license_category: registration.license_category.clone(),
            });
        }
    }

    info!(
        joined = joined.len(),
        unmatched_courses = unmatched,
        "join complete"
    );
    joined
}
