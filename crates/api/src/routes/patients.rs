//! Route definitions for hospital patients.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::patients;
use crate::state::AppState;

/// Routes mounted at `/patients`.
///
/// ```text
/// GET    /                        -> list_patients
/// POST   /                        -> create_patient
/// GET    /{id}                    -> get_patient
/// PUT    /{id}                    -> update_patient
/// DELETE /{id}                    -> delete_patient
/// POST   /{id}/admit              -> admit_patient
/// POST   /{id}/discharge          -> discharge_patient
/// GET    /{id}/medical-records    -> list_medical_records
/// GET    /{id}/vital-signs        -> list_vital_signs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(patients::list_patients).post(patients::create_patient))
        .route(
            "/{id}",
            get(patients::get_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        .route("/{id}/admit", post(patients::admit_patient))
        .route("/{id}/discharge", post(patients::discharge_patient))
        .route("/{id}/medical-records", get(patients::list_medical_records))
        .route("/{id}/vital-signs", get(patients::list_vital_signs))
}
