pub mod academic_years;
pub mod activities;
pub mod admin;
pub mod appointments;
pub mod attendance;
pub mod classes;
pub mod doctors;
pub mod emergency;
pub mod fees;
pub mod grades;
pub mod health;
pub mod icu_beds;
pub mod licenses;
pub mod medicines;
pub mod operators;
pub mod patients;
pub mod prescriptions;
pub mod reports;
pub mod sites;
pub mod students;
pub mod teachers;
pub mod timetable;
pub mod uaf;
pub mod vital_signs;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Every route requires a bearer token; the role it carries is checked
/// against the access matrix by each handler.
///
/// Route hierarchy:
///
/// ```text
/// /operators                                  list, create
/// /operators/{id}                             get, update, delete
/// /operators/{id}/status                      status change (POST)
/// /licenses                                   list, create
/// /licenses/expiring                          licenses expiring within ?days
/// /licenses/{id}                              get, update, delete
/// /licenses/{id}/status                       status change (POST)
/// /sites                                      list, create
/// /sites/{id}                                 get, update, delete
/// /uaf-declarations                           list, create
/// /uaf-declarations/invoice                   generate invoices (POST)
/// /uaf-declarations/{id}                      get, update, delete
/// /uaf-declarations/{id}/verify               verify (POST)
/// /uaf-declarations/{id}/mark-paid            mark paid (POST)
/// /uaf-declarations/{id}/payments             list, add
///
/// /patients                                   list, register
/// /patients/{id}                              get, update, delete
/// /patients/{id}/admit                        admit (POST)
/// /patients/{id}/discharge                    discharge (POST)
/// /patients/{id}/medical-records              list
/// /patients/{id}/vital-signs                  list
/// /appointments                               list, create
/// /appointments/confirm                       bulk confirm (POST)
/// /appointments/{id}                          get, update
/// /appointments/{id}/start                    start consultation (POST)
/// /appointments/{id}/complete                 complete (POST)
/// /appointments/{id}/cancel                   cancel (POST)
/// /prescriptions                              list, create
/// /prescriptions/{id}                         get, delete
/// /prescriptions/{id}/confirm                 confirm (POST)
/// /prescriptions/{id}/dispense                dispense (POST)
/// /prescriptions/{id}/cancel                  cancel (POST)
/// /medicines                                  list, create
/// /medicines/{id}                             get, update, delete
/// /dose-units                                 list, create
/// /dose-units/{id}                            delete
/// /doctors                                    list, create (admin)
/// /doctors/{id}                               get, update (admin)
/// /emergency-cases                            list, create
/// /emergency-cases/{id}                       get, update
/// /emergency-cases/{id}/transition            lifecycle move (POST)
/// /icu-beds                                   list, create
/// /icu-beds/{id}                              get, update, delete
/// /icu-beds/{id}/assign                       assign patient (POST)
/// /icu-beds/{id}/release                      release (POST)
/// /icu-beds/{id}/status                       maintenance toggle (POST)
/// /vital-signs                                record
/// /vital-signs/{id}                           delete
/// /hospital/reports/daily-census              daily census
/// /hospital/reports/doctor-performance        doctor performance
/// /hospital/reports/monthly                   monthly statistics
///
/// /academic-years                             list, create
/// /academic-years/current                     current year
/// /academic-years/{id}                        get, update
/// /academic-years/{id}/set-current            make current (POST)
/// /classes                                    list, create
/// /classes/{id}                               get, update, delete
/// /classes/{id}/sections                      list, create
/// /subjects                                   list, create
/// /teachers                                   list, create
/// /teachers/{id}                              get, update
/// /students                                   list, register
/// /students/{id}                              get, update, delete
/// /students/{id}/status                       status change (POST)
/// /fee-types                                  list, create
/// /fees                                       list, create
/// /fees/{id}                                  get, delete
/// /fees/{id}/issue                            issue (POST)
/// /fees/{id}/mark-paid                        mark paid (POST)
/// /fees/{id}/payments                         record payment (POST)
/// /fees/{id}/remind                           payment reminder (POST)
/// /attendance                                 list, record
/// /attendance/mark-present                    bulk mark present (POST)
/// /attendance/summary                         per-student totals
/// /attendance/{id}                            update
/// /grades                                     list, create
/// /grades/{id}                                get, update, delete
/// /timetable                                  list, create
/// /timetable/{id}                             delete
/// /school/reports/daily                       daily school report
/// /school/reports/class-performance           class-wise performance
///
/// /activities                                 list (?entity_type, entity_id)
/// /activities/{id}/done                       mark done (POST)
///
/// /admin/sequences                            list (admin only)
/// /admin/sequences/{code}                     update (admin only)
/// /admin/jobs                                 list (admin only)
/// /admin/jobs/{name}/run                      run now (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Operator registry.
        .nest("/operators", operators::router())
        .nest("/licenses", licenses::router())
        .nest("/sites", sites::router())
        .nest("/uaf-declarations", uaf::router())
        // Hospital.
        .nest("/patients", patients::router())
        .nest("/appointments", appointments::router())
        .nest("/prescriptions", prescriptions::router())
        .nest("/medicines", medicines::router())
        .nest("/dose-units", medicines::dose_units_router())
        .nest("/doctors", doctors::router())
        .nest("/emergency-cases", emergency::router())
        .nest("/icu-beds", icu_beds::router())
        .nest("/vital-signs", vital_signs::router())
        .nest("/hospital/reports", reports::hospital_router())
        // School.
        .nest("/academic-years", academic_years::router())
        .nest("/classes", classes::router())
        .nest("/subjects", classes::subjects_router())
        .nest("/teachers", teachers::router())
        .nest("/students", students::router())
        .nest("/fee-types", fees::fee_types_router())
        .nest("/fees", fees::router())
        .nest("/attendance", attendance::router())
        .nest("/grades", grades::router())
        .nest("/timetable", timetable::router())
        .nest("/school/reports", reports::school_router())
        // Shared.
        .nest("/activities", activities::router())
        .nest("/admin", admin::router())
}
