//! Handlers for student enrolment.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use regsuite_core::acl::{entity, Operation};
use regsuite_core::activity::ActivityType;
use regsuite_core::age::validate_not_future;
use regsuite_core::person::{
    display_name, validate_contact_number, validate_name, validate_optional_email, BloodGroup,
    Gender,
};
use regsuite_core::school::class::ensure_seat_available;
use regsuite_core::school::student::{
    duplicate_roll_number_error, missing_current_year_error, validate_roll_number, StudentStatus,
};
use regsuite_core::lifecycle::parse_state;
use regsuite_core::types::DbId;
use regsuite_db::models::student::{
    ChangeStudentStatus, CreateStudent, Student, StudentListParams, StudentView, UpdateStudent,
};
use regsuite_db::repositories::{AcademicYearRepo, SchoolClassRepo, StudentInsert, StudentRepo};
use regsuite_events::bus::STUDENT_REGISTERED;
use regsuite_events::RecordEvent;

use super::{changed_concurrently, check_choice, check_transition, not_found};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::page;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/students
pub async fn list_students(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<StudentListParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::STUDENT, Operation::Read)?;
    check_choice::<StudentStatus>(params.status.as_deref())?;
    let (limit, offset) = page(params.limit, params.offset);
    let today = Utc::now().date_naive();

    let students: Vec<StudentView> = StudentRepo::list(&state.pool, &params, limit, offset)
        .await?
        .into_iter()
        .map(|s| StudentView::new(s, today))
        .collect();

    Ok(Json(DataResponse { data: students }))
}

/// POST /api/v1/students
///
/// Enrols into the current academic year unless one is given. The class
/// must have a free seat; the roll number defaults to the next free one.
pub async fn register_student(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateStudent>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::STUDENT, Operation::Create)?;
    let today = Utc::now().date_naive();
    validate_name("First name", &input.first_name)?;
    validate_name("Last name", &input.last_name)?;
    input.gender.parse::<Gender>()?;
    check_choice::<BloodGroup>(input.blood_group.as_deref())?;
    validate_not_future("Date of birth", input.date_of_birth, today)?;
    validate_contacts(input.phone.as_deref(), input.email.as_deref(), input.parent_email.as_deref())?;
    if let Some(roll) = input.roll_number {
        validate_roll_number(roll)?;
    }

    let academic_year_id = match input.academic_year_id {
        Some(id) => {
            AcademicYearRepo::find_by_id(&state.pool, id)
                .await?
                .ok_or_else(|| not_found("Academic year", id))?
                .id
        }
        None => {
            AcademicYearRepo::find_current(&state.pool)
                .await?
                .ok_or_else(missing_current_year_error)?
                .id
        }
    };

    if let Some(class_id) = input.class_id {
        let class = SchoolClassRepo::find_by_id(&state.pool, class_id)
            .await?
            .ok_or_else(|| not_found("Class", class_id))?;
        ensure_seat_available(class.current_students, class.capacity)?;
    }

    let student = match StudentRepo::create(&state.pool, academic_year_id, &input).await? {
        StudentInsert::Created(student) => student,
        StudentInsert::DuplicateRollNumber(roll) => {
            return Err(duplicate_roll_number_error(roll).into());
        }
    };

    notify_class_teacher(&state, &student, auth.user_id).await?;

    tracing::info!(
        student_pk = student.id,
        student_id = %student.student_id,
        class_id = ?student.class_id,
        roll_number = student.roll_number,
        user_id = auth.user_id,
        "Student registered",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: StudentView::new(student, today) })))
}

/// GET /api/v1/students/{id}
pub async fn get_student(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::STUDENT, Operation::Read)?;
    let student = find(&state, id).await?;

    Ok(Json(DataResponse { data: StudentView::new(student, Utc::now().date_naive()) }))
}

/// PUT /api/v1/students/{id}
pub async fn update_student(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStudent>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::STUDENT, Operation::Write)?;
    let today = Utc::now().date_naive();
    if let Some(name) = input.first_name.as_deref() {
        validate_name("First name", name)?;
    }
    if let Some(name) = input.last_name.as_deref() {
        validate_name("Last name", name)?;
    }
    check_choice::<Gender>(input.gender.as_deref())?;
    check_choice::<BloodGroup>(input.blood_group.as_deref())?;
    if let Some(dob) = input.date_of_birth {
        validate_not_future("Date of birth", dob, today)?;
    }
    validate_contacts(input.phone.as_deref(), input.email.as_deref(), input.parent_email.as_deref())?;

    let student = StudentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Student", id))?;

    tracing::info!(student_pk = id, user_id = auth.user_id, "Student updated");

    Ok(Json(DataResponse { data: StudentView::new(student, today) }))
}

/// DELETE /api/v1/students/{id}
pub async fn delete_student(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::STUDENT, Operation::Unlink)?;
    if !StudentRepo::delete(&state.pool, id).await? {
        return Err(not_found("Student", id));
    }

    tracing::info!(student_pk = id, user_id = auth.user_id, "Student deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/students/{id}/status
pub async fn change_student_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ChangeStudentStatus>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(entity::STUDENT, Operation::Write)?;
    let to: StudentStatus = parse_state(&input.status)?;
    let current = find(&state, id).await?;
    let from = check_transition(&current.status, to)?;

    if to == StudentStatus::Active {
        if let Some(class_id) = current.class_id {
            if let Some(class) = SchoolClassRepo::find_by_id(&state.pool, class_id).await? {
                ensure_seat_available(class.current_students, class.capacity)?;
            }
        }
    }

    let student = StudentRepo::set_status(&state.pool, id, from, to.as_str())
        .await?
        .ok_or_else(|| changed_concurrently("Student", id))?;

    tracing::info!(student_pk = id, from, to = %to, user_id = auth.user_id, "Student status changed");

    Ok(Json(DataResponse { data: StudentView::new(student, Utc::now().date_naive()) }))
}

async fn find(state: &AppState, id: DbId) -> AppResult<Student> {
    StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Student", id))
}

fn validate_contacts(
    phone: Option<&str>,
    email: Option<&str>,
    parent_email: Option<&str>,
) -> Result<(), regsuite_core::error::CoreError> {
    if let Some(phone) = phone {
        validate_contact_number(phone)?;
    }
    validate_optional_email(email)?;
    validate_optional_email(parent_email)
}

/// Leave a welcome note for the class teacher of the student's class.
async fn notify_class_teacher(state: &AppState, student: &Student, actor: DbId) -> AppResult<()> {
    let Some(class_id) = student.class_id else {
        return Ok(());
    };
    let teacher = SchoolClassRepo::class_teacher_name(&state.pool, class_id).await?;
    let name = display_name(&student.first_name, &student.last_name);

    state.event_bus.publish(
        RecordEvent::new(
            STUDENT_REGISTERED,
            entity::STUDENT,
            student.id,
            format!("New student registered: {name} ({})", student.student_id),
        )
        .with_activity_type(ActivityType::Notification)
        .with_actor(actor)
        .with_payload(serde_json::json!({
            "class_id": class_id,
            "roll_number": student.roll_number,
            "class_teacher": teacher.map(|(first, last)| display_name(&first, &last)),
        })),
    );
    Ok(())
}

