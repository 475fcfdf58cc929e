//! Repository for the `students` table.

use regsuite_core::school::student;
use regsuite_core::sequence;
use regsuite_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::student::{CreateStudent, Student, StudentListParams, UpdateStudent};
use crate::repositories::SequenceRepo;

const COLUMNS: &str = "\
    id, student_id, first_name, last_name, date_of_birth, gender, class_id, section_id, \
    academic_year_id, roll_number, enrollment_date, parent_name, parent_email, phone, email, \
    address, emergency_contact, emergency_phone, blood_group, medical_conditions, allergies, \
    status, created_at, updated_at";

/// Result of a student registration.
#[derive(Debug)]
pub enum StudentInsert {
    Created(Student),
    /// The requested roll number is taken in the class; nothing was written.
    DuplicateRollNumber(i32),
}

/// Active student due for promotion, with their current class code.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PromotionCandidate {
    pub id: DbId,
    pub class_id: DbId,
    pub class_code: String,
}

pub struct StudentRepo;

impl StudentRepo {
    /// Register a student into `academic_year_id`.
    ///
    /// Without an explicit roll number the next free one in the class is
    /// used; an explicit one is checked against the class first. The
    /// identifier draw, the check and the insert share one transaction.
    pub async fn create(
        pool: &PgPool,
        academic_year_id: DbId,
        input: &CreateStudent,
    ) -> Result<StudentInsert, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let roll_number = match (input.roll_number, input.class_id) {
            (Some(roll), Some(class_id)) if roll > 0 => {
                if Self::roll_number_taken(&mut *tx, class_id, roll, None).await? {
                    return Ok(StudentInsert::DuplicateRollNumber(roll));
                }
                roll
            }
            (Some(roll), None) => roll,
            (_, Some(class_id)) => {
                let max = Self::max_roll_number(&mut *tx, class_id).await?;
                student::next_roll_number(max)
            }
            (None, None) => student::next_roll_number(None),
        };

        let student_id =
            SequenceRepo::assign(&mut *tx, &sequence::STUDENT, input.student_id.as_deref()).await?;

        let query = format!(
            "INSERT INTO students \
                (student_id, first_name, last_name, date_of_birth, gender, class_id, \
                 section_id, academic_year_id, roll_number, enrollment_date, parent_name, \
                 parent_email, phone, email, address, emergency_contact, emergency_phone, \
                 blood_group, medical_conditions, allergies) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, CURRENT_DATE), $11, \
                     $12, $13, $14, $15, $16, $17, $18, $19, $20) \
             RETURNING {COLUMNS}"
        );
        let student = sqlx::query_as::<_, Student>(&query)
            .bind(&student_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.date_of_birth)
            .bind(&input.gender)
            .bind(input.class_id)
            .bind(input.section_id)
            .bind(academic_year_id)
            .bind(roll_number)
            .bind(input.enrollment_date)
            .bind(&input.parent_name)
            .bind(&input.parent_email)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.emergency_contact)
            .bind(&input.emergency_phone)
            .bind(&input.blood_group)
            .bind(&input.medical_conditions)
            .bind(&input.allergies)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(StudentInsert::Created(student))
    }

    /// Highest roll number in a class, `None` for an empty class.
    pub async fn max_roll_number<'e, E>(executor: E, class_id: DbId) -> Result<Option<i32>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar("SELECT MAX(roll_number) FROM students WHERE class_id = $1")
            .bind(class_id)
            .fetch_one(executor)
            .await
    }

    /// Whether another student of the class holds `roll_number`.
    pub async fn roll_number_taken<'e, E>(
        executor: E,
        class_id: DbId,
        roll_number: i32,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar(
            "SELECT EXISTS( \
                SELECT 1 FROM students \
                WHERE class_id = $1 AND roll_number = $2 \
                  AND ($3::BIGINT IS NULL OR id <> $3))",
        )
        .bind(class_id)
        .bind(roll_number)
        .bind(exclude_id)
        .fetch_one(executor)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List students by class and roll number.
    pub async fn list(
        pool: &PgPool,
        params: &StudentListParams,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if params.class_id.is_some() {
            conditions.push(format!("class_id = ${param_idx}"));
            param_idx += 1;
        }
        if params.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM students {where_clause} \
             ORDER BY class_id NULLS LAST, roll_number, id \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Student>(&query);
        if let Some(c) = params.class_id {
            q = q.bind(c);
        }
        if let Some(ref s) = params.status {
            q = q.bind(s);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Active students, optionally of one class.
    pub async fn list_active(
        pool: &PgPool,
        class_id: Option<DbId>,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM students \
             WHERE status = 'active' AND ($1::BIGINT IS NULL OR class_id = $1) \
             ORDER BY id"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(class_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                date_of_birth = COALESCE($4, date_of_birth),
                gender = COALESCE($5, gender),
                section_id = COALESCE($6, section_id),
                parent_name = COALESCE($7, parent_name),
                parent_email = COALESCE($8, parent_email),
                phone = COALESCE($9, phone),
                email = COALESCE($10, email),
                address = COALESCE($11, address),
                emergency_contact = COALESCE($12, emergency_contact),
                emergency_phone = COALESCE($13, emergency_phone),
                blood_group = COALESCE($14, blood_group),
                medical_conditions = COALESCE($15, medical_conditions),
                allergies = COALESCE($16, allergies)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.date_of_birth)
            .bind(&input.gender)
            .bind(input.section_id)
            .bind(&input.parent_name)
            .bind(&input.parent_email)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.emergency_contact)
            .bind(&input.emergency_phone)
            .bind(&input.blood_group)
            .bind(&input.medical_conditions)
            .bind(&input.allergies)
            .fetch_optional(pool)
            .await
    }

    /// Move a student from `from` to `to`; `None` if no longer in `from`.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET status = $3 WHERE id = $1 AND status = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    /// Active students of `academic_year_id` placed in a class.
    pub async fn list_promotion_candidates(
        pool: &PgPool,
        academic_year_id: DbId,
    ) -> Result<Vec<PromotionCandidate>, sqlx::Error> {
        sqlx::query_as::<_, PromotionCandidate>(
            "SELECT s.id, s.class_id, c.code AS class_code \
             FROM students s \
             JOIN classes c ON c.id = s.class_id \
             WHERE s.status = 'active' AND s.academic_year_id = $1 \
             ORDER BY s.id",
        )
        .bind(academic_year_id)
        .fetch_all(pool)
        .await
    }

    /// Move a student into `class_id`, clearing the roll number for the new
    /// class. Only applies while the student is still in `from_class_id`.
    pub async fn move_to_class(
        pool: &PgPool,
        id: DbId,
        from_class_id: DbId,
        class_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE students SET class_id = $3, section_id = NULL, roll_number = 0 \
             WHERE id = $1 AND class_id = $2",
        )
        .bind(id)
        .bind(from_class_id)
        .bind(class_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
