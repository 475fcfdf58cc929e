//! Repository for the `sequences` table (named identifier counters).

use regsuite_core::sequence::{self, SequenceDef};
use regsuite_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::sequence::{Sequence, UpdateSequence};

/// Column list for `sequences` queries.
const COLUMNS: &str = "\
    id, code, name, prefix, padding, number_next, number_increment, \
    created_at, updated_at";

/// Hands out identifiers and manages counter definitions.
pub struct SequenceRepo;

impl SequenceRepo {
    /// Issue the next identifier for `code`.
    ///
    /// The increment and the read happen in one statement, so concurrent
    /// callers never receive the same number. Well-known counters whose row
    /// is missing are created on first use; an unknown code with no row
    /// yields `RowNotFound`.
    pub async fn next_by_code<'e, E>(executor: E, code: &str) -> Result<String, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let (prefix, padding, number): (String, i32, i64) = match sequence::definition_for(code) {
            Some(def) => {
                sqlx::query_as(
                    "INSERT INTO sequences \
                        (code, name, prefix, padding, number_next, number_increment) \
                     VALUES ($1, $2, $3, $4, 2, 1) \
                     ON CONFLICT (code) DO UPDATE \
                        SET number_next = sequences.number_next + sequences.number_increment \
                     RETURNING prefix, padding, number_next - number_increment",
                )
                .bind(def.code)
                .bind(def.name)
                .bind(def.prefix)
                .bind(def.padding)
                .fetch_one(executor)
                .await?
            }
            None => {
                sqlx::query_as(
                    "UPDATE sequences SET number_next = number_next + number_increment \
                     WHERE code = $1 \
                     RETURNING prefix, padding, number_next - number_increment",
                )
                .bind(code)
                .fetch_one(executor)
                .await?
            }
        };
        Ok(sequence::format_sequence(&prefix, padding, number))
    }

    /// Keep a client-supplied identifier, or draw one from `def`'s counter
    /// when it is missing, blank or `"New"`.
    pub async fn assign<'e, E>(
        executor: E,
        def: &SequenceDef,
        supplied: Option<&str>,
    ) -> Result<String, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        match supplied {
            Some(value) if !sequence::needs_assignment(Some(value)) => {
                Ok(value.trim().to_string())
            }
            _ => Self::next_by_code(executor, def.code).await,
        }
    }

    /// List all counters ordered by code.
    pub async fn list(pool: &PgPool) -> Result<Vec<Sequence>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sequences ORDER BY code");
        sqlx::query_as::<_, Sequence>(&query).fetch_all(pool).await
    }

    /// Find a counter by code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Sequence>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sequences WHERE code = $1");
        sqlx::query_as::<_, Sequence>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Update a counter's label, prefix, padding or step.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSequence,
    ) -> Result<Option<Sequence>, sqlx::Error> {
        let query = format!(
            "UPDATE sequences SET
                name = COALESCE($2, name),
                prefix = COALESCE($3, prefix),
                padding = COALESCE($4, padding),
                number_increment = COALESCE($5, number_increment)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sequence>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.prefix)
            .bind(input.padding)
            .bind(input.number_increment)
            .fetch_optional(pool)
            .await
    }
}
