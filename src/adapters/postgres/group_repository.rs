//! PostgreSQL implementation of GroupRepository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{AccountId, DomainError, ErrorCode, GroupId};
use crate::domain::school::{group_label, Grade, Group, GroupAssignmentRow, TeacherAssignment};
use crate::ports::GroupRepository;

use super::errors::{corrupt_row, is_foreign_key_violation, map_db_error};

pub struct PostgresGroupRepository {
    pool: PgPool,
}

impl PostgresGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AssignmentRow {
    id: Uuid,
    grade: i16,
    letter: String,
    teacher_id: Option<Uuid>,
    teacher_name: Option<String>,
}

fn grade(value: i16) -> Result<Grade, DomainError> {
    Grade::new(value as i32).map_err(|e| corrupt_row("grade", e))
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, DomainError> {
        let row: Option<(Uuid, i16, String, Option<Uuid>)> =
            sqlx::query_as("SELECT id, grade, letter, teacher_id FROM groups WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_db_error("Failed to fetch group", e))?;

        row.map(|(id, g, letter, teacher)| {
            Ok(Group::reconstitute(
                GroupId::from_uuid(id),
                grade(g)?,
                letter,
                teacher.map(AccountId::from_uuid),
            ))
        })
        .transpose()
    }

    async fn list_assignments(&self) -> Result<Vec<GroupAssignmentRow>, DomainError> {
        let rows: Vec<AssignmentRow> = sqlx::query_as(
            r#"
            SELECT g.id, g.grade, g.letter, g.teacher_id, a.full_name AS teacher_name
            FROM groups g
            LEFT JOIN accounts a ON a.id = g.teacher_id
            ORDER BY g.grade, g.letter
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to list group assignments", e))?;

        rows.into_iter()
            .map(|row| {
                Ok(GroupAssignmentRow {
                    group_id: GroupId::from_uuid(row.id),
                    label: group_label(grade(row.grade)?, &row.letter),
                    teacher_id: row.teacher_id.map(AccountId::from_uuid),
                    teacher_name: row.teacher_name,
                })
            })
            .collect()
    }

    async fn save_assignments(&self, assignments: &[TeacherAssignment]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_error("Failed to begin transaction", e))?;

        for assignment in assignments {
            let result = sqlx::query("UPDATE groups SET teacher_id = $2 WHERE id = $1")
                .bind(assignment.group_id.as_uuid())
                .bind(assignment.teacher_id.as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    if is_foreign_key_violation(&e) {
                        return DomainError::new(
                            ErrorCode::AccountNotFound,
                            format!("Teacher not found: {}", assignment.teacher_id),
                        );
                    }
                    map_db_error("Failed to assign teacher", e)
                })?;

            if result.rows_affected() == 0 {
                // Dropping `tx` rolls back the earlier updates
                return Err(DomainError::new(
                    ErrorCode::GroupNotFound,
                    format!("Group not found: {}", assignment.group_id),
                ));
            }
        }

        tx.commit()
            .await
            .map_err(|e| map_db_error("Failed to commit assignments", e))?;

        Ok(())
    }
}
