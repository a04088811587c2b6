use crate::DbError;
use core_types::{
    Activity, Camper, CamperChanges, NewCamper, NewSignup, ScheduledSignup, Signup,
};
use sqlx::sqlite::{Sqlite, SqlitePool};
use sqlx::{Row, Transaction};

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It hands out units of work; all queries run inside one.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: SqlitePool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Opens a read-only transaction scoped to a single operation.
    pub async fn begin(&self) -> Result<UnitOfWork, DbError> {
        let tx = self.pool.begin().await?;
        Ok(UnitOfWork { tx })
    }

    /// Opens a transaction for an operation that writes.
    ///
    /// `BEGIN IMMEDIATE` takes the write lock up front, so the reads that
    /// precede the write see the snapshot the write is applied to. A second
    /// writer waits on the busy timeout instead of failing with
    /// `SQLITE_BUSY_SNAPSHOT` halfway through.
    pub async fn begin_write(&self) -> Result<UnitOfWork, DbError> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        Ok(UnitOfWork { tx })
    }
}

/// One operation's view of the store.
///
/// Reads see the operation's own uncommitted writes. Call [`UnitOfWork::commit`]
/// to make the writes durable; if the value is dropped first (an early `?`
/// return, a panic) the transaction is rolled back.
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    pub async fn commit(self) -> Result<(), DbError> {
        self.tx.commit().await?;
        Ok(())
    }

    pub async fn rollback(self) -> Result<(), DbError> {
        self.tx.rollback().await?;
        Ok(())
    }

    // --- Campers ---

    /// All campers in insertion order.
    pub async fn list_campers(&mut self) -> Result<Vec<Camper>, DbError> {
        let campers =
            sqlx::query_as::<_, Camper>("SELECT id, name, age FROM campers ORDER BY id ASC")
                .fetch_all(&mut *self.tx)
                .await?;
        Ok(campers)
    }

    pub async fn find_camper(&mut self, id: i64) -> Result<Option<Camper>, DbError> {
        let camper = sqlx::query_as::<_, Camper>("SELECT id, name, age FROM campers WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(camper)
    }

    /// The signups of one camper, oldest first, each joined with its activity.
    pub async fn camper_signups(
        &mut self,
        camper_id: i64,
    ) -> Result<Vec<ScheduledSignup>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.camper_id, s.activity_id, s.time, a.name AS activity_name
            FROM signups AS s
            JOIN activities AS a ON a.id = s.activity_id
            WHERE s.camper_id = ?
            ORDER BY s.id ASC
            "#,
        )
        .bind(camper_id)
        .fetch_all(&mut *self.tx)
        .await?;

        let signups = rows
            .into_iter()
            .map(|row| {
                let activity_id: i64 = row.get("activity_id");
                ScheduledSignup {
                    signup: Signup {
                        id: row.get("id"),
                        camper_id: row.get("camper_id"),
                        activity_id,
                        time: row.get("time"),
                    },
                    activity: Activity {
                        id: activity_id,
                        name: row.get("activity_name"),
                    },
                }
            })
            .collect();

        Ok(signups)
    }

    pub async fn insert_camper(&mut self, camper: &NewCamper) -> Result<Camper, DbError> {
        let created = sqlx::query_as::<_, Camper>(
            "INSERT INTO campers (name, age) VALUES (?, ?) RETURNING id, name, age",
        )
        .bind(&camper.name)
        .bind(camper.age)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(created)
    }

    /// Applies `changes` to a camper. Returns `None` when no camper has `id`.
    pub async fn update_camper(
        &mut self,
        id: i64,
        changes: &CamperChanges,
    ) -> Result<Option<Camper>, DbError> {
        let updated = sqlx::query_as::<_, Camper>(
            r#"
            UPDATE campers
            SET name = COALESCE(?, name), age = COALESCE(?, age)
            WHERE id = ?
            RETURNING id, name, age
            "#,
        )
        .bind(changes.name.as_deref())
        .bind(changes.age)
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(updated)
    }

    // --- Activities ---

    /// All activities in insertion order.
    pub async fn list_activities(&mut self) -> Result<Vec<Activity>, DbError> {
        let activities =
            sqlx::query_as::<_, Activity>("SELECT id, name FROM activities ORDER BY id ASC")
                .fetch_all(&mut *self.tx)
                .await?;
        Ok(activities)
    }

    pub async fn find_activity(&mut self, id: i64) -> Result<Option<Activity>, DbError> {
        let activity = sqlx::query_as::<_, Activity>("SELECT id, name FROM activities WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(activity)
    }

    pub async fn insert_activity(&mut self, name: &str) -> Result<Activity, DbError> {
        let created = sqlx::query_as::<_, Activity>(
            "INSERT INTO activities (name) VALUES (?) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(created)
    }

    /// Deletes an activity and, through the schema's cascade, every signup
    /// that books it. Returns `false` when no activity has `id`.
    pub async fn delete_activity(&mut self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = ?")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Signups ---

    /// Inserts a signup. A dangling `camper_id` or `activity_id` is refused by
    /// the foreign keys and reported as [`DbError::IntegrityViolation`].
    pub async fn insert_signup(&mut self, signup: &NewSignup) -> Result<Signup, DbError> {
        let created = sqlx::query_as::<_, Signup>(
            r#"
            INSERT INTO signups (camper_id, activity_id, time)
            VALUES (?, ?, ?)
            RETURNING id, camper_id, activity_id, time
            "#,
        )
        .bind(signup.camper_id)
        .bind(signup.activity_id)
        .bind(signup.time)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(created)
    }

    pub async fn find_signup(&mut self, id: i64) -> Result<Option<Signup>, DbError> {
        let signup = sqlx::query_as::<_, Signup>(
            "SELECT id, camper_id, activity_id, time FROM signups WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(signup)
    }

    pub async fn count_signups(&mut self) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM signups")
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(count)
    }

    /// Removes every record. Used when reseeding.
    pub async fn clear(&mut self) -> Result<(), DbError> {
        for statement in [
            "DELETE FROM signups",
            "DELETE FROM campers",
            "DELETE FROM activities",
        ] {
            sqlx::query(statement).execute(&mut *self.tx).await?;
        }
        Ok(())
    }
}
