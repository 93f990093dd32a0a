use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Education, Experience, Profile, Social, UserRef, UserSummary};
use crate::database::store::ProfileStore;

const PROFILE_COLUMNS: &str = "p.id, p.user_id, p.company, p.website, p.location, p.status, p.skills, \
     p.bio, p.githubusername, p.experience, p.education, p.social, p.date";

/// Profiles live in one row each, sub-lists and social links as JSONB
pub struct PgProfileStore {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct ProfileRow {
    id: Uuid,
    user_id: Uuid,
    company: Option<String>,
    website: Option<String>,
    location: Option<String>,
    status: String,
    skills: Vec<String>,
    bio: Option<String>,
    githubusername: Option<String>,
    experience: Json<Vec<Experience>>,
    education: Json<Vec<Education>>,
    social: Json<Social>,
    date: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct PopulatedRow {
    #[sqlx(flatten)]
    profile: ProfileRow,
    owner_name: Option<String>,
    owner_avatar: Option<String>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            user: UserRef::Id(row.user_id),
            company: row.company,
            website: row.website,
            location: row.location,
            status: row.status,
            skills: row.skills,
            bio: row.bio,
            githubusername: row.githubusername,
            experience: row.experience.0,
            education: row.education.0,
            social: row.social.0,
            date: row.date,
        }
    }
}

impl From<PopulatedRow> for Profile {
    fn from(row: PopulatedRow) -> Self {
        let owner_id = row.profile.user_id;
        // LEFT JOIN: a missing owner leaves the bare id in place
        let summary = row.owner_name.map(|name| UserSummary {
            id: owner_id,
            name,
            avatar: row.owner_avatar,
        });
        Profile::from(row.profile).populate(summary)
    }
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the tables this service relies on when they are missing.
    ///
    /// `profiles.user_id` carries no foreign key: a profile may exist before
    /// its user row, and deletion removes both rows explicitly.
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                avatar TEXT,
                date TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                id UUID PRIMARY KEY,
                user_id UUID NOT NULL UNIQUE,
                company TEXT,
                website TEXT,
                location TEXT,
                status TEXT NOT NULL,
                skills TEXT[] NOT NULL DEFAULT '{}',
                bio TEXT,
                githubusername TEXT,
                experience JSONB NOT NULL DEFAULT '[]'::jsonb,
                education JSONB NOT NULL DEFAULT '[]'::jsonb,
                social JSONB NOT NULL DEFAULT '{}'::jsonb,
                date TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        ];

        for statement in statements {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        info!("Profile schema ready");
        Ok(())
    }

    fn populated_select(filter: &str) -> String {
        format!(
            "SELECT {}, u.name AS owner_name, u.avatar AS owner_avatar \
             FROM profiles p LEFT JOIN users u ON u.id = p.user_id {}",
            PROFILE_COLUMNS, filter
        )
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, DatabaseError> {
        let sql = format!("SELECT {} FROM profiles p WHERE p.user_id = $1", PROFILE_COLUMNS);
        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Profile::from))
    }

    async fn find_populated(&self, user_id: Uuid) -> Result<Option<Profile>, DatabaseError> {
        let sql = Self::populated_select("WHERE p.user_id = $1");
        let row = sqlx::query_as::<_, PopulatedRow>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Profile::from))
    }

    async fn list_populated(&self) -> Result<Vec<Profile>, DatabaseError> {
        let sql = Self::populated_select("ORDER BY p.date, p.id");
        let rows = sqlx::query_as::<_, PopulatedRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn save_profile(&self, profile: &Profile) -> Result<Profile, DatabaseError> {
        // id and date belong to the first insert and survive later saves
        let sql = format!(
            r#"
            INSERT INTO profiles AS p
                (id, user_id, company, website, location, status, skills,
                 bio, githubusername, experience, education, social, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (user_id) DO UPDATE SET
                company = EXCLUDED.company,
                website = EXCLUDED.website,
                location = EXCLUDED.location,
                status = EXCLUDED.status,
                skills = EXCLUDED.skills,
                bio = EXCLUDED.bio,
                githubusername = EXCLUDED.githubusername,
                experience = EXCLUDED.experience,
                education = EXCLUDED.education,
                social = EXCLUDED.social
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );

        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(profile.id)
            .bind(profile.owner())
            .bind(&profile.company)
            .bind(&profile.website)
            .bind(&profile.location)
            .bind(&profile.status)
            .bind(&profile.skills)
            .bind(&profile.bio)
            .bind(&profile.githubusername)
            .bind(Json(&profile.experience))
            .bind(Json(&profile.education))
            .bind(Json(&profile.social))
            .bind(profile.date)
            .fetch_one(&self.pool)
            .await?;

        Ok(Profile::from(row))
    }

    async fn delete_profile(&self, user_id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
