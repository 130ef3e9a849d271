use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::info;

use super::StoreError;
use crate::predictor::{StatsStore, TeamId, NO_TEAM};

/// Postgres-backed match store.
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to the database and bring the schema up to date.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("database migrations applied");

        Ok(Self { pool })
    }

    /// Resolve a team name to its id.
    pub async fn team_id(&self, name: &str) -> Result<Option<TeamId>, StoreError> {
        let row = sqlx::query("SELECT id FROM teams WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.get::<i32, _>("id")))
    }

    async fn upsert_team(&self, name: &str) -> Result<TeamId, StoreError> {
        let row = sqlx::query(
            "INSERT INTO teams (name) VALUES ($1)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING id",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("id"))
    }

    /// Record a finished match, creating unseen teams on the fly. A match
    /// for the same pairing and date is stored only once.
    pub async fn upsert_match(
        &self,
        home_team: &str,
        away_team: &str,
        home_goals: u32,
        away_goals: u32,
        date: NaiveDate,
    ) -> Result<(), StoreError> {
        let home_id = self.upsert_team(home_team).await?;
        let away_id = self.upsert_team(away_team).await?;

        sqlx::query(
            "INSERT INTO matches (home_team, away_team, home_goals, away_goals, date)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (home_team, away_team, date) DO NOTHING",
        )
        .bind(home_id)
        .bind(away_id)
        .bind(home_goals as i32)
        .bind(away_goals as i32)
        .bind(date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Time of the most recent scraper run, if any.
    pub async fn last_scrape(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        let row = sqlx::query("SELECT last_scrape FROM stats ORDER BY id DESC LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.get("last_scrape")))
    }

    pub async fn record_scrape(&self, at: DateTime<Utc>) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO stats (last_scrape) VALUES ($1)")
            .bind(at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl StatsStore for Database {
    async fn average_goals_in_last_matches(
        &self,
        team_id: TeamId,
        window: u32,
    ) -> Result<f64, StoreError> {
        if team_id == NO_TEAM {
            return Ok(0.0);
        }

        let row = sqlx::query(
            r#"
            WITH appearances AS (
                SELECT home_goals AS goals, date FROM matches WHERE home_team = $1
                UNION ALL
                SELECT away_goals AS goals, date FROM matches WHERE away_team = $1
            )
            SELECT AVG(goals)::DOUBLE PRECISION AS avg_goals
            FROM (
                SELECT goals FROM appearances ORDER BY date DESC LIMIT $2
            ) last_matches
            "#,
        )
        .bind(team_id)
        .bind(i64::from(window))
        .fetch_one(&self.pool)
        .await?;

        // AVG over zero rows is NULL; a team without matches scores 0.
        let avg: Option<f64> = row.get("avg_goals");
        Ok(avg.unwrap_or(0.0))
    }

    async fn last_year_match_scores(
        &self,
        home_team_id: TeamId,
        away_team_id: TeamId,
    ) -> Result<Option<(u32, u32)>, StoreError> {
        if home_team_id == NO_TEAM || away_team_id == NO_TEAM {
            return Ok(None);
        }

        let row = sqlx::query(
            "SELECT home_goals, away_goals FROM matches
             WHERE home_team = $1 AND away_team = $2
             ORDER BY date DESC
             LIMIT 1",
        )
        .bind(home_team_id)
        .bind(away_team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| {
            (
                row.get::<i32, _>("home_goals") as u32,
                row.get::<i32, _>("away_goals") as u32,
            )
        }))
    }

    async fn current_season_leaderboard(&self) -> Result<HashMap<TeamId, u32>, StoreError> {
        let since = season_start(Utc::now().date_naive());

        let rows = sqlx::query(
            "SELECT home_team, away_team, home_goals, away_goals
             FROM matches
             WHERE date >= $1",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        let results: Vec<(TeamId, TeamId, i32, i32)> = rows
            .iter()
            .map(|row| {
                (
                    row.get("home_team"),
                    row.get("away_team"),
                    row.get("home_goals"),
                    row.get("away_goals"),
                )
            })
            .collect();

        Ok(tally_points(&results))
    }
}

/// First day of the current season: August 1 of this year, or of last
/// year when August 1 is still ahead of us.
fn season_start(today: NaiveDate) -> NaiveDate {
    let start = NaiveDate::from_ymd_opt(today.year(), 8, 1).expect("August 1 is a valid date");

    if today < start {
        NaiveDate::from_ymd_opt(today.year() - 1, 8, 1).expect("August 1 is a valid date")
    } else {
        start
    }
}

/// Win 3 points, draw 1 each. Teams without a win or draw never enter the
/// table.
fn tally_points(results: &[(TeamId, TeamId, i32, i32)]) -> HashMap<TeamId, u32> {
    let mut points = HashMap::new();

    for &(home, away, home_goals, away_goals) in results {
        match home_goals.cmp(&away_goals) {
            Ordering::Greater => *points.entry(home).or_insert(0) += 3,
            Ordering::Less => *points.entry(away).or_insert(0) += 3,
            Ordering::Equal => {
                *points.entry(home).or_insert(0) += 1;
                *points.entry(away).or_insert(0) += 1;
            }
        }
    }

    points
}
