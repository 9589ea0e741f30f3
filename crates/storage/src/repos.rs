use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::*;

// ─── Activity Queries ───────────────────────────────────────────────────────

const ACTIVITY_COLUMNS: &str = r#"
    SELECT id::TEXT AS id,
           wallet_id::TEXT AS wallet_id,
           activity_type,
           activity_description,
           transaction_signature,
           amount_sol::FLOAT8 AS amount_sol,
           created_at
    FROM wallet_activities
    "#;

/// Build the recent-activity query: failed records excluded, newest first.
pub fn recent_activities_query(filter: ActivityFilter, limit: i64) -> QueryBuilder<'static, Postgres> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(ACTIVITY_COLUMNS);

    qb.push("WHERE activity_type NOT ILIKE '%failed%'");

    match filter {
        ActivityFilter::All => {}
        ActivityFilter::Buy => {
            qb.push(" AND (activity_type ILIKE '%buy%' OR activity_type ILIKE '%bought%')");
        }
        ActivityFilter::Claim => {
            qb.push(" AND activity_type ILIKE '%claim%'");
        }
    }

    // The limit is a clamped integer, so it is written inline.
    qb.push(" ORDER BY created_at DESC LIMIT ");
    qb.push(limit.clamp(0, MAX_LIMIT));
    qb
}

/// Get the most recent activities matching `filter`.
pub async fn get_recent_activities(
    pool: &PgPool,
    filter: ActivityFilter,
    limit: i64,
) -> Result<Vec<Activity>, sqlx::Error> {
    let mut qb = recent_activities_query(filter, limit);
    let activities = qb
        .build_query_as::<Activity>()
        .fetch_all(pool)
        .await?;

    tracing::debug!(
        filter = filter.as_str(),
        limit,
        count = activities.len(),
        "Fetched recent activities"
    );
    Ok(activities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_filter_excludes_failed_and_orders_newest_first() {
        for filter in [ActivityFilter::All, ActivityFilter::Buy, ActivityFilter::Claim] {
            let qb = recent_activities_query(filter, 20);
            let sql = qb.sql();
            assert!(sql.contains("FROM wallet_activities"));
            assert!(sql.contains("activity_type NOT ILIKE '%failed%'"));
            assert!(sql.trim_end().ends_with("ORDER BY created_at DESC LIMIT 20"));
        }
    }

    #[test]
    fn limit_is_capped_in_query() {
        assert!(recent_activities_query(ActivityFilter::All, 500).sql().ends_with("LIMIT 50"));
        assert!(recent_activities_query(ActivityFilter::Buy, 7).sql().ends_with("LIMIT 7"));
        assert!(recent_activities_query(ActivityFilter::Claim, 0).sql().ends_with("LIMIT 0"));
        assert!(recent_activities_query(ActivityFilter::All, -3).sql().ends_with("LIMIT 0"));
    }

    #[test]
    fn buy_filter_matches_buy_or_bought() {
        let qb = recent_activities_query(ActivityFilter::Buy, 20);
        assert!(
            qb.sql()
                .contains("(activity_type ILIKE '%buy%' OR activity_type ILIKE '%bought%')")
        );
        assert!(!qb.sql().contains("%claim%"));
    }

    #[test]
    fn claim_filter_matches_claim_only() {
        let qb = recent_activities_query(ActivityFilter::Claim, 20);
        assert!(qb.sql().contains("AND activity_type ILIKE '%claim%'"));
        assert!(!qb.sql().contains("%buy%"));
    }

    #[test]
    fn all_filter_adds_no_type_predicate() {
        let qb = recent_activities_query(ActivityFilter::All, 20);
        assert!(!qb.sql().contains("%buy%"));
        assert!(!qb.sql().contains("%claim%"));
    }

    /// Runs against a real Postgres: `DATABASE_URL=... cargo test -- --ignored`.
    ///
    /// Uses a temporary `wallet_activities` table on a single-connection pool,
    /// which shadows any real table of the same name for that session only.
    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn filters_and_orders_against_postgres() {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            return;
        };
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(1)
            .connect(&url)
            .await
            .unwrap();

        sqlx::query(
            r#"
            CREATE TEMPORARY TABLE wallet_activities (
                id BIGSERIAL PRIMARY KEY,
                wallet_id TEXT,
                activity_type TEXT,
                activity_description TEXT,
                transaction_signature TEXT,
                amount_sol NUMERIC,
                created_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        let rows = [
            ("Self-Buy-FAILED", "Bought own token (NOPE)", 1),
            ("bought", "Bought own token (DOGE)", 2),
            ("BUY", "Manual buy", 3),
            ("claim", "Claimed fees", 4),
            ("target-buy", "Bought target token (MEME)", 5),
            ("claim_failed", "Claim failed", 6),
        ];
        for (kind, description, minutes_ago) in rows {
            sqlx::query(
                r#"
                INSERT INTO wallet_activities
                    (wallet_id, activity_type, activity_description, transaction_signature, amount_sol, created_at)
                VALUES ('w1', $1, $2, 'sig', 0.03125, NOW() - make_interval(mins => $3))
                "#,
            )
            .bind(kind)
            .bind(description)
            .bind(minutes_ago)
            .execute(&pool)
            .await
            .unwrap();
        }

        let types = |activities: Vec<Activity>| -> Vec<String> {
            activities.into_iter().map(|a| a.activity_type).collect()
        };

        let buys = get_recent_activities(&pool, ActivityFilter::Buy, 20).await.unwrap();
        assert_eq!(buys[0].token_name().as_deref(), Some("DOGE"));
        assert_eq!(buys[0].amount_sol, Some(0.03125));
        assert_eq!(types(buys), ["bought", "BUY", "target-buy"]);

        let all = get_recent_activities(&pool, ActivityFilter::All, 20).await.unwrap();
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(types(all), ["bought", "BUY", "claim", "target-buy"]);

        let claims = get_recent_activities(&pool, ActivityFilter::Claim, 20).await.unwrap();
        assert_eq!(types(claims), ["claim"]);

        let capped = get_recent_activities(&pool, ActivityFilter::All, 2).await.unwrap();
        assert_eq!(types(capped), ["bought", "BUY"]);

        let none = get_recent_activities(&pool, ActivityFilter::All, 0).await.unwrap();
        assert!(none.is_empty());
    }
}
