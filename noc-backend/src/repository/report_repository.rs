// noc-backend/src/repository/report_repository.rs

//! 集計レポート用のクエリ
//!
//! 日付単位の集計は UTC の暦日で丸める。

use crate::domain::incident_status::IncidentStatus;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    DbBackend, DbConn, DbErr, EntityTrait, FromQueryResult, QueryOrder,
    QuerySelect, Statement,
};

#[derive(Debug, Clone, FromQueryResult)]
pub struct GroupCountRow {
    pub value: String,
    pub count: i64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct TimelineRow {
    pub date: NaiveDate,
    pub count: i64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct DeviceAlertCountRow {
    pub device_id: i32,
    pub name: String,
    pub alert_count: i64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct PeriodSummaryRow {
    pub total_alerts: i64,
    pub total_incidents: i64,
    pub resolved_incidents: i64,
    pub avg_resolution_hours: Option<f64>,
}

#[derive(Debug, FromQueryResult)]
struct AverageRow {
    avg_hours: Option<f64>,
}

/// 日別集計の対象
#[derive(Debug, Clone, Copy)]
pub enum TimelineSource {
    /// alerts.timestamp
    Alerts,
    /// incidents.created_at
    Incidents,
}

impl TimelineSource {
    fn table_and_column(self) -> (&'static str, &'static str) {
        match self {
            Self::Alerts => ("alerts", "timestamp"),
            Self::Incidents => ("incidents", "created_at"),
        }
    }
}

// 解決時間（時間単位）の平均。EXTRACT は numeric を返すため float8 に揃える
const AVG_RESOLUTION_HOURS: &str =
    r#"(AVG(EXTRACT(EPOCH FROM ("resolved_at" - "created_at"))) / 3600)::float8"#;

pub struct ReportRepository {
    db: DbConn,
}

impl ReportRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// 指定カラムの値ごとの件数（値の昇順）
    pub async fn count_grouped_by<E>(&self, column: E::Column) -> Result<Vec<GroupCountRow>, DbErr>
    where
        E: EntityTrait,
    {
        E::find()
            .select_only()
            .column_as(column, "value")
            .column_as(Expr::col(column).count(), "count")
            .group_by(column)
            .order_by_asc(column)
            .into_model::<GroupCountRow>()
            .all(&self.db)
            .await
    }

    /// `since` 以降の日別件数（日付の昇順、件数 0 の日は含まない）
    pub async fn daily_counts(
        &self,
        source: TimelineSource,
        since: DateTime<Utc>,
    ) -> Result<Vec<TimelineRow>, DbErr> {
        let (table, column) = source.table_and_column();
        let sql = format!(
            r#"SELECT ("{column}" AT TIME ZONE 'UTC')::date AS "date", COUNT(*) AS "count"
               FROM "{table}"
               WHERE "{column}" >= $1
               GROUP BY 1
               ORDER BY 1"#
        );

        TimelineRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [since.into()],
        ))
        .all(&self.db)
        .await
    }

    /// 解決済みインシデントの平均解決時間（対象が無ければ None）
    pub async fn average_resolution_hours(&self) -> Result<Option<f64>, DbErr> {
        let sql = format!(
            r#"SELECT {AVG_RESOLUTION_HOURS} AS "avg_hours"
               FROM "incidents"
               WHERE "status" = $1 AND "resolved_at" IS NOT NULL"#
        );

        let row = AverageRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [IncidentStatus::Resolved.as_str().into()],
        ))
        .one(&self.db)
        .await?;

        Ok(row.and_then(|r| r.avg_hours))
    }

    /// アラート件数の多い機器（アラートの無い機器も 0 件として含む）
    pub async fn devices_with_most_alerts(
        &self,
        limit: u64,
    ) -> Result<Vec<DeviceAlertCountRow>, DbErr> {
        let sql = r#"SELECT d."id" AS "device_id", d."name" AS "name", COUNT(a."id") AS "alert_count"
               FROM "devices" d
               LEFT JOIN "alerts" a ON a."device_id" = d."id"
               GROUP BY d."id", d."name"
               ORDER BY "alert_count" DESC, d."id" ASC
               LIMIT $1"#;

        DeviceAlertCountRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [(limit as i64).into()],
        ))
        .all(&self.db)
        .await
    }

    /// `[start, end)` の期間サマリー
    pub async fn period_summary(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PeriodSummaryRow, DbErr> {
        let sql = format!(
            r#"SELECT
                 (SELECT COUNT(*) FROM "alerts"
                   WHERE "timestamp" >= $1 AND "timestamp" < $2) AS "total_alerts",
                 (SELECT COUNT(*) FROM "incidents"
                   WHERE "created_at" >= $1 AND "created_at" < $2) AS "total_incidents",
                 (SELECT COUNT(*) FROM "incidents"
                   WHERE "status" = $3 AND "resolved_at" >= $1 AND "resolved_at" < $2) AS "resolved_incidents",
                 (SELECT {AVG_RESOLUTION_HOURS} FROM "incidents"
                   WHERE "status" = $3 AND "resolved_at" >= $1 AND "resolved_at" < $2) AS "avg_resolution_hours""#
        );

        PeriodSummaryRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                start.into(),
                end.into(),
                IncidentStatus::Resolved.as_str().into(),
            ],
        ))
        .one(&self.db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("period summary".to_string()))
    }
}
