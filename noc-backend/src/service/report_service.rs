// noc-backend/src/service/report_service.rs

use crate::api::dto::report_dto::{
    AlertStatsDto, DetailedReportDto, DetailedReportQuery, DeviceStatusReportDto,
    IncidentStatsDto, TimeRangeDto,
};
use crate::db::DbPool;
use crate::domain::{alert_model, device_model, incident_model};
use crate::error::AppResult;
use crate::log_operation_time;
use crate::repository::alert_repository::AlertRepository;
use crate::repository::incident_repository::IncidentRepository;
use crate::repository::report_repository::{ReportRepository, TimelineSource};
use crate::utils::error_helper::validation_error;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::sync::Arc;
use tracing::info;

/// アラートの日別推移を遡る日数
pub const ALERT_TIMELINE_DAYS: i64 = 7;
/// インシデントの日別推移を遡る日数
pub const INCIDENT_TIMELINE_DAYS: i64 = 30;
/// アラート件数ランキングの件数
pub const MOST_ALERTS_LIMIT: u64 = 10;

pub struct ReportService {
    repo: Arc<ReportRepository>,
    alert_repo: Arc<AlertRepository>,
    incident_repo: Arc<IncidentRepository>,
}

impl ReportService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            repo: Arc::new(ReportRepository::new(db_pool.clone())),
            alert_repo: Arc::new(AlertRepository::new(db_pool.clone())),
            incident_repo: Arc::new(IncidentRepository::new(db_pool)),
        }
    }

    pub async fn alert_stats(&self) -> AppResult<AlertStatsDto> {
        let by_severity = self
            .repo
            .count_grouped_by::<alert_model::Entity>(alert_model::Column::Severity)
            .await?;
        let by_status = self
            .repo
            .count_grouped_by::<alert_model::Entity>(alert_model::Column::Status)
            .await?;
        let timeline = self
            .repo
            .daily_counts(
                TimelineSource::Alerts,
                Utc::now() - Duration::days(ALERT_TIMELINE_DAYS),
            )
            .await?;

        Ok(AlertStatsDto {
            by_severity: by_severity.into_iter().map(Into::into).collect(),
            by_status: by_status.into_iter().map(Into::into).collect(),
            timeline: timeline.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn incident_stats(&self) -> AppResult<IncidentStatsDto> {
        let by_priority = self
            .repo
            .count_grouped_by::<incident_model::Entity>(incident_model::Column::Priority)
            .await?;
        let by_status = self
            .repo
            .count_grouped_by::<incident_model::Entity>(incident_model::Column::Status)
            .await?;
        let avg_resolution_time = self.repo.average_resolution_hours().await?;
        let timeline = self
            .repo
            .daily_counts(
                TimelineSource::Incidents,
                Utc::now() - Duration::days(INCIDENT_TIMELINE_DAYS),
            )
            .await?;

        Ok(IncidentStatsDto {
            by_priority: by_priority.into_iter().map(Into::into).collect(),
            by_status: by_status.into_iter().map(Into::into).collect(),
            avg_resolution_time: avg_resolution_time.unwrap_or(0.0),
            timeline: timeline.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn device_status(&self) -> AppResult<DeviceStatusReportDto> {
        let by_status = self
            .repo
            .count_grouped_by::<device_model::Entity>(device_model::Column::Status)
            .await?;
        let by_type = self
            .repo
            .count_grouped_by::<device_model::Entity>(device_model::Column::DeviceType)
            .await?;
        let most_alerts = self.repo.devices_with_most_alerts(MOST_ALERTS_LIMIT).await?;

        Ok(DeviceStatusReportDto {
            by_status: by_status.into_iter().map(Into::into).collect(),
            by_type: by_type.into_iter().map(Into::into).collect(),
            most_alerts: most_alerts.into_iter().map(Into::into).collect(),
        })
    }

    /// 期間指定の詳細レポート（終了日を含む）
    pub async fn detailed(&self, query: DetailedReportQuery) -> AppResult<DetailedReportDto> {
        let time_range = parse_time_range(&query)?;
        let (start, end) = time_range_bounds(&time_range);

        info!(
            start_date = %time_range.start_date,
            end_date = %time_range.end_date,
            "Generating detailed report"
        );

        let summary = log_operation_time!(
            self.repo.period_summary(start, end).await,
            "report_service::detailed::summary"
        )?;
        let alerts = self.alert_repo.find_in_range_with_device(start, end).await?;
        let incidents = self
            .incident_repo
            .find_in_range_with_device(start, end)
            .await?;

        Ok(DetailedReportDto {
            summary: summary.into(),
            alerts: alerts.into_iter().map(Into::into).collect(),
            incidents: incidents.into_iter().map(Into::into).collect(),
            time_range,
        })
    }
}

/// `YYYY-MM-DD` の開始日・終了日を解釈する。欠落・書式不正・逆転はいずれも 400
pub fn parse_time_range(query: &DetailedReportQuery) -> AppResult<TimeRangeDto> {
    let (Some(start), Some(end)) = (query.start_date.as_deref(), query.end_date.as_deref())
    else {
        return Err(validation_error(
            "startDate",
            "Start date and end date are required",
        ));
    };

    let start_date = parse_date("startDate", start)?;
    let end_date = parse_date("endDate", end)?;

    if end_date < start_date {
        return Err(validation_error(
            "endDate",
            "End date must not be before start date",
        ));
    }

    Ok(TimeRangeDto {
        start_date,
        end_date,
    })
}

fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| validation_error(field, "Date must be in YYYY-MM-DD format"))
}

/// 日付範囲を UTC の半開区間 `[start, end + 1日)` にする
pub fn time_range_bounds(range: &TimeRangeDto) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = range.start_date.and_time(chrono::NaiveTime::MIN).and_utc();
    let end = (range.end_date + Duration::days(1))
        .and_time(chrono::NaiveTime::MIN)
        .and_utc();
    (start, end)
}
