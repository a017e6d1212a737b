// noc-backend/src/api/dto/report_dto.rs
use crate::api::dto::alert_dto::AlertDto;
use crate::api::dto::incident_dto::IncidentDto;
use crate::repository::report_repository::{
    DeviceAlertCountRow, GroupCountRow, PeriodSummaryRow, TimelineRow,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// グループごとの件数
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub value: String,
    pub count: i64,
}

/// 日別件数（UTC日付）
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub count: i64,
}

impl From<GroupCountRow> for GroupCount {
    fn from(row: GroupCountRow) -> Self {
        Self {
            value: row.value,
            count: row.count,
        }
    }
}

impl From<TimelineRow> for TimelinePoint {
    fn from(row: TimelineRow) -> Self {
        Self {
            date: row.date,
            count: row.count,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AlertStatsDto {
    pub by_severity: Vec<GroupCount>,
    pub by_status: Vec<GroupCount>,
    pub timeline: Vec<TimelinePoint>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IncidentStatsDto {
    pub by_priority: Vec<GroupCount>,
    pub by_status: Vec<GroupCount>,
    /// 解決済みインシデントの平均解決時間（時間単位、対象なしは 0）
    pub avg_resolution_time: f64,
    pub timeline: Vec<TimelinePoint>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceAlertCount {
    pub device_id: i32,
    pub name: String,
    pub alert_count: i64,
}

impl From<DeviceAlertCountRow> for DeviceAlertCount {
    fn from(row: DeviceAlertCountRow) -> Self {
        Self {
            device_id: row.device_id,
            name: row.name,
            alert_count: row.alert_count,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatusReportDto {
    pub by_status: Vec<GroupCount>,
    pub by_type: Vec<GroupCount>,
    pub most_alerts: Vec<DeviceAlertCount>,
}

/// `?startDate=YYYY-MM-DD&endDate=YYYY-MM-DD`
///
/// 欠落と書式不正はどちらも 400 にするため、文字列のまま受け取りサービス層で解釈する。
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct DetailedReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummaryDto {
    pub total_alerts: i64,
    pub total_incidents: i64,
    pub resolved_incidents: i64,
    pub avg_resolution_hours: Option<f64>,
}

impl From<PeriodSummaryRow> for ReportSummaryDto {
    fn from(row: PeriodSummaryRow) -> Self {
        Self {
            total_alerts: row.total_alerts,
            total_incidents: row.total_incidents,
            resolved_incidents: row.resolved_incidents,
            avg_resolution_hours: row.avg_resolution_hours,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangeDto {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DetailedReportDto {
    pub summary: ReportSummaryDto,
    pub alerts: Vec<AlertDto>,
    pub incidents: Vec<IncidentDto>,
    pub time_range: TimeRangeDto,
}
