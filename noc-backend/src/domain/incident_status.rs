// noc-backend/src/domain/incident_status.rs

crate::string_enum! {
    /// インシデントの優先度
    IncidentPriority, "incident priority" {
        Critical => "Critical",
        High => "High",
        Medium => "Medium",
        Low => "Low",
    }
}

crate::string_enum! {
    /// インシデントの状態
    ///
    /// 遷移の制約はなく、どの状態からどの状態へも更新できる。
    /// 守るべきなのは `resolved_at` の設定タイミングのみ。
    IncidentStatus, "incident status" {
        Open => "Open",
        InProgress => "In Progress",
        Resolved => "Resolved",
        Closed => "Closed",
    }
}

impl IncidentStatus {
    /// ステータスが解決済みかチェック
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved)
    }

    /// この更新で `resolved_at` を打刻すべきか判定する
    ///
    /// 更新前のステータスが解決済みでなく、新しいステータスが解決済みの場合のみ。
    /// 解決済みへの再送信では打刻し直さない。
    pub fn stamps_resolution(previous: Option<Self>, next: Self) -> bool {
        next.is_resolved() && !previous.is_some_and(|p| p.is_resolved())
    }
}

impl Default for IncidentStatus {
    fn default() -> Self {
        Self::Open
    }
}
