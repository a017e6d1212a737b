// noc-backend/src/domain/alert_status.rs

crate::string_enum! {
    /// アラートの重要度
    AlertSeverity, "alert severity" {
        Critical => "Critical",
        Major => "Major",
        Warning => "Warning",
        Minor => "Minor",
        Info => "Info",
    }
}

crate::string_enum! {
    /// アラートの状態
    ///
    /// New は取り込み時の初期値。インシデントに紐付けられると
    /// 直前の状態に関係なく In Progress に上書きされる。
    AlertStatus, "alert status" {
        New => "New",
        Acknowledged => "Acknowledged",
        InProgress => "In Progress",
        Resolved => "Resolved",
    }
}

impl AlertStatus {
    /// インシデントへの紐付け時に強制される状態
    pub const LINKED: Self = Self::InProgress;

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved)
    }

    /// この更新で `resolution_timestamp` を打刻すべきか判定する
    ///
    /// インシデントと異なり直前の状態は見ない。解決済みが送られるたびに打刻し直す。
    pub fn stamps_resolution(next: Self) -> bool {
        next.is_resolved()
    }
}

impl Default for AlertStatus {
    fn default() -> Self {
        Self::New
    }
}
