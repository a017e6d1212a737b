// noc-backend/src/domain/device_status.rs

crate::string_enum! {
    /// 監視対象機器の種別
    DeviceType, "device type" {
        Router => "Router",
        Switch => "Switch",
        Firewall => "Firewall",
        Server => "Server",
        Workstation => "Workstation",
        Other => "Other",
    }
}

crate::string_enum! {
    /// 監視対象機器の稼働状態
    DeviceStatus, "device status" {
        Active => "Active",
        Warning => "Warning",
        Critical => "Critical",
        Maintenance => "Maintenance",
        Offline => "Offline",
    }
}
