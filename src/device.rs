//! Device description for installation reports
//!
//! Gathered once from the host system. Apps running on real devices can
//! supply their own values through `DeviceInfoSource`.

use serde::{Deserialize, Serialize};
use sysinfo::System;

use crate::build_info::BuildInfo;

const UNKNOWN: &str = "unknown";

/// Device and app fields reported with an installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub app_version: String,
    pub device_vendor: String,
    pub device_name: String,
    pub os_name: String,
    pub os_version: String,
}

/// Source of device information
pub trait DeviceInfoSource: Send + Sync {
    fn device_info(&self) -> DeviceInfo;
}

/// Reads device information from the local system
#[derive(Debug, Clone, Default)]
pub struct SystemDeviceInfo;

impl DeviceInfoSource for SystemDeviceInfo {
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            app_version: BuildInfo::current().readable_version(),
            device_vendor: System::distribution_id(),
            device_name: System::host_name().unwrap_or_else(|| UNKNOWN.to_string()),
            os_name: System::name().unwrap_or_else(|| UNKNOWN.to_string()),
            os_version: System::os_version().unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}

/// Fixed device information, for embedding apps and tests
#[derive(Debug, Clone)]
pub struct StaticDeviceInfo(pub DeviceInfo);

impl DeviceInfoSource for StaticDeviceInfo {
    fn device_info(&self) -> DeviceInfo {
        self.0.clone()
    }
}
