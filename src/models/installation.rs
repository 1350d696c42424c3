//! Installation reports
//!
//! An installation is one app install on one device, identified by a UUID
//! chosen by the client.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::device::DeviceInfo;

/// Device description plus caller supplied extra fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallationInfo {
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
    pub app_version: String,
    pub device_vendor: String,
    pub device_name: String,
    pub os_name: String,
    pub os_version: String,
}

impl InstallationInfo {
    pub fn new(device: DeviceInfo, extra: BTreeMap<String, String>) -> Self {
        Self {
            extra,
            app_version: device.app_version,
            device_vendor: device.device_vendor,
            device_name: device.device_name,
            os_name: device.os_name,
            os_version: device.os_version,
        }
    }
}

/// Random version 4 installation id, e.g. `2e58dcd7-0628-47f3-9007-8e09415f70d1`
pub fn new_installation_uuid() -> String {
    let bits: u128 = rand::random();
    // Version 4 nibble and RFC 4122 variant bits
    let bits = (bits & !(0xf_u128 << 76)) | (0x4_u128 << 76);
    let bits = (bits & !(0x3_u128 << 62)) | (0x2_u128 << 62);

    let hex = format!("{:032x}", bits);
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}
