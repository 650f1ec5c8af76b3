//! 数据模型
//!
//! 定义所有存储相关的数据模型和更新结构：
//! - 管理员模型：AdminRecord, AdminUpdate
//! - 站点模型：SiteRecord, NewSite, SiteUpdate
//! - 设备模型：DeviceRecord, NewDevice, DeviceUpdate
//! - 录像机模型：RecorderRecord, NewRecorder, RecorderUpdate, RecorderCredential
//! - 公网配置模型：PublicNetRecord
//!
//! 绑定关系只存在于 `DeviceRecord.site_id`（站点外部标识，空串 = 未绑定）
//! 和 `RecorderRecord.site_id`（站点数字主键，0 = 未绑定）两个字段上，
//! 没有独立的关联表。

use serde::{Deserialize, Serialize};

/// 管理员记录。口令只以哈希形式存储。
#[derive(Debug, Clone)]
pub struct AdminRecord {
    pub admin_id: i64,
    pub username: String,
    pub password_hash: String,
}

/// 管理员更新输入（None 字段保持不变）。
#[derive(Debug, Clone)]
pub struct AdminUpdate {
    pub username: Option<String>,
    pub password_hash: Option<String>,
}

/// 站点记录。
///
/// `site_id` 是站点的外部标识；接受设备绑定的站点必须有非空 `site_id`。
#[derive(Debug, Clone)]
pub struct SiteRecord {
    pub id: i64,
    pub site_id: String,
    pub name: String,
    pub remark: String,
}

/// 站点创建输入（主键由存储层分配）。
#[derive(Debug, Clone)]
pub struct NewSite {
    pub site_id: String,
    pub name: String,
    pub remark: String,
}

/// 站点更新输入。
#[derive(Debug, Clone)]
pub struct SiteUpdate {
    pub site_id: Option<String>,
    pub name: Option<String>,
    pub remark: Option<String>,
}

/// 设备记录。
///
/// `site_id` 为所绑定站点的外部标识，空串表示未绑定；
/// 该字段只能由绑定引擎写入。
#[derive(Debug, Clone)]
pub struct DeviceRecord {
    pub id: i64,
    pub site_id: String,
    pub name: String,
    pub auth_service_remote_port: i32,
    pub ssh_remote_port: i32,
    pub active: bool,
}

/// 设备创建输入（创建时始终未绑定）。
#[derive(Debug, Clone)]
pub struct NewDevice {
    pub name: String,
    pub auth_service_remote_port: i32,
    pub ssh_remote_port: i32,
    pub active: bool,
}

/// 设备更新输入（不含 `site_id`）。
#[derive(Debug, Clone)]
pub struct DeviceUpdate {
    pub name: Option<String>,
    pub auth_service_remote_port: Option<i32>,
    pub ssh_remote_port: Option<i32>,
    pub active: Option<bool>,
}

/// 录像机账户凭证（以 JSON 文本形式存储）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderCredential {
    pub name: String,
    pub password: String,
}

/// 录像机记录。
///
/// `site_id` 为所绑定站点的数字主键，0 表示未绑定；
/// 该字段只能由绑定引擎写入。
#[derive(Debug, Clone)]
pub struct RecorderRecord {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub site_id: i64,
    pub admin_user: RecorderCredential,
    pub users: Vec<RecorderCredential>,
}

/// 录像机创建输入（创建时始终未绑定）。
#[derive(Debug, Clone)]
pub struct NewRecorder {
    pub name: String,
    pub url: String,
    pub admin_user: RecorderCredential,
    pub users: Vec<RecorderCredential>,
}

/// 录像机更新输入（不含 `site_id`）。
#[derive(Debug, Clone)]
pub struct RecorderUpdate {
    pub name: Option<String>,
    pub url: Option<String>,
    pub admin_user: Option<RecorderCredential>,
    pub users: Option<Vec<RecorderCredential>>,
}

/// 公网配置记录（全局单条，保存可达设备的外部 IP）。
#[derive(Debug, Clone)]
pub struct PublicNetRecord {
    pub id: i64,
    pub external_ip: String,
}
