//! 内存存储实现模块
//!
//! 仅用于本地演示和测试。
//!
//! 与 Postgres 实现不同，内存实现用一个 [`InMemoryStore`] 结构体实现
//! 全部存储接口：绑定事务需要在同一份数据上跨实体（站点/设备/录像机）
//! 做一致性检查，单一图数据让测试不需要拼装多个独立存储。
//!
//! 并发模型：整个图数据由一把 tokio 异步互斥锁保护；
//! 绑定事务持有锁直到提交或丢弃，写入在提交时统一生效。

pub mod admin;
pub mod binding;
pub mod device;
pub mod public_net;
pub mod recorder;
pub mod site;

use crate::models::{AdminRecord, DeviceRecord, PublicNetRecord, RecorderRecord, SiteRecord};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// 全部实体共享的图数据。
#[derive(Default)]
pub(crate) struct GraphData {
    pub(crate) admins: HashMap<i64, AdminRecord>,
    pub(crate) sites: HashMap<i64, SiteRecord>,
    pub(crate) devices: HashMap<i64, DeviceRecord>,
    pub(crate) recorders: HashMap<i64, RecorderRecord>,
    pub(crate) public_net: Option<PublicNetRecord>,
    pub(crate) next_admin_id: i64,
    pub(crate) next_site_id: i64,
    pub(crate) next_device_id: i64,
    pub(crate) next_recorder_id: i64,
}

/// 主键分配：单调递增，删除后不复用。
pub(crate) fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// 内存存储
///
/// 一个实例同时实现 AdminStore、SiteStore、DeviceStore、RecorderStore、
/// PublicNetStore 与 BindingStore。
pub struct InMemoryStore {
    pub(crate) inner: Arc<Mutex<GraphData>>,
}

impl InMemoryStore {
    /// 创建空的内存存储
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(GraphData::default())),
        }
    }

    /// 内置 admin 账户
    ///
    /// 创建包含默认 admin 用户（口令 123456，旧格式明文存储，
    /// 首次登录成功后升级为 argon2 哈希）的存储。
    pub fn with_default_admin() -> Self {
        let mut data = GraphData::default();
        let admin_id = next_id(&mut data.next_admin_id);
        data.admins.insert(
            admin_id,
            AdminRecord {
                admin_id,
                username: "admin".to_string(),
                password_hash: "123456".to_string(),
            },
        );
        Self {
            inner: Arc::new(Mutex::new(data)),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
