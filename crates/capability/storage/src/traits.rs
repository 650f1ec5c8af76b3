//! 存储接口 Trait 定义
//!
//! 定义所有资源存储的异步接口：
//! - AdminStore：管理员存储
//! - SiteStore：站点存储
//! - DeviceStore：设备存储
//! - RecorderStore：录像机存储
//! - PublicNetStore：公网配置存储
//! - BindingStore / BindingTxn：绑定事务边界
//!
//! 设计原则：
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发
//! - 绑定关系字段（设备/录像机的 site_id）只通过 BindingTxn 写入，
//!   普通 CRUD 接口不提供修改入口

use crate::error::StorageError;
use crate::models::{
    AdminRecord, AdminUpdate, DeviceRecord, DeviceUpdate, NewDevice, NewRecorder, NewSite,
    PublicNetRecord, RecorderRecord, RecorderUpdate, SiteRecord, SiteUpdate,
};
use async_trait::async_trait;

/// 管理员存储接口
///
/// 提供管理员查询与 CRUD 操作（登录凭证的唯一事实来源）。
/// 删除为软删除：记录保留主键，对所有读取接口不可见。
#[async_trait]
pub trait AdminStore: Send + Sync {
    /// 根据用户名查找管理员
    async fn find_by_username(&self, username: &str)
    -> Result<Option<AdminRecord>, StorageError>;

    /// 根据主键查找管理员
    async fn find_admin(&self, admin_id: i64) -> Result<Option<AdminRecord>, StorageError>;

    /// 分页列出管理员，返回记录与总数
    async fn list_admins(
        &self,
        page_num: u32,
        page_size: u32,
        asc: bool,
    ) -> Result<(Vec<AdminRecord>, u64), StorageError>;

    /// 创建管理员（用户名唯一）
    async fn create_admin(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<AdminRecord, StorageError>;

    /// 更新管理员
    async fn update_admin(
        &self,
        admin_id: i64,
        update: AdminUpdate,
    ) -> Result<Option<AdminRecord>, StorageError>;

    /// 软删除管理员
    async fn delete_admin(&self, admin_id: i64) -> Result<bool, StorageError>;

    /// 更新口令哈希（旧格式口令升级时使用）
    async fn update_password_hash(
        &self,
        admin_id: i64,
        password_hash: &str,
    ) -> Result<bool, StorageError>;

    /// 统计管理员数量（启动时判断是否需要初始化默认账户）
    async fn count_admins(&self) -> Result<u64, StorageError>;
}

/// 站点存储接口
#[async_trait]
pub trait SiteStore: Send + Sync {
    /// 列出所有站点
    async fn list_sites(&self) -> Result<Vec<SiteRecord>, StorageError>;

    /// 根据主键查找站点
    async fn find_site(&self, id: i64) -> Result<Option<SiteRecord>, StorageError>;

    /// 根据外部标识查找站点
    async fn find_site_by_external_id(
        &self,
        site_id: &str,
    ) -> Result<Option<SiteRecord>, StorageError>;

    /// 创建站点
    async fn create_site(&self, site: NewSite) -> Result<SiteRecord, StorageError>;

    /// 更新站点
    async fn update_site(
        &self,
        id: i64,
        update: SiteUpdate,
    ) -> Result<Option<SiteRecord>, StorageError>;

    /// 删除站点
    async fn delete_site(&self, id: i64) -> Result<bool, StorageError>;
}

/// 设备存储接口
///
/// 不提供绑定字段的写入；设备 ↔ 站点关系由 BindingTxn 维护。
#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// 列出设备（可按站点外部标识过滤）
    async fn list_devices(
        &self,
        site_id: Option<&str>,
    ) -> Result<Vec<DeviceRecord>, StorageError>;

    /// 根据主键查找设备
    async fn find_device(&self, id: i64) -> Result<Option<DeviceRecord>, StorageError>;

    /// 创建设备
    async fn create_device(&self, device: NewDevice) -> Result<DeviceRecord, StorageError>;

    /// 更新设备
    async fn update_device(
        &self,
        id: i64,
        update: DeviceUpdate,
    ) -> Result<Option<DeviceRecord>, StorageError>;

    /// 删除设备
    async fn delete_device(&self, id: i64) -> Result<bool, StorageError>;

    /// 统计绑定到指定站点（外部标识）的设备数量
    async fn count_devices_for_site(&self, site_id: &str) -> Result<u64, StorageError>;
}

/// 录像机存储接口
///
/// 不提供绑定字段的写入；录像机 ↔ 站点关系由 BindingTxn 维护。
#[async_trait]
pub trait RecorderStore: Send + Sync {
    /// 列出所有录像机
    async fn list_recorders(&self) -> Result<Vec<RecorderRecord>, StorageError>;

    /// 根据主键查找录像机
    async fn find_recorder(&self, id: i64) -> Result<Option<RecorderRecord>, StorageError>;

    /// 列出绑定到指定站点（数字主键）的录像机
    async fn list_recorders_for_site(
        &self,
        site_id: i64,
    ) -> Result<Vec<RecorderRecord>, StorageError>;

    /// 创建录像机
    async fn create_recorder(
        &self,
        recorder: NewRecorder,
    ) -> Result<RecorderRecord, StorageError>;

    /// 更新录像机
    async fn update_recorder(
        &self,
        id: i64,
        update: RecorderUpdate,
    ) -> Result<Option<RecorderRecord>, StorageError>;

    /// 删除录像机
    async fn delete_recorder(&self, id: i64) -> Result<bool, StorageError>;
}

/// 公网配置存储接口
#[async_trait]
pub trait PublicNetStore: Send + Sync {
    /// 获取当前公网配置（不存在返回 None）
    async fn get_public_net(&self) -> Result<Option<PublicNetRecord>, StorageError>;

    /// 创建或更新公网配置
    async fn upsert_public_net(
        &self,
        external_ip: &str,
    ) -> Result<PublicNetRecord, StorageError>;
}

/// 绑定事务
///
/// 一次绑定状态迁移的全部读检查与单次写入都发生在同一个事务内。
/// 未 commit 即丢弃的事务回滚，不留下部分写入。
#[async_trait]
pub trait BindingTxn: Send {
    /// 读取站点
    async fn get_site(&mut self, site_id: i64) -> Result<Option<SiteRecord>, StorageError>;

    /// 读取设备（Postgres 实现对该行加更新锁）
    async fn get_device(&mut self, device_id: i64)
    -> Result<Option<DeviceRecord>, StorageError>;

    /// 读取录像机（Postgres 实现对该行加更新锁）
    async fn get_recorder(
        &mut self,
        recorder_id: i64,
    ) -> Result<Option<RecorderRecord>, StorageError>;

    /// 写入设备的站点外部标识（空串 = 解绑）
    async fn save_device_site(
        &mut self,
        device_id: i64,
        site_id: &str,
    ) -> Result<(), StorageError>;

    /// 写入录像机的站点数字主键（0 = 解绑）
    async fn save_recorder_site(
        &mut self,
        recorder_id: i64,
        site_id: i64,
    ) -> Result<(), StorageError>;

    /// 提交事务
    async fn commit(self: Box<Self>) -> Result<(), StorageError>;
}

/// 绑定事务入口
#[async_trait]
pub trait BindingStore: Send + Sync {
    /// 开启一次绑定事务
    async fn begin(&self) -> Result<Box<dyn BindingTxn>, StorageError>;
}
