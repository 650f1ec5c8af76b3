//! PostgreSQL 存储实现模块
//!
//! 生产环境使用。包含以下实现：
//! - AdminStore: PgAdminStore（软删除）
//! - SiteStore: PgSiteStore
//! - DeviceStore: PgDeviceStore
//! - RecorderStore: PgRecorderStore（凭证以 JSON 文本列存储）
//! - PublicNetStore: PgPublicNetStore
//! - BindingStore: PgBindingStore（select … for update + 事务提交）
//!
//! 所有 SQL 查询使用参数绑定，防止 SQL 注入。

pub mod admin;
pub mod binding;
pub mod device;
pub mod public_net;
pub mod recorder;
pub mod site;

pub use admin::PgAdminStore;
pub use binding::PgBindingStore;
pub use device::PgDeviceStore;
pub use public_net::PgPublicNetStore;
pub use recorder::PgRecorderStore;
pub use site::PgSiteStore;
