//! # ICCTV Storage 模块
//!
//! 本模块提供统一的数据存储抽象层，支持多种存储后端实现。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：定义所有资源存储的异步 Trait 接口
//! 2. **数据模型层** (`models.rs`)：定义存储相关的数据结构
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 4. **连接管理层** (`connection.rs`)：数据库连接池管理
//! 5. **实现层**：
//!    - `in_memory/`：内存存储实现（用于测试和演示）
//!    - `postgres/`：PostgreSQL 存储实现（生产环境使用）
//!
//! ## 绑定事务
//!
//! 设备/录像机与站点的绑定关系分别编码在 `DeviceRecord.site_id` 与
//! `RecorderRecord.site_id` 字段上。这两个字段不走普通 CRUD 接口，
//! 只能通过 [`BindingStore::begin`] 开启的 [`BindingTxn`] 写入：
//! 一次状态迁移的读检查与写入在同一事务中执行，
//! Postgres 实现用 `select … for update` 锁定目标行，
//! 内存实现用单个异步互斥锁串行化所有迁移。
//! 这样两个并发的绑定请求不可能同时观察到"未绑定"后各写各的。
//!
//! ## 实现说明
//!
//! - `in_memory::InMemoryStore`：一个结构体实现全部存储接口，
//!   所有实体共享一份图数据，便于测试绑定事务跨实体的一致性。
//! - `postgres::Pg*Store`：基于 sqlx 的参数化查询；管理员删除为软删除
//!   （`deleted_at` 置位，读取接口过滤）。录像机凭证以 JSON 文本列存储。

// 模块导出：将子模块的内容导出到 crate 根目录
pub mod connection;
pub mod error;
pub mod in_memory;
pub mod models;
pub mod postgres;
pub mod traits;

// 导出常用类型到 crate 根目录，方便外部引用
pub use connection::*;
pub use error::*;
pub use models::*;
pub use traits::*;

// 导出内存存储实现类型
pub use in_memory::InMemoryStore;

// 导出 PostgreSQL 存储实现类型
pub use postgres::{
    PgAdminStore, PgBindingStore, PgDeviceStore, PgPublicNetStore, PgRecorderStore, PgSiteStore,
};
