//! 公网配置内存存储实现
//!
//! 仅用于本地演示和测试。全局单条记录。

use super::InMemoryStore;
use crate::error::StorageError;
use crate::models::PublicNetRecord;
use crate::traits::PublicNetStore;

#[async_trait::async_trait]
impl PublicNetStore for InMemoryStore {
    async fn get_public_net(&self) -> Result<Option<PublicNetRecord>, StorageError> {
        let data = self.inner.lock().await;
        Ok(data.public_net.clone())
    }

    async fn upsert_public_net(
        &self,
        external_ip: &str,
    ) -> Result<PublicNetRecord, StorageError> {
        let mut data = self.inner.lock().await;
        let record = match data.public_net.take() {
            Some(mut record) => {
                record.external_ip = external_ip.to_string();
                record
            }
            None => PublicNetRecord {
                id: 1,
                external_ip: external_ip.to_string(),
            },
        };
        data.public_net = Some(record.clone());
        Ok(record)
    }
}
