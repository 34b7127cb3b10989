use crate::models::StoredRequest;
use indexmap::IndexMap;
use std::sync::RwLock;

/// 请求收件箱: 按提交顺序保存, id 去重 (IndexMap 保序)
pub struct RequestStore {
    inner: RwLock<IndexMap<String, StoredRequest>>,
}

impl Default for RequestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(IndexMap::new()),
        }
    }

    pub fn insert(&self, request: StoredRequest) {
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        map.insert(request.id.clone(), request);
    }

    pub fn get(&self, id: &str) -> Option<StoredRequest> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.get(id).cloned()
    }

    /// 最近的请求在前, 最多 limit 条
    pub fn list_recent(&self, limit: usize) -> Vec<StoredRequest> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.values().rev().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 全量导出 CSV, 一行一个请求 (按提交顺序)
    pub fn export_csv(&self) -> Result<String, Box<dyn std::error::Error>> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer.write_record([
            "id",
            "created_at",
            "county",
            "city",
            "make",
            "model",
            "year",
            "category",
            "urgency",
            "contact",
            "phone",
            "description",
        ])?;

        for stored in map.values() {
            let req = &stored.request;
            let created = stored.created_at.to_rfc3339();
            writer.write_record([
                stored.id.as_str(),
                created.as_str(),
                req.location.county.as_str(),
                req.location.city.as_str(),
                req.vehicle.make.as_str(),
                req.vehicle.model.as_str(),
                req.vehicle.year.as_str(),
                req.category.as_str(),
                req.urgency.as_str(),
                req.contact.as_str(),
                req.phone.as_str(),
                req.description.as_str(),
            ])?;
        }

        let bytes = writer.into_inner()?;
        Ok(String::from_utf8(bytes)?)
    }
}
