//! Test data builders for incident records

use rideguard_domain::IncidentRecord;
use serde_json::{json, Value};

/// 以 Jane Doe 行程为默认值的事故记录构建器
///
/// 同时支持生成 JSON，便于构造缺失字段的输入。
pub struct IncidentRecordBuilder {
    value: Value,
}

impl IncidentRecordBuilder {
    pub fn new() -> Self {
        Self {
            value: json!({
                "passenger": {"name": "Jane Doe", "phone": "+15551234567"},
                "driver": {"name": "John Smith", "phone": "+15557654321", "license": "D1234567"},
                "vehicle": {
                    "year": 2020,
                    "make": "Toyota",
                    "model": "Camry",
                    "color": "Blue",
                    "plate": "ABC123"
                },
                "location": {
                    "address": "123 Main St, San Francisco, CA",
                    "gps_lat": 37.7749,
                    "gps_lng": -122.4194
                }
            }),
        }
    }

    pub fn with_location(mut self, address: &str, gps_lat: f64, gps_lng: f64) -> Self {
        self.value["location"] = json!({"address": address, "gps_lat": gps_lat, "gps_lng": gps_lng});
        self
    }

    /// 覆盖任意点分路径上的值，例如 `("driver.license", json!(""))`
    pub fn with_field(mut self, path: &str, field_value: Value) -> Self {
        if let Some(target) = self.value.pointer_mut(&pointer(path)) {
            *target = field_value;
        }
        self
    }

    /// 删除点分路径上的字段
    pub fn without(mut self, path: &str) -> Self {
        let (parent, last) = match path.rsplit_once('.') {
            Some((parent, last)) => (pointer(parent), last),
            None => (String::new(), path),
        };
        if let Some(object) = self
            .value
            .pointer_mut(&parent)
            .and_then(Value::as_object_mut)
        {
            object.remove(last);
        }
        self
    }

    pub fn build_json(self) -> Value {
        self.value
    }

    /// 构建已校验的事故记录，构建器用于非法输入时请改用 `build_json`
    pub fn build(self) -> IncidentRecord {
        IncidentRecord::from_json_value(&self.value).expect("builder produced an invalid record")
    }
}

impl Default for IncidentRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn pointer(path: &str) -> String {
    format!("/{}", path.replace('.', "/"))
}
