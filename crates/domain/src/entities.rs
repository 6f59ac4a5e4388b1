use rideguard_errors::{RelayError, RelayResult};
use serde::{Deserialize, Serialize};

/// 事故记录中所有必填字段的路径
pub const REQUIRED_FIELDS: [&str; 13] = [
    "passenger.name",
    "passenger.phone",
    "driver.name",
    "driver.phone",
    "driver.license",
    "vehicle.year",
    "vehicle.make",
    "vehicle.model",
    "vehicle.color",
    "vehicle.plate",
    "location.address",
    "location.gps_lat",
    "location.gps_lng",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub name: String,
    pub phone: String,
    pub license: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub year: i32,
    pub make: String,
    pub model: String,
    pub color: String,
    pub plate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub gps_lat: f64,
    pub gps_lng: f64,
}

/// 一次行程事故的完整记录，派发期间只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub passenger: Passenger,
    pub driver: Driver,
    pub vehicle: Vehicle,
    pub location: Location,
}

/// 响应中回显的事故摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentSummary {
    pub passenger: String,
    pub driver: String,
    pub location: String,
    pub vehicle: String,
}

impl IncidentRecord {
    /// 从任意JSON值构建事故记录
    ///
    /// 先逐个检查必填字段路径，缺失时返回带字段路径的 `MissingField`，
    /// 而不是 serde 的通用错误信息。
    pub fn from_json_value(value: &serde_json::Value) -> RelayResult<Self> {
        for path in REQUIRED_FIELDS {
            let mut current = value;
            for segment in path.split('.') {
                current = match current.get(segment) {
                    Some(v) if !v.is_null() => v,
                    _ => return Err(RelayError::missing_field(path)),
                };
            }
            if let Some(s) = current.as_str() {
                if s.trim().is_empty() {
                    return Err(RelayError::missing_field(path));
                }
            }
        }

        let record: IncidentRecord = serde_json::from_value(value.clone())?;
        record.validate()?;
        Ok(record)
    }

    pub fn from_json_str(content: &str) -> RelayResult<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        Self::from_json_value(&value)
    }

    /// 校验所有字段非空，缺失即为致命输入错误；年份须为正数，坐标须为有限值
    pub fn validate(&self) -> RelayResult<()> {
        let text_fields = [
            ("passenger.name", &self.passenger.name),
            ("passenger.phone", &self.passenger.phone),
            ("driver.name", &self.driver.name),
            ("driver.phone", &self.driver.phone),
            ("driver.license", &self.driver.license),
            ("vehicle.make", &self.vehicle.make),
            ("vehicle.model", &self.vehicle.model),
            ("vehicle.color", &self.vehicle.color),
            ("vehicle.plate", &self.vehicle.plate),
            ("location.address", &self.location.address),
        ];
        for (field, value) in text_fields {
            if value.trim().is_empty() {
                return Err(RelayError::missing_field(field));
            }
        }

        if self.vehicle.year <= 0 {
            return Err(RelayError::invalid_field("vehicle.year", "必须为正整数"));
        }
        if !self.location.gps_lat.is_finite() {
            return Err(RelayError::invalid_field("location.gps_lat", "必须为有限数值"));
        }
        if !self.location.gps_lng.is_finite() {
            return Err(RelayError::invalid_field("location.gps_lng", "必须为有限数值"));
        }

        Ok(())
    }

    pub fn summary(&self) -> IncidentSummary {
        IncidentSummary {
            passenger: self.passenger.name.clone(),
            driver: self.driver.name.clone(),
            location: self.location.address.clone(),
            vehicle: format!(
                "{} {} ({})",
                self.vehicle.make, self.vehicle.model, self.vehicle.plate
            ),
        }
    }
}
