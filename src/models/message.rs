use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// One ingest payload as it arrives on the wire.
#[derive(Debug, Deserialize)]
pub struct WaypointMessage {
    #[serde(alias = "userId", alias = "USER_ID")]
    pub user_id: Option<String>,
    #[serde(alias = "LATITUDE", default, deserialize_with = "parse_f64_option")]
    pub latitude: Option<f64>,
    #[serde(alias = "LONGITUDE", default, deserialize_with = "parse_f64_option")]
    pub longitude: Option<f64>,
    #[serde(alias = "stopTime", alias = "STOP_TIME")]
    pub stop_time: Option<String>,
}

impl WaypointMessage {
    pub fn get_user_id(&self) -> Option<Uuid> {
        self.user_id
            .as_deref()
            .and_then(|id| Uuid::parse_str(id.trim()).ok())
    }

    /// RFC 3339 first, then the two naive layouts devices send, read as UTC.
    pub fn get_stop_time(&self) -> Option<DateTime<Utc>> {
        let raw = self.stop_time.as_deref()?.trim();
        if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
            return Some(t.with_timezone(&Utc));
        }
        ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
            .iter()
            .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
            .map(|t| t.and_utc())
    }
}

fn parse_f64_option<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrFloat {
        String(String),
        Float(f64),
    }

    let v: Option<StringOrFloat> = Option::deserialize(deserializer)?;
    match v {
        Some(StringOrFloat::Float(f)) => Ok(Some(f)),
        Some(StringOrFloat::String(s)) => {
            if s.trim().is_empty() {
                Ok(None)
            } else {
                s.trim()
                    .parse::<f64>()
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
        }
        None => Ok(None),
    }
}
