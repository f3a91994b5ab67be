/*!
Builders for `GET /system` payloads

Produce raw JSON so tests can also craft payloads a real node never would
(missing fields, odd classes, wrong types).
*/

use serde_json::{Map, Value};

/// Builds one node's `/system` body
#[derive(Debug, Clone)]
pub struct SystemPayloadBuilder {
    payload: Map<String, Value>,
}

impl SystemPayloadBuilder {
    /// Valid G-class system at the origin, last seen now
    pub fn new<S: Into<String>>(name: S) -> Self {
        let mut payload = Map::new();
        payload.insert("name".into(), Value::String(name.into()));
        payload.insert(
            "star_type".into(),
            serde_json::json!({"class": "G", "description": "Yellow dwarf"}),
        );
        payload.insert("position".into(), serde_json::json!({"x": 0.0, "y": 0.0, "z": 0.0}));
        payload.insert(
            "last_seen_at".into(),
            Value::String(chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()),
        );
        Self { payload }
    }

    pub fn class<C: Into<String>, D: Into<String>>(self, class: C, description: D) -> Self {
        self.set_field(
            "star_type",
            serde_json::json!({"class": class.into(), "description": description.into()}),
        )
    }

    pub fn position(self, x: f64, y: f64, z: f64) -> Self {
        self.set_field("position", serde_json::json!({"x": x, "y": y, "z": z}))
    }

    /// RFC3339 timestamp, passed through verbatim
    pub fn last_seen_at<S: Into<String>>(self, timestamp: S) -> Self {
        self.set_field("last_seen_at", Value::String(timestamp.into()))
    }

    pub fn set_field<S: Into<String>>(mut self, field: S, value: Value) -> Self {
        self.payload.insert(field.into(), value);
        self
    }

    pub fn without<S: AsRef<str>>(mut self, field: S) -> Self {
        self.payload.remove(field.as_ref());
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_payload_shape() {
        let payload = SystemPayloadBuilder::new("Sol").build();
        assert_eq!(payload["name"], "Sol");
        assert_eq!(payload["star_type"]["class"], "G");
        assert_eq!(payload["position"]["x"], 0.0);
        assert!(payload["last_seen_at"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_overrides_and_removal() {
        let payload = SystemPayloadBuilder::new("Proxima")
            .class("M", "Red dwarf")
            .position(1.3, -0.5, 2.0)
            .last_seen_at("2024-01-01T00:00:00Z")
            .without("name")
            .build();

        assert!(payload.get("name").is_none());
        assert_eq!(payload["star_type"]["description"], "Red dwarf");
        assert_eq!(payload["position"]["y"], -0.5);
        assert_eq!(payload["last_seen_at"], "2024-01-01T00:00:00Z");
    }
}
