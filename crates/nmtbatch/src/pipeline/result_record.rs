//! # Result Records

use serde::{Serialize, Serializer, ser::SerializeMap};

/// An ordered mapping of field names to strings.
///
/// Serializes as a json object with keys in insertion order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    fields: Vec<(String, String)>,
}

impl ResultRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field.
    pub fn with_field<K: Into<String>, V: Into<String>>(
        mut self,
        name: K,
        value: V,
    ) -> Self {
        self.push(name, value);
        self
    }

    /// Append a field, replacing the value of an existing field of the same name.
    pub fn push<K: Into<String>, V: Into<String>>(
        &mut self,
        name: K,
        value: V,
    ) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Get a field value.
    pub fn get(
        &self,
        name: &str,
    ) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The fields, in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Is the record empty?
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ResultRecord {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_serialization() {
        let record = ResultRecord::new()
            .with_field("prediction_source", "안녕하세요")
            .with_field("prediction_target", "Hello")
            .with_field("id", "a");

        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"prediction_source":"안녕하세요","prediction_target":"Hello","id":"a"}"#
        );
        assert_eq!(record.get("prediction_target"), Some("Hello"));
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_push_replaces() {
        let mut record = ResultRecord::new().with_field("a", "1").with_field("b", "2");
        record.push("a", "3");
        assert_eq!(
            record.fields().collect::<Vec<_>>(),
            vec![("a", "3"), ("b", "2")]
        );
    }
}
