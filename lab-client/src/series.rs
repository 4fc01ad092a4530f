use std::fmt;
use std::marker::PhantomData;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A JSON object decoded as ordered `(key, value)` pairs.
///
/// Key order is exactly the order the server wrote, so labels and values
/// drawn from one series always stay aligned. A repeated key keeps its first
/// position and takes the last value.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyedSeries<V>(Vec<(String, V)>);

impl<V> KeyedSeries<V> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.0.iter().map(|(_, v)| v)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }
}

impl<V> Default for KeyedSeries<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for KeyedSeries<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut series = Self::new();
        for (k, v) in iter {
            series.insert(k, v);
        }
        series
    }
}

impl<V> IntoIterator for KeyedSeries<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<V: Serialize> Serialize for KeyedSeries<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct SeriesVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for SeriesVisitor<V> {
    type Value = KeyedSeries<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut series = KeyedSeries(Vec::with_capacity(access.size_hint().unwrap_or(0)));
        while let Some((k, v)) = access.next_entry::<String, V>()? {
            series.insert(k, v);
        }
        Ok(series)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for KeyedSeries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SeriesVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_order_is_kept() {
        // Deliberately not alphabetical.
        let s: KeyedSeries<f64> =
            serde_json::from_str(r#"{"zebra": 1, "apple": 2.5, "mango": 3}"#).unwrap();
        assert_eq!(s.keys().collect::<Vec<_>>(), ["zebra", "apple", "mango"]);
        assert_eq!(s.values().copied().collect::<Vec<_>>(), [1.0, 2.5, 3.0]);
        assert_eq!(s.get("apple"), Some(&2.5));
        assert_eq!(s.get("pear"), None);
    }

    #[test]
    fn test_repeated_key_keeps_first_position() {
        let s: KeyedSeries<u32> = serde_json::from_str(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        assert_eq!(s.iter().collect::<Vec<_>>(), [("a", &3), ("b", &2)]);
    }

    #[test]
    fn test_rejects_non_objects() {
        assert!(serde_json::from_str::<KeyedSeries<u32>>("[1, 2]").is_err());
        assert!(serde_json::from_str::<KeyedSeries<u32>>(r#"{"a": "x"}"#).is_err());
    }

    #[test]
    fn test_serializes_in_order() {
        let s: KeyedSeries<u32> = [("b", 1), ("a", 2)].into_iter().collect();
        assert_eq!(serde_json::to_string(&s).unwrap(), r#"{"b":1,"a":2}"#);
    }
}
