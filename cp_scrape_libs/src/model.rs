use serde::ser::{Serialize, SerializeMap, Serializer};

/// String-keyed mapping that preserves insertion order, both for lookups and
/// for serialization. Inserting an existing key replaces the value but keeps
/// the key's original position.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        OrderedMap(Vec::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(index).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_serialization_keeps_insertion_order() {
        let mut map = OrderedMap::new();
        map.insert("zulu", 1);
        map.insert("alpha", 2);
        map.insert("mike", 3);

        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"zulu":1,"alpha":2,"mike":3}"#
        );
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = OrderedMap::new();
        map.insert("first", 1);
        map.insert("second", 2);
        map.insert("first", 10);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("first"), Some(&10));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["first", "second"]);
    }

    #[test]
    fn test_remove_returns_the_value() {
        let mut map = OrderedMap::new();
        map.insert("first", 1);

        assert_eq!(map.remove("first"), Some(1));
        assert_eq!(map.remove("first"), None);
        assert!(map.is_empty());
    }
}
