use crate::model::OrderedMap;

/// Normalize a site-displayed label into a stable mapping key: lower-case,
/// spaces turned into underscores, everything else non-alphanumeric dropped.
/// `"Student/Professional"` becomes `studentprofessional`; already-normalized
/// keys pass through unchanged.
pub fn to_key(label: &str) -> String {
    label
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Drop every denylisted key from the mapping. Absent keys are ignored.
pub fn remove_keys<V>(map: &mut OrderedMap<V>, keys: &[&str]) {
    for key in keys {
        map.remove(key);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_to_key_normalizes_labels() {
        assert_eq!(to_key("Long Rating"), "long_rating");
        assert_eq!(to_key("long_rating"), "long_rating");
        assert_eq!(to_key("Student/Professional:"), "studentprofessional");
        assert_eq!(to_key("Teams List"), "teams_list");
    }

    #[test]
    fn test_to_key_is_idempotent() {
        let once = to_key("Time\u{a0}Penalty");
        assert_eq!(to_key(&once), once);
    }

    #[test]
    fn test_remove_keys_ignores_missing() {
        let mut map = OrderedMap::new();
        map.insert("motto", String::from("keep coding"));
        map.insert("country", String::from("India"));

        remove_keys(&mut map, &["motto", "link"]);

        assert!(!map.contains_key("motto"));
        assert_eq!(map.get("country"), Some(&String::from("India")));
    }
}
