use crate::action::ActionToken;
use crate::value::{ExtraValue, ImageData};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Heterogeneous key-value payload attached to an inter-process request.
///
/// Typed accessors never panic and never report errors: a missing key or a
/// mismatched variant falls back to the caller-supplied default. The bag is
/// the trust boundary of the whole configuration layer, so shape violations
/// degrade silently by design.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtrasBag {
    entries: HashMap<String, ExtraValue>,
}

impl ExtrasBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts a value, replacing any previous value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: ExtraValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn with_bool(mut self, key: impl Into<String>, value: bool) -> Self {
        self.insert(key, ExtraValue::Bool(value));
        self
    }

    pub fn with_int(mut self, key: impl Into<String>, value: i32) -> Self {
        self.insert(key, ExtraValue::Int(value));
        self
    }

    pub fn with_long(mut self, key: impl Into<String>, value: i64) -> Self {
        self.insert(key, ExtraValue::Long(value));
        self
    }

    pub fn with_str(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, ExtraValue::Str(value.into()));
        self
    }

    pub fn with_int_list(mut self, key: impl Into<String>, values: Vec<i32>) -> Self {
        self.insert(key, ExtraValue::IntList(values));
        self
    }

    pub fn with_value_list(mut self, key: impl Into<String>, values: Vec<ExtraValue>) -> Self {
        self.insert(key, ExtraValue::ValueList(values));
        self
    }

    pub fn with_bag(mut self, key: impl Into<String>, bag: ExtrasBag) -> Self {
        self.insert(key, ExtraValue::Bag(bag));
        self
    }

    pub fn with_image(mut self, key: impl Into<String>, image: ImageData) -> Self {
        self.insert(key, ExtraValue::Image(image));
        self
    }

    pub fn with_action(mut self, key: impl Into<String>, action: ActionToken) -> Self {
        self.insert(key, ExtraValue::Action(action));
        self
    }

    /// Boolean under `key`, or `default` when absent or mismatched.
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        match self.entries.get(key) {
            Some(ExtraValue::Bool(v)) => *v,
            _ => default,
        }
    }

    /// 32-bit integer under `key`, or `default` when absent or mismatched.
    pub fn int_or(&self, key: &str, default: i32) -> i32 {
        match self.entries.get(key) {
            Some(ExtraValue::Int(v)) => *v,
            _ => default,
        }
    }

    /// 64-bit integer under `key`. A plain `Int` is widened rather than
    /// rejected; callers storing sizes and timestamps do not distinguish.
    pub fn long_or(&self, key: &str, default: i64) -> i64 {
        match self.entries.get(key) {
            Some(ExtraValue::Long(v)) => *v,
            Some(ExtraValue::Int(v)) => i64::from(*v),
            _ => default,
        }
    }

    pub fn str_opt(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(ExtraValue::Str(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn string_or(&self, key: &str, default: &str) -> String {
        self.str_opt(key).unwrap_or(default).to_owned()
    }

    pub fn int_list_opt(&self, key: &str) -> Option<&[i32]> {
        match self.entries.get(key) {
            Some(ExtraValue::IntList(v)) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn value_list_opt(&self, key: &str) -> Option<&[ExtraValue]> {
        match self.entries.get(key) {
            Some(ExtraValue::ValueList(v)) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn bag_opt(&self, key: &str) -> Option<&ExtrasBag> {
        match self.entries.get(key) {
            Some(ExtraValue::Bag(v)) => Some(v),
            _ => None,
        }
    }

    /// Nested bags stored in a value list under `key`.
    ///
    /// Non-bag elements are skipped, preserving the relative order of the
    /// bags that remain.
    pub fn bag_list(&self, key: &str) -> Vec<&ExtrasBag> {
        match self.value_list_opt(key) {
            Some(values) => values
                .iter()
                .filter_map(|value| match value {
                    ExtraValue::Bag(bag) => Some(bag),
                    _ => None,
                })
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn image_opt(&self, key: &str) -> Option<&ImageData> {
        match self.entries.get(key) {
            Some(ExtraValue::Image(v)) => Some(v),
            _ => None,
        }
    }

    pub fn action_opt(&self, key: &str) -> Option<ActionToken> {
        match self.entries.get(key) {
            Some(ExtraValue::Action(v)) => Some(*v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_fall_back_on_missing_keys() {
        let bag = ExtrasBag::new();

        assert!(bag.bool_or("missing", true));
        assert_eq!(bag.int_or("missing", -7), -7);
        assert_eq!(bag.long_or("missing", 42), 42);
        assert_eq!(bag.str_opt("missing"), None);
        assert_eq!(bag.string_or("missing", "fallback"), "fallback");
        assert!(bag.bag_list("missing").is_empty());
        assert_eq!(bag.action_opt("missing"), None);
    }

    #[test]
    fn accessors_fall_back_on_type_mismatch() {
        let bag = ExtrasBag::new()
            .with_str("color", "not-an-int")
            .with_int("title", 12)
            .with_bool("entries", false);

        assert_eq!(bag.int_or("color", 0x112233), 0x112233);
        assert_eq!(bag.str_opt("title"), None);
        assert_eq!(bag.value_list_opt("entries"), None);
    }

    #[test]
    fn long_accessor_widens_plain_ints() {
        let bag = ExtrasBag::new().with_int("bytes", 4096);
        assert_eq!(bag.long_or("bytes", 0), 4096);
    }

    #[test]
    fn bag_list_skips_non_bag_elements() {
        let first = ExtrasBag::new().with_str("title", "first");
        let second = ExtrasBag::new().with_str("title", "second");
        let bag = ExtrasBag::new().with_value_list(
            "entries",
            vec![
                ExtraValue::Bag(first.clone()),
                ExtraValue::Int(9),
                ExtraValue::Bag(second.clone()),
            ],
        );

        let bags = bag.bag_list("entries");
        assert_eq!(bags.len(), 2, "non-bag elements should be skipped");
        assert_eq!(bags[0], &first);
        assert_eq!(bags[1], &second);
    }

    #[test]
    fn insert_replaces_previous_value() {
        let mut bag = ExtrasBag::new().with_int("ui", 1);
        bag.insert("ui", ExtraValue::Int(3));
        assert_eq!(bag.int_or("ui", 0), 3);
        assert_eq!(bag.len(), 1);
    }
}
