//! The merge context: resolved key-value data for one document.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered mapping from identifier to string value, built once per
/// document and read-only during the merge.
///
/// Keys are case-sensitive, but [`MergeContext::resolve`] applies tiered
/// matching so template authors do not need to reproduce field labels
/// exactly. Insertion order is significant: the substring tier scans
/// entries in the order they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeContext {
    entries: Vec<(String, String)>,
}

impl MergeContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, overwriting any existing value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Set a key only if it is currently absent or holds an empty value.
    ///
    /// This is the primitive behind context construction: later build steps
    /// fill gaps but never overwrite what an earlier step established.
    pub fn set_if_unset(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => {
                if v.is_empty() {
                    *v = value.into();
                }
            }
            None => self.entries.push((key, value.into())),
        }
    }

    /// Look up a key by exact equality.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Resolve an identifier to a value using tiered matching.
    ///
    /// Tiers, first match wins:
    /// 1. exact key equality;
    /// 2. case-insensitive key equality;
    /// 3. substring relation in either direction (identifier contains key,
    ///    or key contains identifier), scanned in insertion order.
    ///
    /// No match returns `None`; the caller substitutes an empty string and
    /// records a diagnostic.
    pub fn resolve(&self, identifier: &str) -> Option<&str> {
        if let Some(value) = self.get(identifier) {
            return Some(value);
        }

        if let Some((_, value)) = self
            .entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(identifier))
        {
            return Some(value);
        }

        let needle = identifier.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| {
                let key = k.to_lowercase();
                needle.contains(&key) || key.contains(&needle)
            })
            .map(|(_, v)| v.as_str())
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the context has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for MergeContext {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut ctx = MergeContext::new();
        for (key, value) in iter {
            ctx.set(key, value);
        }
        ctx
    }
}

impl<const N: usize> From<[(&str, &str); N]> for MergeContext {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

impl Display for MergeContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (key, value) in &self.entries {
            writeln!(f, "{key} = {value}")?;
        }
        Ok(())
    }
}

// Serialized as a JSON object; entry order is preserved in both directions.

impl Serialize for MergeContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MergeContext {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ContextVisitor;

        impl<'de> Visitor<'de> for ContextVisitor {
            type Value = MergeContext;

            fn expecting(&self, formatter: &mut Formatter<'_>) -> FmtResult {
                formatter.write_str("a map of identifier to string value")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut ctx = MergeContext::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    ctx.set(key, value);
                }
                Ok(ctx)
            }
        }

        deserializer.deserialize_map(ContextVisitor)
    }
}
