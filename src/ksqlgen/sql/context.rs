//! Per-compilation generation context.
//!
//! A fresh context is created for every compilation call and never shared
//! across calls. It carries the base object name, the requested query mode,
//! and an insertion-ordered metadata map the orchestrator uses to record
//! decisions (resolved object name, derivation key) for caller inspection.

/// State threaded through one compilation call.
#[derive(Debug, Clone)]
pub struct QueryGenerationContext {
    /// Name of the base stream/table the query starts from
    pub base_object_name: String,
    /// Pull (snapshot) vs. push (EMIT CHANGES) mode requested by the caller
    pub is_pull_query: bool,
    /// Backing topic, when known
    pub topic_name: Option<String>,
    /// Insertion-ordered metadata recorded during generation
    metadata: Vec<(String, String)>,
}

impl QueryGenerationContext {
    pub fn new(base_object_name: impl Into<String>, is_pull_query: bool) -> Self {
        QueryGenerationContext {
            base_object_name: base_object_name.into(),
            is_pull_query,
            topic_name: None,
            metadata: Vec::new(),
        }
    }

    /// Record a metadata entry, replacing any earlier value for the key
    /// while keeping its original position
    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.metadata.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.metadata.push((key, value));
        }
    }

    /// Look up a metadata entry
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All metadata entries in insertion order
    pub fn metadata_entries(&self) -> &[(String, String)] {
        &self.metadata
    }
}
