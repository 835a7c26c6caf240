/*!
# Derived-Object Registry

Deterministic naming and de-duplicated registration of intermediate
CREATE-AS-SELECT objects. Each derivation is keyed by its semantic shape —
base object, window spec, group-by columns, join source — so re-compiling
the same logical query resolves to the same object name and never emits a
second DDL statement.

The registry is the only shared mutable state in the compiler. It is
`Send + Sync` behind a mutex and `get_or_create` is an atomic get-or-insert:
two threads compiling the same derived query concurrently agree on one
registration, with exactly one of them observing `newly_created`.
*/

use crate::ksqlgen::sql::analyzer::ObjectKind;
use crate::ksqlgen::sql::error::SqlError;
use crate::ksqlgen::sql::window::WindowSpec;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Mutex;

/// Canonical encoding of a derivation's semantic shape.
///
/// Two compilations with equal keys resolve to the identical object name.
/// The full shape participates — window size alone is never trusted to
/// disambiguate two different group-by or join shapes. Qualifier
/// identifiers (group-by columns, join source) are case-insensitive in
/// the dialect, so the key stores them case-folded: two groupings that
/// differ only in letter case are the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivationKey {
    base: String,
    window: Option<WindowSpec>,
    group_by: Vec<String>,
    join: Option<String>,
}

impl DerivationKey {
    pub fn new(base: impl Into<String>) -> Self {
        DerivationKey {
            base: base.into(),
            window: None,
            group_by: Vec::new(),
            join: None,
        }
    }

    /// Qualify the shape with a window.
    pub fn with_window(mut self, window: WindowSpec) -> Self {
        self.window = Some(window);
        self
    }

    /// Qualify the shape with group-by key columns, in declaration order.
    pub fn with_group_by(mut self, columns: Vec<String>) -> Self {
        self.group_by = columns.into_iter().map(|c| c.to_lowercase()).collect();
        self
    }

    /// Qualify the shape with an inner join source.
    pub fn with_join(mut self, inner: impl Into<String>) -> Self {
        self.join = Some(inner.into().to_lowercase());
        self
    }

    /// Deterministic object name for this shape:
    /// `<base>[_join_<inner>][_<n>min_window][_by_<cols>]`.
    ///
    /// The encoding is injective over keys: underscores inside the base,
    /// join source, and column segments are doubled, so a fused column
    /// `Sym_Ven` and the pair `Sym`, `Ven` never render the same
    /// qualifier, and a join never renders the same name as a base that
    /// happens to contain `_join_`.
    pub fn object_name(&self) -> String {
        let mut name = escape_segment(&self.base);
        if let Some(join) = &self.join {
            name.push_str("_join_");
            name.push_str(&escape_segment(join));
        }
        if let Some(window) = &self.window {
            name.push('_');
            name.push_str(&window.name_suffix());
            name.push_str("_window");
        }
        if !self.group_by.is_empty() {
            name.push_str("_by_");
            let columns: Vec<String> =
                self.group_by.iter().map(|c| escape_segment(c)).collect();
            name.push_str(&columns.join("_"));
        }
        name
    }

    /// Readable rendering for logs and conflict errors.
    pub fn canonical(&self) -> String {
        format!(
            "base={} window={:?} group_by=[{}] join={:?}",
            self.base,
            self.window.as_ref().map(|w| w.name_suffix()),
            self.group_by.join(","),
            self.join
        )
    }
}

/// Name-segment encoding. Doubling interior underscores keeps the
/// single-underscore separators between segments unambiguous.
fn escape_segment(segment: &str) -> String {
    segment.replace('_', "__")
}

/// Registration record for one derived object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredDerivationInfo {
    pub object_name: String,
    pub object_kind: ObjectKind,
}

/// Concurrency-safe registry of derived objects.
#[derive(Debug, Default)]
pub struct DerivedObjectRegistry {
    inner: Mutex<HashMap<DerivationKey, RegisteredDerivationInfo>>,
}

impl DerivedObjectRegistry {
    pub fn new() -> Self {
        DerivedObjectRegistry {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve the object name for `key`, registering it on first use.
    ///
    /// Returns the name plus whether this call created the registration.
    /// Atomic get-or-insert: concurrent callers with the same key agree on
    /// the name and exactly one observes `true`.
    pub fn get_or_create(&self, key: DerivationKey, kind: ObjectKind) -> (String, bool) {
        let mut map = self.lock();
        match map.entry(key) {
            Entry::Occupied(entry) => (entry.get().object_name.clone(), false),
            Entry::Vacant(entry) => {
                let name = entry.key().object_name();
                debug!(
                    "registering derived {} '{}' for {}",
                    kind,
                    name,
                    entry.key().canonical()
                );
                entry.insert(RegisteredDerivationInfo {
                    object_name: name.clone(),
                    object_kind: kind,
                });
                (name, true)
            }
        }
    }

    /// Register an explicit name for `key`.
    ///
    /// Idempotent for an identical name; a different name for an existing
    /// key is a registry conflict (an invariant violation under correct
    /// key derivation, never silently overwritten).
    pub fn register(
        &self,
        key: DerivationKey,
        object_name: impl Into<String>,
        kind: ObjectKind,
    ) -> Result<RegisteredDerivationInfo, SqlError> {
        let object_name = object_name.into();
        let mut map = self.lock();
        match map.entry(key) {
            Entry::Occupied(entry) => {
                let existing = entry.get();
                if existing.object_name != object_name {
                    return Err(SqlError::registry_conflict(
                        entry.key().canonical(),
                        existing.object_name.clone(),
                        object_name,
                    ));
                }
                Ok(existing.clone())
            }
            Entry::Vacant(entry) => {
                let info = RegisteredDerivationInfo {
                    object_name,
                    object_kind: kind,
                };
                debug!(
                    "registering derived {} '{}' for {}",
                    kind,
                    info.object_name,
                    entry.key().canonical()
                );
                entry.insert(info.clone());
                Ok(info)
            }
        }
    }

    /// Registration for `key`, if present.
    pub fn get(&self, key: &DerivationKey) -> Option<RegisteredDerivationInfo> {
        self.lock().get(key).cloned()
    }

    /// Look up a registration by its resolved object name.
    pub fn lookup_by_name(&self, object_name: &str) -> Option<RegisteredDerivationInfo> {
        self.lock()
            .values()
            .find(|info| info.object_name == object_name)
            .cloned()
    }

    /// Remove a registration by object name; part of the owning context's
    /// teardown path. Returns whether anything was removed.
    pub fn unregister(&self, object_name: &str) -> bool {
        let mut map = self.lock();
        let key = map
            .iter()
            .find(|(_, info)| info.object_name == object_name)
            .map(|(k, _)| k.clone());
        match key {
            Some(k) => {
                map.remove(&k);
                true
            }
            None => false,
        }
    }

    /// Drop all registrations.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<DerivationKey, RegisteredDerivationInfo>> {
        // a panic while holding the lock leaves the map intact; keep going
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
