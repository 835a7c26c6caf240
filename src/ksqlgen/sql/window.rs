/*!
# Window Specifications

Window definitions accumulated by the host's window-definition builder and
carried through the expression tree as a constant. Each specification is
exactly one of tumbling, hopping, or session; hopping carries a size and an
advance interval, session carries a gap.

Duration rendering is part of the textual output contract: the unit is the
largest whole unit that divides the duration exactly, always the plural
uppercase word (`SIZE 2 MINUTES`, `ADVANCE BY 1 MINUTES`).
*/

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Window shape for a windowed derivation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowKind {
    /// Fixed-size, non-overlapping windows
    Tumbling { size: Duration },
    /// Fixed-size windows advancing by a smaller interval
    Hopping { size: Duration, advance_by: Duration },
    /// Windows bounded by an inactivity gap
    Session { gap: Duration },
}

/// A complete window specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowSpec {
    pub kind: WindowKind,
    /// How long the engine retains closed windows
    pub retention: Option<Duration>,
    /// Late-arrival tolerance before a window finalizes
    pub grace_period: Option<Duration>,
    /// Emit only final window results instead of incremental changes
    pub emit_final: bool,
}

impl WindowSpec {
    /// Tumbling window of the given size
    pub fn tumbling(size: Duration) -> Self {
        WindowSpec {
            kind: WindowKind::Tumbling { size },
            retention: None,
            grace_period: None,
            emit_final: false,
        }
    }

    /// Hopping window with size and advance interval
    pub fn hopping(size: Duration, advance_by: Duration) -> Self {
        WindowSpec {
            kind: WindowKind::Hopping { size, advance_by },
            retention: None,
            grace_period: None,
            emit_final: false,
        }
    }

    /// Session window with an inactivity gap
    pub fn session(gap: Duration) -> Self {
        WindowSpec {
            kind: WindowKind::Session { gap },
            retention: None,
            grace_period: None,
            emit_final: false,
        }
    }

    /// Set window retention, builder-style
    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = Some(retention);
        self
    }

    /// Set the late-arrival grace period, builder-style
    pub fn with_grace_period(mut self, grace: Duration) -> Self {
        self.grace_period = Some(grace);
        self
    }

    /// Request final-only emission
    pub fn emit_final(mut self) -> Self {
        self.emit_final = true;
        self
    }

    /// Principal duration of the window: size for tumbling/hopping,
    /// gap for session. Drives derived-object naming.
    pub fn principal_duration(&self) -> Duration {
        match self.kind {
            WindowKind::Tumbling { size } => size,
            WindowKind::Hopping { size, .. } => size,
            WindowKind::Session { gap } => gap,
        }
    }

    /// Deterministic suffix used in derived-object names, e.g. `1min`
    /// for a one-minute window, `30sec` for a sub-minute one.
    pub fn name_suffix(&self) -> String {
        let d = self.principal_duration();
        let secs = d.as_secs();
        if secs > 0 && secs % 60 == 0 {
            format!("{}min", secs / 60)
        } else if secs > 0 {
            format!("{}sec", secs)
        } else {
            format!("{}ms", d.as_millis())
        }
    }
}

/// Render a duration as `<n> <UNIT>` using the largest whole unit that
/// divides it exactly. The unit word is always plural, matching the
/// dialect's window clause grammar.
pub fn render_duration(d: &Duration) -> String {
    let millis = d.as_millis();
    let secs = d.as_secs();
    if millis % 1000 != 0 {
        return format!("{} MILLISECONDS", millis);
    }
    if secs % 86_400 == 0 && secs > 0 {
        format!("{} DAYS", secs / 86_400)
    } else if secs % 3_600 == 0 && secs > 0 {
        format!("{} HOURS", secs / 3_600)
    } else if secs % 60 == 0 && secs > 0 {
        format!("{} MINUTES", secs / 60)
    } else {
        format!("{} SECONDS", secs)
    }
}
