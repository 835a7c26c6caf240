//! WINDOW Clause Builder
//!
//! Renders a window specification as `WINDOW <KIND> (<PARAMS>)` with
//! comma-space-separated parameters:
//!
//! - `WINDOW TUMBLING (SIZE n UNIT)`
//! - `WINDOW HOPPING (SIZE n UNIT, ADVANCE BY m UNIT)`
//! - `WINDOW SESSION (GAP n UNIT)`
//!
//! Retention and grace-period options append inside the parentheses when
//! set. Unit words come from the duration renderer and are always the
//! plural uppercase form.

use crate::ksqlgen::sql::window::{render_duration, WindowKind, WindowSpec};

/// Builder for WINDOW clauses.
pub struct WindowClauseBuilder;

impl WindowClauseBuilder {
    /// Render the WINDOW clause for a specification.
    pub fn build(spec: &WindowSpec) -> String {
        let mut params = match &spec.kind {
            WindowKind::Tumbling { size } => {
                format!("SIZE {}", render_duration(size))
            }
            WindowKind::Hopping { size, advance_by } => {
                format!(
                    "SIZE {}, ADVANCE BY {}",
                    render_duration(size),
                    render_duration(advance_by)
                )
            }
            WindowKind::Session { gap } => {
                format!("GAP {}", render_duration(gap))
            }
        };
        if let Some(retention) = &spec.retention {
            params.push_str(&format!(", RETENTION {}", render_duration(retention)));
        }
        if let Some(grace) = &spec.grace_period {
            params.push_str(&format!(", GRACE PERIOD {}", render_duration(grace)));
        }
        let kind = match spec.kind {
            WindowKind::Tumbling { .. } => "TUMBLING",
            WindowKind::Hopping { .. } => "HOPPING",
            WindowKind::Session { .. } => "SESSION",
        };
        format!("WINDOW {} ({})", kind, params)
    }
}
