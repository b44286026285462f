//! Panel numbering policy.
//!
//! The original authoring flow numbers a new panel as `observed panel count
//! + 1`. Two sessions adding a panel concurrently can both observe the same
//! count and produce duplicate numbers; `panel_number` carries no unique
//! constraint, so both inserts succeed. That behavior is preserved under
//! [`PanelNumbering::ClientCount`]. [`PanelNumbering::ServerSequence`] is the
//! opt-in stronger policy: the database computes `MAX(panel_number) + 1`
//! inside the insert statement.

use serde::{Deserialize, Serialize};

/// How the next `panel_number` is assigned when adding a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelNumbering {
    /// Number from the caller-observed panel count. Subject to the
    /// documented duplicate-number race under concurrent editors.
    ClientCount,
    /// Number assigned by the database from the current maximum.
    ServerSequence,
}

impl Default for PanelNumbering {
    fn default() -> Self {
        PanelNumbering::ClientCount
    }
}

impl PanelNumbering {
    /// Parse from a configuration string. Unknown values fall back to the
    /// default rather than failing startup.
    pub fn from_config(value: &str) -> Self {
        match value {
            "server_sequence" => PanelNumbering::ServerSequence,
            _ => PanelNumbering::ClientCount,
        }
    }
}

/// Next panel number under the client-count policy.
pub fn next_panel_number(observed_count: i64) -> i32 {
    (observed_count + 1) as i32
}
