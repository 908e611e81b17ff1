//! Human-readable table dump.
//!
//! One line per entry, ordered by `(state, unit)`:
//!
//! ```text
//! S0  'x'   ->  S1  accept
//! S0  'y'   ->  S2
//! S1  'z'   ->  S0
//! ```

use std::fmt::Write as _;

use super::layout::{TableEntry, Unit};

/// ANSI palette for dump output.
///
/// - State: source and target state labels
/// - Accept: accepting targets and the `accept` marker
/// - Dim: units and arrows
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub state: &'static str,
    pub accept: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        state: "\x1b[34m",
        accept: "\x1b[32m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        state: "",
        accept: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }
}

/// Render the table, one line per entry.
pub fn dump(entries: &[TableEntry], colors: Colors) -> String {
    let mut sorted: Vec<&TableEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.key);

    let max_state = sorted
        .iter()
        .flat_map(|e| [e.key.state.get(), e.value.state.get()])
        .max()
        .unwrap_or(0);
    // "S" plus the widest state number
    let label_width = width_for_count(max_state as usize + 1) + 1;

    let Colors {
        state,
        accept,
        dim,
        reset,
    } = colors;

    let mut out = String::new();
    for entry in sorted {
        let source = format!("S{}", entry.key.state.get());
        let unit = Unit(entry.key.unit).to_string();
        let target = format!("S{}", entry.value.state.get());

        let _ = write!(
            out,
            "{state}{source:<label_width$}{reset}  {dim}{unit:<4}  ->{reset}  "
        );
        if entry.value.is_accepting() {
            let _ = writeln!(out, "{accept}{target}{reset}  {accept}accept{reset}");
        } else {
            let _ = writeln!(out, "{state}{target}{reset}");
        }
    }
    out
}

/// Number of decimal digits needed to print indices `0..count`.
pub fn width_for_count(count: usize) -> usize {
    let mut n = count.saturating_sub(1);
    let mut width = 1;
    while n >= 10 {
        n /= 10;
        width += 1;
    }
    width
}
