use std::collections::BTreeSet;

use super::model::WellLog;

// ---------------------------------------------------------------------------
// Curve selection: which curves are shown and processed
// ---------------------------------------------------------------------------

/// Names of the selected curves. An empty set means nothing is selected.
pub type CurveSelection = BTreeSet<String>;

/// Initialise a [`CurveSelection`] with every curve selected.
pub fn init_selection(log: &WellLog) -> CurveSelection {
    log.curves.iter().map(|c| c.name.clone()).collect()
}

/// Indices of the selected curves, in file order.
///
/// Names in `selection` that the log does not have are ignored.
pub fn selected_indices(log: &WellLog, selection: &CurveSelection) -> Vec<usize> {
    log.curves
        .iter()
        .enumerate()
        .filter(|(_, curve)| selection.contains(&curve.name))
        .map(|(i, _)| i)
        .collect()
}
