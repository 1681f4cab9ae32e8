use std::path::Path;

use anyhow::{Context, Result};

use well_log_cleaner::data::export;
use well_log_cleaner::data::loader;
use well_log_cleaner::data::model::WellLog;
use well_log_cleaner::data::selection::{init_selection, CurveSelection};
use well_log_cleaner::data::summary::{summarize, CurveSummary};
use well_log_cleaner::processing::{FilterSpec, Pipeline};
use well_log_cleaner::settings::{default_specs, ProcessingSettings};

use crate::color::CurveColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// One opened log together with the result of its last Process run.
pub struct LoadedFile {
    pub log: WellLog,
    pub processed: Option<WellLog>,
    /// Before/after statistics of the last run on this file.
    pub summaries: Vec<CurveSummary>,
}

impl LoadedFile {
    fn new(log: WellLog) -> Self {
        Self {
            log,
            processed: None,
            summaries: Vec::new(),
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Every opened log, in the order they were loaded.
    pub files: Vec<LoadedFile>,
    /// Index into `files` of the log being viewed; None when nothing is open.
    pub current: Option<usize>,

    /// Pipeline being edited in the side panel.
    pub specs: Vec<FilterSpec>,
    pub settings_name: String,

    /// Curves shown and processed.
    pub selection: CurveSelection,

    pub colors: CurveColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
    pub status_is_error: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            current: None,
            specs: default_specs(),
            settings_name: ProcessingSettings::default().name,
            selection: CurveSelection::new(),
            colors: CurveColors::default(),
            status_message: None,
            status_is_error: false,
        }
    }
}

impl AppState {
    /// Start from the saved settings, falling back to the defaults.
    pub fn load() -> Self {
        let settings = ProcessingSettings::load_or_default();
        let mut state = Self::default();
        match settings.to_pipeline() {
            Ok(pipeline) => {
                state.specs = pipeline.specs().to_vec();
                state.settings_name = settings.name;
            }
            Err(e) => log::warn!("Saved settings are unusable, using defaults: {e}"),
        }
        state
    }

    // ---- Loaded files ----

    pub fn current_file(&self) -> Option<&LoadedFile> {
        self.current.and_then(|i| self.files.get(i))
    }

    pub fn current_log(&self) -> Option<&WellLog> {
        self.current_file().map(|f| &f.log)
    }

    pub fn current_processed(&self) -> Option<&WellLog> {
        self.current_file().and_then(|f| f.processed.as_ref())
    }

    pub fn current_summaries(&self) -> &[CurveSummary] {
        self.current_file()
            .map(|f| f.summaries.as_slice())
            .unwrap_or_default()
    }

    /// Append a newly loaded log and make it the current file.
    pub fn add_file(&mut self, log: WellLog) {
        let message = format!(
            "Loaded {} ({} curves, {} rows)",
            log.file_name,
            log.curves.len(),
            log.len()
        );
        self.files.push(LoadedFile::new(log));
        self.set_current(self.files.len() - 1);
        self.set_status(message);
    }

    /// Switch the view to file `index`; every curve of it is selected.
    /// Out-of-range indices are ignored.
    pub fn set_current(&mut self, index: usize) {
        let Some(file) = self.files.get(index) else {
            return;
        };
        self.selection = init_selection(&file.log);
        self.colors = CurveColors::new(file.log.curves.iter().map(|c| c.name.as_str()));
        self.current = Some(index);
    }

    /// Close file `index`. The current file stays current when another one
    /// is removed; removing the current file moves to its neighbour.
    pub fn remove_file(&mut self, index: usize) {
        if index >= self.files.len() {
            return;
        }
        let removed = self.files.remove(index);
        log::info!("Closed {}", removed.log.file_name);

        if self.files.is_empty() {
            self.current = None;
            self.selection.clear();
            self.colors = CurveColors::default();
        } else {
            match self.current {
                Some(current) if current == index => {
                    self.set_current(index.min(self.files.len() - 1));
                }
                Some(current) if current > index => self.current = Some(current - 1),
                _ => {}
            }
        }
        self.set_status(format!("Closed {}", removed.log.file_name));
    }

    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        let log = loader::load_file(path).with_context(|| format!("loading {}", path.display()))?;
        log::info!("Loaded {} curves from {}", log.curves.len(), path.display());
        self.add_file(log);
        Ok(())
    }

    /// Run the edited pipeline over the selected curves of the current file.
    pub fn process(&mut self) -> Result<()> {
        let index = self
            .current
            .filter(|&i| i < self.files.len())
            .context("No file loaded")?;
        let pipeline = Pipeline::new(self.specs.clone())?;

        let file = &mut self.files[index];
        let processed = file.log.process(&pipeline, Some(&self.selection))?;
        file.summaries = summarize(&file.log, &processed)
            .into_iter()
            .filter(|s| self.selection.contains(&s.name))
            .collect();
        file.processed = Some(processed);

        let message = format!(
            "Processed {} curves with {} filters",
            file.summaries.len(),
            pipeline.enabled().count()
        );
        self.set_status(message);
        Ok(())
    }

    pub fn export_processed(&mut self, path: &Path) -> Result<()> {
        let log = self.current_processed().context("Nothing processed yet")?;
        export::save_file(log, path)?;
        self.set_status(format!("Exported {}", path.display()));
        Ok(())
    }

    pub fn export_original(&mut self, path: &Path) -> Result<()> {
        let log = self.current_log().context("No file loaded")?;
        export::save_file(log, path)?;
        self.set_status(format!("Exported {}", path.display()));
        Ok(())
    }

    pub fn save_settings(&mut self) -> Result<()> {
        let path = ProcessingSettings::from_specs(&self.settings_name, &self.specs).save()?;
        self.set_status(format!("Settings saved to {}", path.display()));
        Ok(())
    }

    pub fn reset_settings(&mut self) -> Result<()> {
        let settings = ProcessingSettings::reset()?;
        self.specs = default_specs();
        self.settings_name = settings.name;
        self.set_status("Settings reset to defaults".to_string());
        Ok(())
    }

    // ---- Curve selection ----

    pub fn toggle_curve(&mut self, name: &str) {
        if !self.selection.remove(name) {
            self.selection.insert(name.to_string());
        }
    }

    pub fn select_all_curves(&mut self) {
        if let Some(selection) = self.current_log().map(init_selection) {
            self.selection = selection;
        }
    }

    pub fn select_no_curves(&mut self) {
        self.selection.clear();
    }

    // ---- Status line ----

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_is_error = false;
    }

    /// Show the outcome of a UI action; errors are logged and shown in red.
    pub fn report(&mut self, result: Result<()>) {
        if let Err(e) = result {
            log::error!("{e:#}");
            self.status_message = Some(format!("{e:#}"));
            self.status_is_error = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use well_log_cleaner::data::model::CurveInfo;

    fn spiky_log() -> WellLog {
        log_named("spiky.las", &["GR", "RT"])
    }

    fn log_named(file_name: &str, curves: &[&str]) -> WellLog {
        WellLog::from_columns(
            file_name,
            CurveInfo::new("DEPT", "M", ""),
            curves.iter().map(|c| CurveInfo::new(c, "", "")).collect(),
            (0..7).map(|i| i as f64).collect(),
            curves
                .iter()
                .map(|_| vec![1.0, 2.0, 3.0, 100.0, 5.0, 6.0, 7.0])
                .collect(),
        )
        .unwrap()
    }

    fn despike_specs() -> Vec<FilterSpec> {
        vec![FilterSpec::enabled(well_log_cleaner::processing::Filter::Despike {
            threshold: 3.0,
            window_size: 5,
        })]
    }

    fn current_name(state: &AppState) -> &str {
        &state.current_log().unwrap().file_name
    }

    #[test]
    fn process_needs_a_file() {
        let mut state = AppState::default();
        assert!(state.process().is_err());
    }

    #[test]
    fn process_selected_curves() {
        let mut state = AppState::default();
        state.specs = despike_specs();
        state.add_file(spiky_log());
        state.toggle_curve("RT");
        state.process().unwrap();

        let processed = state.current_processed().unwrap();
        assert_eq!(processed.curve("GR").unwrap()[3], 5.0);
        assert_eq!(processed.curve("RT").unwrap()[3], 100.0);
        let summaries = state.current_summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "GR");
    }

    #[test]
    fn added_files_become_current() {
        let mut state = AppState::default();
        state.add_file(log_named("a.las", &["GR"]));
        state.add_file(log_named("b.las", &["RHOB", "NPHI"]));

        assert_eq!(state.files.len(), 2);
        assert_eq!(state.current, Some(1));
        assert_eq!(current_name(&state), "b.las");
        assert!(state.selection.contains("RHOB"));
        assert!(!state.selection.contains("GR"));
    }

    #[test]
    fn switching_files_reselects_curves() {
        let mut state = AppState::default();
        state.add_file(log_named("a.las", &["GR"]));
        state.add_file(log_named("b.las", &["RHOB"]));

        state.set_current(0);
        assert_eq!(current_name(&state), "a.las");
        assert_eq!(state.selection.len(), 1);
        assert!(state.selection.contains("GR"));

        state.set_current(5);
        assert_eq!(state.current, Some(0));
    }

    #[test]
    fn processed_result_stays_with_its_file() {
        let mut state = AppState::default();
        state.specs = despike_specs();
        state.add_file(log_named("a.las", &["GR"]));
        state.add_file(log_named("b.las", &["GR"]));

        state.set_current(0);
        state.process().unwrap();
        assert!(state.current_processed().is_some());

        state.set_current(1);
        assert!(state.current_processed().is_none());
        assert!(state.current_summaries().is_empty());
        assert!(state.export_processed(Path::new("unused.las")).is_err());

        state.set_current(0);
        assert_eq!(state.current_processed().unwrap().curve("GR").unwrap()[3], 5.0);
    }

    #[test]
    fn removing_files_keeps_a_valid_current_index() {
        let mut state = AppState::default();
        state.add_file(log_named("a.las", &["GR"]));
        state.add_file(log_named("b.las", &["GR"]));
        state.add_file(log_named("c.las", &["GR"]));

        // Removing an earlier file shifts the current index down.
        state.set_current(2);
        state.remove_file(0);
        assert_eq!(state.current, Some(1));
        assert_eq!(current_name(&state), "c.las");

        // Removing the current last file moves to the new last one.
        state.remove_file(1);
        assert_eq!(state.current, Some(0));
        assert_eq!(current_name(&state), "b.las");

        state.remove_file(7);
        assert_eq!(state.files.len(), 1);

        state.remove_file(0);
        assert!(state.files.is_empty());
        assert_eq!(state.current, None);
        assert!(state.selection.is_empty());
        assert!(state.process().is_err());
    }

    #[test]
    fn errors_go_to_the_status_line() {
        let mut state = AppState::default();
        state.report(Err(anyhow::anyhow!("boom")));
        assert!(state.status_is_error);
        assert_eq!(state.status_message.as_deref(), Some("boom"));
    }
}
