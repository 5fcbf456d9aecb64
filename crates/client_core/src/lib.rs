use std::cell::Cell;

use serde::{Deserialize, Serialize};
use shared::domain::{
    file_counter_text, AnalysisType, FileSelection, ANALYSIS_FAILED_MARKUP, ANALYSIS_FAILED_TEXT,
    DROP_ZONE_HIGHLIGHT, DROP_ZONE_IDLE, NO_FILES_ALERT,
};
use tracing::{debug, error, info, warn};

pub mod error;
pub mod transport;
pub mod view;

pub use error::AnalyzeError;
#[cfg(not(target_arch = "wasm32"))]
pub use transport::HttpAnalyzeTransport;
pub use transport::{AnalyzeRequest, AnalyzeTransport, LocalFile};
pub use view::PageView;

/// How the server's result fragment reaches the result container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultRendering {
    /// Written verbatim as markup.
    #[default]
    Markup,
    /// Written as plain text; tags show up literally.
    Text,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerOptions {
    pub rendering: ResultRendering,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Loading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing selected; the user was alerted and no request went out.
    NoFiles,
    /// A request was already in flight; the click was ignored.
    Busy,
    Rendered,
    Failed,
}

/// Mediates between the upload page and the analyze endpoint.
///
/// All state besides the submit phase lives in the page itself. The phase is
/// never held across an await, so handlers sharing the controller through an
/// `Rc` can interleave freely on one thread.
pub struct UploadController<V, T> {
    view: V,
    transport: T,
    options: ControllerOptions,
    phase: Cell<SubmitPhase>,
}

impl<V, T> UploadController<V, T>
where
    V: PageView,
    T: AnalyzeTransport<File = V::File>,
{
    pub fn new(view: V, transport: T) -> Self {
        Self::with_options(view, transport, ControllerOptions::default())
    }

    pub fn with_options(view: V, transport: T, options: ControllerOptions) -> Self {
        Self {
            view,
            transport,
            options,
            phase: Cell::new(SubmitPhase::Idle),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase.get()
    }

    /// Brings the page in line with its current inputs once listeners are
    /// attached: one description visible, counter matching the file input.
    pub fn sync_initial_state(&self) {
        if let Some(kind) = self.view.checked_analysis_type() {
            self.analysis_type_changed(kind, true);
        }
        self.update_file_counter();
    }

    pub fn analysis_type_changed(&self, kind: AnalysisType, checked: bool) {
        if !checked {
            return;
        }
        self.view.set_description_visible(kind, true);
        self.view.set_description_visible(kind.other(), false);
        debug!(analysis_type = %kind, "analysis type selected");
    }

    pub fn drag_over(&self) {
        self.view.set_drop_zone_style(DROP_ZONE_HIGHLIGHT);
    }

    pub fn drag_leave(&self) {
        self.view.set_drop_zone_style(DROP_ZONE_IDLE);
    }

    /// Handles a drop. An empty drop leaves the file input untouched.
    pub fn drop_files(&self, files: FileSelection<V::File>) {
        self.drag_leave();
        if files.is_empty() {
            debug!("drop carried no files");
        } else {
            debug!(file_count = files.len(), "files dropped");
            self.view.assign_files(files);
        }
        self.update_file_counter();
    }

    pub fn update_file_counter(&self) {
        let count = self.view.selected_file_count();
        self.view.set_drop_title(&file_counter_text(count));
    }

    /// Runs one submit: guard, request, render.
    ///
    /// The loader is always hidden before the result or the error message is
    /// written. The trigger stays disabled while a request is in flight.
    pub async fn submit(&self) -> SubmitOutcome {
        if self.phase.get() == SubmitPhase::Loading {
            debug!("submit ignored while a request is in flight");
            return SubmitOutcome::Busy;
        }

        let files = self.view.selected_files();
        if files.is_empty() {
            self.view.alert(NO_FILES_ALERT);
            return SubmitOutcome::NoFiles;
        }

        let analysis_type = self.view.checked_analysis_type().unwrap_or_else(|| {
            warn!("no analysis type checked; using the default");
            AnalysisType::default()
        });
        let file_count = files.len();

        self.view.clear_result();
        let mut loading = LoadingGuard::enter(&self.phase, &self.view);

        info!(file_count, analysis_type = %analysis_type, "submitting files for analysis");
        let result = self
            .transport
            .analyze(AnalyzeRequest {
                files,
                analysis_type,
            })
            .await;

        loading.hide_loader();
        match result {
            Ok(response) => {
                match self.options.rendering {
                    ResultRendering::Markup => {
                        self.view.render_result_markup(response.result.as_str())
                    }
                    ResultRendering::Text => self.view.render_result_text(response.result.as_str()),
                }
                info!(
                    file_count,
                    result_len = response.result.as_str().len(),
                    "analysis rendered"
                );
                SubmitOutcome::Rendered
            }
            Err(err) => {
                error!(error = %err, file_count, "analysis failed");
                match self.options.rendering {
                    ResultRendering::Markup => self.view.render_result_markup(ANALYSIS_FAILED_MARKUP),
                    ResultRendering::Text => self.view.render_result_text(ANALYSIS_FAILED_TEXT),
                }
                SubmitOutcome::Failed
            }
        }
    }
}

/// Holds the controller in `Loading` with the loader shown and the trigger
/// disabled. Dropping it restores all three, including when the submit future
/// itself is dropped mid-request.
struct LoadingGuard<'a, V: PageView> {
    phase: &'a Cell<SubmitPhase>,
    view: &'a V,
    loader_visible: bool,
}

impl<'a, V: PageView> LoadingGuard<'a, V> {
    fn enter(phase: &'a Cell<SubmitPhase>, view: &'a V) -> Self {
        view.set_loader_visible(true);
        phase.set(SubmitPhase::Loading);
        view.set_submit_enabled(false);
        Self {
            phase,
            view,
            loader_visible: true,
        }
    }

    /// Hides the loader ahead of rendering; the guard stays in `Loading`.
    fn hide_loader(&mut self) {
        if self.loader_visible {
            self.view.set_loader_visible(false);
            self.loader_visible = false;
        }
    }
}

impl<V: PageView> Drop for LoadingGuard<'_, V> {
    fn drop(&mut self) {
        self.hide_loader();
        self.phase.set(SubmitPhase::Idle);
        self.view.set_submit_enabled(true);
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
