//! The page surface the controller reads from and writes to.

use shared::domain::{AnalysisType, DropZoneStyle, FileSelection};

/// DOM-side operations of the upload page.
///
/// Every method takes `&self`: the page is shared by all event handlers, so
/// implementations keep whatever interior state they need.
pub trait PageView {
    /// Handle for one selected file (a browser `File`, an in-memory file, ...).
    type File;

    fn checked_analysis_type(&self) -> Option<AnalysisType>;
    fn set_description_visible(&self, kind: AnalysisType, visible: bool);

    fn set_drop_zone_style(&self, style: DropZoneStyle);
    fn set_drop_title(&self, text: &str);

    fn selected_file_count(&self) -> usize;
    /// Snapshot of the file input's current contents.
    fn selected_files(&self) -> FileSelection<Self::File>;
    /// Replaces the file input's contents.
    fn assign_files(&self, files: FileSelection<Self::File>);

    /// Blocking notice shown to the user.
    fn alert(&self, message: &str);

    fn set_loader_visible(&self, visible: bool);
    fn set_submit_enabled(&self, enabled: bool);

    fn clear_result(&self);
    fn render_result_markup(&self, markup: &str);
    fn render_result_text(&self, text: &str);
}
