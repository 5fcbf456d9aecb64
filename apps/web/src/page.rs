use client_core::PageView;
use shared::domain::{AnalysisType, DropZoneStyle, FileSelection};
use tracing::warn;
use wasm_bindgen::JsValue;
use web_sys::{DataTransfer, Element, File, FileList, HtmlElement, HtmlInputElement, Window};

use crate::{
    config::PageBindings,
    dom::{checked_radio_selector, describe_js_error, Scope},
};

/// The upload page's elements, resolved once at initialisation.
pub struct DomPage {
    window: Window,
    scope: Scope,
    radio_group: String,
    upload_button: HtmlElement,
    file_input: HtmlInputElement,
    result: HtmlElement,
    loader: HtmlElement,
    drop_zone: HtmlElement,
    drop_title: Element,
    question_papers_description: HtmlElement,
    test_papers_description: HtmlElement,
}

impl DomPage {
    pub fn bind(window: Window, scope: Scope, bindings: &PageBindings) -> Result<Self, JsValue> {
        let drop_zone: HtmlElement = scope.element(&bindings.drop_zone)?;
        let drop_title = drop_zone
            .query_selector(&bindings.drop_title_selector)?
            .ok_or_else(|| {
                JsValue::from_str(&format!(
                    "Missing {} inside #{}",
                    bindings.drop_title_selector, bindings.drop_zone
                ))
            })?;

        Ok(Self {
            upload_button: scope.element(&bindings.upload_button)?,
            file_input: scope.element(&bindings.file_input)?,
            result: scope.element(&bindings.result_container)?,
            loader: scope.element(&bindings.loader)?,
            question_papers_description: scope
                .element(bindings.description_id(AnalysisType::QuestionPapers))?,
            test_papers_description: scope
                .element(bindings.description_id(AnalysisType::TestPapers))?,
            radio_group: bindings.radio_group.clone(),
            drop_zone,
            drop_title,
            window,
            scope,
        })
    }

    pub fn upload_button(&self) -> &HtmlElement {
        &self.upload_button
    }

    pub fn file_input(&self) -> &HtmlInputElement {
        &self.file_input
    }

    pub fn drop_zone(&self) -> &HtmlElement {
        &self.drop_zone
    }

    fn description(&self, kind: AnalysisType) -> &HtmlElement {
        match kind {
            AnalysisType::QuestionPapers => &self.question_papers_description,
            AnalysisType::TestPapers => &self.test_papers_description,
        }
    }

    fn set_display(element: &HtmlElement, visible: bool) {
        let value = if visible { "block" } else { "none" };
        if let Err(err) = element.style().set_property("display", value) {
            warn!(error = %describe_js_error(&err), "failed to set display");
        }
    }
}

/// Collects a browser `FileList` into a selection.
pub fn selection_from_list(list: Option<FileList>) -> FileSelection<File> {
    let Some(list) = list else {
        return FileSelection::empty();
    };
    (0..list.length()).filter_map(|index| list.get(index)).collect()
}

impl PageView for DomPage {
    type File = File;

    fn checked_analysis_type(&self) -> Option<AnalysisType> {
        let checked = match self.scope.query(&checked_radio_selector(&self.radio_group)) {
            Ok(checked) => checked?,
            Err(err) => {
                warn!(error = %describe_js_error(&err), "checked radio lookup failed");
                return None;
            }
        };
        let value = checked.get_attribute("value")?;
        match value.parse() {
            Ok(kind) => Some(kind),
            Err(err) => {
                warn!(error = %err, "checked radio has an unexpected value");
                None
            }
        }
    }

    fn set_description_visible(&self, kind: AnalysisType, visible: bool) {
        Self::set_display(self.description(kind), visible);
    }

    fn set_drop_zone_style(&self, style: DropZoneStyle) {
        let css = self.drop_zone.style();
        let applied = css
            .set_property("background-color", style.background_color)
            .and_then(|_| css.set_property("border-color", style.border_color));
        if let Err(err) = applied {
            warn!(error = %describe_js_error(&err), "failed to style drop zone");
        }
    }

    fn set_drop_title(&self, text: &str) {
        self.drop_title.set_text_content(Some(text));
    }

    fn selected_file_count(&self) -> usize {
        self.file_input
            .files()
            .map(|files| files.length() as usize)
            .unwrap_or(0)
    }

    fn selected_files(&self) -> FileSelection<File> {
        selection_from_list(self.file_input.files())
    }

    fn assign_files(&self, files: FileSelection<File>) {
        // A FileList can only be built through a DataTransfer.
        let transfer = match DataTransfer::new() {
            Ok(transfer) => transfer,
            Err(err) => {
                warn!(error = %describe_js_error(&err), "cannot build file list");
                return;
            }
        };
        let items = transfer.items();
        for file in files.files() {
            if let Err(err) = items.add_with_file(file) {
                warn!(error = %describe_js_error(&err), file = %file.name(), "failed to add file");
            }
        }
        self.file_input.set_files(transfer.files().as_ref());
    }

    fn alert(&self, message: &str) {
        if let Err(err) = self.window.alert_with_message(message) {
            warn!(error = %describe_js_error(&err), "alert failed");
        }
    }

    fn set_loader_visible(&self, visible: bool) {
        Self::set_display(&self.loader, visible);
    }

    fn set_submit_enabled(&self, enabled: bool) {
        let result = if enabled {
            self.upload_button.remove_attribute("disabled")
        } else {
            self.upload_button.set_attribute("disabled", "")
        };
        if let Err(err) = result {
            warn!(error = %describe_js_error(&err), "failed to toggle upload button");
        }
    }

    fn clear_result(&self) {
        self.result.set_inner_html("");
    }

    fn render_result_markup(&self, markup: &str) {
        self.result.set_inner_html(markup);
    }

    fn render_result_text(&self, text: &str) {
        self.result.set_text_content(Some(text));
    }
}
