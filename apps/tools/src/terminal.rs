//! `PageView` for the command line: status goes to stderr, the result
//! fragment is kept for the caller to print.

use std::cell::{Cell, RefCell};

use client_core::{LocalFile, PageView};
use shared::domain::{AnalysisType, DropZoneStyle, FileSelection};

pub struct TerminalView {
    analysis_type: Cell<Option<AnalysisType>>,
    files: RefCell<Vec<LocalFile>>,
    result: RefCell<Option<String>>,
    status: RefCell<Vec<String>>,
    echo: bool,
}

impl TerminalView {
    pub fn new(analysis_type: AnalysisType) -> Self {
        Self {
            analysis_type: Cell::new(Some(analysis_type)),
            files: RefCell::new(Vec::new()),
            result: RefCell::new(None),
            status: RefCell::new(Vec::new()),
            echo: true,
        }
    }

    /// Records status lines without writing them to stderr.
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    pub fn take_result(&self) -> Option<String> {
        self.result.borrow_mut().take()
    }

    pub fn status_lines(&self) -> Vec<String> {
        self.status.borrow().clone()
    }

    fn status(&self, line: impl Into<String>) {
        let line = line.into();
        if self.echo {
            eprintln!("{line}");
        }
        self.status.borrow_mut().push(line);
    }
}

impl PageView for TerminalView {
    type File = LocalFile;

    fn checked_analysis_type(&self) -> Option<AnalysisType> {
        self.analysis_type.get()
    }

    fn set_description_visible(&self, kind: AnalysisType, visible: bool) {
        if visible {
            self.status(format!("analysis type: {kind}"));
        }
    }

    fn set_drop_zone_style(&self, _style: DropZoneStyle) {}

    fn set_drop_title(&self, text: &str) {
        self.status(text);
    }

    fn selected_file_count(&self) -> usize {
        self.files.borrow().len()
    }

    fn selected_files(&self) -> FileSelection<LocalFile> {
        FileSelection::new(self.files.borrow().clone())
    }

    fn assign_files(&self, files: FileSelection<LocalFile>) {
        *self.files.borrow_mut() = files.into_files();
    }

    fn alert(&self, message: &str) {
        self.status(format!("error: {message}"));
    }

    fn set_loader_visible(&self, visible: bool) {
        if visible {
            self.status("analyzing...");
        }
    }

    fn set_submit_enabled(&self, _enabled: bool) {}

    fn clear_result(&self) {
        self.result.borrow_mut().take();
    }

    fn render_result_markup(&self, markup: &str) {
        *self.result.borrow_mut() = Some(markup.to_string());
    }

    fn render_result_text(&self, text: &str) {
        *self.result.borrow_mut() = Some(text.to_string());
    }
}
