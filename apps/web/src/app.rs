use std::rc::Rc;

use client_core::{ControllerOptions, UploadController};
use shared::domain::{AnalysisType, FileSelection};
use tracing::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element, Event, HtmlInputElement};

use crate::{
    config::PageBindings,
    dom::Scope,
    fetch::FetchTransport,
    logging,
    page::{selection_from_list, DomPage},
};

type Controller = UploadController<DomPage, FetchTransport>;

/// Binds the upload page found under `root` (the whole document when
/// omitted). `config` is an optional JSON object overriding element IDs, the
/// endpoint path, the result rendering mode and the log filter.
///
/// Call once per root; a second call on an already bound root fails.
#[wasm_bindgen]
pub fn initialize(root: Option<Element>, config: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let bindings = PageBindings::from_json(config.as_deref())
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    logging::init(&bindings.log_filter);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let scope = Scope::new(root, &document)?;
    if scope.is_bound() {
        return Err(JsValue::from_str("Upload page is already initialized"));
    }

    let radios = [
        (
            AnalysisType::QuestionPapers,
            scope.element::<HtmlInputElement>(bindings.radio_id(AnalysisType::QuestionPapers))?,
        ),
        (
            AnalysisType::TestPapers,
            scope.element::<HtmlInputElement>(bindings.radio_id(AnalysisType::TestPapers))?,
        ),
    ];
    let page = DomPage::bind(window, scope.clone(), &bindings)?;
    let controller: Rc<Controller> = Rc::new(UploadController::with_options(
        page,
        FetchTransport::new(bindings.endpoint.clone()),
        ControllerOptions {
            rendering: bindings.rendering,
        },
    ));

    for (kind, radio) in radios {
        wire_radio(&controller, kind, radio)?;
    }
    wire_drop_zone(&controller)?;
    wire_file_input(&controller)?;
    wire_upload_button(&controller)?;

    controller.sync_initial_state();
    scope.mark_bound()?;
    info!(endpoint = %bindings.endpoint, "upload page initialized");
    Ok(())
}

fn wire_radio(
    controller: &Rc<Controller>,
    kind: AnalysisType,
    radio: HtmlInputElement,
) -> Result<(), JsValue> {
    let controller = controller.clone();
    let radio_cb = radio.clone();
    let onchange = Closure::<dyn FnMut(Event)>::new(move |_| {
        controller.analysis_type_changed(kind, radio_cb.checked());
    });
    radio.add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
    onchange.forget();
    Ok(())
}

fn wire_drop_zone(controller: &Rc<Controller>) -> Result<(), JsValue> {
    let drop_zone = controller.view().drop_zone().clone();

    {
        let controller = controller.clone();
        let ondragover = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            controller.drag_over();
        });
        drop_zone
            .add_event_listener_with_callback("dragover", ondragover.as_ref().unchecked_ref())?;
        ondragover.forget();
    }

    {
        let controller = controller.clone();
        let ondragleave = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            controller.drag_leave();
        });
        drop_zone
            .add_event_listener_with_callback("dragleave", ondragleave.as_ref().unchecked_ref())?;
        ondragleave.forget();
    }

    {
        let controller = controller.clone();
        let ondrop = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let files = match event.dyn_ref::<DragEvent>() {
                Some(drag) => selection_from_list(drag.data_transfer().and_then(|dt| dt.files())),
                None => FileSelection::empty(),
            };
            controller.drop_files(files);
        });
        drop_zone.add_event_listener_with_callback("drop", ondrop.as_ref().unchecked_ref())?;
        ondrop.forget();
    }

    Ok(())
}

fn wire_file_input(controller: &Rc<Controller>) -> Result<(), JsValue> {
    let file_input = controller.view().file_input().clone();
    let controller = controller.clone();
    let onchange = Closure::<dyn FnMut(Event)>::new(move |_| {
        controller.update_file_counter();
    });
    file_input.add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
    onchange.forget();
    Ok(())
}

fn wire_upload_button(controller: &Rc<Controller>) -> Result<(), JsValue> {
    let upload_button = controller.view().upload_button().clone();
    let controller = controller.clone();
    let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
        let controller = controller.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = controller.submit().await;
            debug!(?outcome, "submit finished");
        });
    });
    upload_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
    onclick.forget();
    Ok(())
}
