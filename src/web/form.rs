//! Contact form DOM binding

use super::{elements, js_error, listen, page_clock};
use crate::config::FormConfig;
use crate::form::{
    FieldMarkup, FieldValidationView, FormController, FormMarkup, FormSubmitter, FormView,
    HttpFormSubmitter, StatusMessage, SubmitStep,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement,
};

const FIELD_ERROR_CLASS: &str = "field-error";
const LOADING_MARKUP: &str = r#"<span class="spinner"></span>Sending..."#;

type SharedForm = Rc<RefCell<FormController<WebFormView>>>;

#[derive(Clone)]
enum Control {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
}

impl Control {
    fn from_element(element: Element) -> Option<Self> {
        match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => Some(Control::Input(input)),
            Err(element) => element
                .dyn_into::<HtmlTextAreaElement>()
                .ok()
                .map(Control::TextArea),
        }
    }

    fn element(&self) -> &Element {
        match self {
            Control::Input(input) => input,
            Control::TextArea(area) => area,
        }
    }

    fn value(&self) -> String {
        match self {
            Control::Input(input) => input.value(),
            Control::TextArea(area) => area.value(),
        }
    }

    fn markup(&self) -> FieldMarkup {
        let element = self.element();
        let (input_type, default_value) = match self {
            Control::Input(input) => (Some(input.type_()), input.default_value()),
            Control::TextArea(area) => (None, area.default_value()),
        };
        FieldMarkup {
            name: element.get_attribute("name").unwrap_or_default(),
            tag_name: element.tag_name(),
            input_type,
            min_length: element.get_attribute("minlength"),
            value: self.value(),
            default_value,
        }
    }
}

pub(crate) struct WebFormView {
    document: Document,
    form: HtmlFormElement,
    controls: Vec<Control>,
    submit: Option<HtmlButtonElement>,
    submit_label: String,
    status: Option<Element>,
}

impl WebFormView {
    fn control(&self, index: usize) -> Result<&Element, JsValue> {
        self.controls
            .get(index)
            .map(Control::element)
            .ok_or_else(|| JsValue::from_str("no such field"))
    }

    /// Error slots live next to the field, inside its parent
    fn error_slot(field: &Element) -> Result<Option<Element>, JsValue> {
        match field.parent_element() {
            Some(parent) => parent.query_selector(&format!(".{FIELD_ERROR_CLASS}")),
            None => Ok(None),
        }
    }

    fn try_show_error(&self, index: usize, message: &str) -> Result<(), JsValue> {
        let field = self.control(index)?;
        field.class_list().add_1("error")?;
        field.set_attribute("aria-invalid", "true")?;

        if let Some(existing) = Self::error_slot(field)? {
            existing.set_text_content(Some(message));
            return Ok(());
        }
        let Some(parent) = field.parent_element() else {
            return Ok(());
        };
        let slot = self.document.create_element("span")?;
        slot.set_class_name(FIELD_ERROR_CLASS);
        slot.set_attribute("role", "alert")?;
        slot.set_text_content(Some(message));
        parent.append_child(&slot)?;
        Ok(())
    }

    fn try_clear_error(&self, index: usize) -> Result<(), JsValue> {
        let field = self.control(index)?;
        field.class_list().remove_1("error")?;
        field.remove_attribute("aria-invalid")?;
        if let Some(existing) = Self::error_slot(field)? {
            existing.remove();
        }
        Ok(())
    }

    fn try_show_status(&self, status: &StatusMessage) -> Result<(), JsValue> {
        let Some(region) = &self.status else {
            return Ok(());
        };
        region.set_text_content(Some(&status.text));
        region.set_class_name(&format!("cf-status cf-status--{}", status.severity.modifier()));
        region.set_attribute("role", "alert")?;

        if let Some(fallback) = &status.fallback {
            let link = self.document.create_element("a")?;
            link.set_attribute("href", &fallback.href())?;
            link.set_text_content(Some(&fallback.label));
            region.append_with_str_1(" ")?;
            region.append_child(&link)?;
        }
        Ok(())
    }

    fn try_clear_status(&self) -> Result<(), JsValue> {
        if let Some(region) = &self.status {
            region.set_text_content(None);
            region.set_class_name("cf-status");
            region.remove_attribute("role")?;
        }
        Ok(())
    }

    fn try_set_loading(&self, loading: bool) -> Result<(), JsValue> {
        let Some(button) = &self.submit else {
            return Ok(());
        };
        button.set_disabled(loading);
        button.class_list().toggle_with_force("loading", loading)?;
        if loading {
            button.set_inner_html(LOADING_MARKUP);
        } else {
            button.set_text_content(Some(&self.submit_label));
        }
        Ok(())
    }
}

fn report(action: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        warn!("{action} failed: {err:?}");
    }
}

impl FieldValidationView for WebFormView {
    fn show_error(&self, index: usize, message: &str) {
        report("showing field error", self.try_show_error(index, message));
    }

    fn clear_error(&self, index: usize) {
        report("clearing field error", self.try_clear_error(index));
    }
}

impl FormView for WebFormView {
    fn show_status(&self, status: &StatusMessage) {
        report("showing status", self.try_show_status(status));
    }

    fn clear_status(&self) {
        report("clearing status", self.try_clear_status());
    }

    fn set_loading(&self, loading: bool) {
        report("toggling loading state", self.try_set_loading(loading));
    }

    fn reset_form(&self) {
        self.form.reset();
    }
}

pub(crate) fn mount(document: &Document, config: &FormConfig) -> anyhow::Result<()> {
    let Some(form) = document
        .get_element_by_id(&config.form_id)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        debug!(form_id = %config.form_id, "no contact form on this page");
        return Ok(());
    };

    let fields = form.query_selector_all("input, textarea").map_err(js_error)?;
    let controls: Vec<Control> = elements(fields)
        .into_iter()
        .filter_map(Control::from_element)
        .collect();

    let markup = FormMarkup {
        action: form.action(),
        method: form.get_attribute("method"),
        fields: controls.iter().map(Control::markup).collect(),
    };

    let submit = document
        .get_element_by_id(&config.submit_id)
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
    let view = WebFormView {
        document: document.clone(),
        form: form.clone(),
        controls: controls.clone(),
        submit_label: submit
            .as_ref()
            .and_then(|b| b.text_content())
            .unwrap_or_default(),
        submit,
        status: document.get_element_by_id(&config.status_id),
    };

    let locate = move |_: &str| -> Option<FormMarkup> { Some(markup.clone()) };
    let Some(controller) = FormController::initialize(&locate, view, config) else {
        return Ok(());
    };
    let controller: SharedForm = Rc::new(RefCell::new(controller));

    for (index, control) in controls.iter().enumerate() {
        if !controller
            .borrow()
            .field(index)
            .is_some_and(|f| f.is_tracked())
        {
            continue;
        }

        let on_blur = Rc::clone(&controller);
        let blurred = control.clone();
        listen(control.element(), "blur", move |_| {
            let mut form = on_blur.borrow_mut();
            form.set_value(index, blurred.value());
            form.on_blur(index);
        })?;

        let on_input = Rc::clone(&controller);
        let typed = control.clone();
        listen(control.element(), "input", move |_| {
            on_input.borrow_mut().on_input(index, typed.value());
        })?;
    }

    let submitter = Rc::new(HttpFormSubmitter::new());
    let on_submit = Rc::clone(&controller);
    listen(&form, "submit", move |event: Event| {
        event.prevent_default();

        let step = {
            let mut form = on_submit.borrow_mut();
            for (index, control) in controls.iter().enumerate() {
                form.set_value(index, control.value());
            }
            form.begin_submit(page_clock())
        };

        match step {
            SubmitStep::Send(request) => {
                let controller = Rc::clone(&on_submit);
                let submitter = Rc::clone(&submitter);
                spawn_local(async move {
                    let result = submitter.submit(&request).await;
                    let deadline = {
                        let mut form = controller.borrow_mut();
                        form.finish_submit(result, page_clock());
                        form.status_deadline()
                    };
                    schedule_tick(&controller, deadline);
                });
            }
            SubmitStep::Suppressed => {
                let deadline = on_submit.borrow().status_deadline();
                schedule_tick(&on_submit, deadline);
            }
            SubmitStep::Busy | SubmitStep::Invalid => {}
        }
    })?;

    Ok(())
}

/// Clear the success status once its deadline passes
fn schedule_tick(controller: &SharedForm, deadline: Option<Duration>) {
    let (Some(deadline), Some(window)) = (deadline, web_sys::window()) else {
        return;
    };
    // setTimeout may fire up to a millisecond before the truncated delay
    let delay = deadline.saturating_sub(page_clock()).as_millis() + 1;
    let timeout = i32::try_from(delay).unwrap_or(i32::MAX);

    let controller = Rc::clone(controller);
    let callback = Closure::once_into_js(move || {
        controller.borrow_mut().tick(page_clock());
    });
    if let Err(err) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), timeout)
    {
        warn!("could not schedule status clear: {err:?}");
    }
}
