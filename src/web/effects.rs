//! Page effects DOM binding

use super::{js_error, listen, query_all};
use crate::clock::from_millis_f64;
use crate::config::EffectsConfig;
use crate::effects::{
    anchor_target, parse_target, today, GalleryItem, LightboxContent, PageEffectsController,
    PageInventory, PageView, ScrollMetrics, ScrollSnapshot, SectionPosition,
};
use anyhow::Context;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Window,
};

type SharedEffects = Rc<RefCell<PageEffectsController<WebPageView>>>;

#[wasm_bindgen]
extern "C" {
    /// `bootstrap.Modal`, loaded by the page
    #[wasm_bindgen(js_namespace = bootstrap)]
    type Modal;

    #[wasm_bindgen(constructor, catch, js_namespace = bootstrap)]
    fn new(element: &Element) -> Result<Modal, JsValue>;

    #[wasm_bindgen(method)]
    fn show(this: &Modal);
}

struct Lightbox {
    modal: Modal,
    image: HtmlImageElement,
    caption: Element,
}

impl Lightbox {
    fn find(document: &Document, config: &EffectsConfig) -> Option<Self> {
        let root = document.get_element_by_id(&config.lightbox_id)?;
        let image = document
            .get_element_by_id(&config.lightbox_image_id)?
            .dyn_into::<HtmlImageElement>()
            .ok()?;
        let caption = document.get_element_by_id(&config.lightbox_caption_id)?;
        match Modal::new(&root) {
            Ok(modal) => Some(Self {
                modal,
                image,
                caption,
            }),
            Err(err) => {
                warn!("gallery lightbox disabled, bootstrap modal unavailable: {err:?}");
                None
            }
        }
    }
}

pub(crate) struct WebPageView {
    window: Window,
    back_to_top: Option<Element>,
    year_slots: Vec<Element>,
    progress_bar: Option<HtmlElement>,
    counters: Vec<Element>,
    reveal_cards: Vec<Element>,
    revealed_class: String,
    lightbox: Option<Lightbox>,
    nav_links: Vec<Element>,
}

fn report(action: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        warn!("{action} failed: {err:?}");
    }
}

impl PageView for WebPageView {
    fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn set_back_to_top_visible(&self, visible: bool) {
        if let Some(button) = &self.back_to_top {
            report(
                "toggling back-to-top",
                button.class_list().toggle_with_force("show", visible).map(drop),
            );
        }
    }

    fn set_progress_width(&self, percent: f64) {
        if let Some(bar) = &self.progress_bar {
            report(
                "sizing progress bar",
                bar.style().set_property("width", &format!("{percent}%")),
            );
        }
    }

    fn write_year(&self, year: &str) {
        for slot in &self.year_slots {
            slot.set_text_content(Some(year));
        }
    }

    fn set_counter_text(&self, index: usize, text: &str) {
        if let Some(counter) = self.counters.get(index) {
            counter.set_text_content(Some(text));
        }
    }

    fn reveal_cards(&self) {
        for card in &self.reveal_cards {
            report("revealing card", card.class_list().add_1(&self.revealed_class));
        }
    }

    fn show_lightbox(&self, content: &LightboxContent) {
        let Some(lightbox) = &self.lightbox else {
            return;
        };
        lightbox.image.set_src(&content.src);
        lightbox.image.set_alt(&content.alt);
        lightbox.caption.set_text_content(Some(&content.caption));
        lightbox.modal.show();
    }

    fn set_active_nav(&self, link: Option<usize>) {
        for (index, nav_link) in self.nav_links.iter().enumerate() {
            report(
                "highlighting nav link",
                nav_link
                    .class_list()
                    .toggle_with_force("active", link == Some(index))
                    .map(drop),
            );
        }
    }
}

fn scroll_metrics(window: &Window, document: &Document) -> ScrollMetrics {
    ScrollMetrics {
        scroll_y: window.scroll_y().unwrap_or_default(),
        viewport_height: window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or_default(),
        document_height: document
            .document_element()
            .map(|root| f64::from(root.scroll_height()))
            .unwrap_or_default(),
    }
}

/// Sections the nav links point to, keyed by link index
fn nav_sections(document: &Document, links: &[Element]) -> Vec<(usize, HtmlElement)> {
    links
        .iter()
        .enumerate()
        .filter_map(|(index, link)| {
            let href = link.get_attribute("href")?;
            let section = document
                .get_element_by_id(anchor_target(&href)?)?
                .dyn_into::<HtmlElement>()
                .ok()?;
            Some((index, section))
        })
        .collect()
}

pub(crate) fn mount(
    window: &Window,
    document: &Document,
    config: &EffectsConfig,
) -> anyhow::Result<()> {
    let back_to_top = document.get_element_by_id(&config.back_to_top_id);
    let progress_bar = document
        .get_element_by_id(&config.progress_bar_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    let year_slots = query_all(document, &config.year_selector)?;
    let counters = query_all(document, &config.counter_selector)?;
    let reveal_cards = query_all(document, &format!(".{}", config.reveal_class))?;
    let lightbox = Lightbox::find(document, config);
    let gallery_buttons = query_all(document, &config.gallery_item_selector)?;
    let nav_links = query_all(document, &config.nav_link_selector)?;

    let inventory = PageInventory {
        back_to_top: back_to_top.is_some(),
        year_slots: year_slots.len(),
        progress_bar: progress_bar.is_some(),
        counter_targets: counters
            .iter()
            .map(|el| parse_target(el.get_attribute("data-target").as_deref()))
            .collect(),
        reveal_cards: reveal_cards.len(),
        lightbox: lightbox.is_some(),
        gallery: gallery_buttons
            .iter()
            .map(|btn| GalleryItem {
                src: btn.get_attribute("data-gallery-src"),
                alt: btn.get_attribute("data-gallery-alt"),
            })
            .collect(),
        nav_links: nav_links.len(),
    };
    let sections = nav_sections(document, &nav_links);

    let view = WebPageView {
        window: window.clone(),
        back_to_top: back_to_top.clone(),
        year_slots,
        progress_bar,
        counters,
        reveal_cards,
        revealed_class: config.revealed_class.clone(),
        lightbox,
        nav_links,
    };
    let controller = PageEffectsController::initialize(inventory, view, config, today());
    let controller: SharedEffects = Rc::new(RefCell::new(controller));

    for link in query_all(document, &config.smooth_scroll_selector)? {
        let on_click = Rc::clone(&controller);
        let (window, document) = (window.clone(), document.clone());
        let anchor = link.clone();
        listen(&link, "click", move |event: Event| {
            let Some(href) = anchor.get_attribute("href") else {
                return;
            };
            let locate = |id: &str| {
                document
                    .get_element_by_id(id)
                    .map(|target| target.get_bounding_client_rect().top())
            };
            let scroll_y = window.scroll_y().unwrap_or_default();
            if on_click.borrow().on_anchor_click(&href, locate, scroll_y) {
                event.prevent_default();
            }
        })?;
    }

    if let Some(button) = &back_to_top {
        let on_click = Rc::clone(&controller);
        listen(button, "click", move |_| on_click.borrow().on_back_to_top_click())?;
    }

    if controller.borrow().has_scroll_effects() {
        let on_scroll = Rc::clone(&controller);
        let (scroll_window, document) = (window.clone(), document.clone());
        listen(window, "scroll", move |_| {
            let snapshot = ScrollSnapshot {
                metrics: scroll_metrics(&scroll_window, &document),
                sections: sections
                    .iter()
                    .map(|(link, section)| SectionPosition {
                        link: *link,
                        top: f64::from(section.offset_top()),
                    })
                    .collect(),
            };
            on_scroll.borrow_mut().on_scroll(&snapshot);
        })?;
    }

    if controller.borrow().has_counters() {
        if let Err(err) = observe_counter_trigger(document, config, &controller) {
            warn!("counters disabled: {err:#}");
        }
    }

    for (index, button) in gallery_buttons.iter().enumerate() {
        let on_click = Rc::clone(&controller);
        listen(button, "click", move |_| {
            on_click.borrow().on_gallery_click(index);
        })?;
    }

    if document.ready_state() == "complete" {
        controller.borrow_mut().on_load();
    } else {
        let on_load = Rc::clone(&controller);
        listen(window, "load", move |_| on_load.borrow_mut().on_load())?;
    }

    debug!("page effects mounted");
    Ok(())
}

fn observe_counter_trigger(
    document: &Document,
    config: &EffectsConfig,
    controller: &SharedEffects,
) -> anyhow::Result<()> {
    let trigger = document
        .query_selector(&config.counter_trigger_selector)
        .ok()
        .flatten()
        .or_else(|| document.body().map(Element::from));
    let Some(trigger) = trigger else {
        debug!("no element to observe for counters");
        return Ok(());
    };

    let on_visible = Rc::clone(controller);
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let started = on_visible
                    .borrow_mut()
                    .on_counter_visibility(entry.is_intersecting(), from_millis_f64(entry.time()));
                if started {
                    observer.disconnect();
                    if let Err(err) = animate_counters(Rc::clone(&on_visible)) {
                        warn!("counter animation not started: {err:#}");
                    }
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.counter_visibility_threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(js_error)?;
    observer.observe(&trigger);
    callback.forget();
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(frame: &FrameCallback) -> anyhow::Result<()> {
    let window = web_sys::window().context("no window")?;
    if let Some(callback) = frame.borrow().as_ref() {
        window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(js_error)?;
    }
    Ok(())
}

/// Drive the counters from animation frames until they complete
fn animate_counters(controller: SharedEffects) -> anyhow::Result<()> {
    let frame: FrameCallback = Rc::new(RefCell::new(None));
    let next = Rc::clone(&frame);

    *frame.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
        let running = controller
            .borrow_mut()
            .on_animation_frame(from_millis_f64(timestamp));
        if !running {
            // releases this closure once it returns
            next.borrow_mut().take();
            return;
        }
        if let Err(err) = request_frame(&next) {
            warn!("counter animation stopped: {err:#}");
            next.borrow_mut().take();
        }
    }));
    request_frame(&frame)
}
