//! Page effects controller
//!
//! Owns the per-effect state and turns browser events into [`PageView`]
//! writes. Effects whose targets are missing from [`PageInventory`] are
//! never constructed, so their events are no-ops.

use super::back_to_top::BackToTop;
use super::counter::CounterGroup;
use super::lightbox::{GalleryItem, LightboxContent};
use super::nav::{NavHighlighter, SectionPosition};
use super::progress::{progress_percent, ScrollMetrics};
use super::reveal::RevealOnLoad;
use super::smooth_scroll::{anchor_target, is_in_page, SmoothScroll};
use super::view::{PageInventory, PageView};
use super::year::year_text;
use crate::config::EffectsConfig;
use chrono::NaiveDate;
use std::time::Duration;
use tracing::debug;

/// Everything a scroll handler needs to measure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollSnapshot {
    pub metrics: ScrollMetrics,
    /// Tops of the sections nav links point to; links without a section are
    /// left out
    pub sections: Vec<SectionPosition>,
}

/// Values derived on the last scroll event
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollEffectState {
    pub progress: f64,
    pub active_nav: Option<usize>,
    pub back_to_top_visible: bool,
}

pub struct PageEffectsController<V> {
    view: V,
    smooth_scroll: SmoothScroll,
    back_to_top: Option<BackToTop>,
    progress_bar: bool,
    counters: Option<CounterGroup>,
    reveal: Option<RevealOnLoad>,
    gallery: Option<Vec<GalleryItem>>,
    nav: Option<NavHighlighter>,
    state: ScrollEffectState,
}

impl<V: PageView> PageEffectsController<V> {
    /// Build the effects present on the page and stamp the year
    pub fn initialize(
        inventory: PageInventory,
        view: V,
        config: &EffectsConfig,
        today: NaiveDate,
    ) -> Self {
        if inventory.year_slots > 0 {
            view.write_year(&year_text(today));
        }

        let counters = (!inventory.counter_targets.is_empty())
            .then(|| CounterGroup::new(&inventory.counter_targets, config.counter_duration()));

        debug!(
            back_to_top = inventory.back_to_top,
            progress_bar = inventory.progress_bar,
            counters = inventory.counter_targets.len(),
            gallery = inventory.gallery.len(),
            nav_links = inventory.nav_links,
            "page effects initialised"
        );

        Self {
            view,
            smooth_scroll: SmoothScroll::new(config.header_offset),
            back_to_top: inventory
                .back_to_top
                .then(|| BackToTop::new(config.back_to_top_threshold)),
            progress_bar: inventory.progress_bar,
            counters,
            reveal: (inventory.reveal_cards > 0).then(RevealOnLoad::default),
            gallery: (inventory.lightbox && !inventory.gallery.is_empty())
                .then_some(inventory.gallery),
            nav: (inventory.nav_links > 0).then(|| NavHighlighter::new(config.nav_offset)),
            state: ScrollEffectState::default(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn state(&self) -> ScrollEffectState {
        self.state
    }

    pub fn has_counters(&self) -> bool {
        self.counters.is_some()
    }

    pub fn has_scroll_effects(&self) -> bool {
        self.back_to_top.is_some() || self.progress_bar || self.nav.is_some()
    }

    /// Back-to-top visibility, progress bar width and active nav link
    pub fn on_scroll(&mut self, snapshot: &ScrollSnapshot) {
        let scroll_y = snapshot.metrics.scroll_y;

        if let Some(button) = &self.back_to_top {
            let visible = button.is_visible(scroll_y);
            self.view.set_back_to_top_visible(visible);
            self.state.back_to_top_visible = visible;
        }

        if self.progress_bar {
            let percent = progress_percent(&snapshot.metrics);
            self.view.set_progress_width(percent);
            self.state.progress = percent;
        }

        if let Some(nav) = &self.nav {
            let active = nav.active_link(scroll_y, &snapshot.sections);
            self.view.set_active_nav(active);
            self.state.active_nav = active;
        }
    }

    /// Click on an in-page navigation link. `locate` returns the viewport
    /// top of the element with the given id. Returns true when the default
    /// navigation must be suppressed.
    pub fn on_anchor_click<F>(&self, href: &str, locate: F, scroll_y: f64) -> bool
    where
        F: FnOnce(&str) -> Option<f64>,
    {
        if !is_in_page(href) {
            return false;
        }
        if let Some(rect_top) = anchor_target(href).and_then(locate) {
            let top = self.smooth_scroll.target_top(rect_top, scroll_y);
            self.view.smooth_scroll_to(top);
        } else {
            debug!(href, "in-page link without a target");
        }
        true
    }

    pub fn on_back_to_top_click(&self) {
        if self.back_to_top.is_some() {
            self.view.smooth_scroll_to(0.0);
        }
    }

    /// Intersection notification for the counter trigger. Returns true when
    /// the caller should start requesting animation frames.
    pub fn on_counter_visibility(&mut self, is_intersecting: bool, now: Duration) -> bool {
        let Some(counters) = &mut self.counters else {
            return false;
        };
        let started = counters.on_visibility(is_intersecting, now);
        if started {
            debug!(counters = counters.len(), "counter animation started");
        }
        started
    }

    /// Render one frame of the counters. Returns true while another frame is
    /// needed.
    pub fn on_animation_frame(&mut self, now: Duration) -> bool {
        let Some(counters) = &self.counters else {
            return false;
        };
        if !counters.is_started() {
            return false;
        }
        for (index, text) in counters.frame(now).iter().enumerate() {
            self.view.set_counter_text(index, text);
        }
        counters.is_running(now)
    }

    /// Whole page (images included) finished loading
    pub fn on_load(&mut self) {
        if let Some(reveal) = &mut self.reveal {
            if reveal.on_load() {
                self.view.reveal_cards();
            }
        }
    }

    /// Click on the gallery button at `index`. Returns true if the lightbox
    /// opened.
    pub fn on_gallery_click(&self, index: usize) -> bool {
        let Some(item) = self.gallery.as_ref().and_then(|items| items.get(index)) else {
            return false;
        };
        self.view.show_lightbox(&LightboxContent::from(item));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum PageEvent {
        ScrollTo(f64),
        BackToTop(bool),
        Progress(f64),
        Year(String),
        Counter(usize, String),
        Reveal,
        Lightbox(LightboxContent),
        ActiveNav(Option<usize>),
    }

    #[derive(Default)]
    struct RecordingView {
        events: RefCell<Vec<PageEvent>>,
    }

    impl RecordingView {
        fn record(&self, event: PageEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    impl PageView for RecordingView {
        fn smooth_scroll_to(&self, top: f64) {
            self.record(PageEvent::ScrollTo(top));
        }
        fn set_back_to_top_visible(&self, visible: bool) {
            self.record(PageEvent::BackToTop(visible));
        }
        fn set_progress_width(&self, percent: f64) {
            self.record(PageEvent::Progress(percent));
        }
        fn write_year(&self, year: &str) {
            self.record(PageEvent::Year(year.to_string()));
        }
        fn set_counter_text(&self, index: usize, text: &str) {
            self.record(PageEvent::Counter(index, text.to_string()));
        }
        fn reveal_cards(&self) {
            self.record(PageEvent::Reveal);
        }
        fn show_lightbox(&self, content: &LightboxContent) {
            self.record(PageEvent::Lightbox(content.clone()));
        }
        fn set_active_nav(&self, link: Option<usize>) {
            self.record(PageEvent::ActiveNav(link));
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn full_inventory() -> PageInventory {
        PageInventory {
            back_to_top: true,
            year_slots: 2,
            progress_bar: true,
            counter_targets: vec![50.0, 12.0],
            reveal_cards: 3,
            lightbox: true,
            gallery: vec![
                GalleryItem::new("/img/a.jpg", "Hackathon"),
                GalleryItem::new("/img/b.jpg", "Conference talk"),
            ],
            nav_links: 3,
        }
    }

    fn controller(inventory: PageInventory) -> PageEffectsController<RecordingView> {
        PageEffectsController::initialize(
            inventory,
            RecordingView::default(),
            &EffectsConfig::default(),
            today(),
        )
    }

    fn events(page: &PageEffectsController<RecordingView>) -> Vec<PageEvent> {
        page.view().events.borrow().clone()
    }

    fn snapshot(scroll_y: f64) -> ScrollSnapshot {
        ScrollSnapshot {
            metrics: ScrollMetrics {
                scroll_y,
                viewport_height: 1000.0,
                document_height: 5000.0,
            },
            sections: vec![
                SectionPosition { link: 0, top: 0.0 },
                SectionPosition { link: 1, top: 900.0 },
                SectionPosition { link: 2, top: 2500.0 },
            ],
        }
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    mod initialize {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_writes_year_once() {
            let page = controller(full_inventory());
            assert_eq!(events(&page), vec![PageEvent::Year("2026".to_string())]);
        }

        #[test]
        fn test_empty_page_is_inert() {
            let mut page = controller(PageInventory::default());

            page.on_scroll(&snapshot(400.0));
            page.on_back_to_top_click();
            page.on_load();
            assert!(!page.on_counter_visibility(true, ms(0)));
            assert!(!page.on_animation_frame(ms(16)));
            assert!(!page.on_gallery_click(0));

            assert!(events(&page).is_empty());
            assert!(!page.has_counters());
            assert!(!page.has_scroll_effects());
        }
    }

    mod scrolling {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_top_of_page() {
            let mut page = controller(full_inventory());
            page.view().events.borrow_mut().clear();

            page.on_scroll(&snapshot(0.0));

            assert_eq!(
                events(&page),
                vec![
                    PageEvent::BackToTop(false),
                    PageEvent::Progress(0.0),
                    PageEvent::ActiveNav(Some(0)),
                ]
            );
        }

        #[test]
        fn test_bottom_of_page() {
            let mut page = controller(full_inventory());
            page.on_scroll(&snapshot(4000.0));

            assert_eq!(
                page.state(),
                ScrollEffectState {
                    progress: 100.0,
                    active_nav: Some(2),
                    back_to_top_visible: true,
                }
            );
        }

        #[test]
        fn test_nav_uses_lookahead() {
            let mut page = controller(full_inventory());
            page.on_scroll(&snapshot(780.0));
            assert_eq!(page.state().active_nav, Some(1));
        }

        #[test]
        fn test_only_present_effects_render() {
            let mut page = controller(PageInventory {
                progress_bar: true,
                ..Default::default()
            });
            page.on_scroll(&snapshot(2000.0));
            assert_eq!(events(&page), vec![PageEvent::Progress(50.0)]);
        }
    }

    mod clicks {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_anchor_click_scrolls_below_header() {
            let page = controller(PageInventory::default());
            let prevent = page.on_anchor_click(
                "#projects",
                |id| (id == "projects").then_some(600.0),
                1000.0,
            );

            assert!(prevent);
            assert_eq!(events(&page), vec![PageEvent::ScrollTo(1520.0)]);
        }

        #[test]
        fn test_anchor_without_target_still_prevents_default() {
            let page = controller(PageInventory::default());
            assert!(page.on_anchor_click("#missing", |_| None, 0.0));
            assert!(page.on_anchor_click("#", |_| Some(1.0), 0.0));
            assert!(events(&page).is_empty());
        }

        #[test]
        fn test_external_link_is_left_alone() {
            let page = controller(PageInventory::default());
            assert!(!page.on_anchor_click("https://github.com", |_| Some(0.0), 0.0));
            assert!(events(&page).is_empty());
        }

        #[test]
        fn test_back_to_top_click() {
            let page = controller(full_inventory());
            page.on_back_to_top_click();
            assert_eq!(events(&page).last(), Some(&PageEvent::ScrollTo(0.0)));
        }

        #[test]
        fn test_gallery_click_opens_lightbox() {
            let page = controller(full_inventory());
            assert!(page.on_gallery_click(1));
            assert_eq!(
                events(&page).last(),
                Some(&PageEvent::Lightbox(LightboxContent {
                    src: "/img/b.jpg".to_string(),
                    alt: "Conference talk".to_string(),
                    caption: "Conference talk".to_string(),
                }))
            );
            assert!(!page.on_gallery_click(9));
        }

        #[test]
        fn test_gallery_without_modal_is_inert() {
            let page = controller(PageInventory {
                lightbox: false,
                ..full_inventory()
            });
            assert!(!page.on_gallery_click(0));
        }
    }

    mod counters {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_animation_runs_to_target() {
            let mut page = controller(full_inventory());
            page.view().events.borrow_mut().clear();

            assert!(!page.on_animation_frame(ms(0)));
            assert!(!page.on_counter_visibility(false, ms(900)));
            assert!(page.on_counter_visibility(true, ms(1_000)));
            assert!(!page.on_counter_visibility(true, ms(1_010)));

            assert!(page.on_animation_frame(ms(1_600)));
            assert!(!page.on_animation_frame(ms(2_200)));

            assert_eq!(
                events(&page),
                vec![
                    PageEvent::Counter(0, "25".to_string()),
                    PageEvent::Counter(1, "6".to_string()),
                    PageEvent::Counter(0, "50".to_string()),
                    PageEvent::Counter(1, "12".to_string()),
                ]
            );
        }
    }

    mod reveal {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_reveal_happens_once() {
            let mut page = controller(full_inventory());
            page.on_load();
            page.on_load();
            let reveals = events(&page)
                .into_iter()
                .filter(|e| *e == PageEvent::Reveal)
                .count();
            assert_eq!(reveals, 1);
        }
    }
}
