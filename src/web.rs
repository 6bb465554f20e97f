//! Browser bindings (wasm32 only).
//!
//! Attaches the logic modules to the static page. Everything here is glue:
//! look elements up, register listeners, apply what the logic modules decide.
//!
//! ## Element Hooks
//!
//! | Feature | Elements |
//! |---------|----------|
//! | Menu | `.hamburger`, `.nav-menu`, `.nav-link` |
//! | Smooth scroll | `a[href^="#"]` |
//! | Router | `#home`, `#pinterest`, `#projects`, `#contact` (configurable), `[data-repo]`, `.back-btn`, `section#repo-<key>` |
//! | Lightbox trigger | `.media-item [data-lightbox]`, or an inline `onclick="openLightbox(this)"` |
//! | Filter | `.filter-btn[data-filter]`, `.media-item[data-category]` |
//! | Lightbox | `#lightbox`, `#lightbox-img`, `#lightbox-video`, `#lightbox-title`, `#lightbox-details`; items carry `img` and `.media-info` |
//! | Effects | `.header`, `.hero`, `#profileImg`, `.social-link`, `.profile-title`, `.loader`, `img[data-src]` |
//! | Contact | `.contact-form` with `#name`, `#email`, `#subject`, `#message`; `.submit-btn` |
//! | Data | `<script type="application/toml" id="site-config">`, `<script type="application/toml" id="repo-catalog">` |
//!
//! Each feature looks up its own elements and is skipped when any is missing.
//!
//! Listeners and observers live as long as the page, so they are forgotten
//! after registration. Filter and lightbox timers are kept as [`Timeout`]
//! handles instead: storing a new handle drops the old one, which cancels it.
//!
//! The page state sits in a thread-local so the functions exported to
//! JavaScript (`openRepository`, `goBackToMain`, `openLightbox`) reach the
//! same router and lightbox as the listeners. Module exports are not globals,
//! so [`start`] also sets them on `window` for inline `onclick` handlers.
//! The document click listener routes through [`crate::delegate`], which
//! skips elements carrying an inline `onclick` so a click is handled once.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use maud::Markup;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlImageElement,
    HtmlInputElement, HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, MouseEvent, NodeList, PopStateEvent, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, console,
};

use crate::catalog::Catalog;
use crate::config::{self, GalleryConfig, SiteConfig};
use crate::contact::{
    self, ContactForm, Field, FormSurface, MessageSlot, ReqwestRelay, StatusMessage,
    SubmitOutcome,
};
use crate::delegate::{self, Clicked, Delegated};
use crate::effects::{
    self, HeaderStyle, Hover, LOAD_FADE_SELECTOR, PROFILE_HOVER, REVEAL_ROOT_MARGIN,
    REVEAL_SELECTOR, REVEAL_THRESHOLD, RIPPLE_CSS, Ripple, SOCIAL_HOVER,
};
use crate::gallery::{
    self, Filter, ItemChange, KeyAction, Lightbox, LightboxContent, MediaKind, ModalChange, Step,
};
use crate::render;
use crate::router::{self, HistoryOp, HistoryState, Router, ViewHost};

const LOADED_BANNER: &str =
    "🎉 Website loaded successfully! All animations and interactions are ready.";

thread_local! {
    static PAGE: RefCell<Option<Rc<Page>>> = const { RefCell::new(None) };
}

struct Page {
    document: Document,
    config: SiteConfig,
    router: RefCell<Router<DomViewHost>>,
    gallery: Gallery,
    lightbox: Option<LightboxView>,
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    let config = page_config(&document);
    let host = DomViewHost {
        document: document.clone(),
        sections: config.router.main_sections.clone(),
    };
    let router = Router::new(page_catalog(&document), config.router.clone(), host);
    let page = Rc::new(Page {
        gallery: Gallery::find(&document),
        lightbox: LightboxView::find(&document),
        router: RefCell::new(router),
        document,
        config,
    });
    PAGE.with(|slot| *slot.borrow_mut() = Some(page.clone()));
    publish_entry_points();

    bind_navigation(&page.document);
    bind_router();
    bind_delegated_clicks(&page);
    bind_filters(&page);
    bind_lightbox(&page);
    bind_scroll_effects(&page);
    bind_observers(&page.document);
    bind_hover_effects(&page);
    bind_contact_form(&page);
    on_page_load(&page);

    console::log_1(&LOADED_BANNER.into());
}

// ============================================================================
// Exports
// ============================================================================

/// Show a repository's detail panel. Unknown keys are ignored.
#[wasm_bindgen(js_name = openRepository)]
pub fn open_repository(key: &str) {
    with_router(|router| {
        router.open(key);
    });
}

#[wasm_bindgen(js_name = goBackToMain)]
pub fn go_back_to_main() {
    with_router(|router| {
        router.close();
    });
}

/// Open the lightbox on the media item containing `button`.
#[wasm_bindgen(js_name = openLightbox)]
pub fn open_lightbox(button: Element) {
    with_page(|page| {
        if let Some(index) = page.gallery.index_of(&button) {
            open_lightbox_at(page, index);
        }
    });
}

/// Expose the exports as `window` globals.
fn publish_entry_points() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let entry_points: [(&str, JsValue); 3] = [
        (
            "openRepository",
            Closure::<dyn Fn(String)>::new(|key: String| open_repository(&key)).into_js_value(),
        ),
        ("goBackToMain", Closure::<dyn Fn()>::new(go_back_to_main).into_js_value()),
        (
            "openLightbox",
            Closure::<dyn Fn(Element)>::new(open_lightbox).into_js_value(),
        ),
    ];
    for (name, function) in entry_points {
        if js_sys::Reflect::set(&window, &JsValue::from_str(name), &function).is_err() {
            console::warn_1(&format!("could not publish window.{name}").into());
        }
    }
}

fn with_page(f: impl FnOnce(&Rc<Page>)) {
    if let Some(page) = PAGE.with(|slot| slot.borrow().clone()) {
        f(&page);
    }
}

fn with_router(f: impl FnOnce(&mut Router<DomViewHost>)) {
    with_page(|page| match page.router.try_borrow_mut() {
        Ok(mut router) => f(&mut router),
        Err(_) => console::warn_1(&"navigation dropped: router busy".into()),
    });
}

// ============================================================================
// DOM helpers
// ============================================================================

fn collect<T: JsCast>(list: Result<NodeList, JsValue>) -> Vec<T> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

fn query<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    document
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<T>()
        .ok()
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

fn set_display(element: &HtmlElement, visible: bool) {
    set_style(element, "display", if visible { "block" } else { "none" });
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn scroll_smooth(target: &Element, block: Option<ScrollLogicalPosition>) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    if let Some(block) = block {
        options.set_block(block);
    }
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

fn timeout_ms(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

/// Current value of an `<input>` or `<textarea>`.
fn field_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    element
        .dyn_ref::<HtmlTextAreaElement>()
        .map(HtmlTextAreaElement::value)
}

fn page_config(document: &Document) -> SiteConfig {
    let Some(text) = document
        .get_element_by_id("site-config")
        .and_then(|el| el.text_content())
    else {
        return SiteConfig::default();
    };
    config::config_from_str(&text).unwrap_or_else(|err| {
        console::warn_1(&format!("ignoring #site-config: {err}").into());
        SiteConfig::default()
    })
}

fn page_catalog(document: &Document) -> Catalog {
    let Some(text) = document
        .get_element_by_id("repo-catalog")
        .and_then(|el| el.text_content())
    else {
        return Catalog::builtin();
    };
    Catalog::from_toml_str(&text).unwrap_or_else(|err| {
        console::warn_1(&format!("ignoring #repo-catalog: {err}").into());
        Catalog::builtin()
    })
}

// ============================================================================
// Navigation menu and smooth scrolling
// ============================================================================

fn bind_navigation(document: &Document) {
    if let (Some(hamburger), Some(menu)) = (
        query::<Element>(document, ".hamburger"),
        query::<Element>(document, ".nav-menu"),
    ) {
        let (toggle, toggled) = (hamburger.clone(), menu.clone());
        EventListener::new(&hamburger, "click", move |_| {
            let _ = toggle.class_list().toggle("active");
            let _ = toggled.class_list().toggle("active");
        })
        .forget();

        for link in collect::<Element>(document.query_selector_all(".nav-link")) {
            let (hamburger, menu) = (hamburger.clone(), menu.clone());
            EventListener::new(&link, "click", move |_| {
                let _ = hamburger.class_list().remove_1("active");
                let _ = menu.class_list().remove_1("active");
            })
            .forget();
        }
    }

    for anchor in collect::<Element>(document.query_selector_all(r##"a[href^="#"]"##)) {
        let (document, this) = (document.clone(), anchor.clone());
        EventListener::new_with_options(
            &anchor,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                let Some(href) = this.get_attribute("href") else {
                    return;
                };
                // A bare "#" is not a valid selector; query_selector errors and nothing scrolls
                if let Some(target) = document.query_selector(&href).ok().flatten() {
                    scroll_smooth(&target, Some(ScrollLogicalPosition::Start));
                }
            },
        )
        .forget();
    }
}

// ============================================================================
// Router
// ============================================================================

/// The page as seen by the router.
struct DomViewHost {
    document: Document,
    sections: Vec<String>,
}

impl ViewHost for DomViewHost {
    type Panel = HtmlElement;

    fn show_main(&mut self, visible: bool) {
        for id in &self.sections {
            if let Some(section) = by_id::<HtmlElement>(&self.document, id) {
                set_display(&section, visible);
            }
        }
    }

    fn mount_panel(&mut self, key: &str, contents: Markup) -> Option<HtmlElement> {
        let id = router::panel_id(key);
        if let Some(existing) = by_id::<HtmlElement>(&self.document, &id) {
            return Some(existing);
        }
        let section = self
            .document
            .create_element("section")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        section.set_id(&id);
        section.set_class_name("repo-page");
        section.set_inner_html(&contents.into_string());
        self.document.body()?.append_child(&section).ok()?;
        Some(section)
    }

    fn show_panel(&mut self, panel: &HtmlElement, visible: bool) {
        set_display(panel, visible);
    }

    fn record_history(&mut self, op: &HistoryOp) {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            return;
        };
        let result = match op {
            HistoryOp::Push(entry) => history_state(&entry.state)
                .and_then(|state| history.push_state_with_url(&state, &entry.title, Some(entry.url.as_str()))),
            HistoryOp::Replace(entry) => history_state(&entry.state).and_then(|state| {
                history.replace_state_with_url(&state, &entry.title, Some(entry.url.as_str()))
            }),
            HistoryOp::Keep => Ok(()),
        };
        if let Err(err) = result {
            console::warn_2(&"history update failed:".into(), &err);
        }
    }

    fn scroll_to_panel(&mut self, panel: &HtmlElement) {
        scroll_smooth(panel, None);
    }

    fn scroll_to_section(&mut self, id: &str) {
        if let Some(section) = self.document.get_element_by_id(id) {
            scroll_smooth(&section, None);
        }
    }
}

fn history_state(state: &HistoryState) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(state).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}

/// The history state a `popstate` event landed on, if it carries one of ours.
fn restored_state(event: &Event) -> Option<HistoryState> {
    let state = event.dyn_ref::<PopStateEvent>()?.state();
    if state.is_null() || state.is_undefined() {
        return None;
    }
    let json = js_sys::JSON::stringify(&state).ok()?.as_string()?;
    serde_json::from_str(&json).ok()
}

fn bind_router() {
    if let Some(window) = web_sys::window() {
        EventListener::new(&window, "popstate", |event| {
            let state = restored_state(event);
            with_router(|router| {
                router.restore(state);
            });
        })
        .forget();
    }
}

impl Clicked for Element {
    fn closest(&self, selector: &str) -> Option<Self> {
        Element::closest(self, selector).ok().flatten()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }
}

/// One document-level listener, so panels built later are covered too.
fn bind_delegated_clicks(page: &Rc<Page>) {
    let handle = page.clone();
    EventListener::new_with_options(
        &page.document,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(target) = event_element(event) else {
                return;
            };
            let routed = delegate::route_click(&target);
            if routed.prevents_default() {
                event.prevent_default();
            }
            match routed {
                Delegated::OpenRepository(key) => with_router(|router| {
                    router.open(&key);
                }),
                Delegated::BackToMain => with_router(|router| {
                    router.close();
                }),
                Delegated::OpenLightbox(control) => {
                    if let Some(index) = handle.gallery.index_of(&control) {
                        open_lightbox_at(&handle, index);
                    }
                }
                Delegated::Ignore => {}
            }
        },
    )
    .forget();
}

// ============================================================================
// Gallery filter
// ============================================================================

struct Gallery {
    items: Vec<HtmlElement>,
    /// Pending delayed change per item, index-aligned with `items`.
    timers: RefCell<Vec<Option<Timeout>>>,
}

impl Gallery {
    fn find(document: &Document) -> Self {
        let items: Vec<HtmlElement> = collect(document.query_selector_all(".media-item"));
        let timers = RefCell::new(items.iter().map(|_| None).collect());
        Self { items, timers }
    }

    fn index_of(&self, control: &Element) -> Option<usize> {
        let item = control.closest(".media-item").ok().flatten()?;
        self.items
            .iter()
            .position(|candidate| AsRef::<Element>::as_ref(candidate) == &item)
    }

    /// Which items are currently in the layout.
    fn visible(&self) -> Vec<bool> {
        self.items
            .iter()
            .map(|item| {
                item.style()
                    .get_property_value("display")
                    .map_or(true, |display| display != "none")
            })
            .collect()
    }

    fn apply_filter(&self, filter: &Filter, timing: &GalleryConfig) {
        let categories: Vec<Option<String>> = self
            .items
            .iter()
            .map(|item| item.get_attribute("data-category"))
            .collect();
        let plan = gallery::plan_filter(filter, categories.iter().map(Option::as_deref), timing);

        let mut timers = self.timers.borrow_mut();
        for ((item, step), timer) in self.items.iter().zip(plan).zip(timers.iter_mut()) {
            apply_item_change(item, step.now);
            let (item, change) = (item.clone(), step.later.change);
            *timer = Some(Timeout::new(timeout_ms(step.later.delay), move || {
                apply_item_change(&item, change);
            }));
        }
    }
}

fn apply_item_change(item: &HtmlElement, change: ItemChange) {
    let classes = item.class_list();
    match change {
        ItemChange::Display(visible) => set_display(item, visible),
        ItemChange::MarkShown => {
            let _ = classes.add_1("show");
            let _ = classes.remove_1("hidden");
        }
        ItemChange::MarkHidden => {
            let _ = classes.add_1("hidden");
            let _ = classes.remove_1("show");
        }
    }
}

fn bind_filters(page: &Rc<Page>) {
    let buttons: Vec<HtmlElement> = collect(page.document.query_selector_all(".filter-btn"));
    if buttons.is_empty() {
        return;
    }
    inject_ripple_css(&page.document);

    for button in &buttons {
        let (page, siblings, this) = (page.clone(), buttons.clone(), button.clone());
        EventListener::new(button, "click", move |event| {
            for sibling in &siblings {
                let _ = sibling.class_list().remove_1("active");
            }
            let _ = this.class_list().add_1("active");

            let value = this.get_attribute("data-filter").unwrap_or_else(|| "all".into());
            page.gallery
                .apply_filter(&Filter::parse(&value), &page.config.gallery);

            if let Some(click) = event.dyn_ref::<MouseEvent>() {
                spawn_ripple(&page.document, &this, click, page.config.effects.ripple_ms);
            }
        })
        .forget();
    }
}

fn inject_ripple_css(document: &Document) {
    let Some(head) = query::<Element>(document, "head") else {
        return;
    };
    if let Ok(style) = document.create_element("style") {
        style.set_text_content(Some(RIPPLE_CSS));
        let _ = head.append_child(&style);
    }
}

fn spawn_ripple(document: &Document, button: &HtmlElement, click: &MouseEvent, lifetime_ms: u32) {
    let rect = button.get_bounding_client_rect();
    let ripple = Ripple::at(
        (rect.left(), rect.top(), rect.width(), rect.height()),
        (f64::from(click.client_x()), f64::from(click.client_y())),
    );
    let Some(span) = document
        .create_element("span")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    for (property, value) in ripple.style() {
        set_style(&span, property, &value);
    }
    let _ = span.class_list().add_1("ripple");
    if button.append_child(&span).is_ok() {
        Timeout::new(lifetime_ms, move || span.remove()).forget();
    }
}

// ============================================================================
// Lightbox
// ============================================================================

struct LightboxView {
    root: HtmlElement,
    image: HtmlImageElement,
    video: Option<HtmlElement>,
    title: Element,
    details: Element,
    state: RefCell<Lightbox>,
    /// Pending half of the last open/close step.
    timer: RefCell<Option<Timeout>>,
}

impl LightboxView {
    fn find(document: &Document) -> Option<Self> {
        Some(Self {
            root: by_id(document, "lightbox")?,
            image: by_id(document, "lightbox-img")?,
            video: by_id(document, "lightbox-video"),
            title: document.get_element_by_id("lightbox-title")?,
            details: document.get_element_by_id("lightbox-details")?,
            state: RefCell::new(Lightbox::new()),
            timer: RefCell::new(None),
        })
    }

    fn show_content(&self, content: &LightboxContent) {
        self.title.set_text_content(Some(&content.title));
        self.details.set_text_content(Some(&content.details));
        self.image.set_src(content.display_src());
        set_display(&self.image, true);
        if let Some(video) = &self.video {
            set_display(video, false);
        }
    }

    fn apply(&self, document: &Document, change: ModalChange) {
        match change {
            ModalChange::Layout(visible) => {
                set_display(&self.root, visible);
                if let Some(body) = document.body() {
                    set_style(&body, "overflow", if visible { "hidden" } else { "auto" });
                }
            }
            ModalChange::Fade(true) => {
                let _ = self.root.class_list().add_1("show");
            }
            ModalChange::Fade(false) => {
                let _ = self.root.class_list().remove_1("show");
            }
        }
    }
}

fn item_content(item: &HtmlElement) -> Option<LightboxContent> {
    let image = item
        .query_selector("img")
        .ok()
        .flatten()?
        .dyn_into::<HtmlImageElement>()
        .ok()?;
    let info = item.query_selector(".media-info").ok().flatten()?;
    let title = info
        .query_selector("h4")
        .ok()
        .flatten()
        .and_then(|heading| heading.text_content())
        .unwrap_or_default();
    let paragraphs: Vec<String> = collect::<Element>(info.query_selector_all("p"))
        .iter()
        .filter_map(|p| p.text_content())
        .collect();
    let kind = MediaKind::parse(item.get_attribute("data-type").as_deref());
    Some(LightboxContent::new(title, paragraphs, image.src(), kind))
}

fn run_modal_step(page: &Rc<Page>, step: Step<ModalChange>) {
    let Some(lightbox) = &page.lightbox else {
        return;
    };
    lightbox.apply(&page.document, step.now);

    let (handle, later) = (page.clone(), step.later);
    let timeout = Timeout::new(timeout_ms(later.delay), move || {
        if let Some(lightbox) = &handle.lightbox {
            lightbox.apply(&handle.document, later.change);
            lightbox.state.borrow_mut().settle();
        }
    });
    // Dropping the previous handle cancels a transition still in flight
    *lightbox.timer.borrow_mut() = Some(timeout);
}

fn open_lightbox_at(page: &Rc<Page>, index: usize) {
    let Some(lightbox) = &page.lightbox else {
        return;
    };
    let Some(content) = page.gallery.items.get(index).and_then(item_content) else {
        return;
    };
    lightbox.show_content(&content);
    let step = lightbox.state.borrow_mut().open(index, &page.config.gallery);
    run_modal_step(page, step);
}

fn close_lightbox(page: &Rc<Page>) {
    let Some(lightbox) = &page.lightbox else {
        return;
    };
    let step = lightbox.state.borrow_mut().close(&page.config.gallery);
    if let Some(step) = step {
        run_modal_step(page, step);
    }
}

fn bind_lightbox(page: &Rc<Page>) {
    let Some(lightbox) = &page.lightbox else {
        return;
    };

    let (handle, backdrop) = (page.clone(), lightbox.root.clone());
    EventListener::new(&lightbox.root, "click", move |event| {
        let on_backdrop = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlElement>().ok())
            .is_some_and(|target| target == backdrop);
        if on_backdrop {
            close_lightbox(&handle);
        }
    })
    .forget();

    let handle = page.clone();
    EventListener::new(&page.document, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        let Some(lightbox) = &handle.lightbox else {
            return;
        };
        let visible = handle.gallery.visible();
        let action = lightbox
            .state
            .borrow_mut()
            .on_key(&key, &visible, &handle.config.gallery);
        match action {
            KeyAction::Close(step) => run_modal_step(&handle, step),
            KeyAction::Show(index) => {
                if let Some(content) = handle.gallery.items.get(index).and_then(item_content) {
                    lightbox.show_content(&content);
                }
            }
            KeyAction::Ignore => {}
        }
    })
    .forget();
}

// ============================================================================
// Cosmetic effects
// ============================================================================

fn bind_scroll_effects(page: &Rc<Page>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let header = query::<HtmlElement>(&page.document, ".header");
    let hero = query::<HtmlElement>(&page.document, ".hero");
    if header.is_none() && hero.is_none() {
        return;
    }

    let threshold = page.config.effects.header_threshold;
    let rate = page.config.effects.parallax_rate;
    let scrolled = window.clone();
    EventListener::new(&window, "scroll", move |_| {
        let y = scrolled.scroll_y().unwrap_or(0.0);
        if let Some(header) = &header {
            let style = HeaderStyle::for_scroll(y, threshold);
            set_style(header, "background", style.background);
            set_style(header, "box-shadow", style.box_shadow);
        }
        if let Some(hero) = &hero {
            set_style(hero, "transform", &effects::parallax_transform(y, rate));
        }
    })
    .forget();
}

fn bind_observers(document: &Document) {
    let reveal = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries
                .iter()
                .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
            {
                if entry.is_intersecting() {
                    let _ = entry.target().class_list().add_1("animate");
                }
            }
        },
    );
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);
    match IntersectionObserver::new_with_options(reveal.as_ref().unchecked_ref(), &options) {
        Ok(observer) => {
            for element in collect::<Element>(document.query_selector_all(REVEAL_SELECTOR)) {
                observer.observe(&element);
            }
        }
        Err(err) => console::warn_2(&"scroll reveal disabled:".into(), &err),
    }
    reveal.forget();

    let images = collect::<Element>(document.query_selector_all("img[data-src]"));
    if images.is_empty() {
        return;
    }
    let lazy = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries
                .iter()
                .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
            {
                if !entry.is_intersecting() {
                    continue;
                }
                let image = entry.target();
                if let Some(src) = image.get_attribute("data-src") {
                    let _ = image.set_attribute("src", &src);
                }
                let _ = image.class_list().remove_1("lazy");
                observer.unobserve(&image);
            }
        },
    );
    if let Ok(observer) = IntersectionObserver::new(lazy.as_ref().unchecked_ref()) {
        for image in &images {
            observer.observe(image);
        }
    }
    lazy.forget();
}

fn bind_hover(target: &HtmlElement, hover: Hover) {
    let element = target.clone();
    EventListener::new(target, "mouseenter", move |_| {
        set_style(&element, "transform", hover.enter);
    })
    .forget();
    let element = target.clone();
    EventListener::new(target, "mouseleave", move |_| {
        set_style(&element, "transform", hover.leave);
    })
    .forget();
}

fn bind_hover_effects(page: &Rc<Page>) {
    if let Some(profile) = by_id::<HtmlElement>(&page.document, "profileImg") {
        bind_hover(&profile, PROFILE_HOVER);
    }

    let social: Vec<HtmlElement> = collect(page.document.query_selector_all(".social-link"));
    for (index, link) in social.iter().enumerate() {
        let delay = effects::animation_delay(index, page.config.effects.social_stagger_ms);
        set_style(link, "animation-delay", &delay);
        bind_hover(link, SOCIAL_HOVER);
    }

    let Some(body) = page.document.body() else {
        return;
    };
    for item in &page.gallery.items {
        let cursor = body.clone();
        EventListener::new(item, "mouseenter", move |_| set_style(&cursor, "cursor", "pointer"))
            .forget();
        let cursor = body.clone();
        EventListener::new(item, "mouseleave", move |_| set_style(&cursor, "cursor", "default"))
            .forget();
    }
}

fn on_page_load(page: &Rc<Page>) {
    if page.document.ready_state() == "complete" {
        page_loaded(page);
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let handle = page.clone();
    EventListener::once(&window, "load", move |_| page_loaded(&handle)).forget();
}

/// Runs once the page and its images have loaded.
fn page_loaded(page: &Rc<Page>) {
    let timing = &page.config.effects;

    if let Some(title) = query::<Element>(&page.document, ".profile-title") {
        let text = title.text_content().unwrap_or_default();
        let schedule =
            effects::typewriter_schedule(&text, timing.typewriter_start_ms, timing.typewriter_speed_ms);
        for (delay, frame) in schedule {
            let (title, frame) = (title.clone(), frame.to_string());
            Timeout::new(timeout_ms(delay), move || title.set_text_content(Some(&frame))).forget();
        }
    }

    if let Some(loader) = query::<HtmlElement>(&page.document, ".loader") {
        set_style(&loader, "opacity", "0");
        Timeout::new(timing.loader_fade_ms, move || loader.remove()).forget();
    }

    let fading: Vec<HtmlElement> = collect(page.document.query_selector_all(LOAD_FADE_SELECTOR));
    for (index, element) in fading.into_iter().enumerate() {
        let delay = gallery::stagger(index, timing.load_stagger_ms);
        Timeout::new(timeout_ms(delay), move || {
            set_style(&element, "opacity", "1");
            set_style(&element, "transform", "translateY(0)");
        })
        .forget();
    }

    let hash = web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default();
    with_router(|router| {
        router.load(&hash);
    });
}

// ============================================================================
// Contact form
// ============================================================================

struct DomForm {
    document: Document,
    form: HtmlFormElement,
    button: HtmlButtonElement,
    /// Button contents to restore once a request settles.
    saved_label: RefCell<String>,
    sending_label: String,
    messages: Rc<RefCell<MessageSlot>>,
    message_timer: RefCell<Option<Timeout>>,
}

impl DomForm {
    fn field(&self, field: Field) -> String {
        self.document
            .get_element_by_id(field.id())
            .and_then(|el| field_value(&el))
            .unwrap_or_default()
    }

    /// Every named control with a text value, in document order.
    fn named_controls(&self) -> Vec<(String, String)> {
        let Ok(data) = FormData::new_with_form(&self.form) else {
            return Vec::new();
        };
        let Ok(Some(entries)) = js_sys::try_iter(&data) else {
            return Vec::new();
        };
        entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let pair = js_sys::Array::from(&entry);
                // File inputs yield non-string values; they are not forwarded
                Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
            })
            .collect()
    }
}

impl FormSurface for DomForm {
    fn read(&self) -> ContactForm {
        let form = ContactForm::new(
            self.field(Field::Name),
            self.field(Field::Email),
            self.field(Field::Subject),
            self.field(Field::Message),
        );
        self.named_controls()
            .into_iter()
            .fold(form, |form, (name, value)| form.with_extra(name, value))
    }

    fn set_sending(&self, sending: bool) {
        if sending {
            *self.saved_label.borrow_mut() = self.button.inner_html();
            self.button
                .set_inner_html(&render::sending_label(&self.sending_label).into_string());
        } else {
            self.button.set_inner_html(&self.saved_label.borrow());
        }
        self.button.set_disabled(sending);
    }

    fn show_message(&self, message: &StatusMessage) {
        let posted = self.messages.borrow_mut().post(message.clone());
        if posted.replaces {
            if let Some(existing) = self.document.query_selector(".form-message").ok().flatten() {
                existing.remove();
            }
        }
        let Ok(note) = self.document.create_element("div") else {
            return;
        };
        note.set_class_name(&format!("form-message {}", message.kind.class()));
        note.set_inner_html(&render::form_message(message).into_string());

        let Some(parent) = self.form.parent_node() else {
            return;
        };
        if parent
            .insert_before(&note, self.form.next_sibling().as_ref())
            .is_err()
        {
            return;
        }
        let messages = self.messages.clone();
        let timeout = Timeout::new(timeout_ms(posted.expires_in), move || {
            if messages.borrow_mut().expire(posted.id) {
                note.remove();
            }
        });
        *self.message_timer.borrow_mut() = Some(timeout);
    }

    fn reset(&self) {
        self.form.reset();
    }
}

fn bind_contact_form(page: &Rc<Page>) {
    let document = &page.document;
    let (Some(form), Some(button)) = (
        query::<HtmlFormElement>(document, ".contact-form"),
        query::<HtmlButtonElement>(document, ".submit-btn"),
    ) else {
        return;
    };

    let endpoint = if !page.config.form.endpoint.is_empty() {
        page.config.form.endpoint.clone()
    } else if form.get_attribute("action").is_some_and(|a| !a.is_empty()) {
        // Resolved against the page URL; reqwest needs an absolute one
        form.action()
    } else {
        console::warn_1(&"contact form has no endpoint; submissions will fail".into());
        String::new()
    };

    for input in collect::<HtmlElement>(form.query_selector_all("input, textarea")) {
        let field = input.clone();
        EventListener::new(&input, "focus", move |_| {
            if let Some(parent) = field.parent_element() {
                let _ = parent.class_list().add_1("focused");
            }
        })
        .forget();
        let field = input.clone();
        EventListener::new(&input, "blur", move |_| {
            if field_value(&field).is_some_and(|value| value.is_empty()) {
                if let Some(parent) = field.parent_element() {
                    let _ = parent.class_list().remove_1("focused");
                }
            }
        })
        .forget();
    }

    let surface = Rc::new(DomForm {
        document: document.clone(),
        form: form.clone(),
        button,
        saved_label: RefCell::new(String::new()),
        sending_label: page.config.form.sending_label.clone(),
        messages: Rc::new(RefCell::new(MessageSlot::new(page.config.form.message_timeout()))),
        message_timer: RefCell::new(None),
    });
    let relay = ReqwestRelay::new();

    EventListener::new_with_options(
        &form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            let (surface, relay, endpoint) = (surface.clone(), relay.clone(), endpoint.clone());
            spawn_local(async move {
                if contact::submit(&*surface, &relay, &endpoint).await == SubmitOutcome::Failed {
                    console::error_1(&format!("Form submission error: {endpoint}").into());
                }
            });
        },
    )
    .forget();
}
