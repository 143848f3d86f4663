//! Yew single-page UI for the Epoch Timeline.

#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::styles;
    use epoch_appwrite::{AppwriteConfig, DocumentPage, PROJECT_HEADER};
    use epoch_core::{
        puck_position, scroll_progress, Era, EraDetector, EraShift, EventRecord,
        IntersectionRecord, Paginator, ThemeSynchronizer, ThemeTransition, TimelineError,
        TimelineSnapshot, WatchTarget, SCROLL_TOP_REVEAL_PX,
    };
    use gloo_net::http::Request;
    use serde::Deserialize;
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{
        console, Document, Element, IntersectionObserver, IntersectionObserverEntry,
        IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Window,
    };
    use yew::prelude::*;

    /// Trigger band: the viewport shrunk to a 1px line at vertical center.
    const TRIGGER_BAND_MARGIN: &str = "-50% 0px -50% 0px";

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct JsAppwriteConfig {
        #[serde(default)]
        endpoint: Option<String>,
        #[serde(default)]
        project_id: Option<String>,
        #[serde(default)]
        database_id: Option<String>,
        #[serde(default)]
        collection_id: Option<String>,
    }

    enum FetchState {
        Loading,
        Ready(Rc<TimelineSnapshot>),
        Failed(String),
    }

    /// Fetch every document page before anything renders; no partial data.
    async fn fetch_all_events(config: &AppwriteConfig) -> Result<Vec<EventRecord>, TimelineError> {
        let mut paginator = Paginator::new();
        let mut pages: Vec<DocumentPage> = Vec::new();

        while let Some(request) = paginator.next_request() {
            let response = Request::get(&config.list_documents_url(request))
                .header(PROJECT_HEADER, config.project_id())
                .send()
                .await
                .map_err(|err| TimelineError::Fetch(err.to_string()))?;

            if !response.ok() {
                return Err(TimelineError::Fetch(format!(
                    "backend returned status {}",
                    response.status()
                )));
            }

            let page: DocumentPage = response
                .json()
                .await
                .map_err(|err| TimelineError::Parse(err.to_string()))?;

            paginator.record_page(page.documents.len(), page.total);
            pages.push(page);
        }

        console::log_1(&JsValue::from_str(&format!(
            "fetched {} events across {} pages",
            paginator.received(),
            pages.len()
        )));

        Ok(epoch_appwrite::collect_records(pages))
    }

    fn body_class_list() -> Option<web_sys::DomTokenList> {
        let body = web_sys::window()?.document()?.body()?;
        Some(body.class_list())
    }

    /// Apply one synchronizer transition to `document.body`. Removal comes
    /// first so two era classes never coexist.
    fn apply_transition(transition: &ThemeTransition) {
        let Some(class_list) = body_class_list() else {
            return;
        };
        if let Some(remove) = &transition.remove {
            let _ = class_list.remove_1(remove);
        }
        if let Some(add) = &transition.add {
            let _ = class_list.add_1(add);
        }
    }

    fn read_scroll_progress() -> Option<f64> {
        let root = web_sys::window()?.document()?.document_element()?;
        Some(scroll_progress(
            f64::from(root.scroll_top()),
            f64::from(root.scroll_height()),
            f64::from(root.client_height()),
        ))
    }

    fn scroll_offset() -> f64 {
        web_sys::window()
            .and_then(|win| win.scroll_y().ok())
            .unwrap_or(0.0)
    }

    /// Window scroll listener with deterministic removal on cleanup.
    fn on_window_scroll(handler: impl Fn() + 'static) -> impl FnOnce() {
        let listener = Closure::<dyn FnMut()>::new(move || handler());
        let window = web_sys::window();

        if let Some(win) = window.as_ref() {
            let _ = win
                .add_event_listener_with_callback("scroll", listener.as_ref().unchecked_ref());
        }

        move || {
            if let Some(win) = window {
                let _ = win
                    .remove_event_listener_with_callback("scroll", listener.as_ref().unchecked_ref());
            }
            drop(listener);
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq)]
    enum CardSide {
        Left,
        Right,
    }

    impl CardSide {
        fn class(self) -> &'static str {
            match self {
                Self::Left => "is-left",
                Self::Right => "is-right",
            }
        }
    }

    #[derive(Properties, PartialEq)]
    struct EventCardProps {
        event: EventRecord,
        side: CardSide,
    }

    #[function_component(EventCard)]
    fn event_card(props: &EventCardProps) -> Html {
        let event = &props.event;

        html! {
            <div class={classes!("event-row", props.side.class())}>
                <article class="event-card">
                    <span class="event-arrow" aria-hidden="true" />
                    <img
                        class="event-image"
                        src={event.image_url.clone()}
                        alt={event.title.clone()}
                        loading="lazy"
                    />
                    <div class="event-body">
                        <span class="event-year">{ event.year }</span>
                        <h3 class="event-title">{ event.title.clone() }</h3>
                        <p class="event-description">{ event.description.clone() }</p>
                    </div>
                </article>
            </div>
        }
    }

    #[derive(Properties, PartialEq)]
    struct TimelineProps {
        snapshot: Rc<TimelineSnapshot>,
        on_era_change: Callback<EraShift>,
    }

    fn intersection_records(
        anchors: &[(usize, Element)],
        entries: &js_sys::Array,
    ) -> Vec<IntersectionRecord> {
        entries
            .iter()
            .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
            .filter_map(|entry| {
                let target = entry.target();
                anchors.iter().find_map(|(index, element)| {
                    (*element == target).then_some(IntersectionRecord {
                        target: *index,
                        is_intersecting: entry.is_intersecting(),
                    })
                })
            })
            .collect()
    }

    #[function_component(Timeline)]
    fn timeline(props: &TimelineProps) -> Html {
        let hero_ref = use_node_ref();
        let group_refs: Rc<Vec<NodeRef>> = use_memo(props.snapshot.clone(), |snapshot| {
            (0..snapshot.era_count()).map(|_| NodeRef::default()).collect()
        });

        {
            let hero_ref = hero_ref.clone();
            let group_refs = group_refs.clone();
            let on_era_change = props.on_era_change.clone();

            use_effect_with(props.snapshot.clone(), move |_snapshot| {
                // The hero anchor comes first, era groups follow in render
                // order. Rebuilt from scratch whenever the group set changes.
                // Labels are read back off the rendered anchors; an untagged
                // or malformed anchor degrades to the neutral theme.
                let mut targets: Vec<WatchTarget> = Vec::new();
                let mut anchors: Vec<(usize, Element)> = Vec::new();

                for node_ref in std::iter::once(&hero_ref).chain(group_refs.iter()) {
                    let Some(element) = node_ref.cast::<Element>() else {
                        continue;
                    };
                    let era = element
                        .get_attribute("data-era")
                        .and_then(|attr| Era::from_theme_class(&attr));

                    anchors.push((targets.len(), element));
                    targets.push(match era {
                        Some(era) => WatchTarget::era(era),
                        None => WatchTarget::neutral(),
                    });
                }

                let mut detector = EraDetector::new();
                detector.set_targets(targets);
                let detector = Rc::new(RefCell::new(detector));

                let callback = {
                    let anchors = anchors.clone();
                    Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                        move |entries: js_sys::Array, _: IntersectionObserver| {
                            let records = intersection_records(&anchors, &entries);
                            for shift in detector.borrow_mut().observe_batch(&records) {
                                on_era_change.emit(shift);
                            }
                        },
                    )
                };

                let init = IntersectionObserverInit::new();
                init.set_root_margin(TRIGGER_BAND_MARGIN);
                init.set_threshold(&JsValue::from_f64(0.0));

                let observer =
                    IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init);
                let observer = match observer {
                    Ok(observer) => {
                        for (_, element) in &anchors {
                            observer.observe(element);
                        }
                        Some(observer)
                    }
                    Err(err) => {
                        console::error_1(&err);
                        None
                    }
                };

                move || {
                    // No callback may fire against a torn-down target set.
                    if let Some(observer) = observer {
                        observer.disconnect();
                    }
                    drop(callback);
                }
            });
        }

        let mut global_index = 0usize;
        let groups: Html = props
            .snapshot
            .groups()
            .iter()
            .enumerate()
            .map(|(group_index, group)| {
                let cards: Html = group
                    .events
                    .iter()
                    .map(|event| {
                        let side = if global_index % 2 == 0 {
                            CardSide::Left
                        } else {
                            CardSide::Right
                        };
                        global_index += 1;
                        html! {
                            <EventCard
                                key={event.id.clone()}
                                event={event.clone()}
                                side={side}
                            />
                        }
                    })
                    .collect();

                html! {
                    <div
                        key={group.era.label().to_string()}
                        ref={group_refs[group_index].clone()}
                        data-era={group.era.theme_class()}
                        class="era-group"
                    >
                        { cards }
                    </div>
                }
            })
            .collect();

        html! {
            <div class="timeline-wrap">
                <section class="hero" ref={hero_ref}>
                    <p class="hero-eyebrow">{ "a time-shifting archive" }</p>
                    <h2>{ "Scroll forward through two centuries" }</h2>
                    <p class="hero-lede">
                        { "Every photograph below is anchored to its decade. As an era \
                           reaches the middle of your screen, the page dresses itself in \
                           that era's skin." }
                    </p>
                </section>
                <div class="timeline">
                    <div class="timeline-spine" aria-hidden="true" />
                    { groups }
                </div>
            </div>
        }
    }

    #[derive(Properties, PartialEq)]
    struct MinimapProps {
        progress: f64,
        eras: Vec<Era>,
    }

    #[function_component(EpochMinimap)]
    fn epoch_minimap(props: &MinimapProps) -> Html {
        let puck_style = format!("left: {:.2}%;", puck_position(props.progress));

        html! {
            <div class="epoch-minimap">
                <div class="minimap-track" aria-hidden="true">
                    {
                        for props.eras.iter().map(|era| html! {
                            <span key={era.label().to_string()} class="minimap-era">
                                { era.label() }
                            </span>
                        })
                    }
                    <span class="minimap-puck" style={puck_style} />
                </div>
            </div>
        }
    }

    #[function_component(ScrollToTopButton)]
    fn scroll_to_top_button() -> Html {
        let visible = use_state(|| false);

        {
            let visible = visible.clone();
            use_effect_with((), move |_| {
                on_window_scroll(move || {
                    visible.set(scroll_offset() > SCROLL_TOP_REVEAL_PX);
                })
            });
        }

        let onclick = Callback::from(|_| {
            if let Some(win) = web_sys::window() {
                let options = ScrollToOptions::new();
                options.set_top(0.0);
                options.set_behavior(ScrollBehavior::Smooth);
                win.scroll_to_with_scroll_to_options(&options);
            }
        });

        html! {
            <button
                type="button"
                class={classes!("scroll-top", visible.then_some("is-visible"))}
                aria-label="Scroll back to the top"
                onclick={onclick}
            >
                <svg viewBox="0 0 24 24" fill="none" stroke="currentColor" aria-hidden="true">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M5 15l7-7 7 7" />
                </svg>
            </button>
        }
    }

    #[derive(Properties, PartialEq)]
    pub struct AppProps {
        pub config: AppwriteConfig,
    }

    #[function_component(App)]
    fn app(props: &AppProps) -> Html {
        let state = use_state(|| FetchState::Loading);
        let progress = use_state(|| 0.0_f64);
        // Single writer of the document-level theme state.
        let synchronizer = use_mut_ref(ThemeSynchronizer::new);

        use_effect_with((), |_| {
            if let Some(document) = web_sys::window().and_then(|win| win.document()) {
                if let Err(err) = styles::ensure_styles(&document) {
                    console::error_1(&err);
                }
            }
            || ()
        });

        {
            let state = state.clone();
            let config = props.config.clone();
            use_effect_with((), move |_| {
                spawn_local(async move {
                    match fetch_all_events(&config).await {
                        Ok(records) => {
                            state.set(FetchState::Ready(Rc::new(TimelineSnapshot::new(records))));
                        }
                        Err(err) => {
                            console::error_1(&JsValue::from_str(&err.to_string()));
                            state.set(FetchState::Failed(err.to_string()));
                        }
                    }
                });
                || ()
            });
        }

        {
            let progress = progress.clone();
            use_effect_with((), move |_| {
                on_window_scroll(move || {
                    if let Some(value) = read_scroll_progress() {
                        progress.set(value);
                    }
                })
            });
        }

        {
            let synchronizer = synchronizer.clone();
            use_effect_with((), move |_| {
                move || {
                    if let Some(class) = synchronizer.borrow_mut().teardown() {
                        if let Some(class_list) = body_class_list() {
                            let _ = class_list.remove_1(&class);
                        }
                    }
                }
            });
        }

        let on_era_change = {
            let synchronizer = synchronizer.clone();
            Callback::from(move |shift: EraShift| {
                let label = shift
                    .to
                    .as_ref()
                    .map(Era::theme_class)
                    .unwrap_or_else(|| "neutral".to_string());
                console::log_1(&JsValue::from_str(&format!("timeshift: {label}")));

                if let Some(transition) = synchronizer.borrow_mut().transition(shift.to) {
                    apply_transition(&transition);
                }
            })
        };

        match &*state {
            FetchState::Failed(message) => html! {
                <div class="status-screen">
                    <div class="error-card">
                        <h1>{ "Error" }</h1>
                        <p>{ message.clone() }</p>
                        <p class="error-hint">{ "Reload the page to try again." }</p>
                    </div>
                </div>
            },
            FetchState::Loading => html! {
                <div class="status-screen">
                    <h1 class="loading-pulse">{ "loading timeline..." }</h1>
                </div>
            },
            FetchState::Ready(snapshot) => {
                let eras: Vec<Era> = snapshot
                    .groups()
                    .iter()
                    .map(|group| group.era.clone())
                    .collect();

                html! {
                    <div class="epoch-root">
                        <header class="site-header">
                            <div class="header-inner">
                                <h1>{ "The Epoch Timeline" }</h1>
                                <p>{ "a time-shifting photographic archive" }</p>
                            </div>
                        </header>
                        <EpochMinimap progress={*progress} eras={eras} />
                        <main class="timeline-main">
                            <Timeline
                                snapshot={snapshot.clone()}
                                on_era_change={on_era_change}
                            />
                        </main>
                        <ScrollToTopButton />
                    </div>
                }
            }
        }
    }

    /// Mount the timeline app onto the element matching `selector`. The
    /// configuration object must carry `endpoint`, `projectId`, `databaseId`
    /// and `collectionId`; a missing value is fatal before anything renders.
    #[wasm_bindgen]
    pub fn mount_epoch_timeline(selector: &str, config: JsValue) -> Result<(), JsValue> {
        let window: Window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("bad selector: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("mount element not found"))?;

        let config: JsAppwriteConfig = from_value(config)
            .map_err(|err| JsValue::from_str(&format!("could not read config: {err}")))?;
        let config = AppwriteConfig::new(
            config.endpoint.unwrap_or_default(),
            config.project_id.unwrap_or_default(),
            config.database_id.unwrap_or_default(),
            config.collection_id.unwrap_or_default(),
        )
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

        yew::Renderer::<App>::with_root_and_props(target, AppProps { config }).render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_epoch_timeline;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_epoch_timeline(
    _: &str,
    _: wasm_bindgen::JsValue,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "epoch-ui only supports the wasm32 target",
    ))
}
