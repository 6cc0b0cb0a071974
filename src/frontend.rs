use crate::browser::{self, EventListener, SectionObserver, Timer};
use dev_site::boot::BootLine;
use dev_site::content::{
    self, Project, ProjectCategory, ABOUT, EDUCATION, EXPERIENCE, SECTIONS, SITE_NAME,
    SOCIAL_LINKS, TECHNOLOGIES,
};
use dev_site::log::{self, log_event, LogLevel, DEFAULT_LOG_LEVEL};
use dev_site::motion::{FrameOptions, MorphFrame};
use dev_site::routes::{section_href, Route};
use dev_site::scroll::ScrollSignal;
use dev_site::sections::{nav_scroll_target, IntersectionBand, IntersectionSample, SectionTracker};
use dev_site::view_state::{
    HeaderPhase, HeroConfig, HeroController, HeroSnapshot, LeftPhase, ModeTransition, RightPhase,
    Thresholds, ViewMode,
};
use serde_json::json;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use web_sys::{Element, MouseEvent};
use yew::prelude::*;

const THEME_KEY: &str = "theme";
const LOG_LEVEL_KEY: &str = "dev-site-log";
const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Theme {
    Light,
    Dark,
}

impl Theme {
    fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    fn from_system() -> Self {
        if browser::media_matches(DARK_SCHEME_QUERY) {
            Self::Dark
        } else {
            Self::Light
        }
    }

    fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }
}

fn read_stored_theme() -> Option<Theme> {
    Theme::from_str(&browser::read_storage(THEME_KEY)?)
}

fn resolve_theme() -> Theme {
    read_stored_theme().unwrap_or_else(Theme::from_system)
}

fn apply_theme(theme: Theme) {
    browser::set_root_attribute("data-theme", theme.as_str());
}

/// Current theme plus a toggle. Follows the system scheme until the reader picks one.
#[hook]
fn use_theme() -> (Theme, Callback<MouseEvent>) {
    let theme = use_state_eq(resolve_theme);

    {
        let theme = theme.clone();
        use_effect_with((), move |_| {
            apply_theme(*theme);

            let system = browser::media_query(DARK_SCHEME_QUERY).and_then(|query| {
                EventListener::new(&query.into(), "change", move |_| {
                    if read_stored_theme().is_some() {
                        return;
                    }
                    let next = Theme::from_system();
                    apply_theme(next);
                    log_event(
                        LogLevel::Info,
                        "theme_changed",
                        json!({ "theme": next.as_str(), "source": "system" }),
                    );
                    theme.set(next);
                })
            });

            move || drop(system)
        });
    }

    let on_toggle = {
        let theme = theme.clone();
        Callback::from(move |_: MouseEvent| {
            let next = (*theme).toggled();
            browser::write_storage(THEME_KEY, next.as_str());
            browser::with_view_transition(move || apply_theme(next));
            log_event(
                LogLevel::Info,
                "theme_changed",
                json!({ "theme": next.as_str(), "source": "toggle" }),
            );
            theme.set(next);
        })
    };

    (*theme, on_toggle)
}

#[hook]
fn use_reduced_motion() -> bool {
    *use_state(browser::prefers_reduced_motion)
}

#[hook]
fn use_document_title(title: String) {
    use_effect_with(title, |title| {
        browser::set_document_title(title);
        || ()
    });
}

/// Window scroll offset as a shared signal, published from one `scroll` listener.
#[hook]
fn use_window_scroll() -> ScrollSignal {
    let signal = use_memo((), |_| ScrollSignal::new(browser::scroll_y()));

    {
        let signal = (*signal).clone();
        use_effect_with((), move |_| {
            let listener = EventListener::on_window("scroll", move |_| {
                signal.publish(browser::scroll_y());
            });
            move || drop(listener)
        });
    }

    (*signal).clone()
}

/// The signal provided by [`App`], or a stable detached one outside it.
#[hook]
fn use_scroll_signal() -> ScrollSignal {
    let detached = use_memo((), |_| ScrollSignal::new(0.0));
    use_context::<ScrollSignal>().unwrap_or_else(|| (*detached).clone())
}

/// Latest scroll offset from the surrounding signal; re-renders on change.
#[hook]
fn use_scroll_offset() -> f64 {
    let signal = use_scroll_signal();
    let offset = use_state_eq(|| signal.get());

    {
        let offset = offset.clone();
        use_effect_with(signal, move |signal| {
            offset.set(signal.get());
            let subscription = signal.subscribe(move |value| offset.set(value));
            move || drop(subscription)
        });
    }

    *offset
}

struct RegistryInner {
    tracker: RefCell<SectionTracker>,
    elements: RefCell<Vec<(String, Element)>>,
    observer: RefCell<Option<SectionObserver>>,
    on_active: Callback<Option<String>>,
}

/// Landing-page sections and nav links, tied to one [`SectionTracker`].
#[derive(Clone)]
struct SectionRegistry {
    inner: Rc<RegistryInner>,
}

impl PartialEq for SectionRegistry {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl SectionRegistry {
    fn new(on_active: Callback<Option<String>>) -> Self {
        let tracker = SectionTracker::new(IntersectionBand::default(), content::section_ids());
        Self {
            inner: Rc::new(RegistryInner {
                tracker: RefCell::new(tracker),
                elements: RefCell::new(Vec::new()),
                observer: RefCell::new(None),
                on_active,
            }),
        }
    }

    fn attach(&self, id: &str, element: Element) {
        if !self.inner.tracker.borrow_mut().attach_section(id) {
            return;
        }
        if let Some(observer) = self.inner.observer.borrow().as_ref() {
            observer.observe(&element);
        }
        self.inner
            .elements
            .borrow_mut()
            .push((id.to_string(), element));
    }

    fn detach(&self, id: &str) {
        self.inner.tracker.borrow_mut().detach_section(id);

        let removed: Vec<Element> = {
            let mut elements = self.inner.elements.borrow_mut();
            let (gone, kept): (Vec<_>, Vec<_>) =
                elements.drain(..).partition(|(known, _)| known == id);
            *elements = kept;
            gone.into_iter().map(|(_, element)| element).collect()
        };

        if let Some(observer) = self.inner.observer.borrow().as_ref() {
            for element in &removed {
                observer.unobserve(element);
            }
        }
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.inner
            .elements
            .borrow()
            .iter()
            .find(|(known, _)| known == id)
            .map(|(_, element)| element.clone())
    }

    fn register_link(&self, id: &str) -> bool {
        self.inner.tracker.borrow_mut().register_link(id)
    }

    fn unregister_link(&self, id: &str) {
        self.inner.tracker.borrow_mut().unregister_link(id);
    }

    fn is_link_active(&self, id: &str) -> bool {
        self.inner.tracker.borrow().is_link_active(id)
    }

    fn start_observing(&self) {
        let weak: Weak<RegistryInner> = Rc::downgrade(&self.inner);
        let band = self.inner.tracker.borrow().band();
        let observer = SectionObserver::new(band, move |samples| {
            if let Some(inner) = weak.upgrade() {
                SectionRegistry { inner }.on_intersections(&samples);
            }
        });

        if let Some(observer) = observer.as_ref() {
            for (_, element) in self.inner.elements.borrow().iter() {
                observer.observe(element);
            }
        }
        *self.inner.observer.borrow_mut() = observer;
    }

    fn stop_observing(&self) {
        self.inner.observer.borrow_mut().take();
    }

    fn on_intersections(&self, samples: &[IntersectionSample]) {
        let changed = self.inner.tracker.borrow_mut().on_intersections(samples);
        if changed {
            self.publish("intersection");
        }
    }

    fn on_fragment(&self, fragment: &str) {
        let changed = self.inner.tracker.borrow_mut().on_fragment(fragment);
        if changed {
            self.publish("fragment");
        }
    }

    fn publish(&self, source: &str) {
        let active = self.inner.tracker.borrow().active().map(str::to_string);
        log_event(
            LogLevel::Debug,
            "active_section_changed",
            json!({ "section": active, "source": source }),
        );
        self.inner.on_active.emit(active);
    }

    fn scroll_to(&self, id: &str, smooth: bool) {
        let element = self
            .element(id)
            .or_else(|| browser::document()?.get_element_by_id(id));
        if let Some(element) = element {
            let top = nav_scroll_target(browser::document_top(&element), browser::viewport_width());
            browser::scroll_to(top, smooth);
        }
    }
}

#[derive(Clone, PartialEq)]
struct SectionsContext {
    registry: SectionRegistry,
    active: Option<String>,
}

#[derive(Properties, PartialEq)]
struct SectionProps {
    id: AttrValue,
    title: AttrValue,
    #[prop_or_default]
    children: Html,
}

#[function_component(Section)]
fn section(props: &SectionProps) -> Html {
    let node = use_node_ref();
    let sections = use_context::<SectionsContext>();

    {
        let node = node.clone();
        let registry = sections.map(|sections| sections.registry);
        use_effect_with(props.id.clone(), move |id| {
            let id = id.to_string();
            if let (Some(registry), Some(element)) = (registry.as_ref(), node.cast::<Element>()) {
                registry.attach(&id, element);
            }
            move || {
                if let Some(registry) = registry {
                    registry.detach(&id);
                }
            }
        });
    }

    let heading_id = format!("{}-heading", props.id);
    html! {
        <section id={props.id.clone()} ref={node} class="section-block" aria-labelledby={heading_id.clone()}>
            <h2 id={heading_id} class="section-title">{props.title.clone()}</h2>
            {props.children.clone()}
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct NavLinkProps {
    id: AttrValue,
    label: AttrValue,
    on_landing: bool,
}

#[function_component(NavLink)]
fn nav_link(props: &NavLinkProps) -> Html {
    let sections = use_context::<SectionsContext>();
    let reduced_motion = use_reduced_motion();
    let rerender = use_force_update();

    {
        let registry = sections.clone().map(|sections| sections.registry);
        use_effect_with(props.id.clone(), move |id| {
            let id = id.to_string();
            // The first render ran before the link was known to the tracker.
            if registry.as_ref().is_some_and(|registry| registry.register_link(&id)) {
                rerender.force_update();
            }
            move || {
                if let Some(registry) = registry {
                    registry.unregister_link(&id);
                }
            }
        });
    }

    let active = sections.as_ref().is_some_and(|sections| {
        sections.active.as_deref() == Some(props.id.as_str())
            && sections.registry.is_link_active(&props.id)
    });

    let onclick = {
        let id = props.id.clone();
        let on_landing = props.on_landing;
        let registry = sections.map(|sections| sections.registry);
        Callback::from(move |event: MouseEvent| {
            // Off the landing page the href already points at `/#id`.
            let (true, Some(registry)) = (on_landing, registry.as_ref()) else {
                return;
            };
            event.prevent_default();
            registry.scroll_to(&id, !reduced_motion);
            browser::push_hash(&id);
            registry.on_fragment(&id);
        })
    };

    html! {
        <a
            class={classes!("nav-link", active.then_some("is-active"))}
            href={section_href(props.on_landing, &props.id)}
            aria-current={active.then_some("page")}
            {onclick}
        >
            {props.label.clone()}
        </a>
    }
}

/// Owns a [`HeroController`] and the single platform timer that wakes it.
struct HeroDriver {
    controller: RefCell<HeroController>,
    timer: RefCell<Option<Timer>>,
    on_change: Callback<HeroSnapshot>,
}

impl HeroDriver {
    fn start(config: HeroConfig, scroll: f64, on_change: Callback<HeroSnapshot>) -> Rc<Self> {
        let driver = Rc::new(Self {
            controller: RefCell::new(HeroController::new(config)),
            timer: RefCell::new(None),
            on_change,
        });

        let weak = Rc::downgrade(&driver);
        *driver.timer.borrow_mut() = Some(Timer::new(move || {
            if let Some(driver) = weak.upgrade() {
                driver.tick();
            }
        }));

        driver.controller.borrow_mut().mount(browser::now_ms());
        driver.scroll(scroll);
        driver.publish();
        driver.arm();
        driver
    }

    fn scroll(&self, offset: f64) {
        let transition = self
            .controller
            .borrow_mut()
            .on_scroll(offset, browser::now_ms());
        if transition == ModeTransition::Unchanged {
            return;
        }

        let mode = self.controller.borrow().mode();
        log_event(
            LogLevel::Info,
            "view_mode_changed",
            json!({ "mode": mode.as_str(), "scroll": offset }),
        );
        self.publish();
        self.arm();
    }

    fn tick(&self) {
        let outcome = self.controller.borrow_mut().on_tick(browser::now_ms());

        for phase in &outcome.phases {
            log_event(
                LogLevel::Debug,
                "header_phase_advanced",
                json!({ "phase": phase.as_str() }),
            );
        }
        if outcome.boot_completed {
            log_event(LogLevel::Info, "boot_completed", json!({}));
        }
        if !outcome.is_empty() {
            self.publish();
        }
        self.arm();
    }

    fn arm(&self) {
        let deadline = self.controller.borrow().next_deadline();
        let timer = self.timer.borrow();
        let Some(timer) = timer.as_ref() else {
            return;
        };

        match deadline {
            Some(at) => timer.arm(at.saturating_sub(browser::now_ms())),
            None => timer.cancel(),
        }
    }

    fn publish(&self) {
        let snapshot = self.controller.borrow().snapshot();
        self.on_change.emit(snapshot);
    }

    fn shutdown(&self) {
        self.controller.borrow_mut().unmount();
        self.timer.borrow_mut().take();
    }
}

#[derive(Properties, PartialEq)]
struct TerminalHeroProps {
    always_header: bool,
    on_landing: bool,
    theme: Theme,
    on_toggle_theme: Callback<MouseEvent>,
}

#[function_component(TerminalHero)]
fn terminal_hero(props: &TerminalHeroProps) -> Html {
    let reduced_motion = use_reduced_motion();
    let config = HeroConfig {
        always_header: props.always_header,
        reduced_motion,
        ..HeroConfig::default()
    };
    let snapshot = use_state_eq(|| HeroController::new(config).snapshot());
    let signal = use_scroll_signal();

    {
        let snapshot = snapshot.clone();
        use_effect_with((config, signal), move |(config, signal)| {
            let on_change = Callback::from(move |next: HeroSnapshot| snapshot.set(next));
            let driver = HeroDriver::start(*config, signal.get(), on_change);

            let weak = Rc::downgrade(&driver);
            let subscription = signal.subscribe(move |offset| {
                if let Some(driver) = weak.upgrade() {
                    driver.scroll(offset);
                }
            });

            move || {
                drop(subscription);
                driver.shutdown();
            }
        });
    }

    let offset = use_scroll_offset();
    let view = snapshot.view;
    let is_header = view.mode == ViewMode::Header;
    let frame = MorphFrame::at(
        offset,
        view.mode,
        FrameOptions {
            always_header: props.always_header,
            reduced_motion,
        },
    );

    let shell_style = if is_header {
        "margin-top: 0; transform: none; max-width: 100vw;".to_string()
    } else {
        format!(
            "margin-top: {:.2}vh; transform: translateY({:.2}%); max-width: {:.2}rem;",
            frame.margin_top_vh, frame.translate_y_percent, frame.max_width_rem
        )
    };
    let tilt_style = format!("transform: rotateX({:.3}deg);", frame.rotate_x_deg);
    let radius = format!("border-radius: {:.2}px;", frame.border_radius_px);
    let chassis_style = format!(
        "{radius} transform: translate(-6px, {:.2}px); opacity: {:.3};",
        frame.chassis_y_px, frame.chassis_opacity
    );
    let hero_style = format!("opacity: {:.3};", frame.hero_opacity);
    let glow_style = format!("{radius} {hero_style}");
    let header_style = format!("opacity: {:.3};", frame.header_opacity);

    html! {
        <div class={classes!("terminal-shell", (!is_header).then_some("is-hero"))} style={shell_style}>
            <div class="terminal-tilt" style={tilt_style}>
                <div class="terminal-chassis" style={chassis_style} />
                <div class="terminal-glow" style={glow_style} />
                <div class={classes!("terminal-face", is_header.then_some("is-header"))} style={radius}>
                    if !is_header {
                        <div class="terminal-controls" style={hero_style.clone()}>
                            <span class="dot dot-red" />
                            <span class="dot dot-yellow" />
                            <span class="dot dot-green" />
                            <span class="terminal-title">{"bash — user@dev-portfolio"}</span>
                        </div>
                        <div class="terminal-body" style={hero_style}>
                            { for snapshot.boot_lines.iter().map(render_boot_line) }
                            if snapshot.boot_complete {
                                <div class="prompt-line">
                                    <Prompt />
                                    <span>{frame.typed_command()}</span>
                                    <span class="cursor" aria-hidden="true" />
                                </div>
                            }
                        </div>
                    } else {
                        <HeaderBar
                            on_landing={props.on_landing}
                            header_phase={view.header_phase}
                            left_phase={view.left_phase}
                            right_phase={view.right_phase}
                            style={header_style}
                            theme={props.theme}
                            on_toggle_theme={props.on_toggle_theme.clone()}
                        />
                    }
                </div>
            </div>
        </div>
    }
}

#[function_component(Prompt)]
fn prompt() -> Html {
    html! {
        <>
            <span class="prompt-arrow" aria-hidden="true">{"➜"}</span>
            <span class="prompt-dir" aria-hidden="true">{"~"}</span>
        </>
    }
}

fn render_boot_line(line: &BootLine) -> Html {
    match line {
        BootLine::Command(text) => html! {
            <div class="prompt-line">
                <Prompt />
                <span>{text.clone()}</span>
            </div>
        },
        BootLine::Identity => html! {
            <div class="identity">
                <Avatar size_class="avatar-large" />
                <div class="identity-copy">
                    <p class="identity-greeting">{ABOUT.greeting}</p>
                    <p class="identity-focus">{ABOUT.focus_line}</p>
                    <p class="identity-affiliation">{ABOUT.affiliation_line}</p>
                </div>
            </div>
        },
        BootLine::Spacer => html! { <div class="boot-spacer" /> },
    }
}

#[derive(Properties, PartialEq)]
struct AvatarProps {
    size_class: AttrValue,
}

#[function_component(Avatar)]
fn avatar(props: &AvatarProps) -> Html {
    html! {
        <div class={classes!("avatar", props.size_class.to_string())}>
            {
                match ABOUT.headshot {
                    Some(headshot) => html! {
                        <img src={content::image_path(headshot)} alt={ABOUT.name} loading="eager" />
                    },
                    None => html! { <span class="avatar-initials">{ABOUT.initials}</span> },
                }
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct HeaderBarProps {
    on_landing: bool,
    header_phase: HeaderPhase,
    left_phase: LeftPhase,
    right_phase: RightPhase,
    style: AttrValue,
    theme: Theme,
    on_toggle_theme: Callback<MouseEvent>,
}

#[function_component(HeaderBar)]
fn header_bar(props: &HeaderBarProps) -> Html {
    let reduced_motion = use_reduced_motion();

    let on_brand = {
        let on_landing = props.on_landing;
        Callback::from(move |event: MouseEvent| {
            if on_landing {
                event.prevent_default();
                browser::scroll_to(0.0, !reduced_motion);
            }
        })
    };

    html! {
        <header class="header-bar" style={props.style.clone()}>
            <a class="brand" href="/" onclick={on_brand}>
                <Avatar size_class="avatar-small" />
                <span class="brand-copy">
                    <span class="brand-name">{ABOUT.name}</span>
                    {
                        match props.left_phase {
                            LeftPhase::Running => html! {
                                <span key="running" class="brand-status mono">{"npm run dev: running..."}</span>
                            },
                            LeftPhase::Role => html! {
                                <span key="role" class="brand-role">{ABOUT.header_role}</span>
                            },
                        }
                    }
                </span>
            </a>

            <div class="header-center">
                {
                    match props.header_phase {
                        HeaderPhase::Boot => html! {
                            <div key="boot" class="boot-banner mono">
                                <span class="muted">{"Local: "}<span class="strong">{"http://localhost:3000"}</span></span>
                                <span class="ready">{"✓ Ready in 800ms"}</span>
                            </div>
                        },
                        HeaderPhase::Nav => html! {
                            <nav key="nav" class="header-nav" aria-label="Sections">
                                { for SECTIONS.iter().map(|section| html! {
                                    <NavLink
                                        key={section.id}
                                        id={section.id}
                                        label={section.label}
                                        on_landing={props.on_landing}
                                    />
                                }) }
                                <a class="nav-link" href={Route::Projects.path()}>{"All Projects"}</a>
                            </nav>
                        },
                    }
                }
            </div>

            <div class="header-right">
                {
                    match props.right_phase {
                        RightPhase::Active => html! {
                            <span key="active" class="server-active mono">
                                <span class="pulse" aria-hidden="true" />
                                {"Server Active"}
                            </span>
                        },
                        RightPhase::Resume => html! {
                            <a key="resume" class="resume-link" href={ABOUT.resume_href} download="">
                                {"Resume"}
                            </a>
                        },
                    }
                }
                <button
                    class="theme-toggle"
                    type="button"
                    aria-label={props.theme.toggle_label()}
                    onclick={props.on_toggle_theme.clone()}
                >
                    <span aria-hidden="true">{props.theme.icon()}</span>
                </button>
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    project: &'static Project,
    #[prop_or_default]
    active_tag: Option<AttrValue>,
    #[prop_or_default]
    on_tag: Option<Callback<AttrValue>>,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let project = props.project;
    let href = Route::Project(project.slug.to_string()).path();

    html! {
        <article class="project-card">
            if let Some(image) = project.image {
                <img class="project-media" src={content::project_media_path(image)} alt={project.title} loading="lazy" />
            }
            <div class="project-copy">
                <div class="project-heading">
                    <h3><a href={href}>{project.title}</a></h3>
                    <span class={classes!("status", project.status.css_class())}>{project.status.as_str()}</span>
                </div>
                <p class="muted">{project.tagline}</p>
                <ul class="tag-list">
                    { for project.tech.iter().map(|tech| {
                        let selected = props.active_tag.as_deref() == Some(*tech);
                        match props.on_tag.clone() {
                            Some(on_tag) => {
                                let tag = AttrValue::from(*tech);
                                html! {
                                    <li key={*tech}>
                                        <button
                                            type="button"
                                            class={classes!("tag", selected.then_some("is-selected"))}
                                            aria-pressed={selected.to_string()}
                                            onclick={Callback::from(move |_: MouseEvent| on_tag.emit(tag.clone()))}
                                        >
                                            {*tech}
                                        </button>
                                    </li>
                                }
                            }
                            None => html! { <li key={*tech}><span class="tag">{*tech}</span></li> },
                        }
                    }) }
                </ul>
            </div>
        </article>
    }
}

#[function_component(Footer)]
fn footer() -> Html {
    html! {
        <footer class="site-footer">
            <ul class="social-list">
                { for SOCIAL_LINKS.iter().map(|link| html! {
                    <li key={link.id}>
                        <a class="link" href={link.href} target="_blank" rel="noopener noreferrer">{link.label}</a>
                    </li>
                }) }
            </ul>
            <p class="muted">{format!("© {SITE_NAME}")}</p>
        </footer>
    }
}

#[derive(Properties, PartialEq)]
struct PageProps {
    theme: Theme,
    on_toggle_theme: Callback<MouseEvent>,
}

#[function_component(HomePage)]
fn home_page(props: &PageProps) -> Html {
    use_document_title(SITE_NAME.to_string());
    let reduced_motion = use_reduced_motion();
    let offset = use_scroll_offset();
    let frame = MorphFrame::at(
        offset,
        ViewMode::for_scroll(offset, Thresholds::default()),
        FrameOptions {
            always_header: false,
            reduced_motion,
        },
    );

    html! {
        <main id="main" class="landing">
            <div class="laser" style={format!("opacity: {:.3};", frame.laser_opacity)} aria-hidden="true" />
            <div class="hero-layer">
                <TerminalHero
                    always_header={false}
                    on_landing={true}
                    theme={props.theme}
                    on_toggle_theme={props.on_toggle_theme.clone()}
                />
            </div>
            <div class="scroll-hint" style={format!("opacity: {:.3};", frame.scroll_hint_opacity)} aria-hidden="true">
                <span>{"scroll"}</span>
                <span class="scroll-hint-arrow">{"↓"}</span>
            </div>

            <div class="landing-content" style={format!("opacity: {:.3};", frame.content_opacity)}>
                <Section id="about" title="About">
                    { for ABOUT.paragraphs.iter().map(|paragraph| html! { <p>{*paragraph}</p> }) }
                </Section>

                <Section id="featured-projects" title="Featured Projects">
                    <div class="project-grid">
                        { for content::featured_projects().map(|project| html! {
                            <ProjectCard key={project.slug} {project} />
                        }) }
                    </div>
                    <a class="link more-link" href={Route::Projects.path()}>{"All projects →"}</a>
                </Section>

                <Section id="experience" title="Experience">
                    <ol class="timeline">
                        { for EXPERIENCE.iter().map(|entry| html! {
                            <li class="timeline-item" key={entry.org}>
                                <div class="timeline-heading">
                                    <h3>{entry.role}</h3>
                                    <span class="muted mono">{entry.period()}</span>
                                </div>
                                <p class="muted">{entry.org}</p>
                                <ul>
                                    { for entry.bullets.iter().map(|bullet| html! { <li>{*bullet}</li> }) }
                                </ul>
                                <p class="skills mono">{entry.skills.join(" · ")}</p>
                            </li>
                        }) }
                    </ol>
                </Section>

                <Section id="education" title="Education">
                    <div class="timeline-item">
                        <div class="timeline-heading">
                            <h3>{EDUCATION.school}</h3>
                            <span class="muted mono">{format!("{} — {}", EDUCATION.start, EDUCATION.end)}</span>
                        </div>
                        <p class="muted">{EDUCATION.degree}</p>
                        <p>{format!("Coursework: {}", EDUCATION.coursework.join(", "))}</p>
                        <p class="skills mono">{EDUCATION.skills.join(" · ")}</p>
                    </div>
                </Section>

                <Section id="contact" title="Contact">
                    <p>{"Open to Summer 2026 SWE internships. The fastest way to reach me is email."}</p>
                    <Footer />
                </Section>

                <div class="tech-strip mono" aria-label="Technologies">
                    { for TECHNOLOGIES.iter().map(|tech| html! { <span key={*tech}>{*tech}</span> }) }
                </div>
            </div>
        </main>
    }
}

#[function_component(ProjectsPage)]
fn projects_page(props: &PageProps) -> Html {
    let tag = use_state_eq(|| None::<String>);

    use_document_title(content::projects_document_title(tag.as_deref()));

    let on_tag = {
        let tag = tag.clone();
        Callback::from(move |clicked: AttrValue| {
            let next = content::toggle_tag(tag.as_deref(), &clicked);
            log_event(LogLevel::Debug, "project_filter_changed", json!({ "tag": next }));
            tag.set(next);
        })
    };

    let active_tag = tag.as_deref().map(|value| AttrValue::from(value.to_string()));
    let visible = content::filter_by_tag(tag.as_deref());
    let groups: Vec<(ProjectCategory, Vec<&'static Project>)> =
        [ProjectCategory::Main, ProjectCategory::Academic]
            .into_iter()
            .map(|category| {
                let projects: Vec<&'static Project> = visible
                    .iter()
                    .copied()
                    .filter(|project| project.category == category)
                    .collect();
                (category, projects)
            })
            .filter(|(_, projects)| !projects.is_empty())
            .collect();

    html! {
        <div class="page">
            <TerminalHero
                always_header={true}
                on_landing={false}
                theme={props.theme}
                on_toggle_theme={props.on_toggle_theme.clone()}
            />
            <main id="main" class="page-content">
                <h1>{"Projects"}</h1>
                <div class="filter-bar" role="toolbar" aria-label="Filter by technology">
                    <button
                        type="button"
                        class={classes!("tag", tag.is_none().then_some("is-selected"))}
                        onclick={{
                            let tag = tag.clone();
                            Callback::from(move |_: MouseEvent| tag.set(None))
                        }}
                    >
                        {"All"}
                    </button>
                    { for content::all_tags().into_iter().map(|name| {
                        let selected = tag.as_deref() == Some(name);
                        let on_tag = on_tag.clone();
                        html! {
                            <button
                                key={name}
                                type="button"
                                class={classes!("tag", selected.then_some("is-selected"))}
                                aria-pressed={selected.to_string()}
                                onclick={Callback::from(move |_: MouseEvent| on_tag.emit(AttrValue::from(name)))}
                            >
                                {name}
                            </button>
                        }
                    }) }
                </div>

                if visible.is_empty() {
                    <p class="muted">{"No projects use that technology yet."}</p>
                }

                { for groups.into_iter().map(|(category, projects)| {
                    html! {
                        <section class="project-group" key={category.heading()}>
                            <h2>{category.heading()}</h2>
                            <div class="project-grid">
                                { for projects.into_iter().map(|project| html! {
                                    <ProjectCard
                                        key={project.slug}
                                        {project}
                                        active_tag={active_tag.clone()}
                                        on_tag={Some(on_tag.clone())}
                                    />
                                }) }
                            </div>
                        </section>
                    }
                }) }
            </main>
            <Footer />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectDetailProps {
    slug: AttrValue,
    theme: Theme,
    on_toggle_theme: Callback<MouseEvent>,
}

#[function_component(ProjectDetailPage)]
fn project_detail_page(props: &ProjectDetailProps) -> Html {
    let project = content::project_by_slug(&props.slug);
    use_document_title(match project {
        Some(project) => format!("{} • {SITE_NAME}", project.title),
        None => format!("Not found • {SITE_NAME}"),
    });

    let body = match project {
        Some(project) => html! {
            <article class="project-detail">
                <a class="link back-link" href={Route::Projects.path()}>{"← All projects"}</a>
                <h1>{project.title}</h1>
                <p class="lead">{project.tagline}</p>
                <span class={classes!("status", project.status.css_class())}>{project.status.as_str()}</span>
                {project_media(project)}
                { for project.description.iter().map(|paragraph| html! { <p>{*paragraph}</p> }) }
                <ul class="tag-list">
                    { for project.tech.iter().map(|tech| html! { <li key={*tech}><span class="tag">{*tech}</span></li> }) }
                </ul>
                <ul class="link-list">
                    { for project.links.iter().map(|link| html! {
                        <li key={link.href}>
                            <a class="link" href={link.href} target="_blank" rel="noopener noreferrer">
                                {link.label}
                                <span class="external-mark" aria-hidden="true">{"↗"}</span>
                            </a>
                        </li>
                    }) }
                </ul>
            </article>
        },
        None => html! { <NotFoundBody /> },
    };

    html! {
        <div class="page">
            <TerminalHero
                always_header={true}
                on_landing={false}
                theme={props.theme}
                on_toggle_theme={props.on_toggle_theme.clone()}
            />
            <main id="main" class="page-content">{body}</main>
            <Footer />
        </div>
    }
}

/// Video wins over a still image when a project has both.
fn project_media(project: &Project) -> Html {
    if let Some(video) = project.video {
        html! { <video class="project-media" src={content::project_media_path(video)} controls={true} /> }
    } else if let Some(image) = project.image {
        html! { <img class="project-media" src={content::project_media_path(image)} alt={project.title} /> }
    } else {
        Html::default()
    }
}

#[function_component(NotFoundBody)]
fn not_found_body() -> Html {
    html! {
        <div class="not-found">
            <p class="mono muted">{"bash: page: command not found"}</p>
            <h1>{"404"}</h1>
            <a class="link" href={Route::Home.path()}>{"cd ~"}</a>
        </div>
    }
}

#[function_component(NotFoundPage)]
fn not_found_page(props: &PageProps) -> Html {
    use_document_title(format!("Not found • {SITE_NAME}"));

    html! {
        <div class="page">
            <TerminalHero
                always_header={true}
                on_landing={false}
                theme={props.theme}
                on_toggle_theme={props.on_toggle_theme.clone()}
            />
            <main id="main" class="page-content"><NotFoundBody /></main>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let route = use_memo((), |_| Route::parse(&browser::location_pathname()));
    let signal = use_window_scroll();
    let (theme, on_toggle_theme) = use_theme();
    let active = use_state_eq(|| None::<String>);

    let registry = {
        let active = active.clone();
        use_memo((), move |_| {
            SectionRegistry::new(Callback::from(move |next: Option<String>| active.set(next)))
        })
    };

    {
        let registry = (*registry).clone();
        use_effect_with(route.is_landing(), move |on_landing| {
            let mut hash_listener = None;
            if *on_landing {
                registry.start_observing();

                let hash = browser::location_hash();
                if !hash.is_empty() {
                    registry.on_fragment(&hash);
                    registry.scroll_to(hash.trim_start_matches('#'), false);
                }

                let on_hash = registry.clone();
                hash_listener = EventListener::on_window("hashchange", move |_| {
                    on_hash.on_fragment(&browser::location_hash());
                });
            }

            move || {
                drop(hash_listener);
                registry.stop_observing();
            }
        });
    }

    let sections = SectionsContext {
        registry: (*registry).clone(),
        active: (*active).clone(),
    };

    let page = match &*route {
        Route::Home => html! { <HomePage {theme} on_toggle_theme={on_toggle_theme.clone()} /> },
        Route::Projects => html! { <ProjectsPage {theme} on_toggle_theme={on_toggle_theme.clone()} /> },
        Route::Project(slug) => html! {
            <ProjectDetailPage slug={slug.clone()} {theme} on_toggle_theme={on_toggle_theme.clone()} />
        },
        Route::NotFound => html! { <NotFoundPage {theme} on_toggle_theme={on_toggle_theme.clone()} /> },
    };

    html! {
        <ContextProvider<ScrollSignal> context={signal}>
            <ContextProvider<SectionsContext> context={sections}>
                <a class="skip-link" href="#main">{"Skip to main content"}</a>
                {page}
            </ContextProvider<SectionsContext>>
        </ContextProvider<ScrollSignal>>
    }
}

pub fn run() {
    log::set_min_level(LogLevel::parse_or(
        browser::read_storage(LOG_LEVEL_KEY).as_deref(),
        DEFAULT_LOG_LEVEL,
    ));
    log_event(
        LogLevel::Info,
        "app_started",
        json!({ "path": browser::location_pathname() }),
    );

    let root = browser::document().and_then(|d| d.get_element_by_id("app"));

    match root {
        Some(root) => yew::Renderer::<App>::with_root(root).render(),
        None => yew::Renderer::<App>::new().render(),
    };
}
