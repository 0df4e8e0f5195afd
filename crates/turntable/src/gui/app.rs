use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::navigator::{self, CLICK_SLOP, DialGeometry};
use crate::gui::playlist::PlaylistView;
use crate::gui::tasks::{DelayTask, FrameTask};
use crate::gui::theme::{self, ThemeColors};
use gtk::prelude::*;
use gtk4 as gtk;
use orbit::Point;
use orbit::dial::{RotarySelector, SnapTick};
use orbit::item::ensure_unique_ids;
use orbit::list::ActiveItemTracker;
use orbit::task::TaskSlot;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Everything the draw function and frame callbacks share with the component.
pub struct Deck {
    pub dial: RotarySelector<FrameTask>,
    pub tracker: ActiveItemTracker,
    pub playlist: PlaylistView,
}

impl Deck {
    pub fn new<F>(config: &Config, on_track_click: F) -> Result<Self, orbit::Error>
    where
        F: Fn(usize) + Clone + 'static,
    {
        let mut deck = Self {
            dial: RotarySelector::new(config.navigator.items(), &config.navigator.dial)?,
            tracker: ActiveItemTracker::new(
                config.playlist.tracks.clone(),
                config.playlist.list.clone(),
            )?,
            playlist: PlaylistView::new(),
        };
        deck.rebuild_rows(on_track_click);
        Ok(deck)
    }

    /// Swaps in a reloaded config. Nothing changes when it is rejected.
    pub fn apply<F>(&mut self, config: &Config, on_track_click: F) -> Result<(), orbit::Error>
    where
        F: Fn(usize) + Clone + 'static,
    {
        config.playlist.list.validate()?;
        ensure_unique_ids(&config.playlist.tracks)?;

        self.dial
            .reconfigure(config.navigator.items(), &config.navigator.dial)?;
        self.tracker
            .set_items(config.playlist.tracks.clone(), config.playlist.list.clone())?;
        self.rebuild_rows(on_track_click);
        Ok(())
    }

    fn rebuild_rows<F>(&mut self, on_track_click: F)
    where
        F: Fn(usize) + Clone + 'static,
    {
        self.playlist.rebuild(
            self.tracker.items(),
            self.tracker.settings().gap,
            on_track_click,
        );
        self.playlist.highlight(self.tracker.active_index());
    }
}

/// The navigator overlay: a header with the active entry and a close button above the dial.
pub struct NavigatorPanel {
    pub root: gtk::Box,
    pub title: gtk::Label,
    pub dial: gtk::DrawingArea,
}

pub struct AppModel {
    pub deck: Rc<RefCell<Deck>>,
    pub navigator_open: bool,
    pub nav_label: String,
    pub banner_title: String,
    pub banner_length: String,
    pub press_origin: Option<Point>,
    pub navigator: NavigatorPanel,
    pub close_timer: TaskSlot<DelayTask>,
}

#[derive(Debug)]
pub enum AppMsg {
    OpenNavigator,
    CloseNavigator,
    DialPress(Point),
    DialMotion(Point),
    DialRelease(Point),
    DialLeave,
    DialTurned,
    SnapSettled(usize),
    SelectionComplete(usize),
    TrackClicked(usize),
    TrackActivated,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Turntable"),
            set_default_size: (420, 720),
            add_css_class: "turntable-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::CloseNavigator);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "overlay"]
            gtk::Overlay {
                #[name = "content"]
                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 12,
                    add_css_class: "deck",

                    gtk::Button {
                        add_css_class: "navbar",
                        #[watch]
                        set_label: &model.nav_label,
                        #[watch]
                        set_sensitive: !model.navigator_open,
                        connect_clicked => AppMsg::OpenNavigator,
                    },

                    gtk::Box {
                        add_css_class: "banner",
                        set_spacing: 16,

                        gtk::Label {
                            add_css_class: "banner-title",
                            set_hexpand: true,
                            set_xalign: 0.0,
                            #[watch]
                            set_label: &model.banner_title,
                        },

                        gtk::Label {
                            add_css_class: "banner-length",
                            #[watch]
                            set_label: &model.banner_length,
                        },
                    },
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();

        let deck = match Deck::new(&config, track_click_handler(&sender)) {
            Ok(deck) => deck,
            Err(e) => {
                log::error!("Rejected config ({}), using built-in defaults", e);
                Deck::new(&Config::default(), track_click_handler(&sender))
                    .expect("built-in config is valid")
            }
        };
        let deck = Rc::new(RefCell::new(deck));

        let mut model = AppModel {
            deck: deck.clone(),
            navigator_open: false,
            nav_label: String::new(),
            banner_title: String::new(),
            banner_length: String::new(),
            press_origin: None,
            navigator: build_navigator(&deck, &sender),
            close_timer: TaskSlot::empty(),
        };
        model.refresh_labels();

        let widgets = view_output!();

        widgets.content.append(deck.borrow().playlist.widget());
        widgets.overlay.add_overlay(&model.navigator.root);

        let adjustment = deck.borrow().playlist.adjustment();
        let deck_scroll = deck.clone();
        let sender_scroll = sender.clone();
        adjustment.connect_value_changed(move |adjustment| {
            // busy while rows are rebuilt
            let Ok(mut deck) = deck_scroll.try_borrow_mut() else {
                return;
            };
            let Deck {
                tracker, playlist, ..
            } = &mut *deck;
            if tracker.on_scroll(adjustment.value(), &*playlist).is_some() {
                playlist.highlight(tracker.active_index());
                sender_scroll.input(AppMsg::TrackActivated);
            }
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::OpenNavigator => {
                self.close_timer.cancel();
                self.navigator_open = true;
                self.navigator.root.set_visible(true);
                self.navigator.dial.queue_draw();
            }
            AppMsg::CloseNavigator => {
                self.close_timer.cancel();
                self.deck.borrow_mut().dial.shutdown();
                self.press_origin = None;
                self.close_navigator();
            }
            AppMsg::DialPress(point) => {
                let geometry = self.dial_geometry();
                if !geometry.within_reach(point) {
                    return;
                }
                self.close_timer.cancel();
                self.press_origin = Some(point);
                self.deck.borrow_mut().dial.pointer_down(point, geometry.hub);
            }
            AppMsg::DialMotion(point) => {
                let hub = self.dial_geometry().hub;
                let turned = self.deck.borrow_mut().dial.pointer_move(point, hub);
                if turned.is_some() {
                    self.refresh_labels();
                    self.navigator.dial.queue_draw();
                }
            }
            AppMsg::DialRelease(point) => {
                self.deck.borrow_mut().dial.pointer_up();
                let clicked = self
                    .press_origin
                    .take()
                    .filter(|origin| origin.distance(point) <= CLICK_SLOP);

                if let Some(origin) = clicked {
                    let geometry = self.dial_geometry();
                    let target = {
                        let deck = self.deck.borrow();
                        geometry.entry_at(deck.dial.layout(), deck.dial.rotation(), origin)
                    };
                    if let Some(index) = target {
                        self.start_snap(index, &sender);
                    }
                }
            }
            AppMsg::DialLeave => {
                self.press_origin = None;
                self.deck.borrow_mut().dial.pointer_leave();
            }
            AppMsg::DialTurned => {
                self.refresh_labels();
                self.navigator.dial.queue_draw();
            }
            AppMsg::SnapSettled(index) => {
                // a drag that began before this frame was handled takes over
                let (dragging, delay) = {
                    let deck = self.deck.borrow();
                    (deck.dial.is_dragging(), deck.dial.close_delay())
                };
                if dragging || !self.navigator_open {
                    return;
                }
                let sender = sender.clone();
                self.close_timer.replace(DelayTask::start(delay, move || {
                    sender.input(AppMsg::SelectionComplete(index));
                }));
            }
            AppMsg::SelectionComplete(index) => {
                // the timer was called off after it had already queued this
                if self.close_timer.release().is_none() {
                    return;
                }
                if let Some(entry) = self.deck.borrow().dial.entries().get(index) {
                    log::info!("Navigated to {}", entry.label);
                }
                self.close_navigator();
            }
            AppMsg::TrackClicked(index) => {
                let mut deck = self.deck.borrow_mut();
                let Deck {
                    tracker, playlist, ..
                } = &mut *deck;
                if !tracker.scroll_to_item(index, playlist) {
                    log::debug!("Track row {} is not laid out yet", index);
                }
            }
            AppMsg::TrackActivated => self.refresh_labels(),
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let applied = self
                        .deck
                        .borrow_mut()
                        .apply(&new_config, track_click_handler(&sender));
                    match applied {
                        Ok(()) => {
                            self.close_timer.cancel();
                            self.refresh_labels();
                            self.navigator.dial.queue_draw();
                            log::info!("Configuration reloaded");
                        }
                        Err(e) => log::error!("Rejected reloaded config: {}", e),
                    }
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        self.close_timer.cancel();
        let mut deck = self.deck.borrow_mut();
        deck.dial.shutdown();
        deck.playlist.stop_scrolling();
    }
}

impl AppModel {
    fn dial_geometry(&self) -> DialGeometry {
        let area = &self.navigator.dial;
        DialGeometry::for_area(area.width() as f64, area.height() as f64)
    }

    fn close_navigator(&mut self) {
        self.navigator_open = false;
        self.navigator.root.set_visible(false);
    }

    fn refresh_labels(&mut self) {
        let deck = self.deck.borrow();
        self.nav_label = deck
            .dial
            .active_item()
            .map(|item| item.label.to_string())
            .unwrap_or_default();
        self.navigator.title.set_label(&self.nav_label);

        let track = deck.tracker.active_item();
        self.banner_title = track
            .map(|item| item.label.to_string())
            .unwrap_or_default();
        self.banner_length = track
            .and_then(|item| item.length.as_ref())
            .map(ToString::to_string)
            .unwrap_or_default();
    }

    fn start_snap(&mut self, index: usize, sender: &ComponentSender<Self>) {
        self.close_timer.cancel();

        let deck = self.deck.clone();
        let sender = sender.clone();
        let area = self.navigator.dial.clone();

        self.deck.borrow_mut().dial.select(index, move || {
            FrameTask::start(&area, move |elapsed| {
                let tick = deck.borrow_mut().dial.tick(elapsed);
                match tick {
                    SnapTick::Moving(_) => {
                        sender.input(AppMsg::DialTurned);
                        glib::ControlFlow::Continue
                    }
                    SnapTick::Converged { index, .. } => {
                        sender.input(AppMsg::DialTurned);
                        sender.input(AppMsg::SnapSettled(index));
                        glib::ControlFlow::Break
                    }
                    SnapTick::Idle => glib::ControlFlow::Break,
                }
            })
        });
    }
}

fn track_click_handler(sender: &ComponentSender<AppModel>) -> impl Fn(usize) + Clone + 'static {
    let input = sender.input_sender().clone();
    move |index| input.emit(AppMsg::TrackClicked(index))
}

fn build_navigator(deck: &Rc<RefCell<Deck>>, sender: &ComponentSender<AppModel>) -> NavigatorPanel {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.add_css_class("navigator");
    root.set_visible(false);

    let header = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    header.add_css_class("navigator-header");
    let title = gtk::Label::new(None);
    title.set_hexpand(true);
    title.set_xalign(0.0);
    header.append(&title);

    let close = gtk::Button::with_label("×");
    close.add_css_class("flat");
    close.add_css_class("navigator-close");
    let closer = sender.clone();
    close.connect_clicked(move |_| closer.input(AppMsg::CloseNavigator));
    header.append(&close);
    root.append(&header);

    let dial = build_dial_area(deck, sender);
    root.append(&dial);

    NavigatorPanel { root, title, dial }
}

fn build_dial_area(deck: &Rc<RefCell<Deck>>, sender: &ComponentSender<AppModel>) -> gtk::DrawingArea {
    let area = gtk::DrawingArea::new();
    area.set_hexpand(true);
    area.set_vexpand(true);
    area.add_css_class("dial-area");

    let deck_draw = deck.clone();
    area.set_draw_func(move |area, cr, width, height| {
        let style_context = area.style_context();
        let colors = ThemeColors::from_context(&style_context);
        let geometry = DialGeometry::for_area(width as f64, height as f64);
        if let Err(e) = navigator::draw(cr, &deck_draw.borrow().dial, &geometry, &colors) {
            log::error!("Drawing error: {}", e);
        }
    });

    let drag = gtk::GestureDrag::new();
    let press = sender.clone();
    drag.connect_drag_begin(move |_, x, y| press.input(AppMsg::DialPress(Point::new(x, y))));
    let motion = sender.clone();
    drag.connect_drag_update(move |gesture, dx, dy| {
        if let Some((x, y)) = gesture.start_point() {
            motion.input(AppMsg::DialMotion(Point::new(x + dx, y + dy)));
        }
    });
    let release = sender.clone();
    drag.connect_drag_end(move |gesture, dx, dy| {
        if let Some((x, y)) = gesture.start_point() {
            release.input(AppMsg::DialRelease(Point::new(x + dx, y + dy)));
        }
    });
    area.add_controller(drag);

    let pointer = gtk::EventControllerMotion::new();
    let leave = sender.clone();
    pointer.connect_leave(move |_| leave.input(AppMsg::DialLeave));
    area.add_controller(pointer);

    area
}
