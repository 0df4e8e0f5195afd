use crate::gui::tasks::FrameTask;
use gtk::prelude::*;
use gtk4 as gtk;
use orbit::Item;
use orbit::list::ScrollContainer;
use orbit::motion::{Easing, Step, TickMode};
use orbit::task::TaskSlot;

pub const VIEWPORT_HEIGHT: i32 = 480;

const SCROLL_EASING: Easing = Easing {
    decay: 0.2,
    epsilon: 0.5,
    mode: TickMode::Elapsed,
};

/// The scrolled track list and the rows built for it.
pub struct PlaylistView {
    scrolled: gtk::ScrolledWindow,
    list: gtk::Box,
    rows: Vec<gtk::Box>,
    scroll_task: TaskSlot<FrameTask>,
}

impl PlaylistView {
    pub fn new() -> Self {
        let list = gtk::Box::new(gtk::Orientation::Vertical, 0);
        list.add_css_class("tracks");

        let scrolled = gtk::ScrolledWindow::builder()
            .hscrollbar_policy(gtk::PolicyType::Never)
            .min_content_height(VIEWPORT_HEIGHT)
            .vexpand(true)
            .child(&list)
            .build();

        Self {
            scrolled,
            list,
            rows: Vec::new(),
            scroll_task: TaskSlot::empty(),
        }
    }

    pub fn widget(&self) -> &gtk::ScrolledWindow {
        &self.scrolled
    }

    pub fn adjustment(&self) -> gtk::Adjustment {
        self.scrolled.vadjustment()
    }

    /// Replaces the rows. `on_click` receives the index of a clicked row.
    pub fn rebuild<F>(&mut self, items: &[Item], gap: f64, on_click: F)
    where
        F: Fn(usize) + Clone + 'static,
    {
        self.stop_scrolling();
        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }
        self.list.set_spacing(gap.round() as i32);

        self.rows = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let row = track_row(item);
                let click = gtk::GestureClick::new();
                let on_click = on_click.clone();
                click.connect_released(move |_, _, _, _| on_click(i));
                row.add_controller(click);
                self.list.append(&row);
                row
            })
            .collect();

        // lets the last rows reach the top of the viewport
        let tail = gtk::Box::new(gtk::Orientation::Vertical, 0);
        tail.set_height_request(VIEWPORT_HEIGHT);
        self.list.append(&tail);
    }

    pub fn highlight(&self, active: Option<usize>) {
        for (i, row) in self.rows.iter().enumerate() {
            if active == Some(i) {
                row.add_css_class("current");
            } else {
                row.remove_css_class("current");
            }
        }
    }

    pub fn stop_scrolling(&mut self) {
        self.scroll_task.cancel();
    }
}

impl Default for PlaylistView {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollContainer for PlaylistView {
    fn first_entry_height(&self) -> Option<f64> {
        self.rows.first().map(|row| row.height() as f64)
    }

    fn entry_top(&self, index: usize) -> Option<f64> {
        let row = self.rows.get(index)?;
        row.translate_coordinates(&self.list, 0.0, 0.0)
            .map(|(_, y)| y)
    }

    fn smooth_scroll_to(&mut self, offset: f64) {
        let adjustment = self.scrolled.vadjustment();
        let lower = adjustment.lower();
        let target = offset.clamp(lower, (adjustment.upper() - adjustment.page_size()).max(lower));

        let task = FrameTask::start(&self.scrolled, move |elapsed| {
            match SCROLL_EASING.step(adjustment.value(), target, elapsed) {
                Step::Moving(value) => {
                    adjustment.set_value(value);
                    glib::ControlFlow::Continue
                }
                Step::Arrived(value) => {
                    adjustment.set_value(value);
                    glib::ControlFlow::Break
                }
            }
        });
        self.scroll_task.replace(task);
    }
}

fn track_row(item: &Item) -> gtk::Box {
    let row = gtk::Box::new(gtk::Orientation::Horizontal, 16);
    row.add_css_class("track");

    let title = gtk::Label::new(Some(item.label.as_str()));
    title.add_css_class("track-title");
    title.set_hexpand(true);
    title.set_xalign(0.0);
    title.set_ellipsize(gtk::pango::EllipsizeMode::End);
    row.append(&title);

    let length = gtk::Label::new(item.length.as_ref().map(ToString::to_string).as_deref());
    length.add_css_class("track-length");
    row.append(&length);

    row
}
