use gdk4 as gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub ring: Srgba<f64>,
    pub label: Srgba<f64>,
    pub marker: Srgba<f64>,
    pub hub: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            ring: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                None,
            ),
            label: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                Some(1.0),
            ),
            marker: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.96, 0.84, 0.2, 1.0),
                Some(1.0),
            ),
            hub: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(1.0, 1.0, 1.0, 0.6),
                Some(0.6),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.turntable-window {
    background-color: black;
    color: white;
}
.deck {
    padding: 16px;
}
.navigator {
    background-color: rgba(0, 0, 0, 0.92);
}
.navigator-header {
    padding: 8px 16px;
    border-bottom: 2px solid white;
}
.navigator-close {
    font-size: 20px;
    padding: 0 8px;
}
.navbar, .banner {
    border: 2px solid white;
    padding: 8px 16px;
    background-color: rgba(0, 0, 0, 0.4);
}
.banner-title, .track-title {
    color: #f5d633;
}
.banner-length, .track-length {
    color: #f0313d;
}
.track {
    padding: 4px 16px;
    opacity: 0.8;
}
.track:hover {
    opacity: 1;
    background-color: rgba(255, 255, 255, 0.1);
}
.track.current label {
    opacity: 0;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
