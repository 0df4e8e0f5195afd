use relm4::prelude::*;
use turntable::config;
use turntable::gui::app::AppModel;
use turntable::sys::runtime;

fn main() {
    env_logger::init();

    match config::write_default_config() {
        Ok(path) => log::debug!("Config file at {}", path.display()),
        Err(e) => log::warn!("Could not create the default config file: {}", e),
    }
    let config = config::load_or_default();

    let (tx, rx) = async_channel::bounded(32);
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.turntable.Turntable");
    app.run::<AppModel>((config, rx));
}
