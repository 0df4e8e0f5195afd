use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

/// Runs the config watcher on its own tokio runtime, off the gtk main loop.
pub fn start_background_services(tx: Sender<AppEvent>) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime, config reload disabled: {}", e);
                return;
            }
        };

        rt.block_on(crate::config::run_async_watcher(tx));
    });
}
