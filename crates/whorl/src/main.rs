use relm4::prelude::*;
use whorl::config;
use whorl::gui::app::AppModel;
use whorl::gui::menu::Scene;
use whorl::sys::runtime;

fn main() {
    env_logger::init();

    let config = config::load_or_setup();
    let menu = config::build_menu(&config).unwrap_or_else(|err| {
        log::error!("invalid item catalog: {err}; falling back to built-in items");
        config::demo_menu(&config)
    });
    let scene = Scene::new(menu);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.whorl.Whorl");

    app.run::<AppModel>((scene, rx));
}
