use quadterm::config::Config;
use quadterm::platform::app::App;
use quadterm::renderer::atlas::GlyphAtlas;
use winit::event_loop::EventLoop;

fn main() {
    env_logger::init();

    let config = Config::load();

    let Some(username) = current_username() else {
        log::error!("could not resolve the current user; refusing to start");
        std::process::exit(1);
    };

    let atlas = match GlyphAtlas::from_file(&config.font.path, config.font.size) {
        Ok(atlas) => atlas,
        Err(e) => {
            log::error!("failed to load font {}: {}", config.font.path, e);
            std::process::exit(1);
        }
    };

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = App::new(config, username, atlas);
    event_loop.run_app(&mut app).expect("Event loop error");
}

fn current_username() -> Option<String> {
    match nix::unistd::User::from_uid(nix::unistd::getuid()) {
        Ok(Some(user)) => Some(user.name),
        Ok(None) => None,
        Err(e) => {
            log::error!("user lookup failed: {}", e);
            None
        }
    }
}
