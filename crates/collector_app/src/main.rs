mod app;
mod effects;
mod logging;
mod persistence;
mod render;

fn main() {
    logging::initialize(logging::LogDestination::from_env());
    if let Err(err) = app::run() {
        eprintln!("collector: {err}");
        std::process::exit(1);
    }
}
