#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::process::ExitCode;

use flipotron::{
    config, engine::Coordinator, input::Keymap, platform, utils::tracing::init_tracing,
};

fn main() -> ExitCode {
    init_tracing();

    let cfg = config::load_or_default();
    let coordinator = Coordinator::new(&cfg, Keymap::native());

    match platform::run(coordinator) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "flipotron stopped");
            eprintln!("flipotron: {e}");
            ExitCode::FAILURE
        }
    }
}
