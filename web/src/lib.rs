use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    // arguments come in as `#--rows=4&--cols=4&-vv`
    let args = match Args::try_parse_from(location_hash.split(['#', '&'])) {
        Ok(args) => args,
        Err(err) => {
            warn_bad_args(&err);
            Args::parse_from([""])
        }
    };
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("props: {:?}", args.game);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
}

/// The logger is not up yet when argument parsing fails, so this goes straight to the console.
fn warn_bad_args(err: &clap::Error) {
    gloo::console::warn!(format!("ignoring location hash arguments: {err}"));
}
