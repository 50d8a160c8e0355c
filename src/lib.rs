#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod background;
mod constants;
mod dom;
mod frame;
mod host;
mod input;
mod render;
mod scramble;

pub use background::{BranchBackground, HawkingBackground};
pub use render::GlowRegistry;
pub use scramble::ScrambleBinding;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("backdrop-web starting");
    Ok(())
}
