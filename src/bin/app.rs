#![recursion_limit = "1024"]

use wordle_hints::LOG_LEVEL;

#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

pub fn main() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    wasm_logger::init(wasm_logger::Config::new(LOG_LEVEL));
    log::info!("starting wordle hints {}", wordle_hints::GIT_VERSION);
    yew::start_app::<wordle_hints::web::App>();
}
