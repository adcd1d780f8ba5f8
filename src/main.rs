use wasm_bindgen::JsValue;

mod components;
use components::app::App;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&JsValue::from_str(&format!("logger init failed: {}", err)));
    }
    yew::Renderer::<App>::new().render();
}
