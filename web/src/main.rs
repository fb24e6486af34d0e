use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::core::config::ExplorerConfig;
use ui::views::Explorer;

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn main() {
    // A second subscriber is refused; `launch` then keeps the first one.
    let _ = dioxus::logger::init(Level::INFO);
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // The CSV is served next to the page (web/public/data).
    let config = use_hook(ExplorerConfig::default);

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        Explorer { config }
    }
}
