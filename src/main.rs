use log::{info, warn};
use web_sys::window;
use yew::prelude::*;

use nurture_sync::behaviors::page;
use nurture_sync::{config, SiteConfig};

/// Id of the element the app mounts into. Created empty at the end of the
/// body when the page does not provide one.
const MOUNT_ID: &str = "site-behaviors";

#[function_component]
fn App() -> Html {
    // Wire the behaviors once on mount, tear them down on unmount.
    use_effect_with_deps(
        move |_| {
            let disposer = window().and_then(|w| w.document()).map(|document| {
                let config = SiteConfig::load(&document);
                nurture_sync::init(&document, &config)
            });
            move || {
                info!("Tearing down site behaviors");
                drop(disposer);
            }
        },
        (),
    );

    html! {}
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    page::welcome();

    let Some(document) = window().and_then(|w| w.document()) else {
        warn!("No document available, nothing to enhance");
        return;
    };
    // Yew clears its host on mount, so it must never get page content.
    let Some(root) = nurture_sync::dom::mount_point(&document, MOUNT_ID) else {
        warn!("No mount point for site behaviors");
        return;
    };
    yew::Renderer::<App>::with_root(root).render();
}
