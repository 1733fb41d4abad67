use crate::api::ParleyClient;
use crate::components::Loading;
use crate::models::app_state::AppState;
use crate::routes::{MainRoute, switch};
use wasm_bindgen_futures::spawn_local;
use yew::{Html, function_component, html, use_effect_with};
use yew_router::prelude::*;
use yewdux::prelude::use_store;

/// Root component.
///
/// Fetches the server configuration once at mount into the shared store,
/// shows the loading panel until it lands, then mounts the router. A fetch
/// failure falls back to the default configuration with every feature off,
/// leaving the forms usable without CAPTCHA or invite gating.
#[function_component(App)]
pub fn app() -> Html {
    let (state, dispatch) = use_store::<AppState>();

    {
        let dispatch = dispatch.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let client = ParleyClient::shared();
                let configuration = client.get_configuration().await.unwrap_or_default();
                dispatch.reduce_mut(|state| state.configuration = Some(configuration));
            });
            || {}
        });
    }

    if state.configuration.is_none() {
        return html! { <Loading /> };
    }

    html! {
        <BrowserRouter>
            <Switch<MainRoute> render={switch} />
        </BrowserRouter>
    }
}
