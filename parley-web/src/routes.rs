use crate::containers::login_flow::FormPage;
use crate::models::app_state::AppState;
use crate::pages::{HomePage, LoginPage};
use strum::EnumIter;
use wasm_bindgen::prelude::*;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// The main routes
#[derive(Debug, Clone, PartialEq, Routable, EnumIter)]
pub enum MainRoute {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/login/create")]
    Create,
    #[at("/login/resend")]
    Resend,
    #[at("/login/reset")]
    SendReset,
    #[at("/login/reset/:token")]
    Reset { token: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[derive(Properties, PartialEq)]
pub struct MainRouteViewProps {
    pub route: MainRoute,
}

#[function_component(MainRouteView)]
fn main_route_view(props: &MainRouteViewProps) -> Html {
    let session = use_selector(|state: &AppState| state.session.clone());
    let signed_in = session.is_some();

    match props.route.clone() {
        MainRoute::Home => {
            if signed_in {
                html! { <HomePage /> }
            } else {
                html! { <Redirect<MainRoute> to={MainRoute::Login} /> }
            }
        }
        MainRoute::Login => {
            if signed_in {
                html! { <Redirect<MainRoute> to={MainRoute::Home} /> }
            } else {
                html! { <LoginPage page={FormPage::Login} /> }
            }
        }
        MainRoute::Create => html! { <LoginPage page={FormPage::Create} /> },
        MainRoute::Resend => html! { <LoginPage page={FormPage::Resend} /> },
        MainRoute::SendReset => html! { <LoginPage page={FormPage::SendReset} /> },
        MainRoute::Reset { token } => html! {
            <LoginPage page={FormPage::Reset} reset_token={Some(token)} />
        },
        MainRoute::NotFound => html! { <Redirect<MainRoute> to={MainRoute::Home} /> },
    }
}

/// Switch function for the main routes.
pub fn switch(route: MainRoute) -> Html {
    log(std::format!("Switching to route: {:?}", route).as_str());
    html! { <MainRouteView {route} /> }
}
