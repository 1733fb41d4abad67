use i18nrs::yew::use_translation;
use yew::{Html, function_component, html};
use yew_icons::{Icon, IconId};
use yewdux::prelude::use_selector;

use crate::models::app_state::AppState;

/// Landing page shown once a session exists.
#[function_component(HomePage)]
pub fn home_page() -> Html {
    let (i18n, _) = use_translation();
    let session = use_selector(|state: &AppState| state.session.clone());
    let username = (*session)
        .as_ref()
        .map(|session| session.user.username.clone())
        .unwrap_or_default();

    html! {
        <div class="flex flex-col items-center justify-center min-h-screen gap-4">
            <Icon icon_id={IconId::HeroiconsOutlineChatBubbleLeftRight} class="w-12 h-12 text-primary" />
            <h1 class="text-3xl font-bold">{ i18n.t("app.title") }</h1>
            <p class="text-base-content/70">
                { format!("{} {username}", i18n.t("home.signed_in_as")) }
            </p>
        </div>
    }
}
