//! CAPTCHA challenge interposed between validation and submission.

use i18nrs::yew::use_translation;
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue, prelude::Closure};
use yew::{AttrValue, Callback, Html, Properties, function_component, html, use_effect_with};

/// Name of the global callback the hCaptcha widget invokes with its token.
const VERIFY_CALLBACK: &str = "__parley_captcha_verified";

#[derive(Properties, PartialEq)]
pub struct CaptchaBlockProps {
    /// Site key from the server configuration.
    pub sitekey: AttrValue,
    /// Invoked with the widget token when the user passes the challenge.
    pub on_success: Callback<String>,
    /// Invoked when the user backs out of the challenge.
    pub on_cancel: Callback<()>,
}

/// Renders the hCaptcha widget container and a cancel link.
///
/// The widget script (loaded from index.html) scans for the `h-captcha`
/// class and invokes the registered data-callback with the token. Exactly one
/// of the two continuations fires per challenge; the registered callback is
/// torn down when the component unmounts.
#[function_component(CaptchaBlock)]
pub fn captcha_block(props: &CaptchaBlockProps) -> Html {
    let (i18n, _) = use_translation();

    {
        let on_success = props.on_success.clone();
        use_effect_with((), move |_| {
            let verified = Closure::<dyn Fn(JsValue)>::new(move |token: JsValue| {
                if let Some(token) = token.as_string() {
                    on_success.emit(token);
                }
            });
            if let Some(window) = web_sys::window() {
                let _ = Reflect::set(
                    window.as_ref(),
                    &JsValue::from_str(VERIFY_CALLBACK),
                    verified.as_ref(),
                );
            }
            move || {
                if let Some(window) = web_sys::window() {
                    let target: &js_sys::Object = window.unchecked_ref();
                    let _ = Reflect::delete_property(target, &JsValue::from_str(VERIFY_CALLBACK));
                }
                drop(verified);
            }
        });
    }

    let onclick = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| on_cancel.emit(()))
    };

    html! {
        <div class="flex flex-col items-center justify-center min-h-screen gap-4">
            <div
                class="h-captcha"
                data-sitekey={props.sitekey.clone()}
                data-callback={VERIFY_CALLBACK}
            />
            <button class="btn btn-ghost btn-sm" {onclick}>
                { i18n.t("login.captcha.cancel") }
            </button>
        </div>
    }
}
