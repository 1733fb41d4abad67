//! Authentication form container.
//!
//! Renders one page variant of the login/registration form and drives its
//! [`LoginFlow`]: field inputs feed the input store, a submit attempt runs the
//! machine, and the container performs whatever IO the machine asks for —
//! showing the CAPTCHA widget or dispatching the payload to the page's submit
//! handler on the wasm event loop.

use std::fmt;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use i18nrs::yew::use_translation;
use shared::models::ApiErrorCode;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::{
    AttrValue, Html, Properties, events::SubmitEvent, function_component, html, use_state,
};
use yew_icons::{Icon, IconId};
use yew_router::prelude::Link;
use yewdux::prelude::use_selector;

use super::login_flow::{
    FormInputs, FormPage, LoginFlow, SubmissionState, SubmitDisposition, SubmitPayload,
};
use super::login_validation::FieldKind;
use crate::components::{CaptchaBlock, FormField, Loading, MailProvider};
use crate::models::app_state::AppState;
use crate::routes::MainRoute;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// Submit handler invoked with the validated payload.
///
/// Each page variant supplies its own handler; the form only observes the
/// settlement.
#[derive(Clone)]
pub struct SubmitHandler(
    Rc<dyn Fn(SubmitPayload) -> LocalBoxFuture<'static, Result<(), ApiErrorCode>>>,
);

impl SubmitHandler {
    /// Wraps a closure producing the submit future.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(SubmitPayload) -> LocalBoxFuture<'static, Result<(), ApiErrorCode>> + 'static,
    {
        Self(Rc::new(handler))
    }

    fn call(&self, payload: SubmitPayload) -> LocalBoxFuture<'static, Result<(), ApiErrorCode>> {
        (self.0)(payload)
    }
}

impl PartialEq for SubmitHandler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SubmitHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SubmitHandler")
    }
}

#[derive(Properties, PartialEq)]
pub struct LoginFormProps {
    /// Page variant the form renders.
    pub page: FormPage,
    /// Handler performing the network submission.
    pub on_submit: SubmitHandler,
}

#[function_component(LoginForm)]
pub fn login_form(props: &LoginFormProps) -> Html {
    let (i18n, _) = use_translation();
    let page = props.page;

    let configuration = use_selector(|state: &AppState| state.configuration.clone());
    let features = (*configuration)
        .clone()
        .map(|config| config.features)
        .unwrap_or_default();

    let inputs = use_state(|| FormInputs::with_invite(invite_code_from_url()));
    let flow = use_state(|| LoginFlow::new(page));

    // Runs the async submission and folds the settlement back into the flow.
    // `in_flight` is the snapshot already holding the submitting state; no
    // other transition can land until it settles.
    let dispatch = {
        let flow = flow.clone();
        let handler = props.on_submit.clone();
        move |mut in_flight: LoginFlow, payload: SubmitPayload| {
            let flow = flow.clone();
            let handler = handler.clone();
            spawn_local(async move {
                let result = handler.call(payload).await;
                if let Err(code) = &result {
                    log(&format!("submission failed: {code}"));
                }
                in_flight.settle(result);
                flow.set(in_flight);
            });
        }
    };

    let on_submit = {
        let inputs = inputs.clone();
        let flow = flow.clone();
        let features = features.clone();
        let dispatch = dispatch.clone();
        move |e: SubmitEvent| {
            e.prevent_default();
            let mut next = (*flow).clone();
            match next.submit(&inputs, &features) {
                SubmitDisposition::Dispatch(payload) => {
                    flow.set(next.clone());
                    dispatch(next, payload);
                }
                SubmitDisposition::Challenge | SubmitDisposition::Rejected => flow.set(next),
            }
        }
    };

    let on_input = {
        let inputs = inputs.clone();
        yew::Callback::from(move |(kind, value): (FieldKind, String)| {
            let mut next = (*inputs).clone();
            next.set(kind, value);
            inputs.set(next);
        })
    };

    let on_captcha_success = {
        let flow = flow.clone();
        let dispatch = dispatch.clone();
        yew::Callback::from(move |token: String| {
            let mut next = (*flow).clone();
            if let Some(payload) = next.resolve_captcha(token) {
                flow.set(next.clone());
                dispatch(next, payload);
            }
        })
    };

    let on_captcha_cancel = {
        let flow = flow.clone();
        yew::Callback::from(move |()| {
            let mut next = (*flow).clone();
            next.cancel_captcha();
            flow.set(next);
        })
    };

    match flow.state() {
        SubmissionState::Succeeded(email) => html! {
            <div class="flex flex-col items-center justify-center min-h-screen gap-4">
                <Icon icon_id={IconId::HeroiconsSolidCheckCircle} class="w-12 h-12 text-success" />
                if features.email {
                    <>
                        <h2 class="text-2xl font-bold">{ i18n.t("login.success.check_mail") }</h2>
                        <p class="text-base-content/70">{ i18n.t("login.success.email_delay") }</p>
                        <MailProvider email={AttrValue::from(email.clone())} />
                    </>
                } else {
                    <h2 class="text-2xl font-bold">{ i18n.t("login.success.registered") }</h2>
                }
                <Link<MainRoute> to={MainRoute::Login} classes="link link-primary">
                    { i18n.t("login.links.remembered") }
                </Link<MainRoute>>
            </div>
        },
        SubmissionState::AwaitingCaptcha(_) => html! {
            <CaptchaBlock
                sitekey={AttrValue::from(features.captcha.key.clone())}
                on_success={on_captcha_success}
                on_cancel={on_captcha_cancel}
            />
        },
        SubmissionState::Validating | SubmissionState::Submitting(_) => html! { <Loading /> },
        SubmissionState::Idle | SubmissionState::FailedGlobally(_) => {
            html! {
                <div class="flex items-center justify-center min-h-screen bg-base-200">
                    <div class="card w-full max-w-md shadow-lg bg-base-100">
                        <form class="card-body" onsubmit={on_submit}>
                            <h2 class="card-title text-2xl">
                                { i18n.t(&format!("login.headings.{}", page.as_str())) }
                            </h2>
                            if let Some(code) = flow.global_error() {
                                <div class="alert alert-error">
                                    <Icon icon_id={IconId::HeroiconsSolidExclamationTriangle} class="w-6 h-6" />
                                    <span>
                                        { format!("{} ({})", i18n.t("login.errors.submission_failed"), code) }
                                    </span>
                                </div>
                            }
                            { for page.active_fields(features.invite_only).iter().map(|&kind| html! {
                                <FormField
                                    kind={kind}
                                    value={inputs.value(kind).to_string()}
                                    error={flow.field_error(kind).map(|error| AttrValue::from(i18n.t(&error.i18n_key())))}
                                    on_change={on_input.clone()}
                                />
                            }) }
                            if page == FormPage::Login {
                                <span class="text-sm">
                                    <Link<MainRoute> to={MainRoute::SendReset} classes="link">
                                        { i18n.t("login.links.forgot") }
                                    </Link<MainRoute>>
                                </span>
                            }
                            <div class="form-control mt-6">
                                <button class="btn btn-primary" type="submit">
                                    { i18n.t(&format!("login.submit.{}", page.as_str())) }
                                </button>
                            </div>
                        </form>
                        <div class="card-body pt-0 text-sm">
                            {
                                match page {
                                    FormPage::Login => html! {
                                        <Link<MainRoute> to={MainRoute::Create} classes="link">
                                            { i18n.t("login.links.create") }
                                        </Link<MainRoute>>
                                    },
                                    FormPage::Create => html! {
                                        <Link<MainRoute> to={MainRoute::Login} classes="link">
                                            { i18n.t("login.links.existing") }
                                        </Link<MainRoute>>
                                    },
                                    _ => html! {
                                        <Link<MainRoute> to={MainRoute::Login} classes="link">
                                            { i18n.t("login.links.remembered") }
                                        </Link<MainRoute>>
                                    },
                                }
                            }
                        </div>
                    </div>
                </div>
            }
        }
    }
}

/// Invite code from the `code` URL query parameter, when present.
fn invite_code_from_url() -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get("code")
}
