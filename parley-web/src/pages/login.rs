//! Authentication pages.
//!
//! One page component serves every form variant: the route picks the
//! [`FormPage`] and this page builds the matching submit handler over the API
//! client. The form container only ever sees the handler's settlement.

use futures::FutureExt;
use shared::models::{
    CreateAccountRequest, PasswordResetRequest, ResendVerificationRequest, SendResetRequest,
    SessionRequest,
};
use yew::{Html, Properties, function_component, html};
use yew_router::hooks::use_navigator;
use yewdux::prelude::use_store;

use crate::api::ParleyClient;
use crate::containers::LoginForm;
use crate::containers::login_flow::{FormPage, SubmitPayload};
use crate::containers::login_form::SubmitHandler;
use crate::models::app_state::AppState;
use crate::routes::MainRoute;

#[derive(Properties, PartialEq)]
pub struct LoginPageProps {
    /// Form variant to render.
    pub page: FormPage,
    /// Password-reset token from the URL, on the reset page.
    #[prop_or_default]
    pub reset_token: Option<String>,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let navigator = use_navigator();
    let (_, dispatch) = use_store::<AppState>();
    let page = props.page;

    let on_submit = {
        let reset_token = props.reset_token.clone().unwrap_or_default();
        SubmitHandler::new(move |payload: SubmitPayload| {
            let reset_token = reset_token.clone();
            let navigator = navigator.clone();
            let dispatch = dispatch.clone();
            async move {
                let client = ParleyClient::shared();
                let fields = payload.fields;
                match page {
                    FormPage::Login => {
                        let request = SessionRequest {
                            email: fields.email,
                            password: fields.password,
                            captcha: payload.captcha,
                        };
                        let session = client
                            .create_session(&request)
                            .await
                            .map_err(|err| err.code)?;
                        dispatch.reduce_mut(|state| state.session = Some(session));
                        if let Some(navigator) = &navigator {
                            navigator.push(&MainRoute::Home);
                        }
                        Ok(())
                    }
                    FormPage::Create => {
                        let invite = if fields.invite.is_empty() {
                            None
                        } else {
                            Some(fields.invite)
                        };
                        let request = CreateAccountRequest {
                            email: fields.reg_email,
                            username: fields.username,
                            password: fields.password,
                            date_of_birth: fields.date,
                            invite,
                            captcha: payload.captcha,
                        };
                        client.create_account(&request).await.map_err(|err| err.code)
                    }
                    FormPage::SendReset => {
                        let request = SendResetRequest {
                            email: fields.email,
                            captcha: payload.captcha,
                        };
                        client
                            .send_password_reset(&request)
                            .await
                            .map_err(|err| err.code)
                    }
                    FormPage::Reset => {
                        let request = PasswordResetRequest {
                            token: reset_token,
                            password: fields.password,
                        };
                        client.password_reset(&request).await.map_err(|err| err.code)
                    }
                    FormPage::Resend => {
                        let request = ResendVerificationRequest {
                            email: fields.email,
                            captcha: payload.captcha,
                        };
                        client
                            .resend_verification(&request)
                            .await
                            .map_err(|err| err.code)
                    }
                }
            }
            .boxed_local()
        })
    };

    html! { <LoginForm key={page.as_str()} {page} {on_submit} /> }
}
