use i18nrs::yew::use_translation;
use web_sys::HtmlInputElement;
use yew::{
    AttrValue, Callback, Html, Properties, TargetCast, events::InputEvent, function_component,
    html,
};

use crate::containers::login_validation::FieldKind;

#[derive(Properties, PartialEq)]
pub struct FormFieldProps {
    /// Field rendered by this input.
    pub kind: FieldKind,
    /// Current value.
    pub value: String,
    /// Error label shown under the input, if any.
    #[prop_or_default]
    pub error: Option<AttrValue>,
    /// Emits the field kind and the new value on input.
    pub on_change: Callback<(FieldKind, String)>,
}

/// One labelled form input.
///
/// The field kind decides the transport name, the rendered input type, and
/// the i18n keys for the label and placeholder.
#[function_component(FormField)]
pub fn form_field(props: &FormFieldProps) -> Html {
    let (i18n, _) = use_translation();
    let kind = props.kind;

    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit((kind, input.value()));
        })
    };

    html! {
        <div class="form-control">
            <label class="label" for={kind.transport_name()}>
                <span class="label-text">
                    { i18n.t(&format!("login.fields.{}.label", kind.as_str())) }
                </span>
            </label>
            <input
                id={kind.transport_name()}
                name={kind.transport_name()}
                type={kind.input_type()}
                placeholder={i18n.t(&format!("login.fields.{}.placeholder", kind.as_str()))}
                class={format!("input input-bordered w-full {}", if props.error.is_some() { "input-error" } else { "" })}
                value={props.value.clone()}
                {oninput}
            />
            if let Some(error) = &props.error {
                <label class="label">
                    <span class="label-text-alt text-error">{ error }</span>
                </label>
            }
        </div>
    }
}
