//! Deep link to the mailbox of a submitted email address.

use i18nrs::yew::use_translation;
use yew::{AttrValue, Html, Properties, function_component, html};

/// Known webmail hosts and their inbox URLs.
const PROVIDERS: &[(&str, &str, &str)] = &[
    ("gmail.com", "Gmail", "https://mail.google.com/"),
    ("googlemail.com", "Gmail", "https://mail.google.com/"),
    ("outlook.com", "Outlook", "https://outlook.live.com/"),
    ("hotmail.com", "Outlook", "https://outlook.live.com/"),
    ("yahoo.com", "Yahoo Mail", "https://mail.yahoo.com/"),
    ("protonmail.com", "Proton Mail", "https://mail.proton.me/"),
    ("proton.me", "Proton Mail", "https://mail.proton.me/"),
];

/// Provider name and inbox URL for an address, when the domain is known.
#[must_use]
pub fn provider_for(email: &str) -> Option<(&'static str, &'static str)> {
    let (_, domain) = email.rsplit_once('@')?;
    let domain = domain.to_ascii_lowercase();
    PROVIDERS
        .iter()
        .find(|(host, _, _)| *host == domain)
        .map(|&(_, name, url)| (name, url))
}

#[derive(Properties, PartialEq)]
pub struct MailProviderProps {
    /// Address whose provider to link.
    pub email: AttrValue,
}

/// "Open your inbox" button for recognised mail providers.
///
/// Renders nothing when the address's domain is not a known provider.
#[function_component(MailProvider)]
pub fn mail_provider(props: &MailProviderProps) -> Html {
    let (i18n, _) = use_translation();

    let Some((name, url)) = provider_for(&props.email) else {
        return Html::default();
    };

    html! {
        <a class="btn btn-outline btn-sm" href={url} target="_blank" rel="noreferrer">
            { format!("{} {name}", i18n.t("login.success.open_provider")) }
        </a>
    }
}
