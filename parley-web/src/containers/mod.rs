pub(crate) mod login_flow;
pub(crate) mod login_form;
pub(crate) mod login_validation;

pub use login_form::LoginForm;
