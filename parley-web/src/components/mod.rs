pub(crate) mod captcha_block;
pub(crate) mod form_field;
pub(crate) mod loading;
pub(crate) mod mail_provider;

// Re-export components for convenience
pub use captcha_block::CaptchaBlock;
pub use form_field::FormField;
pub use loading::Loading;
pub use mail_provider::MailProvider;
