pub(crate) mod briefing;
pub(crate) mod character;
pub(crate) mod request;
