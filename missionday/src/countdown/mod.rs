pub(crate) mod clock;
pub(crate) mod display;
pub(crate) mod engine;
pub(crate) mod phase;
pub(crate) mod ticker;
