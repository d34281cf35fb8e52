pub(crate) mod compositor;
pub(crate) mod driver;
pub(crate) mod key;
pub(crate) mod media;
pub(crate) mod sink;
pub(crate) mod source;
pub(crate) mod surface;
