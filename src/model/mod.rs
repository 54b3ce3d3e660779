pub(crate) mod platform;
pub(crate) mod style;
pub(crate) mod text;
