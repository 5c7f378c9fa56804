pub(crate) mod fps;
pub(crate) mod png;
pub(crate) mod sink;
