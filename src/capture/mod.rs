pub(crate) mod retry;
pub(crate) mod sequence;
pub(crate) mod source;
pub(crate) mod synthetic;
