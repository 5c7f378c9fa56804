pub(crate) mod ring;
pub(crate) mod shared;
