pub(crate) mod cycle;
pub(crate) mod index;
