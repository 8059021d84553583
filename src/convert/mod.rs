pub(crate) mod batch;
pub(crate) mod file;
pub(crate) mod pipeline;
