pub(crate) mod colour;
