pub(crate) mod normalizer;
