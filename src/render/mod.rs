pub(crate) mod blur;
pub(crate) mod composite;
pub(crate) mod compositor;
pub(crate) mod filters;
pub(crate) mod overlay;
pub(crate) mod surface;
