pub(crate) mod daily;
pub(crate) mod personas;
pub(crate) mod sparks;
pub(crate) mod train;
