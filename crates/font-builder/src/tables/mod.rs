//! Table builders, one per table

pub(crate) mod cmap;
pub(crate) mod glyf;
pub(crate) mod head;
pub(crate) mod hhea;
pub(crate) mod hmtx;
pub(crate) mod maxp;
pub(crate) mod name;
pub(crate) mod os2;
pub(crate) mod post;
