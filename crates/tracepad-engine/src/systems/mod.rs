pub mod guide;
pub mod stroke;
#[cfg(feature = "vectors")]
pub mod ink_mesh;
