pub mod doxygen;
/// LOBSTER interchange file output.
pub mod interchange;

pub use doxygen::{CompoundSource, LoadError, XmlDirectory};
