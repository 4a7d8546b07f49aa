//! Storage primitives shared by the repository implementations.

mod atomic_toml;

pub use atomic_toml::AtomicTomlFile;
