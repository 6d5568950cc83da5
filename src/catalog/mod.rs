pub mod builtin;
pub mod storage;
pub mod types;
pub mod validation;

pub use builtin::builtin_materials;
pub use storage::load_catalog;
pub use types::{ConductivityLevel, Material, TypicalForm};
pub use validation::validate_catalog;

/// The fixed set of materials a search runs against.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    materials: Vec<Material>,
}

impl Catalog {
    pub fn new(materials: Vec<Material>) -> Self {
        Self { materials }
    }

    /// The compiled-in catalog
    pub fn builtin() -> Self {
        Self::new(builtin_materials())
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
