//! Material catalog
//!
//! Named Phong materials. The catalog is append-only: definitions are
//! never updated in place, and lookup returns the first match, so a
//! duplicate tag shadows every later definition with the same name.

use glam::Vec3;

/// Phong surface parameters broadcast per object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse_color: Vec3,
    pub specular_color: Vec3,
    pub shininess: f32,
}

impl Material {
    pub fn new(diffuse_color: Vec3, specular_color: Vec3, shininess: f32) -> Self {
        Self {
            diffuse_color,
            specular_color,
            shininess,
        }
    }
}

struct MaterialEntry {
    tag: String,
    material: Material,
}

/// Tag-addressed collection of materials
#[derive(Default)]
pub struct MaterialCatalog {
    entries: Vec<MaterialEntry>,
}

impl MaterialCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a material under `tag`. No uniqueness check; an earlier
    /// entry with the same tag shadows this one.
    pub fn define(&mut self, tag: &str, material: Material) {
        self.entries.push(MaterialEntry {
            tag: tag.to_string(),
            material,
        });
    }

    /// First material registered under `tag`, if any
    pub fn lookup(&self, tag: &str) -> Option<&Material> {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| &entry.material)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_defined_material() {
        let mut catalog = MaterialCatalog::new();
        let wood = Material::new(Vec3::new(0.4, 0.3, 0.1), Vec3::new(0.1, 0.1, 0.1), 0.2);
        catalog.define("wood", wood);

        assert_eq!(catalog.lookup("wood"), Some(&wood));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn lookup_misses_report_none() {
        let mut catalog = MaterialCatalog::new();
        assert_eq!(catalog.lookup("anything"), None);

        catalog.define(
            "glass",
            Material::new(Vec3::splat(0.3), Vec3::splat(0.6), 85.0),
        );
        assert_eq!(catalog.lookup("wood"), None);
    }

    #[test]
    fn duplicate_tag_shadowed_by_first_entry() {
        let mut catalog = MaterialCatalog::new();
        let first = Material::new(Vec3::splat(0.1), Vec3::splat(0.2), 1.0);
        let second = Material::new(Vec3::splat(0.9), Vec3::splat(0.8), 64.0);
        catalog.define("wood", first);
        catalog.define("wood", second);

        assert_eq!(catalog.lookup("wood"), Some(&first));
        assert_eq!(catalog.len(), 2);
    }
}
