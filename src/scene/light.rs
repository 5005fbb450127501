//! Scene lighting

use glam::Vec3;

/// Point light with classic Phong components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            ambient: Vec3::ZERO,
            diffuse: Vec3::ZERO,
            specular: Vec3::ZERO,
        }
    }
}

impl PointLight {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_ambient(mut self, ambient: Vec3) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_diffuse(mut self, diffuse: Vec3) -> Self {
        self.diffuse = diffuse;
        self
    }

    pub fn with_specular(mut self, specular: Vec3) -> Self {
        self.specular = specular;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_components() {
        let light = PointLight::new(Vec3::new(0.0, 7.0, 0.0))
            .with_ambient(Vec3::splat(0.05))
            .with_diffuse(Vec3::splat(0.8))
            .with_specular(Vec3::splat(0.3));

        assert_eq!(light.position, Vec3::new(0.0, 7.0, 0.0));
        assert_eq!(light.ambient, Vec3::splat(0.05));
        assert_eq!(light.diffuse, Vec3::splat(0.8));
        assert_eq!(light.specular, Vec3::splat(0.3));
    }

    #[test]
    fn default_contributes_nothing() {
        let light = PointLight::default();
        assert_eq!(light.ambient, Vec3::ZERO);
        assert_eq!(light.diffuse, Vec3::ZERO);
        assert_eq!(light.specular, Vec3::ZERO);
    }
}
