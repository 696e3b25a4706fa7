use crate::material::Material;

/// Result of a closest-hit query. Borrows the hit material from the scene and lives only as
/// long as the estimator call that asked for it.
#[derive(Clone, Copy)]
pub struct Intersection<'a> {
    pub t: f32,
    pub position: glam::Vec3A,
    /// unit, geometric
    pub normal: glam::Vec3A,
    pub material: &'a Material,
}
