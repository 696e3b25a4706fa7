use crate::{
    core::{intersection::Intersection, ray::Ray},
    shape::{Shape, ShapeT},
};

/// Nearest hit inside `[ray.t_min, ray.t_max]`, linear scan over `shapes`.
pub fn closest_intersection<'a>(ray: &Ray, shapes: &'a [Shape]) -> Option<Intersection<'a>> {
    let mut t_max = ray.t_max;
    let mut closest = None;
    for shape in shapes {
        if let Some(inter) = shape.intersect(ray, t_max) {
            t_max = inter.t;
            closest = Some(inter);
        }
    }
    closest
}

/// Any-hit query for shadow rays.
pub fn has_intersection(ray: &Ray, shapes: &[Shape]) -> bool {
    shapes.iter().any(|shape| shape.intersect_test(ray))
}
