use crate::{
    core::{
        color::Color,
        intersection::Intersection,
        ray::Ray,
        rng::Rng,
        visibility::{closest_intersection, has_intersection},
    },
    light::{Light, LightT},
    material::{Material, MaterialT},
    shape::Shape,
};

/// Mirror `wo` about `n`. Both point away from the surface.
pub fn reflect(n: glam::Vec3A, wo: glam::Vec3A) -> glam::Vec3A {
    (2.0 * n.dot(wo) * n - wo).normalize()
}

pub enum Refraction {
    /// refracted direction, normal on the incident side
    Transmitted(glam::Vec3A, glam::Vec3A),
    /// reflected direction, normal on the incident side
    TotalInternalReflection(glam::Vec3A, glam::Vec3A),
}

/// Snell's law in vector form. `ior` is used as is when `wo` is on the side `n` points to and
/// inverted otherwise.
pub fn refract(n: glam::Vec3A, wo: glam::Vec3A, ior: f32) -> Refraction {
    let (n1, eta) = if n.dot(wo) < 0.0 {
        (-n, 1.0 / ior)
    } else {
        (n, ior)
    };
    let cos = n1.dot(wo);
    let radicand = 1.0 - eta * eta * (1.0 - cos * cos);
    if radicand < 0.0 {
        Refraction::TotalInternalReflection(reflect(n1, wo), n1)
    } else {
        let wt = (-eta * wo + n1 * (eta * cos - radicand.sqrt())).normalize();
        Refraction::Transmitted(wt, n1)
    }
}

/// The mirror or refraction ray leaving `inter`, one bounce deeper than `ray`.
/// `None` for non-specular materials and once `ray.depth` reached `max_depth`.
pub fn specular_ray(ray: &Ray, inter: &Intersection<'_>, max_depth: u32) -> Option<Ray> {
    if ray.depth >= max_depth {
        return None;
    }
    let wo = -ray.direction;
    let n = inter.normal;
    let p = inter.position;
    match inter.material {
        Material::Mirror(_) => Some(ray.bounce(p + n * Ray::T_MIN_EPS, reflect(n, wo))),
        Material::Transmissive(transmissive) => {
            match refract(n, wo, transmissive.index_of_refraction()) {
                Refraction::Transmitted(wt, n1) => Some(ray.bounce(p - n1 * Ray::T_MIN_EPS, wt)),
                Refraction::TotalInternalReflection(wr, n1) => {
                    Some(ray.bounce(p + n1 * Ray::T_MIN_EPS, wr))
                }
            }
        }
        _ => None,
    }
}

/// Constant-ambient stand-in for indirect light.
pub fn ambient(material: &Material, coefficient: f32) -> Color {
    material.diffuse_reflectance() * coefficient
}

/// Light reaching `inter` directly from `lights`, reflected towards `wo`.
///
/// Area lights are sampled `num_samples` times uniformly over their surface (pdf = 1 / area)
/// and averaged. Point lights take a single deterministic sample with inverse-square falloff.
pub fn direct_lighting(
    inter: &Intersection<'_>,
    wo: glam::Vec3A,
    depth: u32,
    shapes: &[Shape],
    lights: &[Light],
    num_samples: u32,
    rng: &mut Rng,
) -> Color {
    let x = inter.position;
    let n = inter.normal;
    let mut color = Color::BLACK;

    for light in lights {
        let le = light.intensity();
        if light.is_delta() {
            color += point_lighting(inter, wo, depth, shapes, light.position(), le);
            continue;
        }

        if num_samples == 0 {
            continue;
        }
        let light_normal = light.normal();
        let area = light.area();
        let mut sum = Color::BLACK;
        for _ in 0..num_samples {
            let to_light = light.sample_position(rng) - x;
            let dist = to_light.length();
            if dist <= 0.0 {
                continue;
            }
            let wi = to_light / dist;
            let g = n.dot(wi).max(0.0) * light_normal.dot(-wi).max(0.0) / (dist * dist);
            if g <= 0.0 {
                continue;
            }
            if !has_intersection(&Ray::shadow(x, wi, dist, depth), shapes) {
                let fr = inter.material.reflectance(n, wo, wi);
                // dividing by pdf = 1 / area
                sum += le * fr * (g * area);
            }
        }
        color += sum / num_samples as f32;
    }

    color
}

/// Inverse-square light from a single point `position` emitting `intensity`, zero when
/// shadowed or behind the surface.
pub fn point_lighting(
    inter: &Intersection<'_>,
    wo: glam::Vec3A,
    depth: u32,
    shapes: &[Shape],
    position: glam::Vec3A,
    intensity: Color,
) -> Color {
    let x = inter.position;
    let n = inter.normal;
    let to_light = position - x;
    let dist = to_light.length();
    if dist <= 0.0 {
        return Color::BLACK;
    }
    let wi = to_light / dist;
    let cos = n.dot(wi);
    if cos <= 0.0 || has_intersection(&Ray::shadow(x, wi, dist, depth), shapes) {
        return Color::BLACK;
    }
    intensity * inter.material.reflectance(n, wo, wi) * (cos / (dist * dist))
}

/// Follows one chain of mirror and refraction rays starting at `ray`. Every hit adds its
/// emission plus `local(ray, hit)`; a miss ends the chain with `background`.
pub fn shade_specular_chain<F>(
    ray: &Ray,
    shapes: &[Shape],
    background: Color,
    max_depth: u32,
    mut local: F,
) -> Color
where
    F: FnMut(&Ray, &Intersection<'_>) -> Color,
{
    let mut color = Color::BLACK;
    let mut ray = *ray;
    loop {
        let inter = match closest_intersection(&ray, shapes) {
            Some(inter) => inter,
            None => return color + background,
        };
        color += inter.material.emissive_radiance();
        color += local(&ray, &inter);
        match specular_ray(&ray, &inter, max_depth) {
            Some(next) => ray = next,
            None => return color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_incidence_passes_straight_through() {
        let n = glam::Vec3A::Z;
        match refract(n, glam::Vec3A::Z, 1.5) {
            Refraction::Transmitted(wt, n1) => {
                assert!(wt.abs_diff_eq(-glam::Vec3A::Z, 1e-6));
                assert_eq!(n1, n);
            }
            Refraction::TotalInternalReflection(..) => panic!("unexpected total internal reflection"),
        }
    }

    #[test]
    fn refraction_follows_snell() {
        let n = glam::Vec3A::Z;
        let wo = glam::Vec3A::new(0.5, 0.0, 0.75f32.sqrt());
        match refract(n, wo, 1.0 / 1.5) {
            Refraction::Transmitted(wt, _) => {
                let sin_i = 0.5;
                let sin_t = (wt.x * wt.x + wt.y * wt.y).sqrt();
                assert!((sin_i / 1.5 - sin_t).abs() < 1e-5);
                assert!(wt.z < 0.0);
                assert!(wt.x < 0.0);
            }
            Refraction::TotalInternalReflection(..) => panic!("unexpected total internal reflection"),
        }
    }

    #[test]
    fn grazing_exit_is_totally_reflected() {
        // leaving the dense side: wo is below the surface, eta becomes 1 / (1 / 1.5) = 1.5
        let n = glam::Vec3A::Z;
        let wo = glam::Vec3A::new(0.8, 0.0, -0.6);
        match refract(n, wo, 1.0 / 1.5) {
            Refraction::TotalInternalReflection(wr, n1) => {
                assert_eq!(n1, -n);
                assert!(wr.abs_diff_eq(glam::Vec3A::new(-0.8, 0.0, -0.6), 1e-5));
            }
            Refraction::Transmitted(..) => panic!("expected total internal reflection"),
        }
    }

    #[test]
    fn reflect_mirrors_about_normal() {
        let wr = reflect(glam::Vec3A::Y, glam::Vec3A::new(1.0, 1.0, 0.0).normalize());
        assert!(wr.abs_diff_eq(glam::Vec3A::new(-1.0, 1.0, 0.0).normalize(), 1e-6));
    }
}
