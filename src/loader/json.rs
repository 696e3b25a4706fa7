use std::{
    convert::TryInto,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    camera,
    core::{loader::InputParams, scene::Scene, scene_resources::SceneResources},
    light, material,
    renderer::{OutputConfig, RenderConfig},
    shader::{self, Shader},
    shape,
};

/// Everything a scene file describes.
pub struct SceneDescription {
    pub scene: Scene,
    pub shader: Shader,
    pub render_config: RenderConfig,
    pub output: OutputConfig,
}

pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<SceneDescription> {
    let path = path.as_ref().to_path_buf();
    let json_file = std::fs::File::open(&path)
        .context(format!("Scene file '{}' not found", path.display()))?;
    let json_reader = std::io::BufReader::new(json_file);
    let json_value: serde_json::Value = serde_json::from_reader(json_reader)
        .context(format!("Scene file '{}' is not valid json", path.display()))?;

    load_from_value(&json_value, &path)
}

/// `path` resolves external json files referenced by string fields.
pub fn load_from_value(json_value: &serde_json::Value, path: &PathBuf) -> anyhow::Result<SceneDescription> {
    let output = load_output(json_value.get("output"))?;
    let render_config = load_render_config(json_value.get("renderer"))?;

    let shader_value = json_value
        .get("shader")
        .context("scene - There is no 'shader' field")?;
    let mut shader_params: InputParams = shader_value
        .try_into()
        .context("scene - 'shader' should be an object")?;
    let shader = shader::create_shader_from_params(&mut shader_params)?;

    let scene = load_scene(json_value, path)?;

    Ok(SceneDescription {
        scene,
        shader,
        render_config,
        output,
    })
}

fn load_scene(json_value: &serde_json::Value, path: &PathBuf) -> anyhow::Result<Scene> {
    let mut rsc = SceneResources::default();

    let camera_value = json_value
        .get("camera")
        .context("scene - There is no 'camera' field")?;
    load_from_value_or_external(
        &mut rsc,
        path,
        camera_value,
        "json-camera",
        &camera::create_camera_from_params,
        false,
    )?;

    let material_value = json_value
        .get("materials")
        .context("scene - There is no 'materials' field")?;
    load_from_value_or_external(
        &mut rsc,
        path,
        material_value,
        "json-materials",
        &material::create_material_from_params,
        true,
    )?;

    let shape_value = json_value
        .get("shapes")
        .context("scene - There is no 'shapes' field")?;
    load_from_value_or_external(
        &mut rsc,
        path,
        shape_value,
        "json-shapes",
        &shape::create_shape_from_params,
        true,
    )?;

    if let Some(light_value) = json_value.get("lights") {
        load_from_value_or_external(
            &mut rsc,
            path,
            light_value,
            "json-lights",
            &light::create_light_from_params,
            true,
        )?;
    }

    rsc.to_scene()
}

fn load_output(value: Option<&serde_json::Value>) -> anyhow::Result<OutputConfig> {
    let value = value.context("scene - There is no 'output' field")?;
    let mut params: InputParams = value.try_into()?;
    params.set_name("output".into());

    let filename = params.get_str_or("filename", "output.png")?;
    let width = params.get_count_or("width", 512)?;
    let height = params.get_count_or("height", 512)?;
    if width == 0 || height == 0 {
        anyhow::bail!("output - 'width' and 'height' should be positive");
    }
    params.check_unused_keys();

    Ok(OutputConfig {
        filename,
        width,
        height,
    })
}

fn load_render_config(value: Option<&serde_json::Value>) -> anyhow::Result<RenderConfig> {
    let mut config = RenderConfig::default();
    if let Some(value) = value {
        let mut params: InputParams = value.try_into()?;
        params.set_name("renderer".into());
        config.spp = params.get_count_or("spp", config.spp)?.max(1);
        config.seed = params.get_count_or("seed", 0)? as u64;
        config.threads = params.get_count_or("threads", config.threads)?;
        params.check_unused_keys();
    }
    Ok(config)
}

fn load_from_object<F: Fn(&mut SceneResources, &mut InputParams) -> anyhow::Result<()>>(
    rsc: &mut SceneResources,
    value: &serde_json::Value,
    load_func: &F,
) -> anyhow::Result<()> {
    let mut params: InputParams = value.try_into()?;
    load_func(rsc, &mut params)
}

/// A field is either the object(s) themselves or the name of a json file next to the scene
/// file holding them.
fn load_from_value_or_external<
    F: Fn(&mut SceneResources, &mut InputParams) -> anyhow::Result<()>,
>(
    rsc: &mut SceneResources,
    path: &PathBuf,
    value: &serde_json::Value,
    env: &str,
    load_func: &F,
    allow_array: bool,
) -> anyhow::Result<()> {
    if let Some(json_path) = value.as_str() {
        let json_file = std::fs::File::open(path.with_file_name(json_path))
            .context(format!("{} - External json file not found", env))?;
        let json_reader = std::io::BufReader::new(json_file);
        let json_value: serde_json::Value = serde_json::from_reader(json_reader)?;
        load_from_value_or_external(rsc, path, &json_value, env, load_func, allow_array)?;
    } else if let Some(array) = value.as_array() {
        if allow_array {
            for ele in array {
                load_from_object(rsc, ele, load_func)?;
            }
        } else {
            anyhow::bail!(format!("{} - Field should not be an array", env));
        }
    } else {
        load_from_object(rsc, value, load_func)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::color::Color, light::LightT, shader::ShaderT};

    fn cornell_like() -> serde_json::Value {
        serde_json::json!({
            "output": { "filename": "out.exr", "width": 32, "height": 24 },
            "renderer": { "spp": 4, "seed": 7 },
            "shader": { "type": "nee_dof", "max_depth": 3, "focal_length": 4.0, "sensor_width": 0.1 },
            "camera": { "eye": [0, -4, 1], "forward": [0, 1, 0], "up": [0, 0, 1], "fov": 50 },
            "materials": [
                { "name": "white", "type": "phong", "diffuse": [0.7, 0.7, 0.7], "specular": [0.4, 0.4, 0.4], "shininess": 20 },
                { "name": "lamp", "type": "emissive", "radiance": [5, 5, 5] },
                { "name": "chrome", "type": "mirror" },
                { "name": "glass", "type": "transmissive", "ior": 0.67 }
            ],
            "shapes": [
                { "type": "plane", "point": [0, 0, 0], "normal": [0, 0, 1], "material": "white" },
                { "type": "sphere", "center": [-0.6, 0, 0.5], "radius": 0.5, "material": "chrome" },
                { "type": "sphere", "center": [0.6, 0, 0.5], "radius": 0.5, "material": "glass" },
                { "type": "square", "corner": [-0.5, -0.5, 2], "edge1": [1, 0, 0], "edge2": [0, 1, 0],
                  "normal": [0, 0, -1], "material": "lamp" }
            ],
            "lights": [
                { "type": "point", "position": [0, -2, 2], "intensity": [1, 1, 1] }
            ]
        })
    }

    #[test]
    fn loads_complete_description() {
        let desc = load_from_value(&cornell_like(), &PathBuf::from("scene.json")).unwrap();
        assert_eq!(desc.output.filename, "out.exr");
        assert_eq!((desc.output.width, desc.output.height), (32, 24));
        assert_eq!(desc.render_config.spp, 4);
        assert_eq!(desc.render_config.seed, 7);
        assert_eq!(desc.scene.shapes().len(), 4);

        // the emissive square is registered next to the point light
        let lights = desc.scene.lights();
        assert_eq!(lights.len(), 2);
        assert_eq!(lights.iter().filter(|l| l.is_delta()).count(), 1);
        let area = lights.iter().find(|l| !l.is_delta()).unwrap();
        assert!((area.area() - 1.0).abs() < 1e-6);
        assert_eq!(area.intensity(), Color::gray(5.0));
    }

    #[test]
    fn loaded_shader_renders_finite_colors() {
        let desc = load_from_value(&cornell_like(), &PathBuf::from("scene.json")).unwrap();
        let mut rng = crate::core::rng::Rng::with_seed(1);
        for k in 0..16 {
            let x = (k as f32 / 15.0 - 0.5) * 0.6;
            let ray = crate::camera::CameraT::generate_ray(desc.scene.camera(), (x, -0.2));
            let color = desc
                .shader
                .compute_color(&ray, desc.scene.shapes(), desc.scene.lights(), &mut rng);
            assert!(color.is_finite(), "{:?}", color);
        }
    }

    #[test]
    fn unknown_material_reference_fails() {
        let mut value = cornell_like();
        value["shapes"][0]["material"] = serde_json::json!("missing");
        let err = load_from_value(&value, &PathBuf::from("scene.json"))
            .err()
            .unwrap();
        assert!(format!("{}", err).contains("missing"));
    }

    #[test]
    fn duplicated_material_name_fails() {
        let mut value = cornell_like();
        value["materials"][1]["name"] = serde_json::json!("white");
        assert!(load_from_value(&value, &PathBuf::from("scene.json")).is_err());
    }

    #[test]
    fn renderer_section_is_optional() {
        let mut value = cornell_like();
        value.as_object_mut().unwrap().remove("renderer");
        let desc = load_from_value(&value, &PathBuf::from("scene.json")).unwrap();
        assert_eq!(desc.render_config.spp, 1);
        assert_eq!(desc.render_config.threads, 0);
    }
}
