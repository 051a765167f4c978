use crate::error::Result;
use crate::io::config::Config;
use crate::io::mesh_loader::load_meshes;
use crate::pipeline::canvas::Canvas;
use crate::scene::Scene;
use crate::scene::camera::Camera;
use log::{debug, info};
use rand::Rng;
use std::path::PathBuf;
use std::time::Instant;

/// What a finished render produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub meshes: usize,
    pub faces: usize,
    /// Faces left after dropping those behind the camera.
    pub visible_faces: usize,
    /// Faces that covered at least part of the canvas.
    pub drawn_faces: usize,
    pub width: usize,
    pub height: usize,
    pub output: PathBuf,
}

/// Loads the meshes, jitters their colors and places the camera.
pub fn build_scene<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Result<Scene> {
    let mesh_path = config.resolve_mesh_path();
    let mut meshes = load_meshes(&mesh_path)?;

    let variance = config.scene.variance;
    for mesh in meshes.iter_mut().filter(|m| !m.is_empty()) {
        mesh.set_color_variance_with(rng, mesh.base_color(), variance)?;
    }
    debug!("Applied color variance {variance} to {} meshes", meshes.len());

    let camera = Camera::new(config.origin(), config.look_at())?;
    debug!(
        "Camera at {} looking at {}, forward {}",
        camera.origin(),
        camera.look_at(),
        camera.forward()
    );

    Ok(Scene::new(camera, meshes))
}

/// Renders the configured scene to its output image.
pub fn run<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Result<RenderSummary> {
    config.validate()?;
    info!("Starting render...");
    let start_time = Instant::now();

    let scene = build_scene(config, rng)?;
    info!(
        "Scene ready: {} meshes, {} faces",
        scene.meshes().len(),
        scene.face_count()
    );

    let render_list = scene.make_render();
    debug!(
        "{} of {} faces in front of the camera",
        render_list.len(),
        scene.face_count()
    );

    let mut canvas = Canvas::new(
        config.aspect_ratio()?,
        config.render.resolution,
        config.background()?,
    );
    let drawn = canvas.draw(&render_list);
    info!(
        "Render completed in {:.2?} ({} faces drawn on {}x{})",
        start_time.elapsed(),
        drawn,
        canvas.width(),
        canvas.height()
    );

    canvas.save(&config.render.output)?;

    Ok(RenderSummary {
        meshes: scene.meshes().len(),
        faces: scene.face_count(),
        visible_faces: render_list.len(),
        drawn_faces: drawn,
        width: canvas.width(),
        height: canvas.height(),
        output: config.render.output.clone(),
    })
}
