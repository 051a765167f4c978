use crate::core::pipeline::Projector;
use crate::scene::camera::Camera;
use crate::scene::face::Face2D;
use crate::scene::mesh::Mesh;

/// The active camera plus every mesh to draw.
///
/// Generic over the [`Projector`] so the render-list assembly can be exercised
/// without a real camera.
#[derive(Debug, Clone)]
pub struct Scene<P: Projector = Camera> {
    camera: P,
    meshes: Vec<Mesh>,
}

impl<P: Projector> Scene<P> {
    pub fn new(camera: P, meshes: Vec<Mesh>) -> Self {
        Self { camera, meshes }
    }

    pub fn camera(&self) -> &P {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut P {
        &mut self.camera
    }

    pub fn set_camera(&mut self, camera: P) {
        self.camera = camera;
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn meshes_mut(&mut self) -> &mut [Mesh] {
        &mut self.meshes
    }

    pub fn set_meshes(&mut self, meshes: Vec<Mesh>) {
        self.meshes = meshes;
    }

    pub fn add(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    /// Total number of faces across all meshes.
    pub fn face_count(&self) -> usize {
        self.meshes.iter().map(Mesh::len).sum()
    }

    /// Builds the flat render list: every face the camera can see, projected,
    /// in mesh/face order. Faces behind the camera are skipped.
    pub fn make_render(&self) -> Vec<Face2D> {
        self.meshes
            .iter()
            .flat_map(|mesh| mesh.faces())
            .filter(|face| self.camera.is_face_in_front(face))
            .map(|face| self.camera.project_face(face))
            .collect()
    }
}
