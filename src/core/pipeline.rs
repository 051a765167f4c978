use crate::scene::face::{Face, Face2D};

/// The viewing stage of the pipeline: decides which faces are worth drawing
/// and flattens them onto the projection plane.
///
/// [`Camera`](crate::scene::camera::Camera) is the production implementation; the
/// scene only depends on this trait, so tests can drive it with a scripted viewer.
pub trait Projector {
    /// Cheap visibility test. `false` means the face is dropped from the render list.
    fn is_face_in_front(&self, face: &Face) -> bool;

    /// Projects a visible face, attaching its depth and color.
    fn project_face(&self, face: &Face) -> Face2D;
}
