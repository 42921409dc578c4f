use crate::constants::{CAMERA_FOVY_DEG, CAMERA_ZFAR, CAMERA_ZNEAR};
use glam::{Mat4, Vec3, Vec4};
use web_sys as web;

/// The viewer sits on +Z looking at the origin; only the distance varies
/// (wheel zoom).
#[inline]
pub fn eye(camera_z: f32) -> Vec3 {
    Vec3::new(0.0, 0.0, camera_z)
}

#[inline]
pub fn view_matrix(camera_z: f32) -> Mat4 {
    Mat4::look_at_rh(eye(camera_z), Vec3::ZERO, Vec3::Y)
}

#[inline]
pub fn projection_matrix(aspect: f32) -> Mat4 {
    Mat4::perspective_rh(
        CAMERA_FOVY_DEG.to_radians(),
        aspect,
        CAMERA_ZNEAR,
        CAMERA_ZFAR,
    )
}

/// Compute a world-space ray from canvas backing-store pixel coordinates.
///
/// Returns `(ray_origin, ray_direction)`; the direction is normalized.
pub fn screen_to_world_ray(
    canvas: &web::HtmlCanvasElement,
    sx: f32,
    sy: f32,
    camera_z: f32,
) -> (Vec3, Vec3) {
    let width = canvas.width() as f32;
    let height = canvas.height() as f32;
    let ndc_x = (2.0 * sx / width.max(1.0)) - 1.0;
    let ndc_y = 1.0 - (2.0 * sy / height.max(1.0));
    let aspect = width / height.max(1.0);
    let inv = (projection_matrix(aspect) * view_matrix(camera_z)).inverse();
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let p1: Vec3 = p_far.truncate() / p_far.w;
    let ro = eye(camera_z);
    let rd = (p1 - ro).normalize();
    (ro, rd)
}
