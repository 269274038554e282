use log::debug;
use uuid::Uuid;

use super::drawable::DEFAULT_IMAGE_SCALE;
use super::surface::{CanvasEvent, CanvasSurface};

/// Angle added per rotate-button click.
pub const ROTATE_STEP: f32 = 90.0;

/// Click rotation snaps to this increment for fine control.
pub const FINE_SNAP_INCREMENT: f32 = 15.0;

/// During interactive drag-rotation, snapping engages within this many
/// degrees of a cardinal angle.
pub const DRAG_SNAP_THRESHOLD: f32 = 10.0;

const CARDINAL_ANGLES: [f32; 4] = [0.0, 90.0, 180.0, 270.0];

/// Normalize an angle into `[0, 360)`.
pub fn normalize_angle(angle: f32) -> f32 {
    ((angle % 360.0) + 360.0) % 360.0
}

/// Snap an angle to the nearest multiple of `increment`, wrapped into
/// `[0, 360)` (angles just below 360 snap back to 0).
pub fn snap_angle(angle: f32, increment: f32) -> f32 {
    let normalized = normalize_angle(angle);
    normalize_angle((normalized / increment).round() * increment)
}

/// Snap target for interactive drag-rotation: the nearest cardinal angle
/// when within [`DRAG_SNAP_THRESHOLD`], else `None` (keep the free angle).
pub fn drag_snap_target(angle: f32) -> Option<f32> {
    let normalized = normalize_angle(angle);
    let mut closest = None;
    let mut min_distance = f32::INFINITY;

    for snap in CARDINAL_ANGLES {
        let distance = (normalized - snap)
            .abs()
            .min((normalized - snap + 360.0).abs())
            .min((normalized - snap - 360.0).abs());
        if distance < min_distance {
            min_distance = distance;
            closest = Some(snap);
        }
    }

    closest.filter(|_| min_distance <= DRAG_SNAP_THRESHOLD)
}

/// Rotate-button click: advance an image by 90°, snapped to the nearest 15°.
/// Rotation is only permitted on image objects.
pub fn rotate_click(canvas: &mut dyn CanvasSurface, id: Uuid) {
    let Some(image) = canvas.object_mut(id).and_then(|obj| obj.as_image_mut()) else {
        debug!("rotate ignored: {id} is not an image");
        return;
    };

    let next = normalize_angle(image.angle + ROTATE_STEP);
    image.angle = snap_angle(next, FINE_SNAP_INCREMENT);
    canvas.render_all();
    canvas.fire(CanvasEvent::ObjectModified { id });
}

/// Advance an image by `increment` degrees, snapped to that increment.
pub fn precise_rotate(canvas: &mut dyn CanvasSurface, id: Uuid, increment: f32) {
    let Some(image) = canvas.object_mut(id).and_then(|obj| obj.as_image_mut()) else {
        debug!("precise rotate ignored: {id} is not an image");
        return;
    };

    let next = normalize_angle(image.angle + increment);
    image.angle = snap_angle(next, increment);
    canvas.render_all();
    canvas.fire(CanvasEvent::ObjectModified { id });
}

/// Interactive drag-rotation update: snaps the in-flight angle to a cardinal
/// when close enough, otherwise leaves it free.
pub fn apply_drag_rotation(canvas: &mut dyn CanvasSurface, id: Uuid, angle: f32) {
    let Some(image) = canvas.object_mut(id).and_then(|obj| obj.as_image_mut()) else {
        return;
    };

    image.angle = drag_snap_target(angle).unwrap_or_else(|| normalize_angle(angle));
    canvas.render_all();
}

/// Reset an image's transform: angle back to 0°, scale back to the default
/// placement scale, regardless of the current transform.
pub fn reset_transform(canvas: &mut dyn CanvasSurface, id: Uuid) {
    let Some(image) = canvas.object_mut(id).and_then(|obj| obj.as_image_mut()) else {
        debug!("reset ignored: {id} is not an image");
        return;
    };

    image.angle = 0.0;
    image.scale_x = DEFAULT_IMAGE_SCALE;
    image.scale_y = DEFAULT_IMAGE_SCALE;
    canvas.render_all();
    canvas.fire(CanvasEvent::ObjectModified { id });
}
