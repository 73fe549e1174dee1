/// Lower zoom bound. At this scale the image is fully visible and panning is disabled.
pub const MIN_SCALE: f32 = 1.0;

/// Upper zoom bound.
pub const MAX_SCALE: f32 = 8.0;

/// Scale increment for discrete zoom input (buttons and wheel notches).
pub const ZOOM_STEP: f32 = 0.5;

/// Rotation increment in degrees.
pub const ROTATION_STEP: i32 = 90;

/// Full turn in degrees, used to wrap rotation into `[0, 360)`.
pub const FULL_ROTATION: i32 = 360;

/// Smallest crop width or height (display pixels) a mutation may produce.
pub const MIN_CROP_SIZE: f32 = 20.0;

/// Fraction of the limiting fitted-image dimension covered by the default crop.
pub const DEFAULT_CROP_FRACTION: f32 = 0.8;

/// Tolerance for float comparisons of scale and aspect values.
pub const EPSILON: f32 = 1e-4;

/// Pinch sessions whose initial finger distance is below this are ignored
/// (the ratio against it would be unstable).
pub const MIN_PINCH_DISTANCE: f32 = 1.0;

/// Default hit radius (display pixels) around crop handles.
pub const HANDLE_HIT_TOLERANCE: f32 = 12.0;
