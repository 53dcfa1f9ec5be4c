pub mod animator;
pub mod camera_path;
pub mod interpolation;

// Re-export commonly used types and functions for convenience
pub use animator::{
    AnimationHandle, AnimationReport, AnimationState, AnimatorOptions, AnimatorStatus,
    FrameOutcome, FrameSample, PathAnimator,
};
pub use camera_path::{compute_camera_position, correct_camera_position, CameraPosition, Smoothing};
pub use interpolation::{Interpolatable, Interpolation};
