//! Rolling kinematics: poses, roll targets, and replaying face crossings
//! as rolls.

pub mod pose;
pub mod replay;
pub mod targets;

pub use pose::{
    ease_out_quad, interpolate_roll, orientation_label_for_pose, orientation_twist, resting_face,
    Pose, RollAnimation,
};
pub use replay::{ReplayRolls, RollStep};
pub use targets::{RollTarget, RollTargets};
