//! Physics collaborator bridges
//!
//! - rapier_bridge: Rapier kinematic character controller + look ray (client)
//! - headless: stub без Rapier (headless binary, тесты)
//! - layers: collision groups

pub mod headless;
pub mod layers;
pub mod rapier_bridge;

pub use headless::{HeadlessFloor, HeadlessMotorPlugin};
pub use rapier_bridge::{character_collider, RapierBridgePlugin};
