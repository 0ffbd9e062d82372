//! Input domain — snapshot намерений персонажа + драйверы
//!
//! - ControllerInput: snapshot (move, look, jump, sprint)
//! - device: клавиатура/мышь → ControllerInput (клиент)
//! - scripted: ScriptedInput, RandomWander (headless)

pub mod components;
pub mod device;
pub mod scripted;

pub use components::ControllerInput;
pub use device::{gather_device_input, DeviceInputPlugin, InputBindings};
pub use scripted::{
    drive_random_wander, drive_scripted_input, RandomWander, ScriptedFrame, ScriptedInput,
    ScriptedInputPlugin,
};
