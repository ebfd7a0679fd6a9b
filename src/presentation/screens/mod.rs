pub mod mode_selection;
pub mod placeholder;
pub mod rover_control;
