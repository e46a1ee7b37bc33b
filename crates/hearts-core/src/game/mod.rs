pub mod match_state;
pub mod moves;
pub mod phase;
pub mod view;
