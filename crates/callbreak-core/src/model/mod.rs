pub mod player;
pub mod roster;
pub mod round;
pub mod score;
