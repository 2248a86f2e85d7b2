pub mod catalog;
pub mod diversity;
pub mod explanation;
pub mod match_score;
pub mod persona_score;
pub mod ranking;
pub mod recommendations;
pub mod tone;
