pub mod landmark_approximator;
pub mod lm_data;
pub mod lm_preparation;
