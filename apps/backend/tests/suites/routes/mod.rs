mod error_shape;
mod games;
mod health;
mod high_scores;
