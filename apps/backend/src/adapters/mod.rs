//! SeaORM adapters. Free functions generic over `ConnectionTrait`, returning `DbErr`;
//! the repos layer maps errors to `DomainError`.

pub mod frames_sea;
pub mod games_sea;
pub mod high_scores_sea;
