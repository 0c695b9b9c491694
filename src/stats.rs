pub mod bounds;
pub mod rank;
pub mod trajectory;
