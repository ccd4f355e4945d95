pub mod clearance;
pub mod export;
pub mod me;
pub mod requirements;
pub mod signature;
pub mod students;
