pub mod admission;
pub mod dtos;
pub mod reaper;
pub mod use_cases;
