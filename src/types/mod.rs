pub mod daily_summary;
pub mod frequency;
pub mod observation;
pub mod station;
pub mod table;
pub mod traits;
