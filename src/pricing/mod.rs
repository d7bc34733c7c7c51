//! Shift pricing logic.
//!
//! This module contains the pricing rules applied to one shift and one
//! resolved rate: casual loading, day-type penalty selection, time-of-day
//! loadings, tiered daily overtime, and the orchestrating engine that
//! assembles a pay breakdown from them.

mod casual_loading;
mod day_type;
mod engine;
mod overtime;
mod time_of_day;

pub use casual_loading::{CasualLoadingResult, apply_casual_loading};
pub use day_type::{DayType, day_type, day_type_multiplier};
pub use engine::price_shift;
pub use overtime::{OvertimeSplit, split_overtime};
pub use time_of_day::{LoadingKind, TimeOfDayResult, time_of_day_multiplier};
