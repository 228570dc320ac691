mod day;
mod habit;
mod habit_list;

pub use day::Day;
pub use habit::{Habit, HabitGroup};
pub use habit_list::HabitList;
