mod agency;
mod expense;
mod monthly;
mod user;
mod vehicle;

pub use agency::{Agency, AgencySelection, KnownAgency, ALL_AGENCIES};
pub use expense::{ExpenseCategory, ExpenseStatus, ExpenseTransaction};
pub use monthly::MonthlyRecord;
pub use user::{Role, UserProfile};
pub use vehicle::{Vehicle, VehicleCategory, VehicleStatus};
