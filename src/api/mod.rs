pub mod balance;
pub mod leave;
pub mod leave_type;
