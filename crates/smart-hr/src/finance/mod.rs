//! Finance rules behind the loans, payroll, accounting and cashier screens.

pub mod accounting;
pub mod cashier;
pub mod loans;
pub mod payroll;
