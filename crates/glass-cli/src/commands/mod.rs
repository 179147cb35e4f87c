pub mod check;
pub mod layout;
pub mod run;
