pub mod check_link;
pub mod health;
