pub mod applications;
pub mod dismissals;
pub mod health;
pub mod offers;
pub mod postings;
pub mod users;
