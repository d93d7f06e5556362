//! Root for all SeaORM entity modules of the job marketplace.
//!
//! The original schema kept seeker and employer attributes in one wide
//! `users` table discriminated by `role`; here that polymorphism is modeled
//! as a common identity row plus one of two role-specific payload tables.
//! Status columns are typed enums rather than free text, so the storage
//! layer can only ever see the enumerated values.

pub mod application;
pub mod congratulation_dismissal;
pub mod employer_profile;
pub mod job_offer;
pub mod job_posting;
pub mod seeker_profile;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::application::Entity as Application;
    pub use super::congratulation_dismissal::Entity as CongratulationDismissal;
    pub use super::employer_profile::Entity as EmployerProfile;
    pub use super::job_offer::Entity as JobOffer;
    pub use super::job_posting::Entity as JobPosting;
    pub use super::seeker_profile::Entity as SeekerProfile;
    pub use super::user::Entity as User;
}
