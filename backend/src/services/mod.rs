//! Business logic services
//!
//! Services encapsulate business rules and coordinate between
//! repositories and the auth layer.

pub mod event;
pub mod feedback;
pub mod registration;
pub mod sample;
pub mod user;

pub use event::EventService;
pub use feedback::FeedbackService;
pub use registration::RegistrationService;
pub use sample::SampleDataService;
pub use user::UserService;
