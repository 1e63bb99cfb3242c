pub mod flashcard;
pub mod message;
pub mod review;
pub mod user;

pub use flashcard::{parse, Flashcard};
pub use message::{ChatMessage, StudyMode};
pub use review::{CardView, MasteryReport, ReviewError, ReviewSession};
pub use user::User;
