pub mod progress;
pub mod prompts;
pub mod summary;

pub use progress::Progress;
pub use prompts::approval_prompt;
