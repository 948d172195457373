mod auth_workflow;
mod error;
mod outcomes;

pub use auth_workflow::AuthWorkflow;
pub use error::{Result, WorkflowError};
pub use outcomes::{LoginOutcome, OAuthCallbackInput, OAuthOutcome, Profile};
