//! Standard decorators.

mod cancellation;
mod logging;
mod retry;
mod timeout;
mod validation;

pub use cancellation::CancellationDecorator;
pub use logging::LoggingDecorator;
pub use retry::RetryDecorator;
pub use timeout::TimeoutDecorator;
pub use validation::{Validate, ValidationDecorator};
