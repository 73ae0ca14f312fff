//! Remote resolver backed by a generative-language API

mod error;
mod extract;
mod prompt;
mod resolver;
mod transport;

pub use error::ParseError;
pub use extract::{decode, strip_fences};
pub use prompt::{build_request_body, INSTRUCTION};
pub use resolver::RemoteResolver;
pub use transport::{classify_failure, extract_text, HttpTransport, Transport};
