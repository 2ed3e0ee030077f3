//! Fetch subsystem: the request/response model and the dispatch engine.
//!
//! # Data Flow
//! ```text
//! Request
//!     → dispatcher.rs (gate, data: URLs, match predicate)
//!     → redirect.rs   (dispatch through the transport, follow 3xx)
//!     → dispatcher.rs (translate headers, decode body)
//!     → Response
//! ```
//!
//! # Design Decisions
//! - Requests are immutable once built; every hop replays the same one
//! - Redirect failures are a response value, not an error
//! - Input errors are raised before anything is dispatched

pub mod data_uri;
pub mod dispatcher;
pub mod gate;
pub mod origin;
pub mod redirect;
pub mod request;
pub mod response;

pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use origin::same_origin;
pub use redirect::{NetworkErrorReason, RedirectOutcome, RedirectResolver, REDIRECT_STATUSES};
pub use request::{RedirectMode, Request, RequestBuilder};
pub use response::{Response, ResponseType};
