//! HTTP API of the reflector.
//!
//! | Route | Behavior |
//! |-------|----------|
//! | `* /capabilities[?quiet=true]` | describe the endpoints |
//! | `POST /reflect` | reflect the response in the body, once |
//! | `POST /configure_reflection` | bind a response to endpoints |
//! | `PUT /reset` | discard all bound endpoints |
//! | anything else | reflect the bound response, or an empty 200 |

pub mod handlers;
mod router;
mod server;
pub mod types;

pub use router::route_request;
pub use server::ReflectorServer;
pub use types::AppState;
