//! quarry-client: Search UI client.
//!
//! A [`SearchSession`] turns a query into one `POST /search` round trip and
//! renders the answer into an [`OutputContainer`] according to a
//! [`RenderPolicy`]. Every submission takes a [`Ticket`]; answers that arrive
//! after a newer submission was issued are dropped, so the container always
//! shows the most recent query.

mod error;
pub mod render;
pub mod session;
pub mod transport;

pub use error::ClientError;
pub use render::{render, OutputContainer, RankedRow, RenderPolicy, Row};
pub use session::{Outcome, SearchSession, Ticket};
pub use transport::{SearchClient, SearchTransport};
