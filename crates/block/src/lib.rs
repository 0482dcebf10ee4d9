//! The block aggregate of the Lumen block core.
//!
//! A [`Block`] binds one [`Header`] to one [`Body`]. Its canonical encoding is
//! the header encoding followed by the body encoding, and its identity is the
//! hash of the header encoding alone. The body enters the identity only through
//! [`Header::body_hash`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub use block::Block;
pub use body::Body;
pub use error::{BlockDecodeError, HashError, TooManyTransactions};
pub use header::Header;
pub use target::Target;

pub mod block;
mod body;
mod error;
mod header;
pub mod target;
