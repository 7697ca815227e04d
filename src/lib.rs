//! SMPP 3.4 ESME client library.
//!
//! Three subsystems compose: [`codec`] (PDU encode/decode plus the vendor
//! TLV [`schema`] registry), [`sms`] (GSM 03.38 / UCS-2 text encoding and
//! multipart splitting), and [`session`] (the TCP session engine that ties
//! the two together). See `SPEC_FULL.md` for the full design.
//!
//! ```rust,no_run
//! use smpp_esme::session::SessionBuilder;
//! use smpp_esme::datatypes::BindCredentials;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = SessionBuilder::new("smsc.example.test", 2775).connect().await?;
//! session.bind_transceiver(&BindCredentials::new("system_id", "password")).await?;
//! let seq = session.submit_sm_text("1000", "2000", "hello there").await?;
//! session.unbind().await?;
//! session.disconnect().await?;
//! # let _ = seq;
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod codec;
pub mod connection;
pub mod datatypes;
pub mod schema;
pub mod sequence;
pub mod session;
pub mod sms;

pub use codec::{CodecError, Decodable, Encodable, Frame, PduHeader, PduRegistry};
pub use datatypes::{CommandId, CommandStatus};
pub use session::{SessionBuilder, SessionError, SmppSession};

/// A specialized `Result` type for top-level session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
