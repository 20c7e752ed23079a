//! Host serial protocol.
//!
//! | Module    | Direction | Concern                                   |
//! |-----------|-----------|-------------------------------------------|
//! | `line`    | inbound   | bounded newline-delimited line assembly   |
//! | `numeric` | inbound   | lenient float arguments                   |
//! | `record`  | outbound  | JSON records and plain-text lines         |

pub mod line;
pub mod numeric;
pub mod record;

pub use line::{Line, LineBuffer, LineDecoder, MAX_LINE_LEN};
pub use record::Record;
