/// Open Packaging Conventions (OPC) pieces needed to address WordprocessingML
/// parts: partnames, content types and arena-backed XML parts.
///
/// Reading and writing the Zip container itself is left to the host; parts
/// enter and leave this crate as raw XML bytes.

pub mod constants;
pub mod packuri;
pub mod part;

pub use packuri::PackURI;
pub use part::{Part, XmlPart};
