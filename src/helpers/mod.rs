//! Helper functions for page rendering
//!
//! URL generation, HTML escaping and date formatting shared by the
//! templates, the markdown renderer and the CLI.

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
