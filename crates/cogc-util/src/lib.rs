//! cogc-util - shared primitives for the cog compiler.
//!
//! Every other crate in the workspace depends on this one for source
//! positions, accumulating diagnostics, identifier interning, and the
//! content-hash used to key AST nodes. Nothing here is cog-specific;
//! it is the same kind of foundation layer a front end for any small
//! language needs.

pub mod cancel;
pub mod diagnostic;
pub mod hash;
pub mod span;
pub mod symbol;

pub use cancel::CancelToken;
pub use diagnostic::{Bag, Diagnostic};
pub use hash::content_hash;
pub use span::Position;
pub use symbol::{Interner, Symbol};
