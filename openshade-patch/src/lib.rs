//! Literal substring patch primitives for shader sources.
//!
//! Every operation here searches for exact text, never patterns. A
//! primitive either returns the fully patched buffer or `None` when a
//! search or anchor string is absent; callers that receive `None` keep
//! their input byte for byte.

mod ops;
mod run;

pub use ops::{
    add_after, add_before, comment_out, comment_out_range, replace_all, replace_first,
    replace_second,
};
pub use run::PatchRun;
