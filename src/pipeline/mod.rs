//! Pipeline stages for document generation and archival.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets us swap an
//! implementation (e.g. a different toolchain) without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! request ──▶ template ──▶ validate ──▶ compile ──▶ persist
//! (cleaned     (escape +    (lexical     (pdflatex   (slug, put,
//!  text)        assemble)    scan)        + timeout)  verify)
//! ```
//!
//! 1. [`escape`]   — LaTeX escaping, URL escaping, decimal-comma repair
//! 2. [`language`] — static locale bundle table with an English default
//! 3. [`template`] — pure assembly of the complete LaTeX document
//! 4. [`validate`] — heuristic scan of the rendered body section; rejects
//!    malformed content before the expensive external compile
//! 5. [`compile`]  — subprocess invocation in an owned temp directory under
//!    a wall-clock timeout; the only stage that leaves the process
//! 6. [`persist`]  — store write plus post-write verification

pub mod compile;
pub mod escape;
pub mod language;
pub mod persist;
pub mod template;
pub mod validate;
