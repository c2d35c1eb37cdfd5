//! Template rendering for spec frontmatter and bodies.
//!
//! The template language is deliberately small:
//!
//! - `{{ name }}` substitutes a variable (whitespace inside the braces is
//!   insignificant)
//! - `{{#name}}...{{/name}}` keeps its content when `name` is truthy and drops
//!   it otherwise
//!
//! Rendering is a pure function of template text and [`RenderContext`]. In
//! strict mode an absent variable is an error; in lenient mode the marker is
//! left verbatim so a later pass can resolve it.
//!
//! # Examples
//!
//! ```rust
//! use skillforge::templating::{RenderContext, RenderOptions, render};
//!
//! let mut ctx = RenderContext::new();
//! ctx.set_flag("isClaude", true);
//!
//! let out = render("{{#isClaude}}X{{/isClaude}}", &ctx, RenderOptions::strict())?;
//! assert_eq!(out, "X");
//!
//! let partial = render("{{ later }}", &ctx, RenderOptions::lenient())?;
//! assert_eq!(partial, "{{ later }}");
//! # Ok::<(), skillforge::templating::TemplateError>(())
//! ```

pub mod context;
pub mod error;
pub mod renderer;


pub use context::RenderContext;
pub use error::{ConditionalFault, TemplateError};
pub use renderer::{RenderOptions, render, stringify};
