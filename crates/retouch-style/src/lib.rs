//! Selector resolution and style overrides for the Retouch page editor.
//!
//! This crate implements the styling half of the editor:
//!
//! - **Selector synthesis**: Derive a unique selector for a picked element
//! - **Selector parts**: Decompose selector text into editable steps
//! - **Override store**: Per-selector property overrides, including
//!   spacing groups, per-side borders and multi-layer shadows
//! - **Media contexts**: Tag overrides into viewport buckets
//! - **Variables**: CSS custom properties with live bindings
//! - **Generation**: Deterministic stylesheet text from override state
//!
//! # Example
//!
//! ```ignore
//! use retouch_style::prelude::*;
//!
//! let mut session = EditorSession::new();
//! let synthesis = session.pick_element(&element);
//!
//! session.set_property(&synthesis.selector, "margin-top", "12px");
//! session.set_media_context(&synthesis.selector, "margin-top", MediaContext::Tablet);
//!
//! let css = session.generate_css();
//! ```

pub mod generate;
pub mod media;
pub mod parser;
pub mod selector;
pub mod session;
pub mod store;
pub mod value;
pub mod variables;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::generate::generate_css;
    pub use crate::media::{Breakpoints, MediaContext, MediaContextIndex};
    pub use crate::parser::{discover_root_variables, validate_selector};
    pub use crate::selector::{
        parse_parts, rebuild, synthesize, Combinator, PositionFilter, PositionKind, Selector,
        SelectorStep, Synthesis,
    };
    pub use crate::session::{ChangeEvent, EditorSession, StyleSink};
    pub use crate::store::{
        BorderSide, ElementStyleSet, OverrideStore, ShadowList, ShadowRecord, SpacingGroup,
        SpacingState,
    };
    pub use crate::value::{Length, LengthUnit, Rgba};
    pub use crate::variables::{
        CssVariable, VariableBindingIndex, VariableOrigin, VariableRegistry,
    };
    pub use crate::{Error, Result};
}
