// src/lib.rs
//! Group-based content access gate.
//!
//! [`decide`] maps a content item's [`RestrictionSet`] and a viewer's
//! [`MembershipSet`] to a [`Verdict`]. [`ContentGate`] applies that decision
//! to rendering, reading restrictions from a [`RestrictionStore`] and
//! memberships from a [`MembershipProvider`], and offers the editor
//! operations that list and save restrictions.
pub use config::GateConfig;
pub use directory::GroupDirectory;
pub use engine::{ContentGate, decide};
pub use error::GateError;
pub use store::{MemoryRestrictionStore, resolve_restriction};
pub use traits::{MembershipProvider, RestrictionStore};
pub use types::{
    ANY_GROUP_TOKEN, Authenticity, ContentId, GroupId, GroupSummary, MembershipSet,
    RenderContext, RestrictionChoice, RestrictionEntry, RestrictionSet, SaveOutcome, Verdict,
    ViewerId,
};

mod config;
mod directory;
mod editor;
mod engine;
mod error;
pub mod metrics;
mod store;
mod timers;
mod traits;
pub mod types;
