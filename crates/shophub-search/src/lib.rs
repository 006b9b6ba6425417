//! # shophub-search: Search Coordinator
//!
//! Translates a live, keystroke-driven query string into a debounced,
//! cancellation-guarded asynchronous catalog lookup with a deterministic
//! local fallback.
//!
//! ## Query Cycle State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Search Query Cycle                                   │
//! │                                                                         │
//! │            set_query("")                set_query(text)                 │
//! │  ┌──────────┐◄───────────────┌──────────────────┐                      │
//! │  │   Idle   │                │     Pending      │  isSearching = true  │
//! │  │ results=[]│───────────────►│  debounce timer  │  (set immediately,  │
//! │  └──────────┘  set_query(text)│     running      │   not after delay)  │
//! │                               └────────┬─────────┘                      │
//! │            any further keystroke ──────┤ (timer cancelled,             │
//! │                                        │  cycle restarts)              │
//! │                                        ▼ timer elapsed                 │
//! │                               ┌──────────────────┐                     │
//! │                               │    In-flight     │  lookup issued for  │
//! │                               │  catalog lookup  │  the query captured │
//! │                               └────────┬─────────┘  at dispatch time   │
//! │                            ┌───────────┴───────────┐                   │
//! │                success     ▼                       ▼ failure           │
//! │               ┌─────────────────┐     ┌──────────────────────┐         │
//! │               │    Resolved     │     │      Fallback        │         │
//! │               │ install results │     │ filter cached catalog│         │
//! │               └─────────────────┘     └──────────────────────┘         │
//! │                                                                         │
//! │  STALENESS GUARD: every set_query bumps a generation counter; a        │
//! │  lookup may only install results while its generation is still the     │
//! │  latest. Superseded resolutions return without touching state.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`coordinator`] - The coordinator itself (debounce, staleness, fallback)
//! - [`source`] - The injected catalog boundary and an in-memory implementation
//! - [`filter`] - The local fallback filter
//! - [`error`] - Catalog error types

pub mod coordinator;
pub mod error;
pub mod filter;
pub mod source;

pub use coordinator::{SearchConfig, SearchCoordinator, SearchState};
pub use error::{CatalogError, CatalogResult};
pub use filter::filter_catalog;
pub use source::{CatalogSource, ListOptions, ProductPage, StaticCatalog};
