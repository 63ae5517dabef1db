//! # Analyzer
//!
//! Client side of the personality visual analyzer.
//!
//! ## Flow
//!
//! - User picks a photo, a local `data:` preview is made right away
//! - On submit the photo goes straight to the inference endpoint as field `image`
//! - The `scores` object of the answer is rounded trait by trait
//! - Ring shows the Overall Score, one bar per trait in response order
//!
//! ## Overall Score
//!
//! Mean of the rounded trait values, rounded again. For
//! `{"confidence": 87.6, "dominance": 42.1}` that is `round((88 + 42) / 2) = 65`.
//! No traits means 0.
//!
//! ## Rendering
//!
//! [`state::Analyzer`] pushes every change to an [`state::Observer`].
//! - [`terminal::TerminalObserver`]: animated bars for the CLI
//! - [`html::render_page`]: the whole page as one HTML document
//!
//! ## Endpoint
//!
//! Defaults to the hosted model. The local upload proxy works too:
//! ```sh
//! analyzer face.jpg --endpoint http://localhost:3000/api/image-analyze
//! ```
//! The proxy relays errors as `{"error": ...}` with a failing status, which shows up
//! here as an empty score set.

pub mod error;
pub mod html;
pub mod state;
pub mod terminal;
pub mod upload;
pub mod view;
