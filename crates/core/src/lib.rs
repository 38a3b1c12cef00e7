#![deny(unsafe_code)]
//! Core types for the mondrian composition generator.
//!
//! Provides the recursive [`Composer`], the [`Region`] and [`Primitive`] data
//! model, named-color [`Palette`]s, the [`RandomSource`] seam with its
//! `Xorshift64` implementation, [`ComposerConfig`] tunables, and [`Seed`]
//! recipes for reproducible runs.

pub mod color;
pub mod composer;
pub mod config;
pub mod error;
pub mod palette;
pub mod primitive;
pub mod prng;
pub mod region;
pub mod seed;

pub use color::{Color, NamedColor};
pub use composer::{compose, Branch, ComposeEvent, Composer, Emission, Leaf, LeafKind};
pub use config::{ComposerConfig, MIN_SIDE, OVERSIZE_THRESHOLD, PER_PRIMITIVE_DELAY};
pub use error::MondrianError;
pub use palette::Palette;
pub use primitive::Primitive;
pub use prng::{RandomSource, Xorshift64};
pub use region::Region;
pub use seed::Seed;
