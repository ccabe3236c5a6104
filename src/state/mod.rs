// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search bookkeeping that lives next to the context.

pub mod statistics;

pub use statistics::{Counters, Statistics};
