// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in backends.

pub mod flatvec;
pub mod quadtree;
