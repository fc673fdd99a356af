// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integration tests for `text_atlas`.
//!
//! - The `util` module holds the block-drawing surface shared by every test.
//! - Tests run against the in-memory [`CpuTextureDevice`], so the atlas pages
//!   can be inspected pixel by pixel.
//!
//! [`CpuTextureDevice`]: text_atlas::renderers::cpu::CpuTextureDevice

#![allow(missing_docs, reason = "we don't need docs for testing")]

mod util;
