// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Generative and vision provider adapters (Anti-Corruption Layer).
//
// Each adapter translates between the domain interfaces and a vendor API.

pub mod gemini;
pub mod openai;
pub mod ollama;
pub mod registry;

pub use registry::ProviderRegistry;
