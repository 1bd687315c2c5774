//! LLM client implementations.

pub mod openai_compat;
