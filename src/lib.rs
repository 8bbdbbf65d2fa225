//! Question answering over a Turkish cookbook: retrieval from the embedded
//! PDF first, web search when the cookbook has no answer.

pub mod api;
pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
mod test_support;
