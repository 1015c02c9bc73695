// Section rewriting and content generation helpers.
// Same soft-failure contract as analysis: generator errors never reach the client.

pub mod handlers;
pub mod prompts;
pub mod rewriter;
