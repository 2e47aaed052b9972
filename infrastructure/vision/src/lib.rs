pub mod client;
pub mod gemini;
pub mod openai;
