// Test modules for the ai-stats crate
//
// Each source module has a matching test file focused on observable
// behavior. Anything that needs a live HTTP server lives in the crate's
// tests/ directory instead.

// Shared fixtures
pub mod helpers;

pub mod decode;
pub mod envelope;
pub mod error;
