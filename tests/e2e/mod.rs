// End-to-end tests for the voice batch API
//
// Each test boots the real router on an ephemeral port together with a mock
// T2A upstream. The mock is scripted per test, so tests run in parallel
// without sharing state.

mod test_batch;
mod test_health;
