// End-to-end tests for the batch pipeline
//
// These tests run the real Google TTS repository against an httpmock server
// standing in for translate.google.com, and write clips into a temporary
// output root. Each test gets its own mock server and directory, so tests
// run in parallel without conflicts.

mod test_batch;
mod test_google_tts;
