//! End-to-end tests for the OTA client and the `ota-update` / `ota-upload` programs. See
//! `tests/e2e`.
