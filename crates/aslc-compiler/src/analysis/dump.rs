//! Test-only helpers for inspecting an analysis.
