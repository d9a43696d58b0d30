//! Tests for sprite detection and extraction

mod segmenter_tests;
mod extractor_tests;
