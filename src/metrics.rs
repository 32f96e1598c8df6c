//! Prometheus metrics registry and instruments.
//!
//! This module is framework-agnostic and can be used from any layer.

use lazy_static::lazy_static;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("kidspost_http_requests_total", "Total number of HTTP requests"),
        &["method", "endpoint", "status"]
    ).expect("metric can be created");
    pub static ref HTTP_REQUEST_DURATION_SECONDS: prometheus::HistogramVec = prometheus::HistogramVec::new(
        HistogramOpts::new(
            "kidspost_http_request_duration_seconds",
            "HTTP request duration in seconds"
        ).buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["method", "endpoint"]
    ).expect("metric can be created");

    // Generation Metrics
    pub static ref GENERATIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("kidspost_generations_total", "Total number of newspaper generation requests"),
        &["status"]
    ).expect("metric can be created");
    pub static ref GENERATION_DURATION_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "kidspost_generation_duration_seconds",
            "End-to-end newspaper generation duration in seconds"
        ).buckets(vec![1.0, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0])
    ).expect("metric can be created");
    pub static ref IMAGE_FALLBACKS_TOTAL: IntCounter = IntCounter::new(
        "kidspost_image_fallbacks_total",
        "Total number of article illustrations replaced by the placeholder"
    ).expect("metric can be created");

    // Compression Metrics
    pub static ref IMAGE_COMPRESSIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("kidspost_image_compressions_total", "Total number of image compression attempts"),
        &["status"]
    ).expect("metric can be created");

    // Error Metrics
    pub static ref ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("kidspost_errors_total", "Total number of errors"),
        &["error_type", "endpoint"]
    ).expect("metric can be created");
}

/// Initialize metrics registry.
pub fn init_metrics() {
    REGISTRY
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("HTTP_REQUESTS_TOTAL can be registered");
    REGISTRY
        .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
        .expect("HTTP_REQUEST_DURATION_SECONDS can be registered");
    REGISTRY
        .register(Box::new(GENERATIONS_TOTAL.clone()))
        .expect("GENERATIONS_TOTAL can be registered");
    REGISTRY
        .register(Box::new(GENERATION_DURATION_SECONDS.clone()))
        .expect("GENERATION_DURATION_SECONDS can be registered");
    REGISTRY
        .register(Box::new(IMAGE_FALLBACKS_TOTAL.clone()))
        .expect("IMAGE_FALLBACKS_TOTAL can be registered");
    REGISTRY
        .register(Box::new(IMAGE_COMPRESSIONS_TOTAL.clone()))
        .expect("IMAGE_COMPRESSIONS_TOTAL can be registered");
    REGISTRY
        .register(Box::new(ERRORS_TOTAL.clone()))
        .expect("ERRORS_TOTAL can be registered");

    tracing::info!("Metrics registry initialized");
}
