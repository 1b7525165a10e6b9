//! Askama templates for the calculator page.

use askama::Template;

use crate::domain::CANONICAL_DISTANCES_KM;

/// Distance pre-selected on a fresh page.
const DEFAULT_DISTANCE_KM: f64 = 200.0;

/// Number of control rows the page starts with.
const CONTROL_ROWS: usize = 20;

/// Calculator page.
#[derive(Template)]
#[template(path = "calc.html")]
pub struct CalcTemplate {
    pub distances: Vec<DistanceOption>,
    pub default_start: String,
    pub rows: Vec<usize>,
}

impl CalcTemplate {
    /// Page with the official distances and an empty control table.
    pub fn new(default_start: impl Into<String>) -> Self {
        let distances = CANONICAL_DISTANCES_KM
            .iter()
            .map(|&km| DistanceOption {
                km: km as u32,
                selected: km == DEFAULT_DISTANCE_KM,
            })
            .collect();

        Self {
            distances,
            default_start: default_start.into(),
            rows: (0..CONTROL_ROWS).collect(),
        }
    }
}

/// Not-found page.
#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub path: String,
}

/// One entry of the brevet distance selector.
#[derive(Debug, Clone)]
pub struct DistanceOption {
    pub km: u32,
    pub selected: bool,
}
